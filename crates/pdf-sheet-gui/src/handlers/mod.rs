pub mod candidates;
pub mod generate;
