use std::path::PathBuf;

// Re-export types from the library crate
pub use pdf_image_sheet::{Candidate, CompletedJob, GenerationJob};

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum SheetCommand {
    /// Read picked or dropped files into candidates
    LoadCandidates { paths: Vec<PathBuf> },
    /// Decode and encode a snapshot of the selection
    Generate { job: GenerationJob },
}

/// Updates sent from worker to UI
#[derive(Debug)]
pub enum SheetUpdate {
    Progress {
        operation: String,
        current: usize,
        total: usize,
    },
    CandidatesLoaded {
        candidates: Vec<Candidate>,
    },
    /// Generation ran; success or failure is inside. Must be handed back to
    /// the session to release the in-flight flag and commit.
    Generated {
        completed: CompletedJob,
    },
    Error {
        message: String,
    },
}
