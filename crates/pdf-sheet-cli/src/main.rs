use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use pdf_image_sheet::{
    PageGeometry, PrintPdfEncoder, REQUIRED_COUNT, SelectionState, SheetConfig, SheetSession,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfsheet", about = "Compose images into a single-page PDF sheet", version)]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a sheet from exactly three images
    Generate {
        /// Input images; non-image files are ignored
        #[arg(required = true, num_args = 1..)]
        images: Vec<PathBuf>,

        /// When more than three images are given, the 1-based positions to
        /// use, in column order (e.g. --pick 4,1,2)
        #[arg(long, value_delimiter = ',')]
        pick: Vec<usize>,

        /// Directory to save the PDF into (overrides config)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Counter file (overrides config)
        #[arg(long)]
        counter_file: Option<PathBuf>,
    },

    /// Show the document counter
    Counter {
        /// Counter file (overrides config)
        #[arg(long)]
        counter_file: Option<PathBuf>,
    },

    /// Print where each image lands on the page
    Layout,

    /// Show the effective configuration
    Config {
        /// Write the defaults to the config file
        #[arg(long)]
        init: bool,
    },
}

async fn load_config(path: Option<&PathBuf>) -> Result<(SheetConfig, Option<PathBuf>)> {
    let path = path.cloned().or_else(SheetConfig::default_path);
    let config = match &path {
        Some(path) => SheetConfig::load_or_default(path)
            .await
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SheetConfig::default(),
    };
    Ok((config, path))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let (mut config, config_path) = load_config(cli.config.as_ref()).await?;

    match cli.command {
        Commands::Generate {
            images,
            pick,
            output_dir,
            counter_file,
        } => {
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            if let Some(file) = counter_file {
                config.counter_path = file;
            }
            config.validate()?;

            let candidates = pdf_image_sheet::load_candidates(&images).await?;
            let mut session = SheetSession::new(config.counter_store());

            match session.selection_mut().submit(candidates) {
                SelectionState::Ready => {
                    if !pick.is_empty() {
                        log::warn!("--pick ignored: exactly {} images given", REQUIRED_COUNT);
                    }
                }
                SelectionState::Overflow => {
                    let pool = session.selection().pool().len();
                    if pick.len() != REQUIRED_COUNT {
                        bail!(
                            "{} images given; choose {} of them with --pick (1..={})",
                            pool,
                            REQUIRED_COUNT,
                            pool
                        );
                    }
                    for position in pick {
                        let index = position
                            .checked_sub(1)
                            .with_context(|| "--pick positions start at 1".to_string())?;
                        session.selection_mut().toggle(index)?;
                    }
                    session.selection_mut().confirm()?;
                }
                SelectionState::Empty => bail!("None of the inputs is an image"),
                SelectionState::Direct(n) => {
                    bail!("Need exactly {} images, got {}", REQUIRED_COUNT, n)
                }
            }

            for (column, asset) in session.selection().selected().iter().enumerate() {
                log::info!("Column {}: {}", column + 1, asset.name);
            }

            let sink = config.sink();
            let report = session.generate::<PrintPdfEncoder, _>(&sink).await?;
            match report.saved_to {
                Some(path) => println!("Generated {} → {}", report.document.name, path.display()),
                None => println!(
                    "Generated {} but could not save it to {}",
                    report.document.name,
                    config.output_dir.display()
                ),
            }
        }

        Commands::Counter { counter_file } => {
            if let Some(file) = counter_file {
                config.counter_path = file;
            }
            let session = SheetSession::new(config.counter_store());
            println!("Counter: {}", session.counter());
            println!("  Next document: {}", session.next_document_name());
            println!("  Stored in: {}", config.counter_path.display());
        }

        Commands::Layout => {
            let geometry = PageGeometry::REFERENCE;
            println!(
                "Page: {} x {} mm ({:?})",
                geometry.page_width_mm, geometry.page_height_mm, geometry.orientation()
            );
            println!(
                "  Column width: {:.2} mm",
                pdf_image_sheet::column_width(geometry.columns, &geometry)
            );
            for (i, rect) in pdf_image_sheet::placements(geometry.columns, &geometry)
                .iter()
                .enumerate()
            {
                println!(
                    "  Image {}: x={:.3} y={:.3} w={:.1} h={:.1}",
                    i + 1,
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height
                );
            }
        }

        Commands::Config { init } => {
            if init {
                let Some(path) = config_path else {
                    bail!("No config location available; pass --config");
                };
                config.save(&path).await?;
                println!("Wrote {}", path.display());
            }
            println!("Output directory: {}", config.output_dir.display());
            println!("Counter file: {}", config.counter_path.display());
        }
    }

    Ok(())
}
