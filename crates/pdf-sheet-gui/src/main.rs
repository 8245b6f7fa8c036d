#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use pdf_image_sheet::SheetConfig;

mod app;
mod handlers;
mod logger;
mod views;
mod worker;

use logger::AppLogger;

/// Records kept for the log window
const LOG_CAPACITY: usize = 200;

async fn load_config() -> SheetConfig {
    let Some(path) = SheetConfig::default_path() else {
        return SheetConfig::default();
    };
    match SheetConfig::load_or_default(&path).await {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Ignoring config {}: {}", path.display(), e);
            SheetConfig::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    let logger = AppLogger::new(LOG_CAPACITY, log::Level::Info);
    if let Err(e) = logger.clone().init() {
        eprintln!("Logging disabled: {e}");
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let config = runtime.block_on(load_config());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 680.0])
            .with_title("Image Sheet")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let handle = runtime.handle().clone();
    eframe::run_native(
        "Image Sheet",
        options,
        Box::new(move |cc| Ok(Box::new(app::SheetApp::new(cc, handle, config, logger)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    Ok(())
}
