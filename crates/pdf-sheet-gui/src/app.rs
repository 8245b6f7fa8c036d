use eframe::egui;
use pdf_async_runtime::{Candidate, SheetCommand, SheetUpdate};
use pdf_image_sheet::{
    DirectorySink, Document, DocumentSink, FileSink, JsonCounterStore, REQUIRED_COUNT,
    SelectionState, SheetConfig, SheetSession,
};
use std::path::PathBuf;
use std::time::Instant;
use tokio::sync::mpsc;

use crate::logger::AppLogger;
use crate::views::{PreviewTextures, UiAction, show_picker, show_selection};

/// Extensions offered by the file dialog
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff"];

#[derive(Clone)]
struct ProgressState {
    operation: String,
    current: usize,
    total: usize,
}

pub struct SheetApp {
    session: SheetSession<JsonCounterStore>,
    sink: DirectorySink,
    /// Most recent document, kept for "Save again"
    last_document: Option<Document>,
    status: String,

    // Async infrastructure
    command_tx: mpsc::UnboundedSender<SheetCommand>,
    update_rx: mpsc::UnboundedReceiver<SheetUpdate>,

    progress: Option<ProgressState>,
    textures: PreviewTextures,
    hovering_files: bool,

    logger: AppLogger,
    show_log: bool,

    _tokio_handle: tokio::runtime::Handle,
}

impl SheetApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        tokio_handle: tokio::runtime::Handle,
        config: SheetConfig,
        logger: AppLogger,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        tokio_handle.spawn(crate::worker::worker_task(command_rx, update_tx));

        let session = SheetSession::new(config.counter_store());
        log::info!(
            "Saving to {}, next document {}",
            config.output_dir.display(),
            session.next_document_name()
        );

        Self {
            session,
            sink: config.sink(),
            last_document: None,
            status: String::new(),
            command_tx,
            update_rx,
            progress: None,
            textures: PreviewTextures::default(),
            hovering_files: false,
            logger,
            show_log: false,
            _tokio_handle: tokio_handle,
        }
    }

    fn send(&mut self, command: SheetCommand) {
        if self.command_tx.send(command).is_err() {
            // A job inside the failed command is dropped here, releasing the
            // in-flight flag.
            self.status = "Error: background worker stopped".to_string();
        }
    }

    fn load_paths(&mut self, paths: Vec<PathBuf>) {
        if paths.is_empty() {
            return;
        }
        self.status = format!("Reading {} file(s)...", paths.len());
        self.send(SheetCommand::LoadCandidates { paths });
    }

    fn accept_candidates(&mut self, candidates: Vec<Candidate>) {
        let images = candidates.iter().filter(|c| c.is_image()).count();
        let state = self.session.selection_mut().submit(candidates);
        self.status = match state {
            _ if images == 0 => "No images among the chosen files".to_string(),
            SelectionState::Overflow => format!(
                "{} images offered; pick {}",
                self.session.selection().pool().len(),
                REQUIRED_COUNT
            ),
            _ => format!("Added {} image(s)", images),
        };
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let (dropped, hovering) = ctx.input(|i| {
            (
                i.raw.dropped_files.clone(),
                !i.raw.hovered_files.is_empty(),
            )
        });
        self.hovering_files = hovering;

        if dropped.is_empty() || self.session.is_generating() {
            return;
        }

        // Files with a path go through the worker; in-memory drops are
        // already loaded.
        let mut paths = Vec::new();
        let mut in_memory = Vec::new();
        for file in dropped {
            if let Some(path) = file.path {
                paths.push(path);
            } else if let Some(bytes) = file.bytes {
                in_memory.push(Candidate::new(file.name, file.mime, bytes));
            }
        }

        if !in_memory.is_empty() {
            self.accept_candidates(in_memory);
        }
        self.load_paths(paths);
    }

    fn process_updates(&mut self, ctx: &egui::Context) {
        while let Ok(update) = self.update_rx.try_recv() {
            match update {
                SheetUpdate::Progress {
                    operation,
                    current,
                    total,
                } => {
                    self.progress = Some(ProgressState {
                        operation,
                        current,
                        total,
                    });
                    ctx.request_repaint();
                }
                SheetUpdate::CandidatesLoaded { candidates } => {
                    self.progress = None;
                    self.accept_candidates(candidates);
                }
                SheetUpdate::Generated { completed } => {
                    self.progress = None;
                    self.status = match self.session.finish_generation(completed, &self.sink) {
                        Ok(report) => {
                            let status = match &report.saved_to {
                                Some(path) => format!(
                                    "Generated {} → {}",
                                    report.document.name,
                                    path.display()
                                ),
                                None => format!(
                                    "Generated {} but could not save it; use Save again",
                                    report.document.name
                                ),
                            };
                            self.last_document = Some(report.document);
                            status
                        }
                        Err(e) => format!("Failed to generate PDF: {e}"),
                    };
                }
                SheetUpdate::Error { message } => {
                    self.status = format!("Error: {message}");
                    self.progress = None;
                }
            }
        }
    }

    fn apply(&mut self, action: UiAction) {
        let result = match action {
            UiAction::PickFiles => {
                if let Some(paths) = rfd::FileDialog::new()
                    .add_filter("Images", IMAGE_EXTENSIONS)
                    .pick_files()
                {
                    self.load_paths(paths);
                }
                Ok(())
            }
            UiAction::Remove(index) => self.session.selection_mut().remove(index).map(|asset| {
                self.status = format!("Removed {}", asset.name);
            }),
            UiAction::Generate => self.session.begin_generation().map(|job| {
                self.status = format!("Generating {}...", job.document_name());
                self.send(SheetCommand::Generate { job });
            }),
            UiAction::SaveAgain => self.save_again(),
            UiAction::ClearAll => {
                self.session.selection_mut().clear_all();
                self.status.clear();
                Ok(())
            }
            UiAction::Toggle(index) => self.session.selection_mut().toggle(index).map(|_| ()),
            UiAction::Confirm => self.session.selection_mut().confirm().map(|_| {
                self.status = "Selection confirmed".to_string();
            }),
            UiAction::Cancel => self.session.selection_mut().cancel().map(|_| {
                self.status = "Selection cancelled".to_string();
            }),
        };

        if let Err(e) = result {
            self.status = format!("Error: {e}");
        }
    }

    /// Write the last document to a path picked by the user
    fn save_again(&mut self) -> pdf_image_sheet::Result<()> {
        let Some(document) = self.last_document.as_ref() else {
            return Ok(());
        };
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(&document.name)
            .add_filter("PDF", &["pdf"])
            .save_file()
        else {
            return Ok(());
        };

        if let Some(saved) = FileSink::new(path).deliver(document)? {
            self.status = format!("Saved {} → {}", document.name, saved.display());
        }
        Ok(())
    }

    fn show_log_window(&mut self, ctx: &egui::Context) {
        egui::Window::new("Log")
            .open(&mut self.show_log)
            .default_size([480.0, 240.0])
            .show(ctx, |ui| {
                if ui.button("Clear").clicked() {
                    self.logger.clear();
                }
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for entry in self.logger.get_entries() {
                            ui.monospace(entry.display_line())
                                .on_hover_text(&entry.target);
                        }
                    });
            });
    }
}

impl eframe::App for SheetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        self.process_updates(ctx);

        // Textures follow the selection's preview handles.
        let revoked = self.session.selection_mut().take_revoked();
        self.textures.release(revoked);

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            if let Some(ref progress) = self.progress {
                ui.label(&progress.operation);
                ui.add(
                    egui::ProgressBar::new(progress.current as f32 / progress.total.max(1) as f32)
                        .show_percentage(),
                );
                ctx.request_repaint();
            }
            ui.horizontal(|ui| {
                ui.toggle_value(&mut self.show_log, "📜 Log");
                if !self.status.is_empty() {
                    ui.label(&self.status);
                }
            });
        });

        let actions = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if self.session.selection().is_picking() {
                    show_selection(ui, self.session.selection(), &mut self.textures)
                } else {
                    show_picker(
                        ui,
                        &self.session,
                        &mut self.textures,
                        self.hovering_files,
                        self.last_document.as_ref(),
                    )
                }
            })
            .inner;

        for action in actions {
            self.apply(action);
        }

        self.show_log_window(ctx);

        // Wake up to hide the "cleared" notice once it expires.
        if let Some(remaining) = self
            .session
            .selection()
            .cleared_notice_remaining(Instant::now())
        {
            ctx.request_repaint_after(remaining);
        }
        if self.session.is_generating() {
            ctx.request_repaint();
        }
    }
}
