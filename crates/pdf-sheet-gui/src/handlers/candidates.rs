use pdf_async_runtime::{Candidate, SheetUpdate};
use std::path::PathBuf;
use tokio::sync::mpsc;

pub async fn handle_load(paths: Vec<PathBuf>, update_tx: &mpsc::UnboundedSender<SheetUpdate>) {
    let total = paths.len();
    let mut candidates = Vec::with_capacity(total);

    for (i, path) in paths.iter().enumerate() {
        let _ = update_tx.send(SheetUpdate::Progress {
            operation: format!("Reading {}", path.display()),
            current: i,
            total,
        });
        match Candidate::from_path(path).await {
            Ok(candidate) => candidates.push(candidate),
            Err(e) => {
                // One unreadable file does not spoil the batch.
                log::warn!("Skipping {}: {}", path.display(), e);
            }
        }
    }

    if candidates.is_empty() && total > 0 {
        let _ = update_tx.send(SheetUpdate::Error {
            message: format!("None of the {} files could be read", total),
        });
        return;
    }

    let _ = update_tx.send(SheetUpdate::CandidatesLoaded { candidates });
}
