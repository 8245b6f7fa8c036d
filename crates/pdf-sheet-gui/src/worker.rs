use pdf_async_runtime::{SheetCommand, SheetUpdate};
use tokio::sync::mpsc;

use crate::handlers;

/// Async worker task that processes sheet commands and sends updates.
///
/// Commands run one at a time in arrival order; each file load stays its own
/// batch since batch size decides between direct add and manual pick.
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<SheetCommand>,
    update_tx: mpsc::UnboundedSender<SheetUpdate>,
) {
    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &update_tx).await;
    }
    log::debug!("Worker stopped: UI side closed");
}

async fn process_command(cmd: SheetCommand, update_tx: &mpsc::UnboundedSender<SheetUpdate>) {
    match cmd {
        SheetCommand::LoadCandidates { paths } => {
            handlers::candidates::handle_load(paths, update_tx).await;
        }
        SheetCommand::Generate { job } => {
            handlers::generate::handle_generate(job, update_tx).await;
        }
    }
}
