use pdf_async_runtime::{GenerationJob, SheetUpdate};
use pdf_image_sheet::PrintPdfEncoder;
use tokio::sync::mpsc;

pub async fn handle_generate(job: GenerationJob, update_tx: &mpsc::UnboundedSender<SheetUpdate>) {
    let _ = update_tx.send(SheetUpdate::Progress {
        operation: format!("Generating {}", job.document_name()),
        current: 0,
        total: job.image_count(),
    });

    let completed = job.run::<PrintPdfEncoder>().await;

    // If the UI is gone the job is dropped here, which releases the flag.
    let _ = update_tx.send(SheetUpdate::Generated { completed });
}
