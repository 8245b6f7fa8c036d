//! A selection, a counter and the generation lifecycle tied together.
//!
//! Generation runs in three phases so a GUI can push the slow middle part to
//! a worker:
//! - [`SheetSession::begin_generation`] checks the selection and takes the
//!   in-flight guard
//! - [`GenerationJob::run`] decodes and encodes
//! - [`SheetSession::finish_generation`] advances the counter, delivers the
//!   document and clears the selection
//!
//! [`SheetSession::generate`] runs all three for callers that can just await.

use std::path::PathBuf;

use crate::assembly::{CompletedJob, Document, GenerationJob, InFlight};
use crate::constants::REQUIRED_COUNT;
use crate::counter::{CounterStore, DocumentCounter};
use crate::delivery::DocumentSink;
use crate::encoder::PdfEncoder;
use crate::geometry::PageGeometry;
use crate::selection::{SelectionMachine, SelectionState};
use crate::types::{Result, SheetError};

/// What a successful generation left behind
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub document: Document,
    /// Where the sink put the document, if it says
    pub saved_to: Option<PathBuf>,
}

#[derive(Debug)]
pub struct SheetSession<S> {
    selection: SelectionMachine,
    counter: DocumentCounter<S>,
    geometry: PageGeometry,
    in_flight: InFlight,
}

impl<S: CounterStore> SheetSession<S> {
    pub fn new(store: S) -> Self {
        let counter = DocumentCounter::open(store);
        log::debug!("Session opened, next document {}", counter.next_name());
        Self {
            selection: SelectionMachine::new(),
            counter,
            geometry: PageGeometry::REFERENCE,
            in_flight: InFlight::new(),
        }
    }

    pub fn selection(&self) -> &SelectionMachine {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionMachine {
        &mut self.selection
    }

    pub fn state(&self) -> SelectionState {
        self.selection.state()
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Counter value the next document will be named after
    pub fn counter(&self) -> u32 {
        self.counter.current()
    }

    pub fn next_document_name(&self) -> String {
        self.counter.next_name()
    }

    pub fn counter_store(&self) -> &S {
        self.counter.store()
    }

    /// Shared view of the in-flight flag
    pub fn in_flight(&self) -> InFlight {
        self.in_flight.clone()
    }

    pub fn is_generating(&self) -> bool {
        self.in_flight.is_active()
    }

    pub fn can_generate(&self) -> bool {
        self.state() == SelectionState::Ready && !self.is_generating()
    }

    /// Check the selection and snapshot it into a job. Nothing changes on
    /// error.
    pub fn begin_generation(&mut self) -> Result<GenerationJob> {
        let count = self.selection.selected().len();
        if count == 0 {
            return Err(SheetError::EmptySelection);
        }
        if count != REQUIRED_COUNT {
            return Err(SheetError::InvalidSelectionCount {
                expected: REQUIRED_COUNT,
                actual: count,
            });
        }
        if self.selection.is_picking() {
            return Err(SheetError::PickPending);
        }

        let guard = self
            .in_flight
            .try_begin()
            .ok_or(SheetError::GenerationInProgress)?;

        Ok(GenerationJob::new(
            self.selection.selected().to_vec(),
            self.geometry,
            self.counter.current(),
            guard,
        ))
    }

    /// Commit a finished job.
    ///
    /// On success the counter moves forward, the document goes to `sink`
    /// and the selection is cleared, in that order. A failing sink is only
    /// logged; the selection is cleared regardless. On failure nothing
    /// changes and the error is returned. Either way the in-flight flag is
    /// released when this returns.
    pub fn finish_generation<D: DocumentSink>(
        &mut self,
        completed: CompletedJob,
        sink: &D,
    ) -> Result<GenerationReport> {
        let (outcome, _guard) = completed.into_parts();
        let document = outcome?;

        self.counter.advance()?;

        let saved_to = match sink.deliver(&document) {
            Ok(path) => path,
            Err(e) => {
                log::warn!("Failed to deliver {}: {}", document.name, e);
                None
            }
        };

        self.selection.clear_all();

        Ok(GenerationReport { document, saved_to })
    }

    /// Produce, deliver and clear in one go
    pub async fn generate<E: PdfEncoder, D: DocumentSink>(
        &mut self,
        sink: &D,
    ) -> Result<GenerationReport> {
        let job = self.begin_generation()?;
        let completed = job.run::<E>().await;
        self.finish_generation(completed, sink)
    }
}
