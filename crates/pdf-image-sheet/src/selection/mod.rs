//! Image selection state machine
//!
//! Images enter either directly into the selection (small batches) or into a
//! pool of candidates the user picks from by hand (batches larger than the
//! sheet holds). The machine knows nothing about where candidates come from.
//!
//! ```text
//!  Empty ──submit──▶ Direct(k) ──submit──▶ Ready
//!    │                  │                    │
//!    └─────── submit (batch > REQUIRED_COUNT) ┴──▶ Overflow
//!                                                 │  toggle
//!                             confirm / cancel ◀──┘
//! ```

mod handles;

pub use handles::PreviewHandles;

use std::time::{Duration, Instant};

use crate::constants::{CLEARED_NOTICE_TTL, REQUIRED_COUNT};
use crate::types::{AssetId, Candidate, ImageAsset, PreviewHandle, Result, SheetError};

/// Observable state of the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    /// Nothing selected
    Empty,
    /// Some images selected directly, fewer than required
    Direct(usize),
    /// More candidates offered than fit; the user picks by hand
    Overflow,
    /// Exactly the required number selected
    Ready,
}

/// Result of toggling a pool candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// Selection full and candidate not in it
    Ignored,
}

#[derive(Debug, Default)]
pub struct SelectionMachine {
    selected: Vec<ImageAsset>,
    pool: Vec<ImageAsset>,
    picking: bool,
    handles: PreviewHandles,
    next_id: u64,
    cleared_at: Option<Instant>,
}

impl SelectionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        if self.picking {
            return SelectionState::Overflow;
        }
        match self.selected.len() {
            0 => SelectionState::Empty,
            REQUIRED_COUNT => SelectionState::Ready,
            n => SelectionState::Direct(n),
        }
    }

    /// Offer a batch of candidates.
    ///
    /// Non-images are dropped. A batch with more images than the sheet holds
    /// replaces the pool and switches to manual picking, leaving the current
    /// selection alone. Smaller batches are appended to the selection and
    /// whatever does not fit is discarded.
    pub fn submit(&mut self, candidates: impl IntoIterator<Item = Candidate>) -> SelectionState {
        let images: Vec<Candidate> = candidates.into_iter().filter(Candidate::is_image).collect();

        if images.is_empty() {
            return self.state();
        }

        if images.len() > REQUIRED_COUNT {
            log::debug!("{} candidates offered, entering manual pick", images.len());
            let pool: Vec<ImageAsset> = images.into_iter().map(|c| self.accept(c)).collect();
            let previous = std::mem::replace(&mut self.pool, pool);
            self.picking = true;
            self.release_unreferenced(previous.iter().map(|a| a.id));
        } else {
            let room = REQUIRED_COUNT.saturating_sub(self.selected.len());
            if images.len() > room {
                log::debug!("Dropping {} images beyond capacity", images.len() - room);
            }
            for candidate in images.into_iter().take(room) {
                let asset = self.accept(candidate);
                self.selected.push(asset);
            }
        }

        self.state()
    }

    /// Select or deselect pool candidate `index`. Candidates are matched
    /// against the selection by name.
    pub fn toggle(&mut self, index: usize) -> Result<ToggleOutcome> {
        if !self.picking {
            return Err(SheetError::NotPicking);
        }
        let candidate = self
            .pool
            .get(index)
            .ok_or(SheetError::UnknownCandidate(index))?;

        if self.selected.iter().any(|a| a.name == candidate.name) {
            let name = candidate.name.clone();
            let removed: Vec<AssetId> = self
                .selected
                .iter()
                .filter(|a| a.name == name)
                .map(|a| a.id)
                .collect();
            self.selected.retain(|a| a.name != name);
            self.release_unreferenced(removed);
            Ok(ToggleOutcome::Removed)
        } else if self.selected.len() < REQUIRED_COUNT {
            let asset = candidate.clone();
            self.selected.push(asset);
            Ok(ToggleOutcome::Added)
        } else {
            Ok(ToggleOutcome::Ignored)
        }
    }

    /// Accept the manual pick. Requires exactly `REQUIRED_COUNT` selected;
    /// otherwise nothing changes.
    pub fn confirm(&mut self) -> Result<SelectionState> {
        if self.selected.len() != REQUIRED_COUNT {
            return Err(SheetError::InvalidSelectionCount {
                expected: REQUIRED_COUNT,
                actual: self.selected.len(),
            });
        }
        if self.picking {
            self.leave_pick();
        }
        Ok(self.state())
    }

    /// Abandon the manual pick, keeping whatever is selected
    pub fn cancel(&mut self) -> Result<SelectionState> {
        if !self.picking {
            return Err(SheetError::NotPicking);
        }
        self.leave_pick();
        Ok(self.state())
    }

    /// Drop the selected image at `index`
    pub fn remove(&mut self, index: usize) -> Result<ImageAsset> {
        if index >= self.selected.len() {
            return Err(SheetError::IndexOutOfRange(index));
        }
        let asset = self.selected.remove(index);
        self.release_unreferenced([asset.id]);
        Ok(asset)
    }

    /// Empty the selection and any pending pool, revoking every preview.
    /// Raises the "cleared" notice.
    pub fn clear_all(&mut self) -> usize {
        let cleared = self.selected.len();
        self.selected.clear();
        self.pool.clear();
        self.picking = false;
        self.handles.revoke_all();
        self.cleared_at = Some(Instant::now());
        log::info!("Cleared {} selected images", cleared);
        cleared
    }

    /// Whether the "cleared" notice should still be shown at `now`
    pub fn cleared_notice_active(&self, now: Instant) -> bool {
        self.cleared_notice_remaining(now).is_some()
    }

    /// Time left before the "cleared" notice expires
    pub fn cleared_notice_remaining(&self, now: Instant) -> Option<Duration> {
        let raised = self.cleared_at?;
        CLEARED_NOTICE_TTL
            .checked_sub(now.saturating_duration_since(raised))
            .filter(|left| !left.is_zero())
    }

    pub fn selected(&self) -> &[ImageAsset] {
        &self.selected
    }

    pub fn pool(&self) -> &[ImageAsset] {
        &self.pool
    }

    pub fn is_picking(&self) -> bool {
        self.picking
    }

    /// Whether an image with this name is currently selected
    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|a| a.name == name)
    }

    /// How many more images are needed for a sheet
    pub fn remaining(&self) -> usize {
        REQUIRED_COUNT.saturating_sub(self.selected.len())
    }

    pub fn preview(&self, asset: AssetId) -> Option<PreviewHandle> {
        self.handles.get(asset)
    }

    pub fn live_previews(&self) -> usize {
        self.handles.live_count()
    }

    /// Previews revoked since the last call
    pub fn take_revoked(&mut self) -> Vec<(AssetId, PreviewHandle)> {
        self.handles.take_revoked()
    }

    fn accept(&mut self, candidate: Candidate) -> ImageAsset {
        self.next_id += 1;
        let id = AssetId(self.next_id);
        self.handles.acquire(id);
        ImageAsset::from_candidate(id, candidate)
    }

    fn leave_pick(&mut self) {
        self.picking = false;
        let pool = std::mem::take(&mut self.pool);
        self.release_unreferenced(pool.iter().map(|a| a.id));
    }

    fn release_unreferenced(&mut self, ids: impl IntoIterator<Item = AssetId>) {
        for id in ids {
            let referenced =
                self.selected.iter().any(|a| a.id == id) || self.pool.iter().any(|a| a.id == id);
            if !referenced {
                self.handles.revoke(id);
            }
        }
    }
}
