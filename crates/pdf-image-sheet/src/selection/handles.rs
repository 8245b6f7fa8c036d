//! Preview handle bookkeeping
//!
//! Every asset shown to the user gets one handle when it enters the pool or
//! the selection, and gives it back exactly once when nothing references it
//! anymore. Revoked handles are queued so the front-end can free whatever it
//! attached to them.

use std::collections::HashMap;

use crate::types::{AssetId, PreviewHandle};

#[derive(Debug, Default)]
pub struct PreviewHandles {
    next: u64,
    live: HashMap<AssetId, PreviewHandle>,
    revoked: Vec<(AssetId, PreviewHandle)>,
}

impl PreviewHandles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `asset`, creating one if it has none yet
    pub fn acquire(&mut self, asset: AssetId) -> PreviewHandle {
        if let Some(handle) = self.live.get(&asset) {
            return *handle;
        }
        self.next += 1;
        let handle = PreviewHandle(self.next);
        self.live.insert(asset, handle);
        handle
    }

    /// Revoke the handle of `asset`. Returns false if it had none.
    pub fn revoke(&mut self, asset: AssetId) -> bool {
        match self.live.remove(&asset) {
            Some(handle) => {
                self.revoked.push((asset, handle));
                true
            }
            None => false,
        }
    }

    /// Revoke every live handle
    pub fn revoke_all(&mut self) -> usize {
        let mut drained: Vec<_> = self.live.drain().collect();
        drained.sort_by_key(|(asset, _)| *asset);
        let count = drained.len();
        self.revoked.extend(drained);
        count
    }

    pub fn get(&self, asset: AssetId) -> Option<PreviewHandle> {
        self.live.get(&asset).copied()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Drain the revocations recorded since the last call
    pub fn take_revoked(&mut self) -> Vec<(AssetId, PreviewHandle)> {
        std::mem::take(&mut self.revoked)
    }
}
