//! Sequential document counter
//!
//! The counter names produced documents and survives restarts through a
//! [`CounterStore`]. It only ever moves forward, one step per document.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::constants::{COUNTER_KEY, COUNTER_START, DOCUMENT_PREFIX};
use crate::types::{Result, SheetError};

/// Persistence slot for the counter (get/set contract)
pub trait CounterStore {
    /// Last persisted value, `None` if nothing was ever written
    fn load(&self) -> Result<Option<u32>>;
    fn store(&mut self, value: u32) -> Result<()>;
}

/// Document name for a counter value: `finaloutput.007.pdf`
pub fn document_name(counter: u32) -> String {
    format!("{DOCUMENT_PREFIX}.{counter:03}.pdf")
}

/// In-memory store, for tests and ephemeral sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryCounterStore {
    value: Option<u32>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u32) -> Self {
        Self { value: Some(value) }
    }

    pub fn value(&self) -> Option<u32> {
        self.value
    }
}

impl CounterStore for MemoryCounterStore {
    fn load(&self) -> Result<Option<u32>> {
        Ok(self.value)
    }

    fn store(&mut self, value: u32) -> Result<()> {
        self.value = Some(value);
        Ok(())
    }
}

/// Key/value JSON file holding the counter as a base-10 string:
/// `{"pdfFileCounter": "7"}`. Other keys in the file are preserved.
#[derive(Debug, Clone)]
pub struct JsonCounterStore {
    path: PathBuf,
}

impl JsonCounterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/pdf-image-sheet/counter.json`
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("pdf-image-sheet");
        path.push("counter.json");
        Some(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_slots(&self) -> Result<HashMap<String, String>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&bytes)
            .map_err(|e| SheetError::Counter(format!("Failed to parse {}: {}", self.path.display(), e)))
    }
}

impl CounterStore for JsonCounterStore {
    fn load(&self) -> Result<Option<u32>> {
        let slots = self.read_slots()?;
        Ok(slots.get(COUNTER_KEY).and_then(|raw| parse_counter(raw)))
    }

    fn store(&mut self, value: u32) -> Result<()> {
        // A corrupt file is overwritten rather than blocking the counter forever.
        let mut slots = self.read_slots().unwrap_or_default();
        slots.insert(COUNTER_KEY.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&slots)
            .map_err(|e| SheetError::Counter(format!("Failed to serialize counter: {}", e)))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

fn parse_counter(raw: &str) -> Option<u32> {
    match raw.trim().parse::<u32>() {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring unreadable counter value {:?}: {}", raw, e);
            None
        }
    }
}

/// Counter backed by a store, read once at startup
#[derive(Debug)]
pub struct DocumentCounter<S> {
    current: u32,
    store: S,
}

impl<S: CounterStore> DocumentCounter<S> {
    /// Read the persisted value, falling back to 1 when absent or unreadable
    pub fn open(store: S) -> Self {
        let current = match store.load() {
            Ok(Some(value)) => value,
            Ok(None) => COUNTER_START,
            Err(e) => {
                log::warn!("Failed to load document counter, starting at {}: {}", COUNTER_START, e);
                COUNTER_START
            }
        };
        Self { current, store }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    /// Name the next document will get
    pub fn next_name(&self) -> String {
        document_name(self.current)
    }

    /// Move one step forward and persist. The in-memory value only changes
    /// once the store accepted it.
    pub fn advance(&mut self) -> Result<u32> {
        let next = self
            .current
            .checked_add(1)
            .ok_or_else(|| SheetError::Counter("Counter overflow".to_string()))?;
        self.store.store(next)?;
        self.current = next;
        Ok(next)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
