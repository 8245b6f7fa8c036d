//! Handing finished documents to the user
//!
//! Delivery is best-effort: a failing sink is logged by the caller and never
//! rolls back a produced document.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::assembly::Document;
use crate::types::{Result, SheetError};

/// Suffixed names tried before giving up on a crowded directory
const MAX_NAME_ATTEMPTS: u32 = 999;

/// Download trigger: receives the finished document once its bytes exist
pub trait DocumentSink {
    /// Returns where the document ended up, if the sink has a notion of it
    fn deliver(&self, document: &Document) -> Result<Option<PathBuf>>;
}

/// Writes documents into a directory under their generated name
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DocumentSink for DirectorySink {
    /// Never replaces an existing file: a taken name gets a ` (n)` suffix,
    /// `finaloutput.001 (1).pdf`, the way browsers save downloads.
    fn deliver(&self, document: &Document) -> Result<Option<PathBuf>> {
        std::fs::create_dir_all(&self.dir)?;

        for attempt in 0..=MAX_NAME_ATTEMPTS {
            let path = self.dir.join(numbered_name(&document.name, attempt));
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };
            file.write_all(&document.bytes)?;
            if attempt > 0 {
                log::warn!(
                    "{} already exists in {}, saved as {}",
                    document.name,
                    self.dir.display(),
                    path.display()
                );
            }
            log::info!("Saved {} ({} bytes)", path.display(), document.bytes.len());
            return Ok(Some(path));
        }

        Err(SheetError::Io(std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!("No free name for {} in {}", document.name, self.dir.display()),
        )))
    }
}

/// Writes a document to one exact path chosen by the user, replacing what is
/// there
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSink for FileSink {
    fn deliver(&self, document: &Document) -> Result<Option<PathBuf>> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, &document.bytes)?;
        log::info!("Saved {} as {}", document.name, self.path.display());
        Ok(Some(self.path.clone()))
    }
}

/// `name` for attempt 0, `stem (n).ext` after that
fn numbered_name(name: &str, attempt: u32) -> String {
    if attempt == 0 {
        return name.to_string();
    }
    match name.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem} ({attempt}).{ext}"),
        None => format!("{name} ({attempt})"),
    }
}

/// Keeps delivered documents in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    delivered: Arc<Mutex<Vec<Document>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> Vec<Document> {
        self.delivered
            .lock()
            .map(|docs| docs.clone())
            .unwrap_or_default()
    }
}

impl DocumentSink for MemorySink {
    fn deliver(&self, document: &Document) -> Result<Option<PathBuf>> {
        if let Ok(mut docs) = self.delivered.lock() {
            docs.push(document.clone());
        }
        Ok(None)
    }
}

impl<T: DocumentSink + ?Sized> DocumentSink for &T {
    fn deliver(&self, document: &Document) -> Result<Option<PathBuf>> {
        (**self).deliver(document)
    }
}
