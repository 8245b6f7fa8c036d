use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::constants::IMAGE_MEDIA_PREFIX;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("No images selected")]
    EmptySelection,
    #[error("Expected exactly {expected} images, {actual} selected")]
    InvalidSelectionCount { expected: usize, actual: usize },
    #[error("Failed to decode image '{name}': {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },
    #[error("PDF encoding error: {0}")]
    Encoding(String),
    #[error("A document is already being generated")]
    GenerationInProgress,
    #[error("Not in manual pick mode")]
    NotPicking,
    #[error("Confirm or cancel the manual pick first")]
    PickPending,
    #[error("No candidate at index {0}")]
    UnknownCandidate(usize),
    #[error("No selected image at index {0}")]
    IndexOutOfRange(usize),
    #[error("Counter error: {0}")]
    Counter(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, SheetError>;

/// Session-unique identity of an accepted image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(pub u64);

/// Raw input handed over by a file picker or a drop target
#[derive(Debug, Clone)]
pub struct Candidate {
    pub name: String,
    pub media_type: String,
    pub bytes: Arc<[u8]>,
}

impl Candidate {
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file and tag it with a media type derived from its extension,
    /// or from its content when the extension is unknown.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let media_type = sniff_media_type(path, &bytes);
        Ok(Self::new(name, media_type, bytes))
    }

    pub fn is_image(&self) -> bool {
        self.media_type.starts_with(IMAGE_MEDIA_PREFIX)
    }
}

/// Load several files, keeping the given order
pub async fn load_candidates(paths: &[impl AsRef<Path>]) -> Result<Vec<Candidate>> {
    let mut candidates = Vec::with_capacity(paths.len());
    for path in paths {
        candidates.push(Candidate::from_path(path).await?);
    }
    Ok(candidates)
}

pub(crate) fn sniff_media_type(path: &Path, bytes: &[u8]) -> String {
    image::ImageFormat::from_path(path)
        .or_else(|_| image::guess_format(bytes))
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| "application/octet-stream".to_string())
}

/// An image accepted into the pool or the selection
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub id: AssetId,
    pub name: String,
    pub media_type: String,
    pub bytes: Arc<[u8]>,
}

impl ImageAsset {
    pub(crate) fn from_candidate(id: AssetId, candidate: Candidate) -> Self {
        Self {
            id,
            name: candidate.name,
            media_type: candidate.media_type,
            bytes: candidate.bytes,
        }
    }
}

/// Opaque token for a front-end preview (texture, object URL, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewHandle(pub u64);
