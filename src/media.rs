//! Image ingestion.
//!
//! Page images are stored inline as `data:` URIs so that the library stays a
//! single self-contained value. Files are read on a worker thread; the caller
//! decides where the result lands (see `EditorSession::complete_image_upload`).

use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

use base64::Engine;

use crate::error::{Result, StorybookError};

/// MIME type for an image file, guessed from its extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Encode raw bytes as a base64 `data:` URI.
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime, encoded)
}

/// Read an image file and return it as a `data:` URI.
pub fn read_data_uri(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| StorybookError::ImageRead {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(encode_data_uri(mime_for_path(path), &bytes))
}

/// MIME type and decoded payload size of a `data:` URI, for display.
pub fn describe_data_uri(uri: &str) -> Option<(&str, usize)> {
    let rest = uri.strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    let padding = payload.bytes().rev().take_while(|b| *b == b'=').count();
    let size = ((payload.len() / 4) * 3).saturating_sub(padding.min(2));
    Some((mime, size))
}

/// An image read running on a worker thread.
pub struct ImageJob {
    path: PathBuf,
    handle: JoinHandle<Result<String>>,
}

impl ImageJob {
    /// Start reading `path` in the background.
    pub fn spawn(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let worker_path = path.clone();
        let handle = std::thread::spawn(move || read_data_uri(&worker_path));
        Self { path, handle }
    }

    /// The file being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the read has finished.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the read finishes and return the encoded image.
    pub fn wait(self) -> Result<String> {
        self.handle
            .join()
            .map_err(|_| anyhow::anyhow!("image reader for {} panicked", self.path.display()))?
    }
}
