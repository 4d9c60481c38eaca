//! Upload bodies that report how many bytes the transport has taken.
//!
//! File parts are streamed in fixed-size chunks. Every chunk handed to the
//! transport advances a [`ProgressTracker`] shared by all parts of one
//! operation, so `total` is fixed for the call and `loaded` only grows. Once
//! the operation finishes the tracker is closed and stays silent.

use std::fmt;
use std::path::{Component, Path};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use aud_core::UploadProgress;
use futures::StreamExt;
use reqwest::Body;
use reqwest::multipart::{Form, Part};

use crate::error::ApiError;

/// Callback receiving progress ticks.
pub type ProgressSink = Arc<dyn Fn(UploadProgress) + Send + Sync>;

const CHUNK_SIZE: usize = 64 * 1024;

/// A document selected for upload.
#[derive(Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content: Arc<[u8]>,
    pub mime: String,
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("len", &self.content.len())
            .field("mime", &self.mime)
            .finish()
    }
}

impl UploadFile {
    /// MIME type is guessed from the file extension.
    pub fn new(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        let file_name = file_name.into();
        let mime = guess_mime(&file_name).to_string();
        let content: Vec<u8> = content.into();
        Self {
            file_name,
            content: Arc::from(content),
            mime,
        }
    }

    #[must_use]
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = mime.into();
        self
    }

    /// Read a document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for paths containing `..` or without a
    /// file name, and [`ApiError::Io`] when the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(ApiError::Validation(format!(
                "refusing path with '..': {}",
                path.display()
            )));
        }
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ApiError::Validation(format!("not a file: {}", path.display())))?
            .to_string();
        let content = tokio::fs::read(path).await.map_err(|source| ApiError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(file_name, content))
    }

    #[must_use]
    pub fn len(&self) -> u64 {
        self.content.len() as u64
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

fn guess_mime(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("xml") => "application/xml",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}

/// Byte counter for one upload operation.
pub struct ProgressTracker {
    total: u64,
    loaded: AtomicU64,
    closed: AtomicBool,
    sink: Option<ProgressSink>,
}

impl fmt::Debug for ProgressTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("total", &self.total)
            .field("loaded", &self.loaded.load(Ordering::SeqCst))
            .field("closed", &self.closed.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl ProgressTracker {
    #[must_use]
    pub fn new(total: u64, sink: Option<ProgressSink>) -> Arc<Self> {
        Arc::new(Self {
            total,
            loaded: AtomicU64::new(0),
            closed: AtomicBool::new(false),
            sink,
        })
    }

    /// Tracker covering every byte of `files`.
    #[must_use]
    pub fn for_files<'a>(
        files: impl IntoIterator<Item = &'a UploadFile>,
        sink: Option<ProgressSink>,
    ) -> Arc<Self> {
        Self::new(files.into_iter().map(UploadFile::len).sum(), sink)
    }

    #[must_use]
    pub fn snapshot(&self) -> UploadProgress {
        UploadProgress::new(self.loaded.load(Ordering::SeqCst), self.total)
    }

    pub fn advance(&self, bytes: u64) {
        if self.closed.load(Ordering::SeqCst) {
            return;
        }
        let loaded = self.loaded.fetch_add(bytes, Ordering::SeqCst) + bytes;
        if let Some(sink) = &self.sink {
            sink(UploadProgress::new(loaded, self.total));
        }
    }

    /// Stop reporting. Called once the operation has its terminal result.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Streamed multipart part for `file` that advances `tracker` as it is read.
///
/// # Errors
///
/// Returns [`ApiError::InvalidHeader`] if the file's MIME type is not valid.
pub fn file_part(file: &UploadFile, tracker: &Arc<ProgressTracker>) -> Result<Part, ApiError> {
    let content = Arc::clone(&file.content);
    let tracker = Arc::clone(tracker);
    let ranges: Vec<(usize, usize)> = (0..content.len())
        .step_by(CHUNK_SIZE)
        .map(|start| (start, (start + CHUNK_SIZE).min(content.len())))
        .collect();
    let chunks = futures::stream::iter(ranges).map(move |(start, end)| {
        tracker.advance((end - start) as u64);
        Ok::<_, std::io::Error>(content[start..end].to_vec())
    });

    Part::stream_with_length(Body::wrap_stream(chunks), file.len())
        .file_name(file.file_name.clone())
        .mime_str(&file.mime)
        .map_err(|e| ApiError::InvalidHeader {
            name: "content-type".into(),
            reason: e.to_string(),
        })
}

/// Multipart form with one streamed part per `(field, file)`.
///
/// # Errors
///
/// Same as [`file_part`].
pub fn upload_form(
    parts: &[(&'static str, &UploadFile)],
    tracker: &Arc<ProgressTracker>,
) -> Result<Form, ApiError> {
    parts.iter().try_fold(Form::new(), |form, (field, file)| {
        Ok(form.part(*field, file_part(file, tracker)?))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    fn recording_sink() -> (ProgressSink, Arc<Mutex<Vec<UploadProgress>>>) {
        let ticks = Arc::new(Mutex::new(Vec::new()));
        let sink_ticks = ticks.clone();
        let sink: ProgressSink = Arc::new(move |p| sink_ticks.lock().unwrap().push(p));
        (sink, ticks)
    }

    #[test]
    fn ticks_follow_loaded_bytes() {
        let (sink, ticks) = recording_sink();
        let tracker = ProgressTracker::new(12_000, Some(sink));
        tracker.advance(1_000);
        tracker.advance(4_000);
        tracker.advance(7_000);

        let percentages: Vec<u8> = ticks.lock().unwrap().iter().map(|p| p.percentage).collect();
        assert_eq!(percentages, vec![8, 42, 100]);
        assert!(tracker.snapshot().is_complete());
    }

    #[test]
    fn closed_tracker_is_silent() {
        let (sink, ticks) = recording_sink();
        let tracker = ProgressTracker::new(100, Some(sink));
        tracker.advance(50);
        tracker.close();
        tracker.advance(50);

        assert_eq!(ticks.lock().unwrap().len(), 1);
        assert!(tracker.is_closed());
    }

    #[test]
    fn tracker_total_spans_all_files() {
        let a = UploadFile::new("a.pdf", vec![0_u8; 10]);
        let b = UploadFile::new("b.pdf", vec![0_u8; 32]);
        let tracker = ProgressTracker::for_files([&a, &b], None);
        assert_eq!(tracker.snapshot().total, 42);
    }

    #[test]
    fn mime_guessed_from_extension() {
        assert_eq!(UploadFile::new("RUT.PDF", Vec::new()).mime, "application/pdf");
        assert_eq!(UploadFile::new("scan.jpeg", Vec::new()).mime, "image/jpeg");
        assert_eq!(UploadFile::new("blob", Vec::new()).mime, "application/octet-stream");
    }

    #[test]
    fn debug_omits_content() {
        let file = UploadFile::new("secret.pdf", b"confidential".to_vec());
        let debug = format!("{file:?}");
        assert!(!debug.contains("confidential"));
        assert!(debug.contains("len: 12"));
    }

    #[tokio::test]
    async fn from_path_rejects_parent_components() {
        let err = UploadFile::from_path("../etc/passwd").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn from_path_reads_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("factura.pdf");
        std::fs::write(&path, b"%PDF-1.7").unwrap();

        let file = UploadFile::from_path(&path).await.unwrap();
        assert_eq!(file.file_name, "factura.pdf");
        assert_eq!(file.len(), 8);
        assert_eq!(file.mime, "application/pdf");
    }

    #[tokio::test]
    async fn from_path_missing_file_is_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = UploadFile::from_path(tmp.path().join("missing.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Io { .. }));
    }
}
