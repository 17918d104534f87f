use crate::config::Config;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// The only fatal error class in the system: text could not be obtained.
/// Everything downstream degrades to empty fields instead of erroring.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
    #[error("failed to fetch source: {0}")]
    FetchFailed(String),
    #[error("failed to read source: {0}")]
    Io(#[from] std::io::Error),
}

/// Text-acquisition collaborator. The pipeline never does byte-level
/// document parsing itself; it consumes plain text from this seam, and
/// tests substitute stubs for it.
pub trait TextSource {
    fn extract_text(&self, source: &str) -> Result<String, AcquireError>;
}

/// Default source: local files. Plain text read directly, PDF delegated to
/// the pdf-extract crate. Remote URLs are rejected when configured to be,
/// and unfetchable either way since this source has no transport.
pub struct FileSource {
    reject_urls: bool,
}

impl FileSource {
    pub fn new(cfg: &Config) -> Self {
        Self {
            reject_urls: cfg.security.reject_url_inputs,
        }
    }
}

impl TextSource for FileSource {
    fn extract_text(&self, source: &str) -> Result<String, AcquireError> {
        if looks_like_url(source) {
            let why = if self.reject_urls {
                "URL inputs are disabled"
            } else {
                "remote fetch is not supported by the file source"
            };
            return Err(AcquireError::FetchFailed(format!("{why}: {source}")));
        }

        let path = Path::new(source);
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase())
            .unwrap_or_default();

        debug!("acquiring {} (ext={})", path.display(), ext);

        match ext.as_str() {
            "txt" | "text" | "md" => Ok(std::fs::read_to_string(path)?),
            "pdf" => pdf_extract::extract_text(path)
                .map_err(|e| AcquireError::FetchFailed(format!("pdf text extraction: {e}"))),
            other => Err(AcquireError::UnsupportedFormat(other.to_string())),
        }
    }
}

fn looks_like_url(s: &str) -> bool {
    let s = s.to_ascii_lowercase();
    s.starts_with("http://") || s.starts_with("https://") || s.starts_with("file://")
}
