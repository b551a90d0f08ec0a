//! Image references flowing through the pipeline.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

const FILE_URI_PREFIX: &str = "file://";

/// Opaque reference to a device-local image.
///
/// Accepts either a plain filesystem path or a `file://` URI, which is what
/// image pickers typically hand back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalImageHandle(String);

impl LocalImageHandle {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filesystem path the handle points at.
    ///
    /// `file://` URIs are percent-decoded; a URI that does not parse as a
    /// file URL falls back to the text after the scheme.
    pub fn path(&self) -> PathBuf {
        let Some(rest) = self.0.strip_prefix(FILE_URI_PREFIX) else {
            return PathBuf::from(&self.0);
        };
        Url::parse(&self.0)
            .ok()
            .and_then(|url| url.to_file_path().ok())
            .unwrap_or_else(|| PathBuf::from(rest))
    }

    /// Lower-cased file extension, if the handle has one.
    pub fn extension(&self) -> Option<String> {
        self.path()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }

    /// MIME type sent with the upload. Unknown extensions fall back to JPEG.
    pub fn mime_type(&self) -> &'static str {
        match self.extension().as_deref() {
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            Some("heic") => "image/heic",
            _ => "image/jpeg",
        }
    }

    /// File name used for the multipart part, e.g. `upload.png`.
    pub fn upload_file_name(&self) -> String {
        let ext = match self.extension().as_deref() {
            Some(ext @ ("png" | "webp" | "heic" | "jpeg")) => ext.to_string(),
            _ => "jpg".to_string(),
        };
        format!("upload.{ext}")
    }
}

impl From<&Path> for LocalImageHandle {
    fn from(path: &Path) -> Self {
        Self(path.to_string_lossy().into_owned())
    }
}

impl fmt::Display for LocalImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Publicly fetchable image URL.
///
/// Only produced from a success-classified response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteImageUrl(String);

impl RemoteImageUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RemoteImageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
