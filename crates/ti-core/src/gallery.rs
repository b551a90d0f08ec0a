//! Records listed by the backend's read-side endpoints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which gallery listing to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryKind {
    Uploads,
    Edits,
    Models,
}

impl GalleryKind {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Uploads => "/get_uploads",
            Self::Edits => "/get_edits",
            Self::Models => "/get_models",
        }
    }
}

impl fmt::Display for GalleryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uploads => "uploads",
            Self::Edits => "edits",
            Self::Models => "models",
        };
        f.write_str(name)
    }
}

impl FromStr for GalleryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uploads" => Ok(Self::Uploads),
            "edits" | "edited" => Ok(Self::Edits),
            "models" => Ok(Self::Models),
            other => Err(format!("unknown gallery kind: {other}")),
        }
    }
}

/// Primary key of a gallery row: an integer or a text/uuid key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

/// An original image uploaded by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: RecordId,
    pub image_url: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A try-on result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRecord {
    pub id: RecordId,
    pub edited_url: String,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A reconstructed 3D model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRecord {
    pub id: RecordId,
    pub image_url: String,
    pub mesh_url: String,
    #[serde(default)]
    pub preview_url: Option<String>,
}

/// Result of one gallery listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryListing {
    Uploads(Vec<UploadRecord>),
    Edits(Vec<EditRecord>),
    Models(Vec<ModelRecord>),
}

impl GalleryListing {
    pub fn len(&self) -> usize {
        match self {
            Self::Uploads(items) => items.len(),
            Self::Edits(items) => items.len(),
            Self::Models(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
