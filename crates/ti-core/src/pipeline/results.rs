use serde::{Deserialize, Serialize};

use crate::image::RemoteImageUrl;

/// Result of uploading one local image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedAsset {
    pub url: RemoteImageUrl,
    /// Object-store identifier, when the backend reports one.
    pub public_id: Option<String>,
}

impl UploadedAsset {
    pub fn new(url: RemoteImageUrl) -> Self {
        Self {
            url,
            public_id: None,
        }
    }
}

/// Output of the composite-generation stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TryOnResult {
    pub edited_url: RemoteImageUrl,
}

/// Output of the 3D-reconstruction stage; terminal artifact of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelResult {
    pub mesh_url: String,
    pub preview_url: Option<String>,
}
