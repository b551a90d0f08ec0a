use async_trait::async_trait;

use crate::gallery::{EditRecord, ModelRecord, UploadRecord};

use super::RemoteCallError;

/// Read side of the backend: assets produced by earlier runs.
#[async_trait]
pub trait GalleryPort: Send + Sync {
    async fn list_uploads(&self) -> Result<Vec<UploadRecord>, RemoteCallError>;
    async fn list_edits(&self) -> Result<Vec<EditRecord>, RemoteCallError>;
    async fn list_models(&self) -> Result<Vec<ModelRecord>, RemoteCallError>;
}
