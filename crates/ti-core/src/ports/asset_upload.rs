use async_trait::async_trait;

use crate::image::LocalImageHandle;
use crate::pipeline::UploadedAsset;

use super::RemoteCallError;

/// Uploads one local image to the remote object store.
#[async_trait]
pub trait AssetUploadPort: Send + Sync {
    /// Issues exactly one upload request for `image`.
    async fn upload(&self, image: &LocalImageHandle) -> Result<UploadedAsset, RemoteCallError>;
}
