use async_trait::async_trait;

use crate::image::RemoteImageUrl;
use crate::pipeline::ModelResult;

use super::RemoteCallError;

/// 3D-reconstruction service.
#[async_trait]
pub trait ModelGenerationPort: Send + Sync {
    async fn generate(&self, edited_url: &RemoteImageUrl) -> Result<ModelResult, RemoteCallError>;
}
