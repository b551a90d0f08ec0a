use async_trait::async_trait;

use crate::image::RemoteImageUrl;
use crate::pipeline::TryOnResult;

use super::RemoteCallError;

/// Composite-generation service: dresses the person in the garment.
#[async_trait]
pub trait TryOnPort: Send + Sync {
    async fn invoke(
        &self,
        person_url: &RemoteImageUrl,
        cloth_url: &RemoteImageUrl,
    ) -> Result<TryOnResult, RemoteCallError>;
}
