use async_trait::async_trait;

use crate::pipeline::PipelineNotification;

/// Notification channel from the pipeline to whoever started the run.
#[async_trait]
pub trait PipelineEventPort: Send + Sync {
    async fn emit(&self, notification: PipelineNotification);
}
