//! # Dependency Injection / 依赖注入
//!
//! ## Responsibilities / 职责
//!
//! - Create the HTTP adapters from the resolved configuration / 根据解析后的配置创建 HTTP 适配器
//! - Inject them into the use cases behind their port traits / 通过端口 trait 注入用例
//!
//! ## Prohibited / 禁止事项
//!
//! **No business logic / 禁止业务逻辑.** Deciding what a failed stage means
//! belongs to the orchestrator, not here.
//! 失败阶段的含义由编排器决定，不在此处判断。
//!
//! This is the only place allowed to depend on ti-infra and ti-app at the same time.
//! 这是唯一允许同时依赖 ti-infra 和 ti-app 的地方。

use std::sync::Arc;

use ti_app::{ListGallery, PipelineOrchestrator, PipelineOrchestratorDeps};
use ti_core::ports::PipelineEventPort;
use ti_core::AppConfig;
use ti_infra::{
    HttpAssetUploader, HttpGalleryClient, HttpModelGenerator, HttpTryOnInvoker, RemoteEndpoint,
};

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("HTTP client initialization failed: {0}")]
    HttpClientInit(String),
}

/// Use cases with their dependencies wired.
pub struct TryItOnApp {
    pub orchestrator: Arc<PipelineOrchestrator>,
    pub gallery: ListGallery,
}

/// Wire the application against the backend named in `config`.
///
/// Notifications of every run are delivered to `event_port`.
pub fn wire_app(
    config: &AppConfig,
    event_port: Arc<dyn PipelineEventPort>,
) -> WiringResult<TryItOnApp> {
    let endpoint = RemoteEndpoint::from_config(config)
        .map_err(|e| WiringError::HttpClientInit(format!("{e:#}")))?;

    let orchestrator = PipelineOrchestrator::from_deps(PipelineOrchestratorDeps {
        uploader: Arc::new(HttpAssetUploader::new(
            endpoint.clone(),
            config.upload_field_name.clone(),
        )),
        try_on: Arc::new(HttpTryOnInvoker::new(endpoint.clone())),
        model_generator: Arc::new(HttpModelGenerator::new(endpoint.clone())),
        event_port,
    });
    let gallery = ListGallery::new(Arc::new(HttpGalleryClient::new(endpoint)));

    Ok(TryItOnApp {
        orchestrator: Arc::new(orchestrator),
        gallery,
    })
}
