//! # ti-core
//!
//! Core domain models and business logic for TryItOn.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! the response classifier, the pipeline state machine and the ports the
//! application layer drives.

// Public module exports
pub mod config;
pub mod gallery;
pub mod ids;
pub mod image;
pub mod pipeline;
pub mod ports;
pub mod response;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use gallery::{EditRecord, GalleryKind, GalleryListing, ModelRecord, RecordId, UploadRecord};
pub use ids::RunId;
pub use image::{LocalImageHandle, RemoteImageUrl};
pub use pipeline::{
    ModelResult, NotificationText, PipelineAction, PipelineEvent, PipelineNotification,
    PipelineOutcome, PipelineRun, PipelineStage, PipelineState, PipelineStateMachine, TryOnResult,
    UploadedAsset,
};
pub use ports::RemoteCallError;
pub use response::{classify, ClassifiedResponse, ResponseKind};
