//! TryItOn Application Orchestration Layer
//!
//! This crate contains the use cases that drive the remote pipeline through
//! the ports defined in `ti-core`.

pub mod usecases;

pub use usecases::{ListGallery, PipelineError, PipelineOrchestrator, PipelineOrchestratorDeps};
