//! Business logic use cases
//!
//! [image picker] → select_person_image / select_cloth_image
//!         ↓
//! PipelineOrchestrator::run_selected
//!         ↓
//! upload(person) → upload(cloth) → try-on → 3D model → one terminal notification
//!
//! ListGallery → uploads / edits / models listings

pub mod gallery;
pub mod pipeline;

pub use gallery::ListGallery;
pub use pipeline::{PipelineContext, PipelineError, PipelineOrchestrator, PipelineOrchestratorDeps};
