//! Port interfaces for the application layer
//!
//! Ports define the contract between the pipeline use cases and the
//! infrastructure that talks to the remote services. Every remote port reports
//! failures as a [`RemoteCallError`], which is produced only after the raw
//! response went through [`crate::response::classify`].

pub mod asset_upload;
pub mod errors;
pub mod gallery;
pub mod model_generation;
pub mod pipeline_event;
pub mod try_on;

pub use asset_upload::AssetUploadPort;
pub use errors::RemoteCallError;
pub use gallery::GalleryPort;
pub use model_generation::ModelGenerationPort;
pub use pipeline_event::PipelineEventPort;
pub use try_on::TryOnPort;
