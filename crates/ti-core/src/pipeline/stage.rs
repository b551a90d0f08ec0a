use std::fmt;

use serde::{Deserialize, Serialize};

/// Stage of a run, in execution order.
///
/// The derived ordering follows declaration order; a run's stage never decreases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PipelineStage {
    Idle,
    UploadingPerson,
    UploadingCloth,
    GeneratingEdit,
    GeneratingModel,
    Done,
}

impl PipelineStage {
    /// The four stages that issue a network call.
    pub const NETWORK_STAGES: [PipelineStage; 4] = [
        PipelineStage::UploadingPerson,
        PipelineStage::UploadingCloth,
        PipelineStage::GeneratingEdit,
        PipelineStage::GeneratingModel,
    ];

    /// Status line shown while the stage is in flight.
    pub fn status_message(&self) -> &'static str {
        match self {
            Self::Idle => "Waiting for images.",
            Self::UploadingPerson => "Uploading person image...",
            Self::UploadingCloth => "Uploading cloth image...",
            Self::GeneratingEdit => "Generating try-on image...",
            Self::GeneratingModel => "Creating 3D model...",
            Self::Done => "3D model ready.",
        }
    }

    /// Title of the notification reporting a failure in this stage.
    pub fn failure_title(&self) -> &'static str {
        match self {
            Self::UploadingPerson | Self::UploadingCloth => "Upload Error",
            Self::GeneratingEdit => "Try-On Error",
            Self::GeneratingModel => "3D Error",
            Self::Idle | Self::Done => "Error",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
