use crate::ids::RunId;
use crate::image::LocalImageHandle;

use super::{PipelineOutcome, PipelineStage};

/// Snapshot of one execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRun {
    pub id: RunId,
    pub person_image: LocalImageHandle,
    pub cloth_image: LocalImageHandle,
    pub stage: PipelineStage,
    /// Absent until the run reaches a terminal state.
    pub outcome: Option<PipelineOutcome>,
}

impl PipelineRun {
    pub fn new(person_image: LocalImageHandle, cloth_image: LocalImageHandle) -> Self {
        Self {
            id: RunId::new(),
            person_image,
            cloth_image,
            stage: PipelineStage::Idle,
            outcome: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }
}
