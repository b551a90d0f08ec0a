use serde::Serialize;

use crate::ids::RunId;
use crate::ports::RemoteCallError;

use super::{ModelResult, PipelineStage, TryOnResult};

/// Terminal result of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    Done(ModelResult),
    Failed {
        stage: PipelineStage,
        reason: RemoteCallError,
    },
}

impl PipelineOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }
}

/// Message emitted to the caller while a run progresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineNotification {
    /// A run request was refused before it started (busy, missing images).
    Rejected { title: String, message: String },
    /// A stage began.
    StageStarted { run_id: RunId, stage: PipelineStage },
    /// The try-on image exists; the 3D stage follows.
    EditReady { run_id: RunId, result: TryOnResult },
    /// Terminal notification: exactly one per run.
    Finished { run_id: RunId, outcome: PipelineOutcome },
}

impl PipelineNotification {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished { .. })
    }

    /// Human-readable `(title, message)` pair for display.
    pub fn describe(&self) -> NotificationText {
        match self {
            Self::Rejected { title, message } => NotificationText::new(title, message),
            Self::StageStarted { stage, .. } => {
                NotificationText::new("Working", stage.status_message())
            }
            Self::EditReady { .. } => NotificationText::new(
                "Success!",
                "Try-on image generated! Creating 3D model...",
            ),
            Self::Finished {
                outcome: PipelineOutcome::Done(model),
                ..
            } => NotificationText::new(
                "3D Ready!",
                format!("Your 3D model is created: {}", model.mesh_url),
            ),
            Self::Finished {
                outcome: PipelineOutcome::Failed { stage, reason },
                ..
            } => NotificationText::new(stage.failure_title(), reason.user_message()),
        }
    }
}

/// Display text of a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationText {
    pub title: String,
    pub message: String,
}

impl NotificationText {
    fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}
