//! Try-on pipeline domain.
//!
//! The pipeline is a fixed sequence of four remote stages. [`PipelineStateMachine`]
//! is the pure transition function; the application layer executes the
//! [`PipelineAction`]s it returns and feeds the results back as [`PipelineEvent`]s.

mod notification;
mod results;
mod run;
mod stage;
mod state_machine;

pub use notification::{NotificationText, PipelineNotification, PipelineOutcome};
pub use results::{ModelResult, TryOnResult, UploadedAsset};
pub use run::PipelineRun;
pub use stage::PipelineStage;
pub use state_machine::{PipelineAction, PipelineEvent, PipelineState, PipelineStateMachine};
