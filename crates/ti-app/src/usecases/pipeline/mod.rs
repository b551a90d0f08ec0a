mod context;
mod orchestrator;

pub use context::{BusyGuard, ImageSelection, PipelineContext};
pub use orchestrator::{PipelineError, PipelineOrchestrator, PipelineOrchestratorDeps};
