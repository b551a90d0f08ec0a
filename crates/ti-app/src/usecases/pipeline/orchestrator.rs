//! Try-on pipeline orchestrator.
//!
//! This module coordinates the pipeline state machine and its remote side effects.

use std::sync::Arc;

use tracing::{debug, error, info, info_span, warn, Instrument};

use ti_core::{
    ports::{AssetUploadPort, ModelGenerationPort, PipelineEventPort, TryOnPort},
    LocalImageHandle, PipelineAction, PipelineEvent, PipelineNotification, PipelineOutcome,
    PipelineRun, PipelineStage, PipelineState, PipelineStateMachine, RemoteCallError, RunId,
};

use super::context::PipelineContext;

/// Reasons a run request is refused before it starts.
///
/// These are never terminal run outcomes: a refused request performs no
/// network call and leaves the busy flag untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("a try-on run is already in progress")]
    Busy,
    #[error("missing images: select {0} first")]
    MissingImages(&'static str),
}

impl PipelineError {
    fn notification(&self) -> PipelineNotification {
        let title = match self {
            Self::Busy => "Busy",
            Self::MissingImages(_) => "Missing images",
        };
        PipelineNotification::Rejected {
            title: title.to_string(),
            message: self.to_string(),
        }
    }
}

/// Orchestrator that drives one try-on run at a time.
pub struct PipelineOrchestrator {
    context: Arc<PipelineContext>,
    uploader: Arc<dyn AssetUploadPort>,
    try_on: Arc<dyn TryOnPort>,
    model_generator: Arc<dyn ModelGenerationPort>,
    event_port: Arc<dyn PipelineEventPort>,
}

/// Helper for constructing the orchestrator with explicit dependency fields.
pub struct PipelineOrchestratorDeps {
    pub uploader: Arc<dyn AssetUploadPort>,
    pub try_on: Arc<dyn TryOnPort>,
    pub model_generator: Arc<dyn ModelGenerationPort>,
    pub event_port: Arc<dyn PipelineEventPort>,
}

impl PipelineOrchestrator {
    pub fn new(
        uploader: Arc<dyn AssetUploadPort>,
        try_on: Arc<dyn TryOnPort>,
        model_generator: Arc<dyn ModelGenerationPort>,
        event_port: Arc<dyn PipelineEventPort>,
    ) -> Self {
        Self {
            context: Arc::new(PipelineContext::new()),
            uploader,
            try_on,
            model_generator,
            event_port,
        }
    }

    /// Construct an orchestrator from dependency bundle.
    pub fn from_deps(deps: PipelineOrchestratorDeps) -> Self {
        let PipelineOrchestratorDeps {
            uploader,
            try_on,
            model_generator,
            event_port,
        } = deps;

        Self::new(uploader, try_on, model_generator, event_port)
    }

    pub fn is_busy(&self) -> bool {
        self.context.is_busy()
    }

    /// Snapshot of the in-flight run; `None` between runs.
    pub async fn current_run(&self) -> Option<PipelineRun> {
        self.context.current_run().await
    }

    pub async fn select_person_image(&self, image: LocalImageHandle) {
        debug!(image = %image, "person image selected");
        self.context.set_person(image).await;
    }

    pub async fn select_cloth_image(&self, image: LocalImageHandle) {
        debug!(image = %image, "cloth image selected");
        self.context.set_cloth(image).await;
    }

    pub async fn clear_selection(&self) {
        self.context.clear_selection().await;
    }

    /// Runs the pipeline on the currently selected images.
    ///
    /// The selection is captured at start; changing it mid-run does not affect the run.
    pub async fn run_selected(&self) -> Result<PipelineOutcome, PipelineError> {
        let selection = self.context.selection().await;
        match (selection.person, selection.cloth) {
            (Some(person), Some(cloth)) => self.run_try_on(person, cloth).await,
            (None, None) => self.reject(PipelineError::MissingImages("both images")).await,
            (None, Some(_)) => self.reject(PipelineError::MissingImages("a person image")).await,
            (Some(_), None) => self.reject(PipelineError::MissingImages("a cloth image")).await,
        }
    }

    /// Runs the four stages on `person` and `cloth`.
    ///
    /// Every outcome is reported through the event port, with exactly one
    /// terminal notification per accepted run. The returned outcome is the
    /// same one that was notified.
    pub async fn run_try_on(
        &self,
        person: LocalImageHandle,
        cloth: LocalImageHandle,
    ) -> Result<PipelineOutcome, PipelineError> {
        let Some(_busy) = self.context.try_acquire_busy() else {
            return self.reject(PipelineError::Busy).await;
        };

        let run = PipelineRun::new(person.clone(), cloth.clone());
        let run_id = run.id;
        self.context.begin_run(run).await;

        let span = info_span!("usecase.pipeline_orchestrator.run", run_id = %run_id);
        let outcome = self
            .dispatch(run_id, PipelineEvent::Start { person, cloth })
            .instrument(span)
            .await;

        self.context.end_run().await;
        Ok(outcome)
    }

    async fn reject(&self, err: PipelineError) -> Result<PipelineOutcome, PipelineError> {
        warn!(error = %err, "try-on run rejected");
        self.event_port.emit(err.notification()).await;
        Err(err)
    }

    async fn dispatch(&self, run_id: RunId, event: PipelineEvent) -> PipelineOutcome {
        let mut current = PipelineState::Idle;
        let mut pending_events = vec![event];

        while let Some(event) = pending_events.pop() {
            let from = current.stage();
            let event_name = event_name(&event);
            let (next, actions) = PipelineStateMachine::transition(current, event);
            info!(from = ?from, to = ?next.stage(), event = event_name, "pipeline state transition");
            self.context
                .record_progress(next.stage(), next.outcome())
                .await;
            current = next;
            pending_events.extend(self.execute_actions(run_id, actions).await);
        }

        match current.outcome() {
            Some(outcome) => outcome,
            None => {
                // Every non-terminal state issues a remote call, so the loop only
                // drains on a terminal state.
                error!(stage = ?current.stage(), "pipeline stopped before a terminal state");
                let outcome = PipelineOutcome::Failed {
                    stage: current.stage(),
                    reason: RemoteCallError::ApplicationError(
                        "pipeline stopped unexpectedly".to_string(),
                    ),
                };
                self.context
                    .record_progress(current.stage(), Some(outcome.clone()))
                    .await;
                self.notify(PipelineNotification::Finished {
                    run_id,
                    outcome: outcome.clone(),
                })
                .await;
                outcome
            }
        }
    }

    async fn execute_actions(
        &self,
        run_id: RunId,
        actions: Vec<PipelineAction>,
    ) -> Vec<PipelineEvent> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            debug!(?action, "pipeline executing action");
            match action {
                PipelineAction::NotifyStageStarted(stage) => {
                    self.notify(PipelineNotification::StageStarted { run_id, stage })
                        .await;
                }
                PipelineAction::NotifyEditReady(result) => {
                    self.notify(PipelineNotification::EditReady { run_id, result })
                        .await;
                }
                PipelineAction::NotifyFinished(outcome) => {
                    self.notify(PipelineNotification::Finished { run_id, outcome })
                        .await;
                }
                PipelineAction::UploadPerson(image) => {
                    let event = match self.uploader.upload(&image).await {
                        Ok(asset) => PipelineEvent::PersonUploaded(asset.url),
                        Err(err) => stage_failed(PipelineStage::UploadingPerson, err),
                    };
                    follow_up_events.push(event);
                }
                PipelineAction::UploadCloth(image) => {
                    let event = match self.uploader.upload(&image).await {
                        Ok(asset) => PipelineEvent::ClothUploaded(asset.url),
                        Err(err) => stage_failed(PipelineStage::UploadingCloth, err),
                    };
                    follow_up_events.push(event);
                }
                PipelineAction::GenerateEdit {
                    person_url,
                    cloth_url,
                } => {
                    let event = match self.try_on.invoke(&person_url, &cloth_url).await {
                        Ok(result) => PipelineEvent::EditGenerated(result),
                        Err(err) => stage_failed(PipelineStage::GeneratingEdit, err),
                    };
                    follow_up_events.push(event);
                }
                PipelineAction::GenerateModel { edited_url } => {
                    let event = match self.model_generator.generate(&edited_url).await {
                        Ok(model) => PipelineEvent::ModelGenerated(model),
                        Err(err) => stage_failed(PipelineStage::GeneratingModel, err),
                    };
                    follow_up_events.push(event);
                }
            }
        }
        follow_up_events
    }

    async fn notify(&self, notification: PipelineNotification) {
        if notification.is_terminal() {
            info!(?notification, "pipeline finished");
        }
        self.event_port.emit(notification).await;
    }
}

fn stage_failed(stage: PipelineStage, err: RemoteCallError) -> PipelineEvent {
    warn!(stage = ?stage, class = err.class_name(), error = %err, "pipeline stage failed");
    PipelineEvent::StageFailed(err)
}

fn event_name(event: &PipelineEvent) -> &'static str {
    match event {
        PipelineEvent::Start { .. } => "Start",
        PipelineEvent::PersonUploaded(_) => "PersonUploaded",
        PipelineEvent::ClothUploaded(_) => "ClothUploaded",
        PipelineEvent::EditGenerated(_) => "EditGenerated",
        PipelineEvent::ModelGenerated(_) => "ModelGenerated",
        PipelineEvent::StageFailed(_) => "StageFailed",
    }
}
