use std::collections::VecDeque;
use std::sync::{Arc, Once, OnceLock, Weak};

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use ti_app::{PipelineError, PipelineOrchestrator, PipelineOrchestratorDeps};
use ti_core::ports::{AssetUploadPort, ModelGenerationPort, PipelineEventPort, TryOnPort};
use ti_core::{
    LocalImageHandle, ModelResult, PipelineNotification, PipelineOutcome, PipelineStage,
    RemoteCallError, RemoteImageUrl, TryOnResult, UploadedAsset,
};

static TRACE_INIT: Once = Once::new();

fn init_tracing() {
    TRACE_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

type CallLog = Arc<Mutex<Vec<String>>>;

struct ScriptedUploader {
    log: CallLog,
    responses: Mutex<VecDeque<Result<UploadedAsset, RemoteCallError>>>,
}

#[async_trait]
impl AssetUploadPort for ScriptedUploader {
    async fn upload(&self, image: &LocalImageHandle) -> Result<UploadedAsset, RemoteCallError> {
        self.log.lock().await.push(format!("upload:{}", image.as_str()));
        self.responses
            .lock()
            .await
            .pop_front()
            .expect("unexpected upload call")
    }
}

struct ScriptedTryOn {
    log: CallLog,
    response: Result<TryOnResult, RemoteCallError>,
}

#[async_trait]
impl TryOnPort for ScriptedTryOn {
    async fn invoke(
        &self,
        person_url: &RemoteImageUrl,
        cloth_url: &RemoteImageUrl,
    ) -> Result<TryOnResult, RemoteCallError> {
        self.log
            .lock()
            .await
            .push(format!("tryon:{}+{}", person_url, cloth_url));
        self.response.clone()
    }
}

struct ScriptedModel {
    log: CallLog,
    response: Result<ModelResult, RemoteCallError>,
}

#[async_trait]
impl ModelGenerationPort for ScriptedModel {
    async fn generate(&self, edited_url: &RemoteImageUrl) -> Result<ModelResult, RemoteCallError> {
        self.log.lock().await.push(format!("model:{}", edited_url));
        self.response.clone()
    }
}

#[derive(Default)]
struct RecordingEvents {
    events: Mutex<Vec<PipelineNotification>>,
}

#[async_trait]
impl PipelineEventPort for RecordingEvents {
    async fn emit(&self, notification: PipelineNotification) {
        self.events.lock().await.push(notification);
    }
}

struct Script {
    uploads: Vec<Result<UploadedAsset, RemoteCallError>>,
    try_on: Result<TryOnResult, RemoteCallError>,
    model: Result<ModelResult, RemoteCallError>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            uploads: vec![uploaded("https://x/p.jpg"), uploaded("https://x/c.jpg")],
            try_on: Ok(TryOnResult {
                edited_url: RemoteImageUrl::new("https://x/e.jpg"),
            }),
            model: Ok(ModelResult {
                mesh_url: "https://x/m.glb".into(),
                preview_url: Some("https://x/r.png".into()),
            }),
        }
    }
}

struct Fixture {
    orchestrator: PipelineOrchestrator,
    log: CallLog,
    events: Arc<RecordingEvents>,
}

fn uploaded(url: &str) -> Result<UploadedAsset, RemoteCallError> {
    Ok(UploadedAsset::new(RemoteImageUrl::new(url)))
}

fn fixture(script: Script) -> Fixture {
    init_tracing();
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let events = Arc::new(RecordingEvents::default());

    let orchestrator = PipelineOrchestrator::from_deps(PipelineOrchestratorDeps {
        uploader: Arc::new(ScriptedUploader {
            log: log.clone(),
            responses: Mutex::new(script.uploads.into()),
        }),
        try_on: Arc::new(ScriptedTryOn {
            log: log.clone(),
            response: script.try_on,
        }),
        model_generator: Arc::new(ScriptedModel {
            log: log.clone(),
            response: script.model,
        }),
        event_port: events.clone(),
    });

    Fixture {
        orchestrator,
        log,
        events,
    }
}

async fn run(fixture: &Fixture) -> PipelineOutcome {
    fixture
        .orchestrator
        .run_try_on(
            LocalImageHandle::new("person.jpg"),
            LocalImageHandle::new("cloth.jpg"),
        )
        .await
        .expect("run should be accepted")
}

async fn terminal_notifications(fixture: &Fixture) -> Vec<PipelineNotification> {
    fixture
        .events
        .events
        .lock()
        .await
        .iter()
        .filter(|n| n.is_terminal())
        .cloned()
        .collect()
}

async fn started_stages(fixture: &Fixture) -> Vec<PipelineStage> {
    fixture
        .events
        .events
        .lock()
        .await
        .iter()
        .filter_map(|n| match n {
            PipelineNotification::StageStarted { stage, .. } => Some(*stage),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn all_stages_succeed_and_report_mesh_url() {
    let fixture = fixture(Script::default());

    let outcome = run(&fixture).await;

    let expected = PipelineOutcome::Done(ModelResult {
        mesh_url: "https://x/m.glb".into(),
        preview_url: Some("https://x/r.png".into()),
    });
    assert_eq!(outcome, expected);
    assert_eq!(
        *fixture.log.lock().await,
        vec![
            "upload:person.jpg",
            "upload:cloth.jpg",
            "tryon:https://x/p.jpg+https://x/c.jpg",
            "model:https://x/e.jpg",
        ]
    );
    assert_eq!(
        started_stages(&fixture).await,
        PipelineStage::NETWORK_STAGES.to_vec()
    );

    let terminal = terminal_notifications(&fixture).await;
    assert_eq!(terminal.len(), 1);
    assert!(matches!(
        &terminal[0],
        PipelineNotification::Finished { outcome, .. } if *outcome == expected
    ));

    let events = fixture.events.events.lock().await;
    assert!(events
        .iter()
        .any(|n| matches!(n, PipelineNotification::EditReady { .. })));
    assert!(events.last().unwrap().is_terminal());
}

#[tokio::test]
async fn unreachable_person_upload_skips_every_later_stage() {
    let fixture = fixture(Script {
        uploads: vec![Err(RemoteCallError::NetworkUnreachable(
            "connection refused".into(),
        ))],
        ..Script::default()
    });

    let outcome = run(&fixture).await;

    assert_eq!(
        outcome,
        PipelineOutcome::Failed {
            stage: PipelineStage::UploadingPerson,
            reason: RemoteCallError::NetworkUnreachable("connection refused".into()),
        }
    );
    assert_eq!(*fixture.log.lock().await, vec!["upload:person.jpg"]);
    assert_eq!(
        started_stages(&fixture).await,
        vec![PipelineStage::UploadingPerson]
    );
    assert_eq!(terminal_notifications(&fixture).await.len(), 1);
}

#[tokio::test]
async fn interstitial_try_on_never_calls_model_generation() {
    let fixture = fixture(Script {
        try_on: Err(RemoteCallError::GatewayInterstitial),
        ..Script::default()
    });

    let outcome = run(&fixture).await;

    assert_eq!(
        outcome,
        PipelineOutcome::Failed {
            stage: PipelineStage::GeneratingEdit,
            reason: RemoteCallError::GatewayInterstitial,
        }
    );
    let log = fixture.log.lock().await;
    assert_eq!(log.len(), 3);
    assert!(log.iter().all(|call| !call.starts_with("model:")));
}

#[tokio::test]
async fn try_on_application_error_keeps_server_message() {
    let fixture = fixture(Script {
        try_on: Err(RemoteCallError::ApplicationError("bad image".into())),
        ..Script::default()
    });

    let outcome = run(&fixture).await;

    assert_eq!(
        outcome,
        PipelineOutcome::Failed {
            stage: PipelineStage::GeneratingEdit,
            reason: RemoteCallError::ApplicationError("bad image".into()),
        }
    );
    let terminal = terminal_notifications(&fixture).await;
    let text = terminal[0].describe();
    assert_eq!(text.title, "Try-On Error");
    assert_eq!(text.message, "bad image");
}

#[tokio::test]
async fn missing_mesh_fails_model_stage() {
    let fixture = fixture(Script {
        model: Err(RemoteCallError::MissingField("mesh missing".into())),
        ..Script::default()
    });

    let outcome = run(&fixture).await;

    assert_eq!(
        outcome,
        PipelineOutcome::Failed {
            stage: PipelineStage::GeneratingModel,
            reason: RemoteCallError::MissingField("mesh missing".into()),
        }
    );
    assert_eq!(fixture.log.lock().await.len(), 4);
}

#[tokio::test]
async fn cloth_upload_failure_records_cloth_stage() {
    let fixture = fixture(Script {
        uploads: vec![
            uploaded("https://x/p.jpg"),
            Err(RemoteCallError::DecodeError("expected value".into())),
        ],
        ..Script::default()
    });

    let outcome = run(&fixture).await;

    assert!(matches!(
        outcome,
        PipelineOutcome::Failed {
            stage: PipelineStage::UploadingCloth,
            reason: RemoteCallError::DecodeError(_),
        }
    ));
    assert_eq!(fixture.log.lock().await.len(), 2);
}

#[tokio::test]
async fn orchestrator_accepts_a_new_run_after_failure() {
    let fixture = fixture(Script {
        uploads: vec![
            Err(RemoteCallError::GatewayInterstitial),
            uploaded("https://x/p.jpg"),
            uploaded("https://x/c.jpg"),
        ],
        ..Script::default()
    });

    let first = run(&fixture).await;
    let second = run(&fixture).await;

    assert!(!first.is_done());
    assert!(second.is_done());
    assert_eq!(terminal_notifications(&fixture).await.len(), 2);
}

#[tokio::test]
async fn selected_images_are_used_for_the_run() {
    let fixture = fixture(Script::default());
    fixture
        .orchestrator
        .select_person_image(LocalImageHandle::new("file:///picked/me.png"))
        .await;
    fixture
        .orchestrator
        .select_cloth_image(LocalImageHandle::new("file:///picked/shirt.png"))
        .await;

    let outcome = fixture.orchestrator.run_selected().await.unwrap();

    assert!(outcome.is_done());
    let log = fixture.log.lock().await;
    assert_eq!(log[0], "upload:file:///picked/me.png");
    assert_eq!(log[1], "upload:file:///picked/shirt.png");
}

#[tokio::test]
async fn missing_selection_performs_no_network_call() {
    let fixture = fixture(Script::default());

    let result = fixture.orchestrator.run_selected().await;

    assert_eq!(result, Err(PipelineError::MissingImages("both images")));
    assert!(fixture.log.lock().await.is_empty());
    assert!(!fixture.orchestrator.is_busy());
}

/// Uploader that parks the first call until released.
struct GatedUploader {
    entered: Arc<Notify>,
    release: Arc<Notify>,
    calls: Arc<Mutex<usize>>,
}

#[async_trait]
impl AssetUploadPort for GatedUploader {
    async fn upload(&self, _image: &LocalImageHandle) -> Result<UploadedAsset, RemoteCallError> {
        let first = {
            let mut calls = self.calls.lock().await;
            *calls += 1;
            *calls == 1
        };
        if first {
            self.entered.notify_one();
            self.release.notified().await;
        }
        Err(RemoteCallError::NetworkUnreachable("refused".into()))
    }
}

#[tokio::test]
async fn busy_guard_rejects_a_second_run_until_the_first_finishes() {
    init_tracing();
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let calls = Arc::new(Mutex::new(0));
    let events = Arc::new(RecordingEvents::default());
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));

    let orchestrator = Arc::new(PipelineOrchestrator::new(
        Arc::new(GatedUploader {
            entered: entered.clone(),
            release: release.clone(),
            calls: calls.clone(),
        }),
        Arc::new(ScriptedTryOn {
            log: log.clone(),
            response: Err(RemoteCallError::GatewayInterstitial),
        }),
        Arc::new(ScriptedModel {
            log: log.clone(),
            response: Err(RemoteCallError::GatewayInterstitial),
        }),
        events.clone(),
    ));

    let first = tokio::spawn({
        let orchestrator = orchestrator.clone();
        async move {
            orchestrator
                .run_try_on(LocalImageHandle::new("p.jpg"), LocalImageHandle::new("c.jpg"))
                .await
        }
    });

    entered.notified().await;
    assert!(orchestrator.is_busy());
    let in_flight = orchestrator.current_run().await.expect("run in flight");
    assert_eq!(in_flight.stage, PipelineStage::UploadingPerson);
    assert!(in_flight.outcome.is_none());

    let second = orchestrator
        .run_try_on(LocalImageHandle::new("p2.jpg"), LocalImageHandle::new("c2.jpg"))
        .await;
    assert_eq!(second, Err(PipelineError::Busy));
    assert_eq!(*calls.lock().await, 1, "rejected run must not upload");

    release.notify_one();
    let first = first.await.unwrap().unwrap();
    assert!(matches!(
        first,
        PipelineOutcome::Failed {
            stage: PipelineStage::UploadingPerson,
            ..
        }
    ));
    assert!(!orchestrator.is_busy());

    let third = orchestrator
        .run_try_on(LocalImageHandle::new("p.jpg"), LocalImageHandle::new("c.jpg"))
        .await;
    assert!(third.is_ok());
    assert_eq!(*calls.lock().await, 2);

    let events = events.events.lock().await;
    let rejected = events
        .iter()
        .filter(|n| matches!(n, PipelineNotification::Rejected { .. }))
        .count();
    assert_eq!(rejected, 1);
    assert_eq!(events.iter().filter(|n| n.is_terminal()).count(), 2);
    assert!(log.lock().await.is_empty());
}

/// Records whether the orchestrator still reported busy at each notification.
#[derive(Default)]
struct BusyObservingEvents {
    orchestrator: OnceLock<Weak<PipelineOrchestrator>>,
    seen: Mutex<Vec<(bool, bool)>>,
}

#[async_trait]
impl PipelineEventPort for BusyObservingEvents {
    async fn emit(&self, notification: PipelineNotification) {
        let busy = self
            .orchestrator
            .get()
            .and_then(Weak::upgrade)
            .map(|orchestrator| orchestrator.is_busy())
            .unwrap_or(false);
        self.seen
            .lock()
            .await
            .push((notification.is_terminal(), busy));
    }
}

#[tokio::test]
async fn busy_flag_is_held_while_terminal_notification_is_emitted() {
    init_tracing();
    let script = Script::default();
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let events = Arc::new(BusyObservingEvents::default());

    let orchestrator = Arc::new(PipelineOrchestrator::new(
        Arc::new(ScriptedUploader {
            log: log.clone(),
            responses: Mutex::new(script.uploads.into()),
        }),
        Arc::new(ScriptedTryOn {
            log: log.clone(),
            response: script.try_on,
        }),
        Arc::new(ScriptedModel {
            log: log.clone(),
            response: script.model,
        }),
        events.clone(),
    ));
    assert!(events
        .orchestrator
        .set(Arc::downgrade(&orchestrator))
        .is_ok());

    let outcome = orchestrator
        .run_try_on(LocalImageHandle::new("p.jpg"), LocalImageHandle::new("c.jpg"))
        .await
        .unwrap();
    assert!(matches!(outcome, PipelineOutcome::Done(_)));

    let seen = events.seen.lock().await;
    let terminal: Vec<bool> = seen
        .iter()
        .filter(|(is_terminal, _)| *is_terminal)
        .map(|(_, busy)| *busy)
        .collect();
    assert_eq!(terminal, vec![true], "busy must still be set at the terminal emit");
    assert!(seen.iter().all(|(_, busy)| *busy));
    assert!(!orchestrator.is_busy());
}
