use std::sync::atomic::{AtomicBool, Ordering};

use ti_core::{LocalImageHandle, PipelineOutcome, PipelineRun, PipelineStage};
use tokio::sync::Mutex;

/// Person and cloth images picked by the user for the next run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSelection {
    pub person: Option<LocalImageHandle>,
    pub cloth: Option<LocalImageHandle>,
}

/// Shared pipeline context containing the busy flag, the in-flight run and
/// the image selection.
///
/// ## Busy flag
/// Set before the first network call of a run and cleared only after the
/// terminal notification was emitted. At most one run holds it at a time.
#[derive(Default)]
pub struct PipelineContext {
    busy: AtomicBool,
    run: Mutex<Option<PipelineRun>>,
    selection: Mutex<ImageSelection>,
}

impl PipelineContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Claims the busy flag. Returns `None` while another run holds it.
    ///
    /// The flag is released when the returned guard is dropped.
    pub fn try_acquire_busy(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard { flag: &self.busy })
    }

    pub async fn selection(&self) -> ImageSelection {
        self.selection.lock().await.clone()
    }

    pub async fn set_person(&self, image: LocalImageHandle) {
        self.selection.lock().await.person = Some(image);
    }

    pub async fn set_cloth(&self, image: LocalImageHandle) {
        self.selection.lock().await.cloth = Some(image);
    }

    pub async fn clear_selection(&self) {
        *self.selection.lock().await = ImageSelection::default();
    }

    /// Snapshot of the in-flight run, if any.
    pub async fn current_run(&self) -> Option<PipelineRun> {
        self.run.lock().await.clone()
    }

    pub(crate) async fn begin_run(&self, run: PipelineRun) {
        *self.run.lock().await = Some(run);
    }

    /// Records the run's stage and, for terminal states, its outcome.
    ///
    /// Stages never move backwards and an outcome is written at most once.
    pub(crate) async fn record_progress(
        &self,
        stage: PipelineStage,
        outcome: Option<PipelineOutcome>,
    ) {
        let mut guard = self.run.lock().await;
        let Some(run) = guard.as_mut() else {
            return;
        };
        if run.outcome.is_some() {
            return;
        }
        if stage >= run.stage {
            run.stage = stage;
        }
        run.outcome = outcome;
    }

    pub(crate) async fn end_run(&self) {
        *self.run.lock().await = None;
    }
}

/// Holds the busy flag for the lifetime of one run.
pub struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
