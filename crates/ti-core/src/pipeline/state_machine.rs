//! Pipeline state machine.
//!
//! Defines a pure state transition function for one try-on run.

use crate::image::{LocalImageHandle, RemoteImageUrl};
use crate::ports::RemoteCallError;

use super::{ModelResult, PipelineOutcome, PipelineStage, TryOnResult};

/// Run state. Each in-flight state holds exactly the inputs its stage and the
/// stages after it still need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    UploadingPerson {
        person: LocalImageHandle,
        cloth: LocalImageHandle,
    },
    UploadingCloth {
        cloth: LocalImageHandle,
        person_url: RemoteImageUrl,
    },
    GeneratingEdit {
        person_url: RemoteImageUrl,
        cloth_url: RemoteImageUrl,
    },
    GeneratingModel {
        edited: TryOnResult,
    },
    Done {
        model: ModelResult,
    },
    Failed {
        stage: PipelineStage,
        reason: RemoteCallError,
    },
}

impl PipelineState {
    /// Stage this state belongs to. `Failed` reports the stage that failed.
    pub fn stage(&self) -> PipelineStage {
        match self {
            Self::Idle => PipelineStage::Idle,
            Self::UploadingPerson { .. } => PipelineStage::UploadingPerson,
            Self::UploadingCloth { .. } => PipelineStage::UploadingCloth,
            Self::GeneratingEdit { .. } => PipelineStage::GeneratingEdit,
            Self::GeneratingModel { .. } => PipelineStage::GeneratingModel,
            Self::Done { .. } => PipelineStage::Done,
            Self::Failed { stage, .. } => *stage,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done { .. } | Self::Failed { .. })
    }

    /// Terminal outcome, once reached.
    pub fn outcome(&self) -> Option<PipelineOutcome> {
        match self {
            Self::Done { model } => Some(PipelineOutcome::Done(model.clone())),
            Self::Failed { stage, reason } => Some(PipelineOutcome::Failed {
                stage: *stage,
                reason: reason.clone(),
            }),
            _ => None,
        }
    }
}

/// Events that drive a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// The caller started a run with both images.
    Start {
        person: LocalImageHandle,
        cloth: LocalImageHandle,
    },
    PersonUploaded(RemoteImageUrl),
    ClothUploaded(RemoteImageUrl),
    EditGenerated(TryOnResult),
    ModelGenerated(ModelResult),
    /// The remote call of the current stage failed.
    StageFailed(RemoteCallError),
}

/// Side-effects produced by state transitions, executed in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineAction {
    NotifyStageStarted(PipelineStage),
    NotifyEditReady(TryOnResult),
    NotifyFinished(PipelineOutcome),
    UploadPerson(LocalImageHandle),
    UploadCloth(LocalImageHandle),
    GenerateEdit {
        person_url: RemoteImageUrl,
        cloth_url: RemoteImageUrl,
    },
    GenerateModel {
        edited_url: RemoteImageUrl,
    },
}

impl PipelineAction {
    /// True for actions that issue a network call.
    pub fn is_remote_call(&self) -> bool {
        matches!(
            self,
            Self::UploadPerson(_)
                | Self::UploadCloth(_)
                | Self::GenerateEdit { .. }
                | Self::GenerateModel { .. }
        )
    }
}

/// Pure pipeline state machine: no side effects.
pub struct PipelineStateMachine;

impl PipelineStateMachine {
    pub fn transition(
        state: PipelineState,
        event: PipelineEvent,
    ) -> (PipelineState, Vec<PipelineAction>) {
        match (state, event) {
            (PipelineState::Idle, PipelineEvent::Start { person, cloth }) => (
                PipelineState::UploadingPerson {
                    person: person.clone(),
                    cloth,
                },
                vec![
                    PipelineAction::NotifyStageStarted(PipelineStage::UploadingPerson),
                    PipelineAction::UploadPerson(person),
                ],
            ),
            (PipelineState::UploadingPerson { cloth, .. }, PipelineEvent::PersonUploaded(url)) => (
                PipelineState::UploadingCloth {
                    cloth: cloth.clone(),
                    person_url: url,
                },
                vec![
                    PipelineAction::NotifyStageStarted(PipelineStage::UploadingCloth),
                    PipelineAction::UploadCloth(cloth),
                ],
            ),
            (
                PipelineState::UploadingCloth { person_url, .. },
                PipelineEvent::ClothUploaded(cloth_url),
            ) => (
                PipelineState::GeneratingEdit {
                    person_url: person_url.clone(),
                    cloth_url: cloth_url.clone(),
                },
                vec![
                    PipelineAction::NotifyStageStarted(PipelineStage::GeneratingEdit),
                    PipelineAction::GenerateEdit {
                        person_url,
                        cloth_url,
                    },
                ],
            ),
            (PipelineState::GeneratingEdit { .. }, PipelineEvent::EditGenerated(edited)) => (
                PipelineState::GeneratingModel {
                    edited: edited.clone(),
                },
                vec![
                    PipelineAction::NotifyEditReady(edited.clone()),
                    PipelineAction::NotifyStageStarted(PipelineStage::GeneratingModel),
                    PipelineAction::GenerateModel {
                        edited_url: edited.edited_url,
                    },
                ],
            ),
            (PipelineState::GeneratingModel { .. }, PipelineEvent::ModelGenerated(model)) => (
                PipelineState::Done {
                    model: model.clone(),
                },
                vec![PipelineAction::NotifyFinished(PipelineOutcome::Done(model))],
            ),
            (state, PipelineEvent::StageFailed(reason))
                if !state.is_terminal() && state.stage() != PipelineStage::Idle =>
            {
                let stage = state.stage();
                (
                    PipelineState::Failed {
                        stage,
                        reason: reason.clone(),
                    },
                    vec![PipelineAction::NotifyFinished(PipelineOutcome::Failed {
                        stage,
                        reason,
                    })],
                )
            }
            (state, _event) => (state, Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start_event() -> PipelineEvent {
        PipelineEvent::Start {
            person: LocalImageHandle::new("person.jpg"),
            cloth: LocalImageHandle::new("cloth.jpg"),
        }
    }

    fn url(s: &str) -> RemoteImageUrl {
        RemoteImageUrl::new(s)
    }

    #[test]
    fn happy_path_walks_every_stage_in_order() {
        let model = ModelResult {
            mesh_url: "https://x/m.glb".into(),
            preview_url: None,
        };
        let events = vec![
            start_event(),
            PipelineEvent::PersonUploaded(url("https://x/p.jpg")),
            PipelineEvent::ClothUploaded(url("https://x/c.jpg")),
            PipelineEvent::EditGenerated(TryOnResult {
                edited_url: url("https://x/e.jpg"),
            }),
            PipelineEvent::ModelGenerated(model.clone()),
        ];

        let mut state = PipelineState::Idle;
        let mut stages = vec![state.stage()];
        let mut remote_calls = 0;
        for event in events {
            let (next, actions) = PipelineStateMachine::transition(state, event);
            remote_calls += actions.iter().filter(|a| a.is_remote_call()).count();
            stages.push(next.stage());
            state = next;
        }

        assert_eq!(state, PipelineState::Done { model });
        assert_eq!(remote_calls, 4);
        assert!(stages.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn cloth_upload_receives_person_url() {
        let (state, _) = PipelineStateMachine::transition(PipelineState::Idle, start_event());
        let (state, actions) = PipelineStateMachine::transition(
            state,
            PipelineEvent::PersonUploaded(url("https://x/p.jpg")),
        );
        assert_eq!(
            state,
            PipelineState::UploadingCloth {
                cloth: LocalImageHandle::new("cloth.jpg"),
                person_url: url("https://x/p.jpg"),
            }
        );
        assert_eq!(
            actions,
            vec![
                PipelineAction::NotifyStageStarted(PipelineStage::UploadingCloth),
                PipelineAction::UploadCloth(LocalImageHandle::new("cloth.jpg")),
            ]
        );
    }

    #[test]
    fn failure_records_failing_stage_and_issues_no_remote_call() {
        let state = PipelineState::GeneratingEdit {
            person_url: url("https://x/p.jpg"),
            cloth_url: url("https://x/c.jpg"),
        };
        let (next, actions) = PipelineStateMachine::transition(
            state,
            PipelineEvent::StageFailed(RemoteCallError::GatewayInterstitial),
        );

        assert_eq!(
            next,
            PipelineState::Failed {
                stage: PipelineStage::GeneratingEdit,
                reason: RemoteCallError::GatewayInterstitial,
            }
        );
        assert_eq!(actions.len(), 1);
        assert!(!actions[0].is_remote_call());
    }

    #[test]
    fn terminal_states_ignore_further_events() {
        let failed = PipelineState::Failed {
            stage: PipelineStage::UploadingPerson,
            reason: RemoteCallError::NetworkUnreachable("refused".into()),
        };
        let (next, actions) =
            PipelineStateMachine::transition(failed.clone(), PipelineEvent::ClothUploaded(url("u")));
        assert_eq!(next, failed);
        assert!(actions.is_empty());

        let (next, actions) = PipelineStateMachine::transition(
            failed.clone(),
            PipelineEvent::StageFailed(RemoteCallError::GatewayInterstitial),
        );
        assert_eq!(next, failed);
        assert!(actions.is_empty());
    }

    #[test]
    fn out_of_order_event_is_ignored() {
        let (state, _) = PipelineStateMachine::transition(PipelineState::Idle, start_event());
        let (next, actions) = PipelineStateMachine::transition(
            state.clone(),
            PipelineEvent::ModelGenerated(ModelResult {
                mesh_url: "m".into(),
                preview_url: None,
            }),
        );
        assert_eq!(next, state);
        assert!(actions.is_empty());
    }

    #[test]
    fn idle_does_not_fail_without_a_stage() {
        let (next, actions) = PipelineStateMachine::transition(
            PipelineState::Idle,
            PipelineEvent::StageFailed(RemoteCallError::GatewayInterstitial),
        );
        assert_eq!(next, PipelineState::Idle);
        assert!(actions.is_empty());
    }
}
