use std::sync::atomic::{AtomicUsize, Ordering};

use formfill::{
    DisplayMode, EmbeddedState, FormError, InputEvent, MissingField, Navigation, QuestionId,
    ResumePolicy, SUBMIT_NETWORK_ERROR, SaveStatus, Session, SubmitCheck, SubmitControl,
};
use tokio::sync::{Mutex, MutexGuard, watch};
use tracing::{debug, warn};

use crate::{ClientConfig, ClientError, FormClient, SaveIndicator, SaveOutcome, SubmitOutcome};

/// What happened to a submit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    /// Required questions are unanswered; nothing was sent.
    Blocked {
        missing: Vec<QuestionId>,
        focus: QuestionId,
    },
    /// Another submit is still in flight, or the form was already submitted.
    Busy,
    Submitted {
        email_sent: bool,
        message: Option<String>,
    },
    Rejected {
        message: Option<String>,
        missing_fields: Vec<MissingField>,
    },
    /// The request got no usable reply.
    NetworkError { message: String },
}

/// A session wired to the form service.
///
/// Owns the session, the client, the save indicator and the state of the
/// submit control. Share it behind an `Arc` to run `Autosave` alongside.
#[derive(Debug)]
pub struct FormController {
    session: Mutex<Session>,
    client: FormClient,
    indicator: SaveIndicator,
    submit: watch::Sender<SubmitControl>,
    saves_in_flight: AtomicUsize,
}

impl FormController {
    pub fn new(session: Session, client: FormClient, config: &ClientConfig) -> Self {
        let (submit, _) = watch::channel(SubmitControl::Enabled);
        Self {
            session: Mutex::new(session),
            client,
            indicator: SaveIndicator::new(config.indicator_clear_delay),
            submit,
            saves_in_flight: AtomicUsize::new(0),
        }
    }

    /// Build a controller for the state embedded in a host page.
    pub fn from_embedded(
        state: EmbeddedState,
        mode: DisplayMode,
        policy: ResumePolicy,
        config: &ClientConfig,
    ) -> Result<Self, ClientError> {
        let client = FormClient::new(config, state.response_id)?;
        let session = Session::resumed(state.definition, state.answers, mode, policy);
        Ok(Self::new(session, client, config))
    }

    /// Lock the session, e.g. to render it or drain its events.
    pub async fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().await
    }

    pub fn client(&self) -> &FormClient {
        &self.client
    }

    pub fn indicator(&self) -> &SaveIndicator {
        &self.indicator
    }

    pub fn submit_control(&self) -> SubmitControl {
        *self.submit.borrow()
    }

    pub fn subscribe_submit_control(&self) -> watch::Receiver<SubmitControl> {
        self.submit.subscribe()
    }

    /// Check if any save request is waiting for its reply.
    pub fn is_saving(&self) -> bool {
        self.saves_in_flight.load(Ordering::SeqCst) > 0
    }

    /// Route an input event into the session.
    pub async fn apply(&self, event: InputEvent) -> Result<(), FormError> {
        self.session.lock().await.apply(event)
    }

    /// Persist the current answers and update the indicator.
    ///
    /// Failures are reported through the indicator only; answers are kept.
    pub async fn save(&self) -> SaveStatus {
        let payload = self.session.lock().await.save_payload();

        let in_flight = InFlightSave::begin(self);
        let result = self.client.save(&payload).await;
        in_flight.settle();

        match result {
            Ok(SaveOutcome::Saved) => self.indicator.saved(),
            Ok(SaveOutcome::Rejected { .. }) => self.indicator.failed(),
            Err(error) => {
                warn!(
                    error = %error,
                    network = error.is_network(),
                    response_id = self.client.response_id(),
                    "save failed"
                );
                self.indicator.failed();
            }
        }
        self.indicator.status()
    }

    /// Advance in step mode, saving after a successful move.
    pub async fn next(&self) -> Navigation {
        let navigation = self.session.lock().await.next();
        if matches!(navigation, Navigation::Moved { .. }) {
            self.save().await;
        }
        navigation
    }

    /// Go back in step mode, saving afterwards.
    pub async fn previous(&self) -> Navigation {
        let navigation = self.session.lock().await.previous();
        if matches!(navigation, Navigation::Moved { .. } | Navigation::Editing(_)) {
            self.save().await;
        }
        navigation
    }

    /// Sweep required questions, then finalize the response.
    ///
    /// The submit control is disabled while the request runs and re-enabled
    /// when it fails, so the user can retry.
    pub async fn submit(&self) -> SubmitResult {
        let claimed = self.submit.send_if_modified(|control| {
            let enabled = control.is_enabled();
            if enabled {
                *control = SubmitControl::Submitting;
            }
            enabled
        });
        if !claimed {
            return SubmitResult::Busy;
        }

        let check = self.session.lock().await.prepare_submit();
        let payload = match check {
            SubmitCheck::Blocked { missing, focus } => {
                self.submit.send_replace(SubmitControl::Enabled);
                return SubmitResult::Blocked { missing, focus };
            }
            SubmitCheck::Ready(payload) => payload,
        };

        let result = match self.client.submit(&payload).await {
            Ok(SubmitOutcome::Submitted {
                email_sent,
                message,
            }) => {
                return SubmitResult::Submitted {
                    email_sent,
                    message,
                };
            }
            Ok(SubmitOutcome::Rejected {
                message,
                missing_fields,
            }) => SubmitResult::Rejected {
                message,
                missing_fields,
            },
            Err(error) => {
                warn!(
                    error = %error,
                    network = error.is_network(),
                    response_id = self.client.response_id(),
                    "submit failed"
                );
                SubmitResult::NetworkError {
                    message: SUBMIT_NETWORK_ERROR.to_owned(),
                }
            }
        };

        debug!("re-enabling submit control");
        self.submit.send_replace(SubmitControl::Enabled);
        result
    }
}

/// Holds one slot of `saves_in_flight` for the duration of a request.
///
/// Dropping it unsettled (the save future was cancelled) frees the slot and
/// reports the save as failed.
struct InFlightSave<'a> {
    controller: &'a FormController,
    settled: bool,
}

impl<'a> InFlightSave<'a> {
    fn begin(controller: &'a FormController) -> Self {
        controller.saves_in_flight.fetch_add(1, Ordering::SeqCst);
        controller.indicator.saving();
        Self {
            controller,
            settled: false,
        }
    }

    fn settle(mut self) {
        self.settled = true;
    }
}

impl Drop for InFlightSave<'_> {
    fn drop(&mut self) {
        self.controller.saves_in_flight.fetch_sub(1, Ordering::SeqCst);
        if !self.settled {
            warn!(
                response_id = self.controller.client.response_id(),
                "save cancelled before a reply arrived"
            );
            self.controller.indicator.failed();
        }
    }
}
