use crate::error::{Error, Result};
use crate::models::answer::Submission;
use crate::models::score::{QueryKind, ResultRecord};
use crate::models::test::TestId;
use crate::services::api_client::ApiClient;
use crate::services::countdown_service::CountdownHandle;
use crate::services::navigation_service::LEAVE_CONFIRMATION;
use crate::services::session_store::Session;
use crate::ui::prompt::{Prompt, Redirect};
use crate::ui::renderer::SharedRenderedTest;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, warn};

pub const SUBMIT_CONFIRMATION: &str = "Are you sure to submit the answers?";
pub const TIME_UP_ALERT: &str = "The test is over. All answers will be submitted automatically.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Active,
    Submitting,
    Submitted,
    Failed { retryable: bool },
    /// The user confirmed leaving; the drafts are discarded.
    Left,
}

impl SubmissionState {
    /// A retryable failure reopens the test for another attempt.
    pub fn accepts_submit(&self) -> bool {
        matches!(
            self,
            SubmissionState::Active | SubmissionState::Failed { retryable: true }
        )
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// The coordinator was not accepting submissions; nothing was sent.
    Ignored,
    /// The user declined the confirmation.
    Declined,
    /// The POST succeeded. `latest` is the freshly scored result, if the query worked.
    Submitted { latest: Option<ResultRecord> },
    Failed(Error),
}

/// Single guarded entry point for manual and timer-forced submission.
pub struct SubmissionCoordinator<P: Prompt> {
    client: ApiClient,
    session: Session,
    test_id: TestId,
    rendered: SharedRenderedTest,
    prompt: Arc<P>,
    state: Mutex<SubmissionState>,
    // Held from the state check through confirmation to the `Submitting` transition.
    gate: tokio::sync::Mutex<()>,
    countdown: Mutex<Option<CountdownHandle>>,
    // Set as soon as the countdown asks for a forced submission, before it
    // waits on `gate`.
    expiry_pending: AtomicBool,
}

impl<P: Prompt> SubmissionCoordinator<P> {
    pub fn new(
        client: ApiClient,
        session: Session,
        rendered: SharedRenderedTest,
        prompt: Arc<P>,
    ) -> Result<Self> {
        let test_id = session.test_id().ok_or_else(|| {
            Error::InvalidInput("Cannot submit without an active test".to_string())
        })?;

        Ok(Self {
            client,
            session,
            test_id,
            rendered,
            prompt,
            state: Mutex::new(SubmissionState::Active),
            gate: tokio::sync::Mutex::new(()),
            countdown: Mutex::new(None),
            expiry_pending: AtomicBool::new(false),
        })
    }

    pub fn state(&self) -> SubmissionState {
        *self.state.lock().expect("submission state mutex poisoned")
    }

    /// Registers the countdown to cancel once the submission succeeds.
    pub fn attach_countdown(&self, handle: CountdownHandle) {
        if self.state() == SubmissionState::Submitted {
            handle.cancel();
        }
        *self.countdown.lock().expect("countdown mutex poisoned") = Some(handle);
    }

    /// Snapshot of every current draft, in render order.
    pub fn build_submission(&self) -> Submission {
        let answers = self
            .rendered
            .read()
            .expect("rendered test lock poisoned")
            .answers();
        Submission::new(self.session.login_id(), self.test_id, answers)
    }

    pub async fn request_submit(&self, forced: bool) -> SubmitOutcome {
        if forced {
            self.expiry_pending.store(true, Ordering::SeqCst);
        }
        {
            let _gate = self.gate.lock().await;

            if !self.state().accepts_submit() {
                debug!(forced, state = ?self.state(), "Submission request ignored");
                return SubmitOutcome::Ignored;
            }

            if !forced && !self.prompt.confirm(SUBMIT_CONFIRMATION).await {
                debug!("User declined submission");
                return SubmitOutcome::Declined;
            }

            let mut state = self.state.lock().expect("submission state mutex poisoned");
            if !state.accepts_submit() {
                return SubmitOutcome::Ignored;
            }
            *state = SubmissionState::Submitting;
        }

        if forced {
            self.prompt.alert(TIME_UP_ALERT);
        }

        let submission = self.build_submission();
        info!(
            forced,
            test_id = %self.test_id,
            answers = submission.answers().len(),
            "Submitting answers"
        );

        match self.client.submit(&submission).await {
            Ok(()) => self.on_submitted().await,
            Err(e) => self.on_failed(e),
        }
    }

    /// Asks before abandoning the test for `target`.
    ///
    /// Shares `gate` with submission, so the question never overlaps a
    /// submission in flight. Once the time is up the forced submission wins:
    /// a confirmed leave is dropped and nothing is redirected.
    pub async fn confirm_leave(&self, target: Redirect) -> bool {
        let _gate = self.gate.lock().await;

        if !self.state().accepts_submit() || self.expiry_pending.load(Ordering::SeqCst) {
            debug!(state = ?self.state(), "Leave request ignored");
            return false;
        }

        if !self.prompt.confirm(LEAVE_CONFIRMATION).await {
            return false;
        }

        if self.expiry_pending.load(Ordering::SeqCst) {
            info!("Time ran out while confirming leave, submitting instead");
            return false;
        }
        {
            let mut state = self.state.lock().expect("submission state mutex poisoned");
            if !state.accepts_submit() {
                return false;
            }
            *state = SubmissionState::Left;
        }

        self.cancel_countdown();
        self.prompt.redirect(target);
        true
    }

    /// Stops the attached countdown, if any. Safe to call repeatedly.
    pub fn cancel_countdown(&self) {
        if let Some(handle) = self
            .countdown
            .lock()
            .expect("countdown mutex poisoned")
            .as_ref()
        {
            handle.cancel();
        }
    }

    async fn on_submitted(&self) -> SubmitOutcome {
        self.set_state(SubmissionState::Submitted);
        self.cancel_countdown();

        let latest = match self
            .client
            .query(self.session.login_id(), QueryKind::Latest)
            .await
        {
            Ok(records) => {
                let latest = records.into_iter().next();
                match &latest {
                    Some(record) => self
                        .prompt
                        .alert(&format!("Your score is {} pts", record.rounded_score())),
                    None => {
                        warn!("Result query returned no records after submission");
                        self.prompt.alert("Error: Could not query result");
                    }
                }
                latest
            }
            Err(e) => {
                error!("Failed to query result after submission: {}", e);
                self.prompt.alert("Error: Could not query result");
                None
            }
        };

        self.prompt.redirect(Redirect::Result(QueryKind::Latest));
        SubmitOutcome::Submitted { latest }
    }

    fn on_failed(&self, e: Error) -> SubmitOutcome {
        error!("Submission failed: {}", e);
        self.set_state(SubmissionState::Failed {
            retryable: e.is_retryable(),
        });

        let message = match &e {
            Error::Network(_) => "Error: Could not submit answers".to_string(),
            other => other.alert_message(),
        };
        self.prompt.alert(&message);
        if let Some(target) = e.redirect() {
            self.prompt.redirect(target);
        }
        SubmitOutcome::Failed(e)
    }

    fn set_state(&self, next: SubmissionState) {
        let mut state = self.state.lock().expect("submission state mutex poisoned");
        debug!(from = ?*state, to = ?next, "Submission state transition");
        *state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_active_or_retryable_failure_accept_submit() {
        assert!(SubmissionState::Active.accepts_submit());
        assert!(SubmissionState::Failed { retryable: true }.accepts_submit());
        assert!(!SubmissionState::Failed { retryable: false }.accepts_submit());
        assert!(!SubmissionState::Submitting.accepts_submit());
        assert!(!SubmissionState::Submitted.accepts_submit());
        assert!(!SubmissionState::Left.accepts_submit());
    }
}
