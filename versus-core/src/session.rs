//! Session state machine — the four-state presentation lifecycle.
//!
//! States: `Input -> Loading -> {Result | Error}`, with `Result` and
//! `Error` returning to `Input` on reset. The session owns the only
//! mutable resources in the system: its current state and, while
//! `Loading`, the active run's cancellation token. It enforces
//! single-flight by rejecting submissions while a run is in flight, and
//! discards outcomes from superseded runs so a cancelled run can never
//! mutate a machine that has moved on.
//!
//! Consumers receive [`RunOutcome`]s from the paired receiver and feed
//! them back through [`Session::handle_outcome`]; visual section-switching
//! belongs in a [`SessionObserver`], reacting to state changes, never in
//! the machine itself.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{AiError, SessionError};
use crate::pipeline::ComparisonPipeline;
use crate::types::{ComparisonRequest, ComparisonResult};

/// The presentation lifecycle state.
#[derive(Debug, Clone)]
pub enum SessionState {
    /// Waiting for a pair of product URLs. Initial state.
    Input,
    /// A pipeline run is in flight.
    Loading,
    /// A run completed; the result is owned here until reset or submit.
    Result(ComparisonResult),
    /// A run failed; holds the user-displayable message.
    Error(String),
}

impl SessionState {
    fn name(&self) -> &'static str {
        match self {
            SessionState::Input => "input",
            SessionState::Loading => "loading",
            SessionState::Result(_) => "result",
            SessionState::Error(_) => "error",
        }
    }
}

/// Observer notified on every state change.
///
/// Rendering layers implement this to switch visible sections as a side
/// effect of transitions.
#[async_trait]
pub trait SessionObserver: Send + Sync {
    async fn on_state_change(&self, state: &SessionState);
}

/// Observer that ignores all notifications.
pub struct NoOpObserver;

#[async_trait]
impl SessionObserver for NoOpObserver {
    async fn on_state_change(&self, _state: &SessionState) {}
}

/// Observer that records every state change, for tests.
pub struct RecordingObserver {
    states: tokio::sync::Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self {
            states: tokio::sync::Mutex::new(Vec::new()),
        }
    }

    /// Names of the states observed so far, in order.
    pub async fn states(&self) -> Vec<String> {
        self.states.lock().await.clone()
    }
}

impl Default for RecordingObserver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionObserver for RecordingObserver {
    async fn on_state_change(&self, state: &SessionState) {
        self.states.lock().await.push(state.name().to_string());
    }
}

/// The completion of one pipeline run, tagged with the generation of the
/// run that produced it so stale completions can be discarded.
#[derive(Debug)]
pub struct RunOutcome {
    pub generation: u64,
    pub outcome: Result<ComparisonResult, AiError>,
}

/// A single reusable comparison session.
pub struct Session {
    state: SessionState,
    pipeline: Arc<ComparisonPipeline>,
    observer: Arc<dyn SessionObserver>,
    outcome_tx: mpsc::UnboundedSender<RunOutcome>,
    /// Token for the in-flight run, present only while `Loading`.
    active: Option<CancellationToken>,
    /// Bumped on every submit and reset; outcomes carrying an older
    /// generation are discarded.
    generation: u64,
}

impl Session {
    /// Create a session and the receiver its run outcomes arrive on.
    pub fn new(
        pipeline: Arc<ComparisonPipeline>,
        observer: Arc<dyn SessionObserver>,
    ) -> (Self, mpsc::UnboundedReceiver<RunOutcome>) {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let session = Self {
            state: SessionState::Input,
            pipeline,
            observer,
            outcome_tx,
            active: None,
            generation: 0,
        };
        (session, outcome_rx)
    }

    /// Current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Validate the URLs and begin one pipeline run.
    ///
    /// Rejected with `AlreadyRunning` while a run is in flight — at most
    /// one run is ever active. A validation failure leaves the state
    /// untouched and starts nothing. Submitting from `Result` or `Error`
    /// discards the previous outcome, as a reset would.
    pub async fn submit(&mut self, url1: &str, url2: &str) -> Result<(), SessionError> {
        if matches!(self.state, SessionState::Loading) {
            debug!("Submit rejected: a run is already in flight");
            return Err(SessionError::AlreadyRunning);
        }

        let request = ComparisonRequest::new(url1, url2)?;

        self.cancel_active();
        self.generation += 1;
        let generation = self.generation;
        let token = CancellationToken::new();
        self.active = Some(token.clone());

        info!(generation, "Starting comparison run");
        let pipeline = Arc::clone(&self.pipeline);
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = pipeline.run(&request, &token).await;
            // The session may have been reset; it discards stale outcomes.
            let _ = tx.send(RunOutcome {
                generation,
                outcome,
            });
        });

        self.transition(SessionState::Loading).await;
        Ok(())
    }

    /// Apply the outcome of a pipeline run.
    ///
    /// Outcomes from superseded runs (older generation, or arriving after
    /// the session left `Loading`) are discarded without a transition.
    pub async fn handle_outcome(&mut self, outcome: RunOutcome) {
        if outcome.generation != self.generation || !matches!(self.state, SessionState::Loading) {
            debug!(
                outcome_generation = outcome.generation,
                current_generation = self.generation,
                state = self.state.name(),
                "Discarding outcome from superseded run"
            );
            return;
        }

        self.active = None;
        match outcome.outcome {
            Ok(result) => {
                self.transition(SessionState::Result(result)).await;
            }
            Err(err) => {
                warn!(error = %err, "Comparison run failed");
                self.transition(SessionState::Error(err.user_message().to_string()))
                    .await;
            }
        }
    }

    /// Return to `Input`, cancelling any outstanding run.
    ///
    /// A no-op in `Input` (no transition, no notification).
    pub async fn reset(&mut self) {
        if matches!(self.state, SessionState::Input) {
            return;
        }
        self.cancel_active();
        self.generation += 1;
        self.transition(SessionState::Input).await;
    }

    fn cancel_active(&mut self) {
        if let Some(token) = self.active.take() {
            token.cancel();
        }
    }

    async fn transition(&mut self, next: SessionState) {
        debug!(from = self.state.name(), to = next.name(), "Session transition");
        self.state = next;
        self.observer.on_state_change(&self.state).await;
    }
}
