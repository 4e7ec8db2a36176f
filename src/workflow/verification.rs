//! Verification loop for trade actions completed on Yahoo's own pages.
//!
//! The flow is split in two so it works with browser popup blockers: [`VerificationWorkflow::begin`]
//! runs synchronously inside the user's click and opens a blank secondary window, then
//! [`VerificationAttempt::run`] waits for the destination URL, points the window at it and
//! polls the server until Yahoo reflects the action or the user closes the window.
//!
//! Only the latest attempt is live. Starting a new one or calling
//! [`VerificationWorkflow::cancel`] makes every older attempt discard its results and stop.

use std::{
    future::Future,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, PoisonError,
    },
    time::Duration,
};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::{
    model::verification::{ProposalUrlDto, VerificationRequestDto, VerificationResultDto},
    workflow::{
        error::WorkflowError,
        store::Store,
        toast::{ToastKind, ToastQueue},
    },
};

/// Delay between verification polls
pub const POLL_INTERVAL: Duration = Duration::from_millis(2500);

const VERIFIED_MESSAGE: &str = "Trade verified on Yahoo";

/// A window or tab opened for the user, owned by whoever opened it.
pub trait SecondaryContext: Send + Sync {
    fn is_closed(&self) -> bool;
    fn navigate(&self, url: &str);
    fn close(&self);
}

/// Opens blank secondary contexts. Must be called while handling a user gesture.
pub trait ContextOpener {
    /// `None` when the runtime refused to open one.
    fn open_blank(&self) -> Option<Arc<dyn SecondaryContext>>;
}

/// Asks the server whether Yahoo reflects an action yet.
#[async_trait]
pub trait TradeVerifier: Send + Sync {
    async fn verify(&self, request: &VerificationRequestDto) -> Result<VerificationResultDto, WorkflowError>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerificationState {
    #[default]
    Idle,
    Verifying,
    Success,
}

/// Where to send the user and what to poll for once they are there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Destination {
    pub url: String,
    pub request: VerificationRequestDto,
}

impl From<ProposalUrlDto> for Destination {
    fn from(proposal: ProposalUrlDto) -> Self {
        Self {
            url: proposal.url,
            request: proposal.verification,
        }
    }
}

/// How an attempt ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerificationOutcome {
    Verified(VerificationResultDto),
    /// The user closed the secondary context before Yahoo reflected the action
    Closed,
    /// A newer attempt started or the workflow was cancelled
    Superseded,
}

/// Shared between the workflow and its attempts.
#[derive(Clone)]
struct Shared {
    state: Store<VerificationState>,
    toasts: ToastQueue,
    active_attempt: Arc<AtomicU64>,
    /// Secondary context of the live attempt
    live_context: Arc<Mutex<Option<Arc<dyn SecondaryContext>>>>,
    wake: Arc<Notify>,
}

impl Shared {
    fn is_active(&self, attempt: u64) -> bool {
        self.active_attempt.load(Ordering::SeqCst) == attempt
    }

    /// Makes `context` the live one and closes the one it replaces.
    fn replace_context(&self, context: Option<Arc<dyn SecondaryContext>>) {
        let previous = std::mem::replace(
            &mut *self
                .live_context
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
            context,
        );

        if let Some(previous) = previous {
            if !previous.is_closed() {
                previous.close();
            }
        }
    }
}

#[derive(Clone)]
pub struct VerificationWorkflow {
    shared: Shared,
}

impl VerificationWorkflow {
    pub fn new(toasts: ToastQueue) -> Self {
        Self {
            shared: Shared {
                state: Store::default(),
                toasts,
                active_attempt: Arc::new(AtomicU64::new(0)),
                live_context: Arc::new(Mutex::new(None)),
                wake: Arc::new(Notify::new()),
            },
        }
    }

    pub fn state(&self) -> &Store<VerificationState> {
        &self.shared.state
    }

    /// Opens the secondary context and starts a new attempt, superseding any previous one.
    ///
    /// The secondary context of a superseded attempt is closed. Fails with
    /// [`WorkflowError::PopupBlocked`] if no context could be opened, in which case the state
    /// stays `Idle` and the user is told through a toast.
    pub fn begin(&self, opener: &dyn ContextOpener) -> Result<VerificationAttempt, WorkflowError> {
        let id = self.shared.active_attempt.fetch_add(1, Ordering::SeqCst) + 1;

        let context = match opener.open_blank() {
            Some(context) if !context.is_closed() => context,
            _ => {
                self.shared.replace_context(None);
                self.shared.state.set(VerificationState::Idle);
                self.shared
                    .toasts
                    .push(ToastKind::Error, WorkflowError::PopupBlocked.to_string());

                return Err(WorkflowError::PopupBlocked);
            }
        };

        self.shared.replace_context(Some(Arc::clone(&context)));

        Ok(VerificationAttempt {
            id,
            context,
            shared: self.shared.clone(),
        })
    }

    /// Stops the live attempt and closes its secondary context. Its in-flight poll finishes
    /// but the result is ignored.
    pub fn cancel(&self) {
        self.shared.active_attempt.fetch_add(1, Ordering::SeqCst);
        self.shared.replace_context(None);
        self.shared.state.set(VerificationState::Idle);
    }

    /// Polls right away instead of waiting for the next interval.
    ///
    /// Called when the user comes back to the page (focus or visibility change).
    pub fn wake(&self) {
        self.shared.wake.notify_one();
    }
}

pub struct VerificationAttempt {
    id: u64,
    context: Arc<dyn SecondaryContext>,
    shared: Shared,
}

impl VerificationAttempt {
    pub fn is_active(&self) -> bool {
        self.shared.is_active(self.id)
    }

    /// Sends the user to the destination and polls until the action is verified.
    ///
    /// Polls are sequential and never time out. A failed poll is logged and retried on the
    /// next tick. `on_verified` runs once, after the state moved to `Success`.
    pub async fn run<D, V, F>(
        self,
        destination: D,
        verifier: &V,
        on_verified: F,
    ) -> Result<VerificationOutcome, WorkflowError>
    where
        D: Future<Output = Result<Destination, WorkflowError>>,
        V: TradeVerifier + ?Sized,
        F: FnOnce(),
    {
        let destination = match destination.await {
            Ok(destination) => destination,
            Err(e) => {
                if self.is_active() {
                    self.context.close();
                    self.shared.state.set(VerificationState::Idle);
                    self.shared.toasts.push(ToastKind::Error, e.to_string());
                }

                return Err(e);
            }
        };

        if !self.is_active() {
            return Ok(VerificationOutcome::Superseded);
        }

        self.context.navigate(&destination.url);
        self.shared.state.set(VerificationState::Verifying);

        loop {
            if !self.is_active() {
                return Ok(VerificationOutcome::Superseded);
            }
            if self.context.is_closed() {
                self.shared.state.set(VerificationState::Idle);

                return Ok(VerificationOutcome::Closed);
            }

            match verifier.verify(&destination.request).await {
                Ok(result) if result.matched => {
                    if !self.is_active() {
                        return Ok(VerificationOutcome::Superseded);
                    }

                    if !self.context.is_closed() {
                        self.context.close();
                    }
                    self.shared.state.set(VerificationState::Success);
                    self.shared.toasts.push(ToastKind::Success, VERIFIED_MESSAGE);
                    on_verified();

                    return Ok(VerificationOutcome::Verified(result));
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(attempt = self.id, "Verification poll failed: {}", e),
            }

            tokio::select! {
                _ = tokio::time::sleep(POLL_INTERVAL) => {}
                _ = self.shared.wake.notified() => {}
            }
        }
    }
}
