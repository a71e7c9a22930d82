//! Request lifecycle state machine.
//!
//! ```text
//! Idle ──submit──▶ Pending ──▶ Succeeded(ResultSet)
//!   ▲                 │   └──▶ Failed(message)
//!   └──────reset──────┴────────────┘
//! ```
//!
//! At most one request is in flight per controller. The pending check
//! and the transition to `Pending` happen under one lock, so concurrent
//! callers sharing the controller through an `Arc` cannot both dispatch.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::transport::{Transport, TransportResponse};
use crate::models::{ErrorBody, ResultSet, ServiceResponse};
use crate::presenter::present;
use crate::request::Request;

/// Shown when no response could be obtained.
pub const CONNECTION_FAILED: &str = "Failed to connect to the server. Please try again later.";
/// Shown for a non-2xx response without an `error` field.
pub const PROCESSING_FAILED: &str = "An error occurred while processing the file.";
/// Shown for a 2xx response whose body is not a valid result payload.
pub const UNREADABLE_RESPONSE: &str = "The server returned an unreadable response.";

/// Lifecycle state. Exactly one is live at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ControllerState {
    /// Nothing submitted, or the last outcome was dismissed.
    #[default]
    Idle,
    /// A request is in flight.
    Pending(Request),
    /// The last request produced results.
    Succeeded(ResultSet),
    /// The last request failed; the message is user-facing.
    Failed(String),
}

impl ControllerState {
    pub fn is_pending(&self) -> bool {
        matches!(self, ControllerState::Pending(_))
    }

    /// Held results, if the last request succeeded.
    pub fn results(&self) -> Option<&ResultSet> {
        match self {
            ControllerState::Succeeded(results) => Some(results),
            _ => None,
        }
    }

    /// Failure message, if the last request failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ControllerState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// A submission was refused without any I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("a request is already in flight")]
    AlreadyPending,
}

#[derive(Debug, Default)]
struct Inner {
    state: ControllerState,
    /// Bumped on every accepted submit and every reset. A response is
    /// applied only if the epoch it was dispatched under is still current.
    epoch: u64,
}

/// Owns the request lifecycle; the only component that performs I/O.
pub struct ExecutionController {
    transport: Arc<dyn Transport>,
    inner: Mutex<Inner>,
}

impl ExecutionController {
    /// Creates an idle controller.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ControllerState {
        self.lock().state.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.lock().state.is_pending()
    }

    /// Dispatches `request` and waits for the outcome.
    ///
    /// Refused with [`SubmitError::AlreadyPending`] while another request
    /// is in flight; the state is left untouched. Otherwise any previous
    /// results or error are discarded, the state becomes `Pending`, and
    /// exactly one transport call is made. Returns the terminal state,
    /// or `Idle` if a reset arrived while the request was in flight, even
    /// when a newer submission is pending by then.
    pub async fn submit(&self, request: Request) -> Result<ControllerState, SubmitError> {
        let epoch = {
            let mut inner = self.lock();
            if inner.state.is_pending() {
                warn!("submission rejected: request already in flight");
                return Err(SubmitError::AlreadyPending);
            }
            inner.epoch += 1;
            inner.state = ControllerState::Pending(request.clone());
            inner.epoch
        };
        info!(epoch, mode = %request.mode(), rules = ?request.rules(), "submission accepted");

        let outcome = match self.transport.send(&request).await {
            Ok(response) => Self::interpret(response),
            Err(e) => {
                error!(epoch, "transport failure: {}", e);
                ControllerState::Failed(CONNECTION_FAILED.to_string())
            }
        };

        let mut inner = self.lock();
        if inner.epoch != epoch {
            debug!(epoch, current = inner.epoch, "discarding outcome of reset submission");
            return Ok(ControllerState::Idle);
        }
        match &outcome {
            ControllerState::Succeeded(results) => {
                info!(epoch, results = results.results.len(), "submission succeeded")
            }
            ControllerState::Failed(message) => warn!(epoch, %message, "submission failed"),
            _ => {}
        }
        inner.state = outcome.clone();
        Ok(outcome)
    }

    /// Returns to `Idle`, discarding held results, errors, or an
    /// in-flight request's eventual outcome.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.epoch += 1;
        inner.state = ControllerState::Idle;
        debug!(epoch = inner.epoch, "controller reset");
    }

    /// Maps a raw response to a terminal state. Success is all-or-nothing:
    /// a body that does not parse completely yields `Failed`.
    fn interpret(response: TransportResponse) -> ControllerState {
        if !response.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&response.body)
                .ok()
                .and_then(|body| body.error)
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| PROCESSING_FAILED.to_string());
            debug!(status = response.status, "service reported an error");
            return ControllerState::Failed(message);
        }

        match serde_json::from_slice::<ServiceResponse>(&response.body) {
            Ok(payload) => ControllerState::Succeeded(present(payload)),
            Err(e) => {
                error!(status = response.status, "malformed result payload: {}", e);
                ControllerState::Failed(UNREADABLE_RESPONSE.to_string())
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
