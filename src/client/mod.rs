//! Talking to the scheduling service.
//!
//! `ExecutionController` owns the request lifecycle and is the only part
//! of the crate that performs I/O, through the [`Transport`] trait.
//! `HttpTransport` is the real implementation; tests substitute their own.

mod controller;
mod transport;

pub use controller::{
    ControllerState, ExecutionController, SubmitError, CONNECTION_FAILED, PROCESSING_FAILED,
    UNREADABLE_RESPONSE,
};
pub use transport::{HttpTransport, Transport, TransportError, TransportResponse, PROCESS_PATH};

#[cfg(test)]
pub(crate) use controller::tests::{success_body, ScriptedTransport};
