//! Classification of errors that must never be carried as data.

use log::error;
use std::{any::Any, collections::TryReserveError, io, panic};
use thiserror::Error;

/// Conditions the program cannot safely continue past.
///
/// Evaluating a computation that fails with one of these (directly, wrapped
/// in context, or as a panic payload) re-raises it instead of producing a
/// failed outcome.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Fatal {
    /// Cooperative cancellation was requested while the computation ran.
    #[error("computation was interrupted")]
    Interrupted,

    /// A dynamically linked symbol or library could not be resolved.
    #[error("failed to link `{0}`")]
    Linkage(String),

    #[error("resource exhausted: {0}")]
    Exhausted(String),

    #[error("runtime state corrupted: {0}")]
    Corrupted(String),
}

/// Recoverable error produced when a computation panics with an ordinary
/// payload, e.g. `attempt to divide by zero`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("computation panicked: {message}")]
pub struct Panicked {
    message: String,
}

impl Panicked {
    /// Message the panic was raised with.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Indicates if error is fatal.
///
/// Context layers are looked through. An error that only carries a fatal
/// one as its `source()` is not fatal itself.
///
/// ```rust
/// use anyhow::Context;
/// use outcome::{is_fatal, Fatal};
///
/// let err = Err::<(), _>(Fatal::Interrupted).context("while loading").unwrap_err();
/// assert!(is_fatal(&err));
/// assert!(!is_fatal(&anyhow::anyhow!("bad input")));
/// ```
pub fn is_fatal(error: &anyhow::Error) -> bool {
    if error.is::<Fatal>() || error.is::<TryReserveError>() {
        return true;
    }

    matches!(
        error.downcast_ref::<io::Error>().map(io::Error::kind),
        Some(io::ErrorKind::OutOfMemory)
    )
}

fn is_fatal_payload(payload: &(dyn Any + Send)) -> bool {
    payload.is::<Fatal>() || payload.downcast_ref::<anyhow::Error>().map_or(false, is_fatal)
}

/// Re-raises fatal error as a panic carrying the error itself as payload.
pub(crate) fn raise(error: anyhow::Error) -> ! {
    error!("fatal error escaped evaluation: {:#}", error);
    panic::panic_any(error)
}

/// Turns payload of a caught panic into an error.
///
/// Fatal payloads resume unwinding untouched. An `anyhow::Error` payload is
/// returned as is, anything else becomes `Panicked`.
pub(crate) fn error_from_panic(payload: Box<dyn Any + Send>) -> anyhow::Error {
    // already logged by `raise`, or a caller's own panic
    if is_fatal_payload(&*payload) {
        panic::resume_unwind(payload);
    }

    let payload = match payload.downcast::<anyhow::Error>() {
        Ok(error) => return *error,
        Err(payload) => payload,
    };

    let message = if let Some(message) = payload.downcast_ref::<&'static str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("Box<dyn Any>")
    };

    Panicked { message }.into()
}
