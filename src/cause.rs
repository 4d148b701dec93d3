use crate::fatal;
use std::{error::Error, fmt, ops::Deref};

/// Recoverable error carried by a failed `Outcome`.
///
/// The only way to build a `Cause` is `Cause::new`, which refuses fatal
/// errors, so a failed outcome can never hold one.
#[derive(Debug)]
pub struct Cause(anyhow::Error);

impl Cause {
    /// Wraps error as a cause.
    ///
    /// # Panics
    ///
    /// Panics with the error itself as payload when it is fatal,
    /// see `is_fatal`.
    pub fn new<E>(error: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        let error = error.into();
        if fatal::is_fatal(&error) {
            fatal::raise(error);
        }
        Self(error)
    }

    pub fn error(&self) -> &anyhow::Error {
        &self.0
    }

    pub fn into_inner(self) -> anyhow::Error {
        self.0
    }

    /// Returns the cause as E when it is one.
    ///
    /// Context layers put around the error are looked through. Errors that
    /// only hold an E as their `source()` do not match.
    pub fn find<E>(&self) -> Option<&E>
    where
        E: Error + Send + Sync + 'static,
    {
        self.0.downcast_ref::<E>()
    }
}

impl Deref for Cause {
    type Target = anyhow::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<dyn Error + Send + Sync + 'static> for Cause {
    fn as_ref(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.0
    }
}

/// Alternate formatting (`{:#}`) prints the whole error chain.
impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
