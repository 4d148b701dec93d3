use crate::cause::Cause;
use std::{error::Error, fmt};

/// Error returned by `Outcome::get` on a failed outcome.
///
/// It always has this type, no matter what the cause was. The cause is
/// available as `source()`, or use `Outcome::into_result` to get the
/// original error back.
#[derive(Debug)]
pub struct Unwrapped {
    cause: Cause,
}

impl Unwrapped {
    pub(crate) fn new(cause: Cause) -> Self {
        Self { cause }
    }

    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    pub fn into_cause(self) -> Cause {
        self.cause
    }
}

impl fmt::Display for Unwrapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "outcome failed: {}", self.cause)
    }
}

impl Error for Unwrapped {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        let source: &(dyn Error + 'static) = &**self.cause.error();
        Some(source)
    }
}
