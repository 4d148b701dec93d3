use crate::{
    cause::Cause,
    computation::{Completion, FallibleComputation},
    error::Unwrapped,
    fatal,
};
use log::{debug, trace};
use std::{
    error::Error,
    fmt,
    panic::{self, AssertUnwindSafe},
};

/// Result of a fallible computation.
///
/// Built with `Outcome::of`, then transformed with combinators that keep
/// failures as values:
///
/// ```rust
/// use outcome::Outcome;
///
/// let doubled = Outcome::of(|| "7".parse::<i32>()).map(|x| x * 2);
/// assert_eq!(doubled.get().unwrap(), 14);
/// ```
#[derive(Debug)]
#[must_use]
pub enum Outcome<T> {
    Succeeded(T),
    Failed(Cause),
}

impl<T> Outcome<T> {
    /// Runs computation once and captures its result.
    ///
    /// Returned errors and panics become `Failed`, unless they are fatal
    /// (see `is_fatal`), in which case they are re-raised as a panic and
    /// this function does not return.
    pub fn of<C>(computation: C) -> Self
    where
        C: FallibleComputation<T>,
    {
        let result = panic::catch_unwind(AssertUnwindSafe(move || computation.compute()))
            .unwrap_or_else(|payload| Err(fatal::error_from_panic(payload)));

        match result {
            Ok(value) => Self::Succeeded(value),
            Err(error) => {
                let cause = Cause::new(error);
                debug!("computation failed: {:#}", cause);
                Self::Failed(cause)
            }
        }
    }

    pub fn success(value: T) -> Self {
        Self::Succeeded(value)
    }

    /// Shortcut for creating failed outcome.
    ///
    /// # Panics
    ///
    /// Panics when error is fatal, same as `Cause::new`.
    pub fn failure<E>(error: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Failed(Cause::new(error))
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Succeeded(value) => Some(value),
            Self::Failed(_) => None,
        }
    }

    pub fn cause(&self) -> Option<&Cause> {
        match self {
            Self::Succeeded(_) => None,
            Self::Failed(cause) => Some(cause),
        }
    }

    /// Returns held value, or `Unwrapped` carrying the cause.
    ///
    /// The error type is the same for every cause. Use `into_result` to keep
    /// the original error.
    pub fn get(self) -> Result<T, Unwrapped> {
        match self {
            Self::Succeeded(value) => Ok(value),
            Self::Failed(cause) => Err(Unwrapped::new(cause)),
        }
    }

    pub fn into_result(self) -> anyhow::Result<T> {
        match self {
            Self::Succeeded(value) => Ok(value),
            Self::Failed(cause) => Err(cause.into_inner()),
        }
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Self::Succeeded(value) => Some(value),
            Self::Failed(_) => None,
        }
    }

    /// Applies f to the held value. A panic inside f turns into `Failed`.
    pub fn map<R, F>(self, f: F) -> Outcome<R>
    where
        F: FnOnce(T) -> R,
    {
        match self {
            Self::Succeeded(value) => Outcome::of(move || Ok::<_, anyhow::Error>(f(value))),
            Self::Failed(cause) => {
                trace!("map skipped, outcome already failed");
                Outcome::Failed(cause)
            }
        }
    }

    /// Chains another fallible step. The outcome returned by f is passed
    /// through as is.
    ///
    /// ```rust
    /// use outcome::Outcome;
    ///
    /// let parsed = Outcome::success("12").flat_map(|s| Outcome::of(|| s.parse::<u8>()));
    /// assert_eq!(parsed.ok(), Some(12));
    /// ```
    pub fn flat_map<R, F>(self, f: F) -> Outcome<R>
    where
        F: FnOnce(T) -> Outcome<R>,
    {
        match self {
            Self::Succeeded(value) => {
                Outcome::of(move || Ok::<_, anyhow::Error>(f(value))).flatten()
            }
            Self::Failed(cause) => {
                trace!("flat_map skipped, outcome already failed");
                Outcome::Failed(cause)
            }
        }
    }

    /// Runs action on the held value for its effect only.
    ///
    /// Keeps the value when the action completes. An error returned by the
    /// action, or a panic inside it, becomes the new cause.
    pub fn and_then<F, R>(self, action: F) -> Self
    where
        F: FnOnce(&T) -> R,
        R: Completion,
    {
        match self {
            Self::Succeeded(value) => match Outcome::of(|| action(&value).complete()) {
                Outcome::Succeeded(()) => Self::Succeeded(value),
                Outcome::Failed(cause) => Self::Failed(cause),
            },
            failed => {
                trace!("and_then skipped, outcome already failed");
                failed
            }
        }
    }

    /// Passes the held value to action. Panics inside action are not caught.
    pub fn on_success<F>(self, action: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Self::Succeeded(value) = &self {
            action(value);
        }
        self
    }

    /// Passes the cause to action. Panics inside action are not caught.
    pub fn on_failure<F>(self, action: F) -> Self
    where
        F: FnOnce(&Cause),
    {
        if let Self::Failed(cause) = &self {
            action(cause);
        }
        self
    }

    pub fn get_or_else(self, default: T) -> T {
        match self {
            Self::Succeeded(value) => value,
            Self::Failed(_) => default,
        }
    }

    pub fn get_or_else_with<F>(self, f: F) -> T
    where
        F: FnOnce(Cause) -> T,
    {
        match self {
            Self::Succeeded(value) => value,
            Self::Failed(cause) => f(cause),
        }
    }

    pub fn or_else(self, other: Outcome<T>) -> Self {
        match self {
            Self::Succeeded(_) => self,
            Self::Failed(_) => other,
        }
    }

    /// Recovers from a cause of type E.
    ///
    /// The cause matches when it is an E, possibly behind context layers
    /// (see `Cause::find`). Use `recover_when` to match on anything else.
    /// f runs through `Outcome::of`, so a panic inside it becomes the new
    /// cause. Causes of other types are returned unchanged.
    ///
    /// ```rust
    /// use outcome::{Outcome, Panicked};
    ///
    /// let zero = std::hint::black_box(0);
    /// let quotient = Outcome::of(|| Ok::<_, anyhow::Error>(10 / zero))
    ///     .recover::<Panicked, _>(|_| 0)
    ///     .get_or_else(-1);
    /// assert_eq!(quotient, 0);
    /// ```
    pub fn recover<E, F>(self, f: F) -> Self
    where
        E: Error + Send + Sync + 'static,
        F: FnOnce(&E) -> T,
    {
        match self {
            Self::Failed(cause) => match cause.find::<E>() {
                Some(error) => {
                    debug!("recovering from: {}", error);
                    Self::of(|| Ok::<_, anyhow::Error>(f(error)))
                }
                None => Self::Failed(cause),
            },
            succeeded => succeeded,
        }
    }

    /// Like `recover`, but the cause is matched by predicate.
    pub fn recover_when<P, F>(self, predicate: P, f: F) -> Self
    where
        P: FnOnce(&Cause) -> bool,
        F: FnOnce(Cause) -> T,
    {
        match self {
            Self::Failed(cause) => {
                if predicate(&cause) {
                    debug!("recovering from: {}", cause);
                    Self::of(move || Ok::<_, anyhow::Error>(f(cause)))
                } else {
                    Self::Failed(cause)
                }
            }
            succeeded => succeeded,
        }
    }
}

impl<T> Outcome<Outcome<T>> {
    pub fn flatten(self) -> Outcome<T> {
        match self {
            Self::Succeeded(inner) => inner,
            Self::Failed(cause) => Outcome::Failed(cause),
        }
    }
}

impl<T> fmt::Display for Outcome<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded(value) => write!(f, "Succeeded({})", value),
            Self::Failed(cause) => write!(f, "Failed({})", cause),
        }
    }
}

/// Converts already computed result. Fatal errors are re-raised, same as
/// in `Outcome::of`.
impl<T, E> From<Result<T, E>> for Outcome<T>
where
    E: Into<anyhow::Error>,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Succeeded(value),
            Err(error) => Self::failure(error),
        }
    }
}

impl<T> From<Outcome<T>> for anyhow::Result<T> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}
