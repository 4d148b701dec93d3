/// Zero-argument operation that either yields a value or fails.
///
/// Taking `self` by value means a computation can be run at most once.
/// Every closure returning `Result<T, E>` is a computation as long as the
/// error converts into `anyhow::Error`:
///
/// ```rust
/// use outcome::Outcome;
///
/// let parsed = Outcome::of(|| "42".parse::<i32>());
/// assert_eq!(parsed.get_or_else(0), 42);
/// ```
pub trait FallibleComputation<T> {
    /// Runs the computation.
    fn compute(self) -> anyhow::Result<T>;
}

impl<F, T, E> FallibleComputation<T> for F
where
    F: FnOnce() -> Result<T, E>,
    E: Into<anyhow::Error>,
{
    fn compute(self) -> anyhow::Result<T> {
        self().map_err(Into::into)
    }
}

/// Return value of an action run for its effect by `Outcome::and_then`.
///
/// Lets actions either return nothing or report a failure:
///
/// ```rust
/// use outcome::Outcome;
///
/// let kept = Outcome::success(3).and_then(|v| println!("got {v}"));
/// assert!(kept.is_succeeded());
///
/// let failed = Outcome::success(3).and_then(|_| Err::<(), _>(anyhow::anyhow!("rejected")));
/// assert!(failed.is_failed());
/// ```
pub trait Completion {
    fn complete(self) -> anyhow::Result<()>;
}

/// Action that returns nothing always completes.
impl Completion for () {
    fn complete(self) -> anyhow::Result<()> {
        Ok(())
    }
}

impl<E> Completion for Result<(), E>
where
    E: Into<anyhow::Error>,
{
    fn complete(self) -> anyhow::Result<()> {
        self.map_err(Into::into)
    }
}
