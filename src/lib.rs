//! Fallible computations as values.
//!
//! `Outcome::of` runs a computation once and captures its result as
//! `Succeeded` or `Failed`. Combinators then map, chain, recover or fall back
//! without letting recoverable failures unwind. Fatal errors (see `Fatal`)
//! are never captured and always propagate.

mod cause;
mod computation;
mod error;
mod fatal;
mod outcome;

pub use cause::Cause;
pub use computation::{Completion, FallibleComputation};
pub use error::Unwrapped;
pub use fatal::{is_fatal, Fatal, Panicked};
pub use outcome::Outcome;
