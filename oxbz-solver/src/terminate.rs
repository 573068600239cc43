//! Cooperative termination

/// Predicate polled by the solver at checkpoints; `true` aborts the search
///
/// Implemented for every `Fn() -> bool` closure, so callers capture whatever
/// state the decision needs:
///
/// ```
/// use oxbz_solver::Terminator;
/// use std::time::{Duration, Instant};
///
/// let deadline = Instant::now() + Duration::from_secs(10);
/// let term = move || Instant::now() > deadline;
/// assert!(!term.should_terminate());
/// ```
pub trait Terminator {
    /// Should the current search stop
    fn should_terminate(&self) -> bool;
}

impl<F> Terminator for F
where
    F: Fn() -> bool,
{
    fn should_terminate(&self) -> bool {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_closure_terminator() {
        let calls = Cell::new(0);
        let term = || {
            calls.set(calls.get() + 1);
            calls.get() > 2
        };
        assert!(!term.should_terminate());
        assert!(!term.should_terminate());
        assert!(term.should_terminate());
    }
}
