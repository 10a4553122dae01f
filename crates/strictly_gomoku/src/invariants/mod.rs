//! First-class invariants for five-in-a-row.
//!
//! Each invariant is a property of an in-progress game that every
//! transition must preserve. Contracts check them as postconditions.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Invariants checked together after every transition.
pub trait InvariantSet<S> {
    /// Checks every member, collecting all violations rather than stopping
    /// at the first.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, A, B, C> InvariantSet<S> for (A, B, C)
where
    A: Invariant<S>,
    B: Invariant<S>,
    C: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let members: [(fn(&S) -> bool, &'static str); 3] = [
            (A::holds, A::description()),
            (B::holds, B::description()),
            (C::holds, C::description()),
        ];
        let violations: Vec<_> = members
            .into_iter()
            .filter(|(holds, _)| !holds(state))
            .map(|(_, description)| InvariantViolation::new(description))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod alternating_turn;
pub mod history_consistent;
pub mod monotonic_history;

pub use alternating_turn::AlternatingTurnInvariant;
pub use history_consistent::HistoryConsistentInvariant;
pub use monotonic_history::MonotonicHistoryInvariant;

/// All game invariants as a composable set.
pub type GomokuInvariants = (
    MonotonicHistoryInvariant,
    AlternatingTurnInvariant,
    HistoryConsistentInvariant,
);
