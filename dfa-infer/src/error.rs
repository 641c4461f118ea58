//! Precondition failures raised by the two learners at construction time. `InferenceFailure` (Gold being unable
//! to synthesize a DFA) is not among them: that outcome is expected at runtime and carried in
//! [`GoldOutcome`](crate::gold::GoldOutcome) rather than returned as an error.

use thiserror::Error;

/// Errors raised while constructing a [`GoldObservationTable`](crate::gold::GoldObservationTable) or a
/// [`Teacher`](crate::lstar::teacher::Teacher). These are all precondition violations: they are never raised once
/// construction has succeeded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LearnerError {
    /// A sample, a seed row, or a red-state access string contains a character outside the declared alphabet.
    #[error("'{0}' contains a character not in the alphabet")]
    InvalidAlphabet(String),
    /// `red_init` is not prefix-closed.
    #[error("red_init is not prefix-closed")]
    InvalidRedSeed,
    /// `S+` and `S-` are not disjoint.
    #[error("S+ and S- overlap on '{0}'")]
    OverlappingSamples(String),
    /// The Teacher's reference automaton is not complete (or, in principle, not finite).
    #[error("the Teacher's automaton must be complete and finite")]
    TeacherPrecondition,
}
