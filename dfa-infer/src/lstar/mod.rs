//! Angluin's L*: active inference of a DFA by querying a [Teacher](teacher::Teacher) oracle.
//!
//! [`table::LstarObservationTable`] holds the binary table over access prefixes `S ∪ S·A` and distinguishing
//! suffixes `E`, along with the closedness and consistency diagnostics the [`learner::Learner`] main loop
//! drives to fixpoint before each conjecture query. See the [module-level documentation](crate::gold) of
//! [`crate::gold`] for the passive counterpart built on the same idea.

pub mod learner;
pub mod table;
pub mod teacher;

pub use table::LstarObservationTable;
