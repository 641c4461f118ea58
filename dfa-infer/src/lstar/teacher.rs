//! The Teacher: wraps a reference [`Dfa`], asserted complete and finite, and answers the two query kinds the
//! Angluin framework needs — membership and conjecture (equivalence).

use crate::dfa::Dfa;
use crate::equivalence::automaton_match;
use crate::error::LearnerError;
use std::collections::BTreeSet;
use std::rc::Rc;

/// Oracle consulted by [`Learner`](crate::lstar::learner::Learner). Immutable once constructed, and cheaply
/// shareable (an [`Rc`]) since nothing about answering queries mutates the reference automaton.
#[derive(Debug, Clone)]
pub struct Teacher {
    g: Rc<Dfa>,
}

impl Teacher {
    /// Wraps `g` as a Teacher. Fails with [`LearnerError::TeacherPrecondition`] if `g` is not complete
    /// (minimality is assumed but not checked).
    pub fn new(g: Rc<Dfa>) -> Result<Self, LearnerError> {
        if !g.is_complete() || !g.is_finite() {
            return Err(LearnerError::TeacherPrecondition);
        }
        Ok(Teacher { g })
    }

    /// The alphabet of the reference automaton.
    pub fn alphabet(&self) -> BTreeSet<char> {
        self.g.alphabet()
    }

    /// Is `w` accepted by the reference automaton?
    pub fn membership_query(&self, w: &str) -> bool {
        self.g.accepts(w)
    }

    /// Does hypothesis `h` recognize the same language as the reference automaton? `None` signals agreement;
    /// otherwise a counter-example distinguishing `h` from the reference is returned.
    pub fn conjecture(&self, h: &Dfa) -> Option<String> {
        automaton_match(&self.g, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rejects_incomplete_reference() {
        let mut dfa = Dfa::new(2);
        dfa.add_edge(0, 1, 'a');
        let err = Teacher::new(Rc::new(dfa)).unwrap_err();
        assert_eq!(err, LearnerError::TeacherPrecondition);
    }

    #[test]
    fn answers_membership_and_conjecture() {
        let dfa = Rc::new(Dfa::make_automaton(
            &[(0usize, 0, 'a'), (0, 1, 'b'), (1, 0, 'a'), (1, 1, 'b')],
            &0,
            &HashSet::from([1]),
        ));
        let teacher = Teacher::new(dfa.clone()).unwrap();
        assert!(teacher.membership_query("b"));
        assert!(!teacher.membership_query("a"));
        assert_eq!(teacher.conjecture(&dfa), None);
    }
}
