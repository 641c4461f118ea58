//! The Angluin L* main loop: close and fix the table, build a hypothesis, consult the [Teacher], absorb its
//! counter-example, repeat.

use crate::dfa::Dfa;
use crate::lstar::table::LstarObservationTable;
use crate::lstar::teacher::Teacher;
use crate::strings::prefixes;
use std::collections::HashMap;

/// Drives [`LstarObservationTable`] to a closed, consistent state and turns it into a hypothesis [`Dfa`];
/// repeats against the [`Teacher`]'s counter-examples until a conjecture succeeds.
///
/// ```
/// use dfa_infer::dfa::Dfa;
/// use dfa_infer::lstar::learner::Learner;
/// use dfa_infer::lstar::teacher::Teacher;
/// use dfa_infer::equivalence::automaton_match;
/// use std::collections::HashSet;
/// use std::rc::Rc;
///
/// let reference = Rc::new(Dfa::make_automaton(
///     &[(0usize, 0, 'a'), (0, 1, 'b'), (1, 0, 'a'), (1, 1, 'b')],
///     &0,
///     &HashSet::from([1]),
/// ));
/// let teacher = Teacher::new(reference.clone()).unwrap();
/// let learned = Learner::new(&teacher).learn();
/// assert!(automaton_match(&reference, &learned).is_none());
/// ```
pub struct Learner<'a> {
    teacher: &'a Teacher,
    table: LstarObservationTable,
}

impl<'a> Learner<'a> {
    pub fn new(teacher: &'a Teacher) -> Self {
        let alphabet: Vec<char> = teacher.alphabet().into_iter().collect();
        Learner {
            teacher,
            table: LstarObservationTable::new(&alphabet),
        }
    }

    /// Seeds `S = {ε}` and probes its row, then runs [`Learner::extend`].
    fn initialize(&mut self) {
        self.table.add_s_prefix("");
        let v = self.teacher.membership_query("");
        self.table.set("", "", v);
        self.extend();
    }

    /// Probes every unprobed cell of `(S ∪ S·A) × E` via the Teacher's membership oracle. Idempotent: already
    /// probed cells are left untouched.
    fn extend(&mut self) {
        let alphabet = self.table.alphabet().to_vec();
        let mut rows: Vec<String> = self.table.s().to_vec();
        for s in self.table.s() {
            for &a in &alphabet {
                rows.push(format!("{s}{a}"));
            }
        }
        rows.sort();
        rows.dedup();

        let suffixes = self.table.suffixes().to_vec();
        for s in &rows {
            for e in &suffixes {
                if self.table.get(s, e).is_some() {
                    continue;
                }
                let v = self.teacher.membership_query(&format!("{s}{e}"));
                self.table.set(s, e, v);
            }
        }
    }

    /// Closes and fixes consistency to a fixpoint, probing newly added rows/columns after each repair so the
    /// table is always fully probed before the next consistency/closeness check.
    fn close_and_fix(&mut self) {
        loop {
            let mut changed = false;
            if let Some((s1, s2, a, e)) = self.table.find_mismatch_consistency() {
                self.table.add_suffix(&format!("{a}{e}"));
                changed = true;
                tracing::debug!(%s1, %s2, %a, %e, "observation table inconsistent, extended E");
                self.extend();
            }
            if let Some((s, a)) = self.table.find_mismatch_closeness() {
                self.table.add_s_prefix(&format!("{s}{a}"));
                changed = true;
                tracing::debug!(%s, %a, "observation table not closed, extended S");
                self.extend();
            }
            if !changed {
                break;
            }
        }
    }

    /// Assembles the hypothesis DFA from the current (closed, consistent) table. See the
    /// [module-level documentation](crate::lstar).
    fn hypothesis(&self) -> Dfa {
        let mut sorted_s: Vec<String> = self.table.s().to_vec();
        sorted_s.sort();

        let mut row_state: HashMap<Vec<u8>, usize> = HashMap::new();
        let mut next_q = 0usize;
        for s in &sorted_s {
            let row = self.table.row(s).expect("every s in S has a row");
            row_state.entry(row).or_insert_with(|| {
                let q = next_q;
                next_q += 1;
                q
            });
        }

        let mut transitions: Vec<(usize, usize, char)> = Vec::new();
        let mut final_states = std::collections::HashSet::new();
        for (row, &q) in &row_state {
            let s: &str = sorted_s
                .iter()
                .map(String::as_str)
                .find(|s| self.table.row(s).as_ref() == Some(row))
                .expect("row came from some s in S");
            if self.table.get(s, "") == Some(true) {
                final_states.insert(q);
            }
            for &a in self.table.alphabet() {
                let sa = format!("{s}{a}");
                let sa_row = self.table.row(&sa).expect("s*a was probed by extend()");
                let r = row_state[&sa_row];
                transitions.push((q, r, a));
            }
        }

        Dfa::make_automaton(&transitions, &0, &final_states)
    }

    /// Runs the full L* loop against the wrapped [`Teacher`] and returns the inferred DFA.
    #[tracing::instrument(skip_all)]
    pub fn learn(mut self) -> Dfa {
        self.initialize();
        loop {
            self.close_and_fix();
            let h = self.hypothesis();
            match self.teacher.conjecture(&h) {
                None => {
                    tracing::info!("teacher agreed, learning converged");
                    return h;
                }
                Some(counter_example) => {
                    tracing::info!(%counter_example, "teacher disagreed, absorbing counter-example");
                    for p in prefixes(&counter_example) {
                        self.table.add_s_prefix(&p);
                    }
                    self.extend();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equivalence::automaton_match;
    use std::collections::HashSet;
    use std::rc::Rc;

    fn three_state_dfa() -> Dfa {
        Dfa::make_automaton(
            &[
                (0usize, 0, 'a'),
                (0, 1, 'b'),
                (1, 2, 'a'),
                (1, 1, 'b'),
                (2, 1, 'a'),
                (2, 1, 'b'),
            ],
            &0,
            &HashSet::from([1]),
        )
    }

    #[test]
    fn learns_an_equivalent_dfa() {
        let reference = Rc::new(three_state_dfa());
        let teacher = Teacher::new(reference.clone()).unwrap();
        let learned = Learner::new(&teacher).learn();
        assert_eq!(automaton_match(&reference, &learned), None);
    }

    #[test]
    fn learned_table_ends_closed_and_consistent() {
        let reference = Rc::new(three_state_dfa());
        let teacher = Teacher::new(reference).unwrap();
        let mut learner = Learner::new(&teacher);
        learner.initialize();
        loop {
            learner.close_and_fix();
            assert!(learner.table.is_closed());
            assert!(learner.table.is_consistent());
            let h = learner.hypothesis();
            match learner.teacher.conjecture(&h) {
                None => break,
                Some(ce) => {
                    for p in prefixes(&ce) {
                        learner.table.add_s_prefix(&p);
                    }
                    learner.extend();
                }
            }
        }
    }

    #[test]
    fn learns_a_single_state_dfa() {
        let reference = Rc::new(Dfa::make_automaton(&[(0usize, 0, 'a')], &0, &HashSet::from([0usize])));
        let teacher = Teacher::new(reference.clone()).unwrap();
        let learned = Learner::new(&teacher).learn();
        assert_eq!(automaton_match(&reference, &learned), None);
    }
}
