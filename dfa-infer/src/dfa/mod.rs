//! # Deterministic Finite Automaton
//! The DFA module includes the [Dfa] struct: states are dense integers `0..n`, transitions are a *partial*
//! function `δ(q, a)` that may be undefined (written `⊥` in the text table format this crate parses), and
//! completeness (`δ` defined everywhere) is a predicate, not an invariant. This is what lets an
//! [observation table](crate::gold::GoldObservationTable) or an [L* learner](crate::lstar::learner::Learner)
//! build a DFA one transition at a time via [Dfa::add_edge] before the automaton is necessarily complete.
//!
//! A [Dfa] can also be built in one shot from a list of named transitions with [Dfa::make_automaton], or parsed
//! from the text table format in [crate::parser].
//!
//! ```
//! use dfa_infer::dfa::Dfa;
//! use std::collections::HashSet;
//!
//! // Accepts binary strings with an even number of '1's.
//! let dfa = Dfa::make_automaton(
//!     &[(0usize, 0, '0'), (0, 1, '1'), (1, 0, '1'), (1, 1, '0')],
//!     &0,
//!     &HashSet::from([0]),
//! );
//! assert!(dfa.accepts("1111"));
//! assert!(!dfa.accepts("111"));
//! assert!(dfa.is_complete());
//! ```

use crate::table::Table;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::Hash;

pub mod eval;
pub mod parse;

pub use eval::DfaEvaluator;
pub use parse::DfaParseError;

/// A deterministic finite automaton over a `char` alphabet, with a possibly-partial transition function.
/// See the [module-level documentation](crate::dfa) for more.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dfa {
    alphabet: Vec<char>,
    symbol_index: HashMap<char, usize>,
    states: Vec<DfaState>,
    initial_state: usize,
}

/// A single state of a [Dfa]: whether it accepts, and its (possibly partial) row of transitions, one slot per
/// symbol of [`Dfa::alphabet`], in the same order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DfaState {
    accepting: bool,
    transitions: Vec<Option<usize>>,
}

impl DfaState {
    /// Checks if this state is accepting.
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }
}

impl Dfa {
    /// Constructs a DFA with `n` states (`0..n`), no accepting states, no transitions and no known alphabet
    /// symbols yet, and state `0` as the initial state.
    pub fn new(n: usize) -> Self {
        Dfa {
            alphabet: Vec::new(),
            symbol_index: HashMap::new(),
            states: (0..n)
                .map(|_| DfaState {
                    accepting: false,
                    transitions: Vec::new(),
                })
                .collect(),
            initial_state: 0,
        }
    }

    /// Number of states of this DFA.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Index of the initial state.
    pub fn initial_state(&self) -> usize {
        self.initial_state
    }

    fn set_initial(&mut self, q: usize) {
        self.initial_state = q;
    }

    fn symbol_index_or_insert(&mut self, a: char) -> usize {
        if let Some(&idx) = self.symbol_index.get(&a) {
            return idx;
        }
        let idx = self.alphabet.len();
        self.alphabet.push(a);
        self.symbol_index.insert(a, idx);
        for state in &mut self.states {
            state.transitions.push(None);
        }
        idx
    }

    /// Inserts the transition `(q, a) -> r`. Returns `false` (a no-op) if `δ(q, a)` was already defined,
    /// `true` if the transition was newly added. `a` is added to the alphabet the first time it is seen.
    pub fn add_edge(&mut self, q: usize, r: usize, a: char) -> bool {
        let idx = self.symbol_index_or_insert(a);
        let cell = &mut self.states[q].transitions[idx];
        if cell.is_some() {
            false
        } else {
            *cell = Some(r);
            true
        }
    }

    /// `δ(q, a)`: the target state, or `None` (`⊥`) if undefined.
    pub fn delta(&self, q: usize, a: char) -> Option<usize> {
        let idx = *self.symbol_index.get(&a)?;
        self.states[q].transitions[idx]
    }

    /// Symbols `a` for which `δ(q, a)` is defined.
    pub fn sigma(&self, q: usize) -> BTreeSet<char> {
        self.alphabet
            .iter()
            .zip(&self.states[q].transitions)
            .filter_map(|(&a, t)| t.map(|_| a))
            .collect()
    }

    /// The full alphabet of this DFA: the union of [`Dfa::sigma`] over all states.
    pub fn alphabet(&self) -> BTreeSet<char> {
        (0..self.states.len()).flat_map(|q| self.sigma(q)).collect()
    }

    /// Sets whether state `q` is accepting.
    pub fn set_final(&mut self, q: usize, accepting: bool) {
        self.states[q].accepting = accepting;
    }

    /// Checks if state `q` is accepting.
    pub fn is_final(&self, q: usize) -> bool {
        self.states[q].accepting
    }

    /// Runs `w` from the initial state. Accepts iff no transition is undefined along the way and the state the
    /// word ends in is accepting.
    pub fn accepts(&self, w: &str) -> bool {
        let mut q = self.initial_state;
        for c in w.chars() {
            match self.delta(q, c) {
                Some(r) => q = r,
                None => return false,
            }
        }
        self.is_final(q)
    }

    /// True iff `δ(q, a)` is defined for every state `q` and every symbol `a` of [`Dfa::alphabet`].
    pub fn is_complete(&self) -> bool {
        let full = self.alphabet();
        (0..self.states.len()).all(|q| self.sigma(q) == full)
    }

    /// Always `true`: by construction, `add_edge` never allows two targets for the same `(q, a)`.
    pub fn is_deterministic(&self) -> bool {
        true
    }

    /// Always `true`: states are a fixed, finite `0..n`.
    pub fn is_finite(&self) -> bool {
        true
    }

    /// Gets an evaluator, a small struct tracking the current state while stepping through a word.
    pub fn evaluator(&self) -> DfaEvaluator<'_> {
        self.into()
    }

    /// Interns a list of `(src, dst, symbol)` transitions, an initial state name and a set of final state
    /// names into a [Dfa]. Names are any orderable, hashable, cloneable type, and are interned into dense ids
    /// `0..n` *in sorted order* (so the same transitions always produce the same DFA, regardless of input
    /// order).
    pub fn make_automaton<T>(transitions: &[(T, T, char)], initial: &T, final_states: &HashSet<T>) -> Dfa
    where
        T: Ord + Clone + Hash + Eq,
    {
        let mut names: Vec<T> = transitions
            .iter()
            .flat_map(|(src, dst, _)| [src.clone(), dst.clone()])
            .chain(std::iter::once(initial.clone()))
            .collect();
        names.sort();
        names.dedup();
        let index: HashMap<T, usize> = names
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, n)| (n, i))
            .collect();

        let mut dfa = Dfa::new(names.len());
        for (src, dst, a) in transitions {
            dfa.add_edge(index[src], index[dst], *a);
        }
        for name in &names {
            if final_states.contains(name) {
                dfa.set_final(index[name], true);
            }
        }
        dfa.set_initial(index[initial]);
        dfa
    }

    /// Generates a table of this DFA suitable for printing. Undefined transitions are printed as `⊥`; the
    /// result is re-parseable only if the DFA is complete.
    pub fn to_table(&self) -> String {
        let mut table = Table::default();
        let alphabet: Vec<String> = self.alphabet.iter().map(|c| c.to_string()).collect();

        let mut header = vec![String::new(), String::new(), String::new()];
        header.extend(alphabet.iter().cloned());
        table.push_row(header.iter().map(|s| s.as_str()).collect());

        let cells: Vec<Vec<String>> = (0..self.states.len())
            .map(|q| {
                let DfaState {
                    accepting,
                    transitions,
                } = &self.states[q];
                let mut row = vec![
                    if q == self.initial_state { "→" } else { "" }.to_string(),
                    if *accepting { "*" } else { "" }.to_string(),
                    q.to_string(),
                ];
                row.extend(transitions.iter().map(|t| match t {
                    Some(r) => r.to_string(),
                    None => "⊥".to_string(),
                }));
                row
            })
            .collect();
        for row in &cells {
            table.push_row(row.iter().map(|s| s.as_str()).collect());
        }
        table.to_string(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary_even_ones() -> Dfa {
        Dfa::make_automaton(
            &[(0usize, 0, '0'), (0, 1, '1'), (1, 0, '1'), (1, 1, '0')],
            &0,
            &HashSet::from([0]),
        )
    }

    #[test]
    fn accepts_and_rejects() {
        let dfa = binary_even_ones();
        assert!(dfa.accepts(""));
        assert!(dfa.accepts("11"));
        assert!(!dfa.accepts("1"));
        assert!(dfa.accepts("1111"));
    }

    #[test]
    fn complete_by_construction() {
        assert!(binary_even_ones().is_complete());
    }

    #[test]
    fn partial_dfa_is_not_complete_and_rejects_on_hole() {
        let mut dfa = Dfa::new(2);
        dfa.add_edge(0, 1, 'a');
        dfa.set_final(1, true);
        assert!(!dfa.is_complete());
        assert!(dfa.accepts("a"));
        assert!(!dfa.accepts("b"));
        assert!(!dfa.accepts("aa")); // 'a' undefined from state 1
    }

    #[test]
    fn add_edge_is_a_no_op_when_already_present() {
        let mut dfa = Dfa::new(2);
        assert!(dfa.add_edge(0, 1, 'a'));
        assert!(!dfa.add_edge(0, 0, 'a'));
        assert_eq!(dfa.delta(0, 'a'), Some(1));
    }

    #[test]
    fn alphabet_is_union_of_sigma() {
        let dfa = binary_even_ones();
        assert_eq!(dfa.alphabet(), BTreeSet::from(['0', '1']));
        assert_eq!(dfa.sigma(0), BTreeSet::from(['0', '1']));
    }

    #[test]
    fn deterministic_and_finite_always_hold() {
        let dfa = binary_even_ones();
        assert!(dfa.is_deterministic());
        assert!(dfa.is_finite());
    }
}
