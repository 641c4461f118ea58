//! Property tests over randomly generated complete DFAs and words, `proptest`/`rand`-driven in the same style
//! as `random_complete_dfa`'s `prop_compose!`-based predecessors, minus the NFA/regex machinery that has no
//! counterpart here.

use crate::dfa::Dfa;
use crate::equivalence::automaton_match;
use crate::gold::{gold, GoldOptions, GoldOutcome};
use crate::lstar::learner::Learner;
use crate::lstar::teacher::Teacher;
use crate::strings::{is_prefix_closed, is_suffix_closed, prefixes, suffixes};
use proptest::prelude::*;
use std::collections::HashSet;
use std::rc::Rc;

fn random_complete_dfa(alphabet: &'static [char], max_states: usize) -> impl Strategy<Value = Dfa> {
    (1..max_states).prop_flat_map(move |num_states| {
        let targets = prop::collection::vec(0..num_states, num_states * alphabet.len());
        let finals = prop::collection::vec(any::<bool>(), num_states);
        (targets, finals).prop_map(move |(targets, finals)| {
            let mut edges = Vec::with_capacity(num_states * alphabet.len());
            for (q, chunk) in targets.chunks(alphabet.len()).enumerate() {
                for (&a, &r) in alphabet.iter().zip(chunk) {
                    edges.push((q, r, a));
                }
            }
            let final_states: HashSet<usize> =
                finals.iter().enumerate().filter(|(_, &b)| b).map(|(i, _)| i).collect();
            Dfa::make_automaton(&edges, &0usize, &final_states)
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// `prefixes`/`suffixes` of any word form a prefix-/suffix-closed set of size `|w| + 1`.
    #[test]
    fn prefixes_and_suffixes_are_closed_and_sized(w in "[ab]{0,10}") {
        let ps = prefixes(&w);
        let ss = suffixes(&w);
        prop_assert!(is_prefix_closed(&ps.iter().cloned().collect()));
        prop_assert!(is_suffix_closed(&ss.iter().cloned().collect()));
        prop_assert_eq!(ps.len(), w.chars().count() + 1);
        prop_assert_eq!(ss.len(), w.chars().count() + 1);
    }

    /// Every DFA is equivalent to itself.
    #[test]
    fn self_equivalence_always_holds(dfa in random_complete_dfa(&['a', 'b'], 16)) {
        prop_assert_eq!(automaton_match(&dfa, &dfa), None);
    }

    /// L* always converges on a DFA equivalent to the reference it queries.
    #[test]
    fn lstar_learns_an_equivalent_dfa(dfa in random_complete_dfa(&['a', 'b'], 10)) {
        let reference = Rc::new(dfa);
        let teacher = Teacher::new(reference.clone()).unwrap();
        let learned = Learner::new(&teacher).learn();
        prop_assert_eq!(automaton_match(&reference, &learned), None);
    }

}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Gold is only guaranteed to converge on a sample *characteristic* of the target (rich enough to exercise
    /// every state and transition), not an arbitrary sparse one -- so this enumerates every word up to a depth
    /// proportional to the automaton's size rather than drawing a handful of random words.
    #[test]
    fn gold_hypothesis_agrees_with_its_own_samples(dfa in random_complete_dfa(&['a', 'b'], 5)) {
        let depth = 2 * dfa.num_states() + 2;
        let mut s_plus = HashSet::new();
        let mut s_minus = HashSet::new();
        for w in words_up_to(&['a', 'b'], depth) {
            if dfa.accepts(&w) {
                s_plus.insert(w);
            } else {
                s_minus.insert(w);
            }
        }
        if s_plus.is_empty() || s_minus.is_empty() {
            return Ok(());
        }

        let options = GoldOptions { alphabet: "ab".to_string(), ..Default::default() };
        if let Ok(GoldOutcome::Accepted(learned)) = gold(&s_plus, &s_minus, &options) {
            for w in &s_plus {
                prop_assert!(learned.accepts(w));
            }
            for w in &s_minus {
                prop_assert!(!learned.accepts(w));
            }
        }
    }
}

fn words_up_to(alphabet: &[char], max_len: usize) -> Vec<String> {
    let mut words = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..max_len {
        let mut next = Vec::new();
        for w in &frontier {
            for &a in alphabet {
                let mut w = w.clone();
                w.push(a);
                next.push(w);
            }
        }
        words.extend(next.iter().cloned());
        frontier = next;
    }
    words
}
