//! Prefix-tree acceptor: the trivial over-approximation returned when [`super::GoldObservationTable`] cannot
//! synthesize a DFA (hole-filling failed, or the sample-consistency stub failed).

use crate::dfa::Dfa;
use std::collections::HashSet;

/// Builds the prefix tree of `s_plus`: one state per distinct prefix of a word in `s_plus`, edges labeled by
/// the next symbol, and a word's own state marked accepting. No merging of states with identical futures —
/// that's exactly what distinguishes a PTA from a minimized DFA.
pub fn build(s_plus: &HashSet<String>) -> Dfa {
    let mut transitions: Vec<(String, String, char)> = Vec::new();
    for w in s_plus {
        let mut prefix = String::new();
        for c in w.chars() {
            let next = format!("{prefix}{c}");
            transitions.push((prefix, next.clone(), c));
            prefix = next;
        }
    }
    Dfa::make_automaton(&transitions, &String::new(), s_plus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_tree_with_no_merging() {
        let s_plus: HashSet<String> = ["ab", "ac"].into_iter().map(String::from).collect();
        let dfa = build(&s_plus);
        assert!(dfa.accepts("ab"));
        assert!(dfa.accepts("ac"));
        assert!(!dfa.accepts("a"));
        assert!(!dfa.accepts("ad"));
        // states: "", "a", "ab", "ac" -- "ab" and "ac" share the prefix "a" but diverge after it.
        assert_eq!(dfa.num_states(), 4);
    }

    #[test]
    fn empty_word_in_s_plus_makes_the_root_accepting() {
        let s_plus: HashSet<String> = ["".to_string()].into_iter().collect();
        let dfa = build(&s_plus);
        assert!(dfa.accepts(""));
    }

    #[test]
    fn empty_s_plus_builds_a_single_rejecting_state() {
        let dfa = build(&HashSet::new());
        assert_eq!(dfa.num_states(), 1);
        assert!(!dfa.accepts(""));
    }
}
