//! Converts a freshly-[parsed](crate::parser) DFA table into a [Dfa], validating the structural invariants the
//! grammar alone cannot express: a single initial state, no duplicate names, one transition per alphabet symbol
//! per state, and transition targets that actually name a state. A transition target of `⊥` is accepted and
//! becomes an undefined (`None`) transition, matching the `to_table` output of a non-complete [Dfa].

use crate::dfa::{Dfa, DfaState};
use crate::parser::{ParsedDfa, ParsedDfaState};
use std::collections::{HashMap, HashSet};
use std::ops::Not;
use thiserror::Error;

/// Everything that can go wrong turning a [ParsedDfa] into a [Dfa].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DfaParseError<'a> {
    #[error("'{0}' in the alphabet header is not a single character")]
    NotASingleCharacter(&'a str),
    #[error("'{0}' appears twice in the alphabet")]
    DuplicateAlphabetSymbol(&'a str),
    #[error("state '{0}' defined multiple times")]
    DuplicateStateDefinition(&'a str),
    #[error("wrong number of transitions for state '{0}': has {1}, expected {2}")]
    WrongNumberOfTransitions(&'a str, usize, usize),
    #[error("state '{1}' does not exist (in a transition from state '{0}')")]
    TransitionDoesNotExist(&'a str, &'a str),
    #[error("there is no initial state")]
    MissingInitialState,
    #[error("there are two (or more) initial states")]
    MultipleInitialStates,
}

impl<'a> TryFrom<ParsedDfa<'a>> for Dfa {
    type Error = DfaParseError<'a>;

    fn try_from(value: ParsedDfa<'a>) -> Result<Self, Self::Error> {
        use DfaParseError::*;
        let ParsedDfa { head, states } = value;

        let mut alphabet = Vec::with_capacity(head.len());
        let mut symbol_index = HashMap::with_capacity(head.len());
        for token in &head {
            let mut chars = token.chars();
            let c = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => return Err(NotASingleCharacter(token)),
            };
            if symbol_index.insert(c, alphabet.len()).is_some() {
                return Err(DuplicateAlphabetSymbol(token));
            }
            alphabet.push(c);
        }

        let state_name_map: HashMap<_, _> = states.iter().enumerate().map(|(i, s)| (s.name, i)).collect();
        if state_name_map.len() != states.len() {
            let mut seen = HashSet::new();
            let duplicate = states
                .iter()
                .find_map(|s| seen.insert(s.name).not().then_some(s.name))
                .unwrap_or("<unknown>");
            return Err(DuplicateStateDefinition(duplicate));
        }

        let mut initial_state = None;
        let mut new_states = Vec::with_capacity(states.len());
        for (idx, state) in states.into_iter().enumerate() {
            let ParsedDfaState {
                name,
                initial,
                accepting,
                transitions,
            } = state;

            if transitions.len() != head.len() {
                return Err(WrongNumberOfTransitions(name, transitions.len(), head.len()));
            }

            let mut new_transitions = Vec::with_capacity(head.len());
            for target in transitions {
                if target == "⊥" {
                    new_transitions.push(None);
                } else if let Some(&target_idx) = state_name_map.get(target) {
                    new_transitions.push(Some(target_idx));
                } else {
                    return Err(TransitionDoesNotExist(name, target));
                }
            }

            if initial {
                if initial_state.is_none() {
                    initial_state = Some(idx);
                } else {
                    return Err(MultipleInitialStates);
                }
            }

            new_states.push(DfaState {
                accepting,
                transitions: new_transitions,
            });
        }

        match initial_state {
            Some(initial_state) => Ok(Dfa {
                alphabet,
                symbol_index,
                states: new_states,
                initial_state,
            }),
            None => Err(MissingInitialState),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    fn parse(s: &str) -> Dfa {
        parser::dfa(s).unwrap().try_into().unwrap()
    }

    #[test]
    fn parses_a_complete_dfa() {
        // s0 (initial, accepting) --a--> s1 --b--> s1, --a--> s0: accepts on an even count of 'a's.
        let dfa = parse("a b\n→ * s0 s1 s0\n  s1 s0 s1\n");
        assert!(dfa.is_complete());
        assert!(dfa.accepts(""));
        assert!(!dfa.accepts("a"));
        assert!(!dfa.accepts("ab"));
        assert!(dfa.accepts("aa"));
    }

    #[test]
    fn bottom_symbol_becomes_an_undefined_transition() {
        let dfa = parse("a b\n→ * s0 s1 ⊥\n  s1 s1 s1\n");
        assert!(!dfa.is_complete());
        assert!(!dfa.accepts("b"));
    }

    #[test]
    fn rejects_multi_character_alphabet_tokens() {
        let err = parser::dfa("ab c\n→ s0 s0 s0\n")
            .unwrap()
            .try_into()
            .map(|_: Dfa| ())
            .unwrap_err();
        assert_eq!(err, DfaParseError::NotASingleCharacter("ab"));
    }

    #[test]
    fn rejects_missing_initial_state() {
        let err = parser::dfa("a\ns0 s0\n").unwrap().try_into().map(|_: Dfa| ()).unwrap_err();
        assert_eq!(err, DfaParseError::MissingInitialState);
    }

    #[test]
    fn rejects_unknown_transition_target() {
        let err = parser::dfa("a\n→ s0 s1\n").unwrap().try_into().map(|_: Dfa| ()).unwrap_err();
        assert_eq!(err, DfaParseError::TransitionDoesNotExist("s0", "s1"));
    }
}
