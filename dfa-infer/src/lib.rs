//!# dfa-infer
//!
//! `dfa-infer` is a Rust library implementing two classic algorithms for inferring a minimal deterministic finite
//! automaton (DFA) that recognizes a regular language:
//!
//! * [Gold's algorithm](gold), a *passive* learner that infers a DFA from a fixed pair of finite sample sets (the
//!   words known to be in the language, and the words known not to be).
//! * [Angluin's L\*](lstar), an *active* learner that infers a DFA by querying a [Teacher](lstar::teacher::Teacher)
//!   (an oracle that can answer membership and equivalence queries).
//!
//! Both algorithms are built on top of an *observation table*: a matrix indexed by candidate access strings (rows)
//! and distinguishing suffixes (columns), recording whether a given prefix/suffix pair lies in the target language.
//! [`gold::GoldObservationTable`] and [`lstar::LstarObservationTable`] are the two (quite different) incarnations of
//! this idea used by each algorithm.
//!
//! ## Usage
//!
//! Gold's algorithm, from samples only:
//! ```rust
//! use dfa_infer::gold::{gold, GoldOptions, GoldOutcome};
//! use std::collections::HashSet;
//!
//! let s_plus: HashSet<String> = ["bb", "abb", "bba", "bbb", "babb"].into_iter().map(String::from).collect();
//! let s_minus: HashSet<String> = ["", "a", "ba"].into_iter().map(String::from).collect();
//! let options = GoldOptions { alphabet: "ab".into(), ..Default::default() };
//! let outcome = gold(&s_plus, &s_minus, &options).unwrap();
//! assert!(matches!(outcome, GoldOutcome::Accepted(_)));
//! ```
//!
//! L\*, against a reference DFA wrapped in a [Teacher](lstar::teacher::Teacher):
//! ```rust
//! use dfa_infer::dfa::Dfa;
//! use dfa_infer::lstar::learner::Learner;
//! use dfa_infer::lstar::teacher::Teacher;
//! use dfa_infer::equivalence::automaton_match;
//! use std::collections::HashSet;
//! use std::rc::Rc;
//!
//! let reference = Rc::new(Dfa::make_automaton(
//!     &[(0usize, 0, 'a'), (0, 1, 'b'), (1, 0, 'a'), (1, 1, 'b')],
//!     &0,
//!     &HashSet::from([1]),
//! ));
//! let teacher = Teacher::new(reference.clone()).unwrap();
//! let learned = Learner::new(&teacher).learn();
//! assert!(automaton_match(&reference, &learned).is_none());
//! ```
//!
//! ## Scope
//!
//! This crate only implements the inference engines themselves: the DFA data type, the DFA-equivalence /
//! counter-example search the L\* loop relies on, both observation tables, and the two learners. It does not
//! compile regular expressions to automata, minimize automata (the Teacher is assumed to already hold a minimal
//! one), or persist anything across sessions. Rendering a [`Dfa`](dfa::Dfa) or an observation table to a string
//! (Graphviz DOT, HTML) is the job of the separate `dfa-infer-draw` crate; driving the learners from the command
//! line is the job of `dfa-infer-cli`.

pub mod dfa;
pub mod equivalence;
pub mod error;
pub mod gold;
pub mod lstar;
pub mod parser;
pub mod strings;
mod table;
#[cfg(test)]
mod proptests;
