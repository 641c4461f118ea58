//! # dfa-infer parser
//! This module contains a parser for the DFA text format, a thin table-like representation used to load a
//! reference automaton (consulted by the [Teacher](crate::lstar::teacher::Teacher)) or to print a learned
//! hypothesis back out in a re-parseable form.
//!
//! ## Format
//! The file should be an UTF-8-encoded file consisting of:
//! - One line containing the alphabet, with whitespace-separated single-character elements.
//! - One line for each state, consisting of these whitespace-separated elements, in order:
//!   - Optionally `->` or `→` for denoting that the state is the initial state (there must be exactly one)
//!   - Optionally `*` for denoting that the state is accepting
//!   - The name of the state
//!   - A list of target states, one per element of the alphabet, in the same order as the header
//!
//! Here is an example of a DFA:
//! ```text
//!        a  b  c
//! → * s0 s1 s0 s2
//!     s1 s2 s1 s1
//!   * s2 s2 s2 s2
//! ```
//! Any lines containing only whitespace are ignored, and if `#` appears on any line, that character and all
//! subsequent characters on that line are ignored (as a comment).

mod fa;

use nom::{combinator::all_consuming, error::Error, Finish};

#[derive(Debug)]
pub struct ParsedDfa<'a> {
    pub head: Vec<&'a str>,
    pub states: Vec<ParsedDfaState<'a>>,
}

#[derive(Debug)]
pub struct ParsedDfaState<'a> {
    pub name: &'a str,
    pub initial: bool,
    pub accepting: bool,
    pub transitions: Vec<&'a str>,
}

/// Parses a DFA according to the format above. The whole string must be parsable, otherwise this function errors.
/// Note that the result is a [ParsedDfa], which is not guaranteed to be a valid [crate::dfa::Dfa]. Use
/// [TryInto::try_into] to convert a [ParsedDfa] to a [crate::dfa::Dfa].
pub fn dfa(input: &str) -> Result<ParsedDfa, Error<&str>> {
    all_consuming(fa::full_dfa)(input)
        .finish()
        .map(|(_, dfa)| dfa)
}
