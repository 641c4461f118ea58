//! Gold's algorithm: passive inference of a DFA from a fixed pair of sample sets.
//!
//! [`GoldObservationTable`] holds the table of `{0, 1, *}` cells over `RED ∪ BLUE` access strings and `EXP`
//! distinguishing suffixes; [`GoldObservationTable::try_promote`] repeatedly promotes a blue row into `RED`
//! until no more promotions are possible, at which point [`GoldObservationTable::to_automaton`] either
//! synthesizes a DFA or falls back to the [prefix-tree acceptor](crate::gold::pta) of `S+`. [`gold`] drives the
//! whole thing end to end.

pub mod pta;

use crate::dfa::Dfa;
use crate::error::LearnerError;
use crate::strings::{is_prefix_closed, suffixes};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

/// A single cell of a [`GoldObservationTable`]: known-in-language, known-not-in-language, or a hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Zero,
    One,
    Star,
}

/// Two rows are *obviously different* iff one has a `1` and the other a `0` at some shared column; `Star` is
/// neutral. This is the symmetric reading of the predicate (see `DESIGN.md` for the historical asymmetric
/// variant this crate deliberately does not replicate).
fn obviously_different(a: &[Cell], b: &[Cell]) -> bool {
    a.iter().zip(b).any(|(&x, &y)| {
        matches!((x, y), (Cell::One, Cell::Zero) | (Cell::Zero, Cell::One))
    })
}

fn compatible(red_row: &[Cell], blue_row: &[Cell]) -> bool {
    !obviously_different(red_row, blue_row)
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Zero => write!(f, "0"),
            Cell::One => write!(f, "1"),
            Cell::Star => write!(f, "*"),
        }
    }
}

/// A deterministic tie-breaker used to choose among several access strings. `LexMin` reproduces the project's
/// historical default: plain lexicographic minimum, with no regard to length.
#[derive(Clone)]
pub enum PickStrategy {
    LexMin,
    Custom(Rc<dyn Fn(&[String]) -> String>),
}

impl Default for PickStrategy {
    fn default() -> Self {
        PickStrategy::LexMin
    }
}

impl fmt::Debug for PickStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickStrategy::LexMin => write!(f, "LexMin"),
            PickStrategy::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl PickStrategy {
    fn pick(&self, candidates: &[String]) -> String {
        match self {
            PickStrategy::LexMin => candidates.iter().min().cloned().expect("candidates is non-empty"),
            PickStrategy::Custom(f) => f(candidates),
        }
    }
}

/// Options accepted by [`gold`]. See the [module-level documentation](crate::gold) for the semantics of
/// `fill_holes`.
#[derive(Clone, Debug)]
pub struct GoldOptions {
    /// The alphabet Σ, one `char` per element, in no particular order (sorted internally).
    pub alphabet: String,
    /// Seed of `RED`, must be prefix-closed and over Σ. Defaults to `{ε}`.
    pub red_init: HashSet<String>,
    /// Selects the DFA-synthesis mode: hole-filling (`true`, the default) or the self-labeled / compatible-red
    /// fallback (`false`).
    pub fill_holes: bool,
    pub blue_pick: PickStrategy,
    pub red_pick: PickStrategy,
}

/// The default alphabet (lowercase Latin letters, digits, and space), used when a caller builds
/// [`GoldOptions`] via [`Default`] without supplying samples outside that range.
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz0123456789 ";

impl Default for GoldOptions {
    fn default() -> Self {
        GoldOptions {
            alphabet: DEFAULT_ALPHABET.to_string(),
            red_init: HashSet::from([String::new()]),
            fill_holes: true,
            blue_pick: PickStrategy::default(),
            red_pick: PickStrategy::default(),
        }
    }
}

/// What [`gold`] produced: a DFA consistent with both sample sets, or (when hole-filling or the
/// sample-consistency check failed) the [prefix-tree acceptor](pta) of `S+` as a trivial over-approximation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoldOutcome {
    Accepted(Dfa),
    Rejected(Dfa),
}

fn sort_by_len_lex(strings: &mut [String]) {
    strings.sort_by(|a, b| (a.chars().count(), a).cmp(&(b.chars().count(), b)));
}

/// The observation table Gold's algorithm builds and promotes. See the [module-level documentation](crate::gold).
#[derive(Debug, Clone)]
pub struct GoldObservationTable {
    alphabet: Vec<char>,
    s_plus: HashSet<String>,
    s_minus: HashSet<String>,
    exp: Vec<String>,
    red: Vec<String>,
    blue: Vec<String>,
    rows: HashMap<String, Vec<Cell>>,
    fill_holes: bool,
    blue_pick: PickStrategy,
    red_pick: PickStrategy,
}

impl GoldObservationTable {
    /// Builds the initial table from `s_plus`, `s_minus` and `options`, seeding `RED` from `options.red_init`
    /// and computing `EXP` from the suffixes of every sample.
    pub fn new(s_plus: &HashSet<String>, s_minus: &HashSet<String>, options: &GoldOptions) -> Result<Self, LearnerError> {
        let alphabet: Vec<char> = {
            let mut chars: Vec<char> = options.alphabet.chars().collect();
            chars.sort();
            chars.dedup();
            chars
        };
        let alphabet_set: HashSet<char> = alphabet.iter().copied().collect();

        let in_alphabet = |w: &str| w.chars().all(|c| alphabet_set.contains(&c));
        for w in s_plus.iter().chain(s_minus.iter()) {
            if !in_alphabet(w) {
                return Err(LearnerError::InvalidAlphabet(w.clone()));
            }
        }
        if let Some(overlap) = s_plus.intersection(s_minus).next() {
            return Err(LearnerError::OverlappingSamples(overlap.clone()));
        }
        if !is_prefix_closed(&options.red_init) || !options.red_init.iter().all(|w| in_alphabet(w)) {
            return Err(LearnerError::InvalidRedSeed);
        }

        let mut exp: Vec<String> = HashSet::<String>::from_iter(s_plus.iter().chain(s_minus.iter()).flat_map(|w| suffixes(w)))
            .into_iter()
            .collect();
        if exp.is_empty() {
            exp.push(String::new());
        }
        sort_by_len_lex(&mut exp);

        let mut red: Vec<String> = options.red_init.iter().cloned().collect();
        sort_by_len_lex(&mut red);
        let red_set: HashSet<String> = red.iter().cloned().collect();

        let mut blue: Vec<String> = Vec::new();
        let mut blue_set: HashSet<String> = HashSet::new();
        for r in &red {
            for &a in &alphabet {
                let ra = format!("{r}{a}");
                if !red_set.contains(&ra) && blue_set.insert(ra.clone()) {
                    blue.push(ra);
                }
            }
        }
        sort_by_len_lex(&mut blue);

        let mut table = GoldObservationTable {
            alphabet,
            s_plus: s_plus.clone(),
            s_minus: s_minus.clone(),
            exp,
            red,
            blue,
            rows: HashMap::new(),
            fill_holes: options.fill_holes,
            blue_pick: options.blue_pick.clone(),
            red_pick: options.red_pick.clone(),
        };
        for p in table.red.iter().chain(table.blue.iter()).cloned().collect::<Vec<_>>() {
            let row = table.compute_row(&p);
            table.rows.insert(p, row);
        }
        Ok(table)
    }

    /// The confirmed access strings, sorted `(length, lex)`. Exposed for visualization sinks; not needed by
    /// [`GoldObservationTable::try_promote`]/[`GoldObservationTable::to_automaton`] themselves.
    pub fn red(&self) -> &[String] {
        &self.red
    }

    /// The frontier access strings, sorted `(length, lex)`.
    pub fn blue(&self) -> &[String] {
        &self.blue
    }

    /// The experiment suffixes, sorted `(length, lex)`.
    pub fn exp(&self) -> &[String] {
        &self.exp
    }

    /// `T(p, e)`, or `None` if `p` is not a known red/blue row.
    pub fn cell(&self, p: &str, e: &str) -> Option<Cell> {
        let row = self.rows.get(p)?;
        let idx = self.exp.iter().position(|x| x == e)?;
        row.get(idx).copied()
    }

    fn val(&self, w: &str) -> Cell {
        if self.s_plus.contains(w) {
            Cell::One
        } else if self.s_minus.contains(w) {
            Cell::Zero
        } else {
            Cell::Star
        }
    }

    fn compute_row(&self, p: &str) -> Vec<Cell> {
        self.exp.iter().map(|e| self.val(&format!("{p}{e}"))).collect()
    }

    /// Attempts a single blue-promotion step: moves a blue row, obviously different from every red row, into
    /// `RED`, then extends `BLUE` with its one-symbol children. Returns `false` (a no-op) once no blue row
    /// qualifies; call in a loop until it does, then call [`GoldObservationTable::to_automaton`].
    pub fn try_promote(&mut self) -> bool {
        let candidates: Vec<String> = self
            .blue
            .iter()
            .filter(|b| self.red.iter().all(|r| obviously_different(&self.rows[r.as_str()], &self.rows[b.as_str()])))
            .cloned()
            .collect();
        if candidates.is_empty() {
            return false;
        }

        let picked = self.blue_pick.pick(&candidates);
        self.blue.retain(|b| b != &picked);
        self.red.push(picked.clone());
        sort_by_len_lex(&mut self.red);

        let red_set: HashSet<String> = self.red.iter().cloned().collect();
        let blue_set: HashSet<String> = self.blue.iter().cloned().collect();
        for &a in &self.alphabet.clone() {
            let child = format!("{picked}{a}");
            if !red_set.contains(&child) && !blue_set.contains(&child) {
                let row = self.compute_row(&child);
                self.rows.insert(child.clone(), row);
                self.blue.push(child);
            }
        }
        sort_by_len_lex(&mut self.blue);
        true
    }

    /// Two-sweep hole filling: first resolves every `RED` row's stars using a compatible blue row, then
    /// normalizes remaining red stars to `1`, then resolves every blue row's stars from its (now fully
    /// resolved) compatible red row. Fails if some blue has no compatible red at either sweep.
    fn fill_holes(&mut self) -> bool {
        for b in self.blue.clone() {
            let candidates: Vec<String> = self
                .red
                .iter()
                .filter(|r| compatible(&self.rows[r.as_str()], &self.rows[&b]))
                .cloned()
                .collect();
            if candidates.is_empty() {
                return false;
            }
            let r = self.red_pick.pick(&candidates);
            let b_row = self.rows[&b].clone();
            let r_row = self.rows.get_mut(&r).expect("r is a known red row");
            for (cell, &b_cell) in r_row.iter_mut().zip(&b_row) {
                if *cell == Cell::Star {
                    *cell = b_cell;
                }
            }
        }

        for r in &self.red {
            for cell in self.rows.get_mut(r).expect("r is a known red row") {
                if *cell == Cell::Star {
                    *cell = Cell::One;
                }
            }
        }

        for b in self.blue.clone() {
            let candidates: Vec<String> = self
                .red
                .iter()
                .filter(|r| compatible(&self.rows[r.as_str()], &self.rows[&b]))
                .cloned()
                .collect();
            if candidates.is_empty() {
                return false;
            }
            let r = self.red_pick.pick(&candidates);
            let r_row = self.rows[&r].clone();
            let b_row = self.rows.get_mut(&b).expect("b is a known blue row");
            for (cell, &r_cell) in b_row.iter_mut().zip(&r_row) {
                if *cell == Cell::Star {
                    *cell = r_cell;
                }
            }
        }
        true
    }

    /// Whether the accumulated samples are consistent with the synthesized transitions. A documented extension
    /// point: because [`crate::dfa::Dfa`] has no rejecting-state semantics beyond "non-accepting", this check
    /// is currently a stub that always succeeds.
    fn sample_consistency_check(&self) -> bool {
        true
    }

    /// Synthesizes the inferred DFA (or, on failure, the PTA fallback of `S+`). Call only once
    /// [`GoldObservationTable::try_promote`] has returned `false`.
    pub fn to_automaton(&mut self) -> GoldOutcome {
        if self.fill_holes && !self.fill_holes() {
            return GoldOutcome::Rejected(pta::build(&self.s_plus));
        }
        if !self.fill_holes && !self.sample_consistency_check() {
            return GoldOutcome::Rejected(pta::build(&self.s_plus));
        }

        let mut states = self.red.clone();
        sort_by_len_lex(&mut states);

        let mut transitions: Vec<(String, String, char)> = Vec::new();
        for q in &states {
            for &a in &self.alphabet {
                let qa = format!("{q}{a}");
                let target = if self.fill_holes {
                    let qa_row = if self.rows.contains_key(&qa) {
                        self.rows[&qa].clone()
                    } else {
                        self.compute_row(&qa)
                    };
                    match states.iter().find(|r| self.rows[r.as_str()] == qa_row) {
                        Some(r) => r.clone(),
                        None => return GoldOutcome::Rejected(pta::build(&self.s_plus)),
                    }
                } else if states.contains(&qa) {
                    qa.clone()
                } else {
                    let qa_row = self.rows.get(&qa).cloned().unwrap_or_else(|| self.compute_row(&qa));
                    let candidates: Vec<String> = states
                        .iter()
                        .filter(|r| compatible(&self.rows[r.as_str()], &qa_row))
                        .cloned()
                        .collect();
                    if candidates.is_empty() {
                        return GoldOutcome::Rejected(pta::build(&self.s_plus));
                    }
                    self.red_pick.pick(&candidates)
                };
                transitions.push((q.clone(), target, a));
            }
        }

        let finals: HashSet<String> = states
            .iter()
            .filter(|q| self.rows[q.as_str()].first() == Some(&Cell::One))
            .cloned()
            .collect();
        let dfa = Dfa::make_automaton(&transitions, &String::new(), &finals);
        GoldOutcome::Accepted(dfa)
    }
}

/// Runs Gold's algorithm end to end: builds the observation table, promotes blue rows to red to fixpoint, and
/// synthesizes a DFA.
///
/// ```
/// use dfa_infer::gold::{gold, GoldOptions, GoldOutcome};
/// use std::collections::HashSet;
///
/// let s_plus: HashSet<String> = ["bb", "abb", "bba", "bbb", "babb"].into_iter().map(String::from).collect();
/// let s_minus: HashSet<String> = ["", "a", "ba"].into_iter().map(String::from).collect();
/// let options = GoldOptions { alphabet: "ab".into(), ..Default::default() };
/// let outcome = gold(&s_plus, &s_minus, &options).unwrap();
/// assert!(matches!(outcome, GoldOutcome::Accepted(_)));
/// ```
#[tracing::instrument(skip_all)]
pub fn gold(s_plus: &HashSet<String>, s_minus: &HashSet<String>, options: &GoldOptions) -> Result<GoldOutcome, LearnerError> {
    let mut table = GoldObservationTable::new(s_plus, s_minus, options)?;
    let mut rounds = 0;
    while table.try_promote() {
        rounds += 1;
        tracing::debug!(rounds, red = table.red.len(), blue = table.blue.len(), "promoted a blue row");
    }
    let outcome = table.to_automaton();
    tracing::info!(accepted = matches!(outcome, GoldOutcome::Accepted(_)), "gold finished");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(alphabet: &str) -> GoldOptions {
        GoldOptions {
            alphabet: alphabet.into(),
            ..Default::default()
        }
    }

    fn samples() -> (HashSet<String>, HashSet<String>) {
        let s_plus = ["bb", "abb", "bba", "bbb", "babb"].into_iter().map(String::from).collect();
        let s_minus = ["", "a", "ba"].into_iter().map(String::from).collect();
        (s_plus, s_minus)
    }

    #[test]
    fn accepts_the_fixture_with_three_states_and_six_edges() {
        let (s_plus, s_minus) = samples();
        let outcome = gold(&s_plus, &s_minus, &options("ab")).unwrap();
        let GoldOutcome::Accepted(dfa) = outcome else {
            panic!("expected Accepted");
        };
        assert_eq!(dfa.num_states(), 3);
        let edges = (0..dfa.num_states())
            .flat_map(|q| dfa.sigma(q).into_iter().map(move |a| (q, a)))
            .count();
        assert_eq!(edges, 6);
        for w in &s_plus {
            assert!(dfa.accepts(w));
        }
        for w in &s_minus {
            assert!(!dfa.accepts(w));
        }
    }

    #[test]
    fn accepts_with_fill_holes_false_too() {
        let (s_plus, s_minus) = samples();
        let opts = GoldOptions {
            fill_holes: false,
            ..options("ab")
        };
        let outcome = gold(&s_plus, &s_minus, &opts).unwrap();
        assert!(matches!(outcome, GoldOutcome::Accepted(_)));
    }

    #[test]
    fn rejects_overlapping_samples() {
        let s_plus = HashSet::from(["a".to_string()]);
        let s_minus = HashSet::from(["a".to_string()]);
        let err = gold(&s_plus, &s_minus, &options("a")).unwrap_err();
        assert_eq!(err, LearnerError::OverlappingSamples("a".to_string()));
    }

    #[test]
    fn rejects_characters_outside_the_alphabet() {
        let s_plus = HashSet::from(["a".to_string()]);
        let s_minus = HashSet::new();
        let err = gold(&s_plus, &s_minus, &options("")).unwrap_err();
        assert_eq!(err, LearnerError::InvalidAlphabet("a".to_string()));
    }

    #[test]
    fn rejects_non_prefix_closed_red_seed() {
        let s_plus = HashSet::from(["a".to_string()]);
        let s_minus = HashSet::new();
        let opts = GoldOptions {
            red_init: HashSet::from(["a".to_string()]),
            ..options("a")
        };
        let err = gold(&s_plus, &s_minus, &opts).unwrap_err();
        assert_eq!(err, LearnerError::InvalidRedSeed);
    }

    #[test]
    fn rejects_every_scenario_2_fixture() {
        let a = HashSet::from(["a".to_string()]);
        assert!(gold(&a, &a, &options("a")).is_err());
        assert!(gold(&a, &HashSet::new(), &options("")).is_err());
        let opts = GoldOptions {
            red_init: HashSet::from(["a".to_string()]),
            ..options("")
        };
        assert!(gold(&a, &HashSet::new(), &opts).is_err());
    }
}
