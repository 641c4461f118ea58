//! The L* observation table: a binary matrix over access prefixes and distinguishing suffixes, with a
//! companion probed-bit matrix tracking which cells have actually been asked about.

use std::collections::HashMap;

/// A row's membership values, one byte per column (`0` or `1`), so a row is an owned, hashable, comparable key
/// independent of how many columns the table currently has.
pub type RowKey = Vec<u8>;

/// The table Angluin's L* learner builds and probes. See the [module-level documentation](crate::lstar).
#[derive(Debug, Clone, Default)]
pub struct LstarObservationTable {
    alphabet: Vec<char>,
    /// `S`: the access-prefix working set, insertion order.
    s: Vec<String>,
    /// Every row that exists in the table, i.e. `S ∪ S·A` plus anything else ever probed. Insertion order.
    prefixes: Vec<String>,
    prefix_index: HashMap<String, usize>,
    /// `E`: the distinguishing suffixes, insertion order.
    suffixes: Vec<String>,
    suffix_index: HashMap<String, usize>,
    cells: Vec<Vec<bool>>,
    probed: Vec<Vec<bool>>,
}

impl LstarObservationTable {
    /// A fresh table over alphabet `a`, with no prefixes, no suffixes, and `S = ∅`.
    pub fn new(alphabet: &[char]) -> Self {
        LstarObservationTable {
            alphabet: alphabet.to_vec(),
            ..Default::default()
        }
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// The current access-prefix working set `S`, in insertion order.
    pub fn s(&self) -> &[String] {
        &self.s
    }

    /// The current distinguishing-suffix set `E`, in insertion order.
    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// Ensures `s` has a row, growing the matrix if needed. Returns its index and whether it was newly added.
    pub fn add_prefix(&mut self, s: &str) -> (usize, bool) {
        if let Some(&i) = self.prefix_index.get(s) {
            return (i, false);
        }
        let i = self.prefixes.len();
        self.prefixes.push(s.to_string());
        self.prefix_index.insert(s.to_string(), i);
        self.cells.push(vec![false; self.suffixes.len()]);
        self.probed.push(vec![false; self.suffixes.len()]);
        (i, true)
    }

    /// Ensures `s` has a row *and* is a member of `S`. Idempotent.
    pub fn add_s_prefix(&mut self, s: &str) -> (usize, bool) {
        let (i, _) = self.add_prefix(s);
        let newly_in_s = !self.s.iter().any(|x| x == s);
        if newly_in_s {
            self.s.push(s.to_string());
        }
        (i, newly_in_s)
    }

    /// Ensures `e` has a column, growing the matrix if needed. Returns its index and whether it was newly added.
    pub fn add_suffix(&mut self, e: &str) -> (usize, bool) {
        if let Some(&j) = self.suffix_index.get(e) {
            return (j, false);
        }
        let j = self.suffixes.len();
        self.suffixes.push(e.to_string());
        self.suffix_index.insert(e.to_string(), j);
        for row in &mut self.cells {
            row.push(false);
        }
        for row in &mut self.probed {
            row.push(false);
        }
        (j, true)
    }

    /// Records `T(s, e) = v`. Adds `s`/`e` to the table first if they are not already present.
    pub fn set(&mut self, s: &str, e: &str, v: bool) {
        let (i, _) = self.add_prefix(s);
        let (j, _) = self.add_suffix(e);
        self.cells[i][j] = v;
        self.probed[i][j] = true;
    }

    /// `T(s, e)`, or `None` if `s`/`e` are unknown or the cell has not been probed yet.
    pub fn get(&self, s: &str, e: &str) -> Option<bool> {
        let i = *self.prefix_index.get(s)?;
        let j = *self.suffix_index.get(e)?;
        self.probed[i][j].then(|| self.cells[i][j])
    }

    /// The row of `s` as a hashable, comparable key, or `None` if `s` is not in the table.
    pub fn row(&self, s: &str) -> Option<RowKey> {
        let i = *self.prefix_index.get(s)?;
        Some(self.cells[i].iter().map(|&b| b as u8).collect())
    }

    fn assert_fully_probed(&self) {
        assert!(
            self.probed.iter().all(|row| row.iter().all(|&p| p)),
            "closedness/consistency queried before every cell of the table was probed"
        );
    }

    /// The first `(s, a)` witnessing that the table is not closed: `row(s·a)` matches no `row(s')` for
    /// `s' ∈ S`. `None` if the table is closed. Asserts every cell has been probed.
    pub fn find_mismatch_closeness(&self) -> Option<(String, char)> {
        self.assert_fully_probed();
        let rows: Vec<RowKey> = self.s.iter().filter_map(|s| self.row(s)).collect();
        for s in &self.s {
            for &a in &self.alphabet {
                let sa = format!("{s}{a}");
                let row = self.row(&sa).expect("s*a must have been probed by extend()");
                if !rows.contains(&row) {
                    return Some((s.clone(), a));
                }
            }
        }
        None
    }

    pub fn is_closed(&self) -> bool {
        self.find_mismatch_closeness().is_none()
    }

    /// The first `(s1, s2, a, e)` witnessing that the table is not consistent: `row(s1) = row(s2)` but
    /// `row(s1·a) ≠ row(s2·a)`, with `e` the distinguishing suffix. `None` if consistent. Asserts every cell
    /// has been probed.
    pub fn find_mismatch_consistency(&self) -> Option<(String, String, char, String)> {
        self.assert_fully_probed();
        for (i1, s1) in self.s.iter().enumerate() {
            for s2 in self.s.iter().skip(i1 + 1) {
                if self.row(s1) != self.row(s2) {
                    continue;
                }
                for &a in &self.alphabet {
                    let s1a = format!("{s1}{a}");
                    let s2a = format!("{s2}{a}");
                    if self.row(&s1a) != self.row(&s2a) {
                        for e in &self.suffixes {
                            if self.get(&s1a, e) != self.get(&s2a, e) {
                                return Some((s1.clone(), s2.clone(), a, e.clone()));
                            }
                        }
                    }
                }
            }
        }
        None
    }

    pub fn is_consistent(&self) -> bool {
        self.find_mismatch_consistency().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Spec scenario 7: seeded cells with S = {ε, a} are consistent, but flipping T(a,ε) to true makes the
    /// table inconsistent via the 'b' extension (row(b) = [T] vs row(ab) = [F]).
    #[test]
    fn consistency_from_seeded_cells() {
        let mut t = LstarObservationTable::new(&['a', 'b']);
        t.add_s_prefix("");
        t.add_s_prefix("a");
        t.set("", "", true);
        t.set("a", "", false);
        t.set("b", "", true);
        t.set("aa", "", true);
        t.set("ab", "", false);
        assert!(t.is_consistent());

        t.set("a", "", true);
        assert!(!t.is_consistent());
        let (s1, s2, a, e) = t.find_mismatch_consistency().unwrap();
        assert_eq!((s1.as_str(), s2.as_str(), a, e.as_str()), ("", "a", 'b', ""));
    }

    #[test]
    fn row_equality_ignores_unrelated_prefixes() {
        let mut t = LstarObservationTable::new(&['a']);
        t.set("", "", true);
        t.set("a", "", true);
        assert_eq!(t.row(""), t.row("a"));
    }

    #[test]
    fn unprobed_cell_is_none() {
        let mut t = LstarObservationTable::new(&['a']);
        t.set("", "", true);
        t.add_suffix("a");
        assert_eq!(t.get("", "a"), None);
        assert_eq!(t.get("missing", ""), None);
    }

    #[test]
    #[should_panic]
    fn closedness_panics_on_unprobed_cells() {
        let mut t = LstarObservationTable::new(&['a']);
        t.add_s_prefix("");
        t.add_suffix("");
        let _ = t.is_closed();
    }
}
