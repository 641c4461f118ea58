//! Prefix/suffix enumeration and the two closure predicates the observation tables rely on.

use std::collections::HashSet;

/// Lists all `|w|+1` prefixes of `w`, including the empty word, shortest first.
///
/// ```
/// use dfa_infer::strings::prefixes;
/// assert_eq!(prefixes("abcd"), vec!["", "a", "ab", "abc", "abcd"]);
/// ```
pub fn prefixes(w: &str) -> Vec<String> {
    let chars: Vec<char> = w.chars().collect();
    (0..=chars.len())
        .map(|i| chars[..i].iter().collect())
        .collect()
}

/// Lists all `|w|+1` suffixes of `w`, including the empty word, longest first.
///
/// ```
/// use dfa_infer::strings::suffixes;
/// assert_eq!(suffixes("abcd"), vec!["abcd", "bcd", "cd", "d", ""]);
/// ```
pub fn suffixes(w: &str) -> Vec<String> {
    let chars: Vec<char> = w.chars().collect();
    (0..=chars.len())
        .map(|i| chars[i..].iter().collect())
        .collect()
}

/// True iff every prefix of every element of `strings` is also in `strings`.
pub fn is_prefix_closed(strings: &HashSet<String>) -> bool {
    strings
        .iter()
        .all(|s| prefixes(s).iter().all(|p| strings.contains(p)))
}

/// True iff every suffix of every element of `strings` is also in `strings`.
pub fn is_suffix_closed(strings: &HashSet<String>) -> bool {
    strings
        .iter()
        .all(|s| suffixes(s).iter().all(|p| strings.contains(p)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_cardinality() {
        assert_eq!(prefixes("abcd").len(), 5);
        assert_eq!(prefixes("").len(), 1);
    }

    #[test]
    fn suffixes_cardinality() {
        assert_eq!(suffixes("abcd").len(), 5);
        assert_eq!(suffixes("").len(), 1);
    }

    #[test]
    fn prefix_closed_examples() {
        let closed: HashSet<String> = ["", "a", "ab", "abc"].into_iter().map(String::from).collect();
        assert!(is_prefix_closed(&closed));
        let not_closed: HashSet<String> = ["xy", "xyz"].into_iter().map(String::from).collect();
        assert!(!is_prefix_closed(&not_closed));
    }

    #[test]
    fn suffix_closed_examples() {
        let closed: HashSet<String> = ["", "abc", "bc", "c"].into_iter().map(String::from).collect();
        assert!(is_suffix_closed(&closed));
        let not_closed: HashSet<String> = ["xy", "xyz"].into_iter().map(String::from).collect();
        assert!(!is_suffix_closed(&not_closed));
    }

    #[test]
    fn closure_of_own_prefixes_and_suffixes() {
        let w = "abcd";
        let ps: HashSet<String> = prefixes(w).into_iter().collect();
        assert!(is_prefix_closed(&ps));
        let ss: HashSet<String> = suffixes(w).into_iter().collect();
        assert!(is_suffix_closed(&ss));
    }
}
