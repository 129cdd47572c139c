//! Topic tokenizing and the shared wildcard match predicate.
//!
//! Every index variant is ultimately answerable to the same question this
//! module defines: does a pattern topic match a query topic? Bitmap and
//! trie variants take structural shortcuts (padding keys, trie descent)
//! that are equivalent to this predicate without calling it on the hot
//! path; the naive Hash variant and the shared test suite call it
//! directly.

/// The single-character topic delimiter.
pub const DELIMITER: char = '.';

/// The wildcard constituent: matches exactly one constituent at its
/// position, no more, no less.
pub const WILDCARD: &str = "*";

/// Splits a topic into its dot-delimited constituents.
///
/// An empty string splits to a single empty constituent (`[""]`), not zero
/// constituents (`str::split` already gives us this for free).
#[inline]
#[must_use]
pub fn constituents(topic: &str) -> std::str::Split<'_, char> {
    topic.split(DELIMITER)
}

/// Returns whether `pattern` matches `query`.
///
/// Holds iff both split into the same number of constituents and, at every
/// position, either the constituents are equal or `pattern`'s constituent
/// is the wildcard. The predicate is symmetric in form: swapping `pattern`
/// and `query` gives the same answer, which the Inverted Bitmap variant
/// relies on (it expands patterns against a closed topic universe and
/// needs either argument to carry the wildcard).
#[must_use]
pub fn matches(pattern: &str, query: &str) -> bool {
    let mut p = constituents(pattern);
    let mut q = constituents(query);
    loop {
        match (p.next(), q.next()) {
            (Some(pc), Some(qc)) => {
                if pc != qc && pc != WILDCARD && qc != WILDCARD {
                    return false;
                }
            }
            (None, None) => return true,
            _ => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_topic_is_one_empty_constituent() {
        assert_eq!(constituents("").count(), 1);
        assert_eq!(constituents("").next(), Some(""));
    }

    #[test]
    fn exact_match() {
        assert!(matches("forex.eur", "forex.eur"));
        assert!(!matches("forex.eur", "forex.usd"));
    }

    #[test]
    fn wildcard_consumes_exactly_one_constituent() {
        assert!(matches("forex.*", "forex.eur"));
        assert!(!matches("forex.*", "forex.eur.spot"));
        assert!(!matches("forex.*", "forex"));
    }

    #[test]
    fn length_mismatch_never_matches() {
        assert!(!matches("a.b", "a.b.c"));
        assert!(!matches("a.b.c", "a.b"));
    }

    #[test]
    fn predicate_is_symmetric_in_form() {
        assert_eq!(matches("forex.*", "forex.eur"), matches("forex.eur", "forex.*"));
        assert_eq!(matches("*.*", "a.b"), matches("a.b", "*.*"));
    }

    #[test]
    fn bare_wildcard_matches_single_constituent_topics() {
        assert!(matches("*", "trade"));
        assert!(!matches("*", "trade.jpy"));
    }
}
