//! Matcher error types.
//!
//! One error kind exists across all four variants: `BadTopic`. It is
//! raised synchronously, only from `Subscribe`, and commits no partial
//! state (the id, if one was allocated, is returned to the reclaim pool
//! before the error is returned). `Unsubscribe` never fails; an oversized
//! `Lookup` query (Constituent Bitmap) returns the empty set rather
//! than an error.

use thiserror::Error;

/// Main error type for matcher operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatcherError {
    /// The subscribed pattern cannot be indexed by this matcher.
    ///
    /// Raised by Inverted Bitmap when the pattern matches no topic in the
    /// configured universe, and by Constituent Bitmap when the pattern has
    /// more constituents than `max_constituents`. Hash and Trie never
    /// raise this.
    #[error("bad topic: {reason}")]
    BadTopic {
        /// Short, human-readable diagnostic; not meant to be pattern-matched on.
        reason: String,
    },
}

/// Result type alias for matcher operations.
pub type Result<T> = std::result::Result<T, MatcherError>;

impl MatcherError {
    /// Builds a [`MatcherError::BadTopic`] from any message-like value.
    pub fn bad_topic(reason: impl Into<String>) -> Self {
        Self::BadTopic {
            reason: reason.into(),
        }
    }
}
