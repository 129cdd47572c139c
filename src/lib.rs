//! A topic subscription matcher for a publish/subscribe bus.
//!
//! Clients register interest in dot-delimited *topics* (any constituent
//! may be the literal wildcard `*`) and later ask, given a concrete
//! message topic, which subscribers should receive it. Four
//! interchangeable [`Matcher`](matcher::Matcher) implementations trade
//! subscribe/unsubscribe cost for lookup cost and read-scalability:
//!
//! - [`index::hash::HashMatcher`]: exact-pattern hashmap, O(1)
//!   subscribe, O(P·K) lookup. Baseline for comparison.
//! - [`index::inverted_bitmap::InvertedBitmapMatcher`]: closed-world
//!   pre-expansion over a fixed topic universe. O(1) lookup, O(|T|)
//!   subscribe.
//! - [`index::constituent_bitmap::ConstituentBitmapMatcher`]: per-
//!   position roaring-bitmap intersection. O(k) subscribe, O(M) lookup
//!   with no closed-world requirement. The headline design.
//! - [`index::trie::TrieMatcher`]: a rooted, pruning trie. O(k)
//!   subscribe/unsubscribe, O(k·branching) lookup.
//!
//! This crate has no CLI, no wire protocol, and does no I/O (it is a
//! purely in-memory matching index). The broker that calls `lookup` and
//! dispatches messages, subscriber identity/equality rules, and
//! persistence/replication are all out of scope; see each module's docs
//! for the invariants it upholds.
#![deny(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod dev_tracing;
pub mod error;
pub mod index;
pub mod matcher;
pub mod subscription;
pub mod topic;

/// Re-exports of the crate's public surface for `use topic_matcher::prelude::*;`.
pub mod prelude {
    pub use crate::error::MatcherError;
    pub use crate::index::constituent_bitmap::ConstituentBitmapMatcher;
    pub use crate::index::hash::HashMatcher;
    pub use crate::index::inverted_bitmap::InvertedBitmapMatcher;
    pub use crate::index::trie::TrieMatcher;
    pub use crate::matcher::Matcher;
    pub use crate::subscription::Subscription;
}
