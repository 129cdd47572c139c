//! The `Matcher` trait every index variant implements.

use crate::error::Result;
use crate::subscription::Subscription;

/// A topic subscription index.
///
/// `&self` rather than `&mut self`: every implementation's mutable state
/// lives behind its own lock, so a matcher can be shared as
/// `Arc<dyn Matcher<S>>` across threads without an outer lock.
pub trait Matcher<S> {
    /// Registers `subscriber` under `topic` and returns a handle.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::MatcherError::BadTopic`] if this matcher
    /// cannot index `topic` (Inverted Bitmap: outside the configured
    /// universe; Constituent Bitmap: more constituents than allowed).
    /// Hash and Trie never fail. On error no state is committed.
    fn subscribe(&self, topic: &str, subscriber: S) -> Result<Subscription<S>>;

    /// Removes the contribution of `handle` from future lookups.
    ///
    /// Idempotent: a stale or already-unsubscribed handle is a silent
    /// no-op in every variant.
    fn unsubscribe(&self, handle: Subscription<S>);

    /// Returns the deduplicated set of subscribers whose pattern matches
    /// `topic`, in unspecified order.
    fn lookup(&self, topic: &str) -> Vec<S>;
}
