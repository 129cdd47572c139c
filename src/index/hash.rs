//! Hash (naive) matcher, the baseline for comparison, backed by an exact
//! pattern-string hashmap.
//!
//! Subscribe/unsubscribe are O(1); lookup is O(P * K), scanning every
//! distinct stored pattern `P` and running the shared predicate against
//! it (`K` constituents each). Not intended for large `P`; it exists so
//! the other three variants have a straightforward ground truth to agree
//! with in the equivalence tests.

use hashbrown::{HashMap, HashSet};
use parking_lot::RwLock;
use std::hash::Hash;
use tracing::debug;

use crate::error::Result;
use crate::matcher::Matcher;
use crate::subscription::Subscription;
use crate::topic as topic_mod;

/// Per-pattern subscriber refcounts.
///
/// Two distinct `Subscribe` handles for the same `(pattern, subscriber)`
/// pair must each keep contributing until *both* are unsubscribed (I2,
/// spec scenario 5). A plain `HashSet<S>` would collapse them into one
/// entry and let either handle's `Unsubscribe` wipe out the other's
/// contribution, so each subscriber is counted rather than just present.
#[derive(Default)]
struct State<S> {
    subs: HashMap<String, HashMap<S, u32>>,
}

/// Exact-pattern hashmap matcher. See module docs.
#[derive(Default)]
pub struct HashMatcher<S> {
    state: RwLock<State<S>>,
}

impl<S> HashMatcher<S> {
    /// Creates an empty matcher.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                subs: HashMap::new(),
            }),
        }
    }
}

impl<S: Clone + Eq + Hash> Matcher<S> for HashMatcher<S> {
    fn subscribe(&self, topic: &str, subscriber: S) -> Result<Subscription<S>> {
        let mut state = self.state.write();
        *state
            .subs
            .entry(topic.to_string())
            .or_default()
            .entry(subscriber.clone())
            .or_insert(0) += 1;
        debug!(topic, "hash matcher: subscribed");
        Ok(Subscription::new(0, topic.to_string(), subscriber))
    }

    fn unsubscribe(&self, handle: Subscription<S>) {
        let mut state = self.state.write();
        if let Some(counts) = state.subs.get_mut(handle.topic()) {
            if let Some(count) = counts.get_mut(handle.subscriber()) {
                *count -= 1;
                if *count == 0 {
                    counts.remove(handle.subscriber());
                }
            }
            // The pattern's entry is left in place (even once empty): the
            // reference behavior never compacts the outer map either.
        }
        debug!(topic = handle.topic(), "hash matcher: unsubscribed");
    }

    fn lookup(&self, topic: &str) -> Vec<S> {
        let state = self.state.read();
        let mut out = HashSet::new();
        for (pattern, subscribers) in &state.subs {
            if topic_mod::matches(pattern, topic) {
                out.extend(subscribers.keys().cloned());
            }
        }
        out.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_on_fresh_matcher_is_empty() {
        let m: HashMatcher<u32> = HashMatcher::new();
        assert!(m.lookup("forex.eur").is_empty());
    }

    #[test]
    fn subscribe_then_lookup_matches_wildcard() {
        let m = HashMatcher::new();
        m.subscribe("forex.*", 0u32).unwrap();
        let mut got = m.lookup("forex.eur");
        got.sort_unstable();
        assert_eq!(got, vec![0]);
        assert!(m.lookup("trade.jpy").is_empty());
    }

    #[test]
    fn double_subscribe_survives_single_unsubscribe() {
        let m = HashMatcher::new();
        let h1 = m.subscribe("x", 0u32).unwrap();
        let h2 = m.subscribe("x", 0u32).unwrap();
        assert_eq!(m.lookup("x"), vec![0]);
        m.unsubscribe(h1);
        assert_eq!(m.lookup("x"), vec![0]);
        m.unsubscribe(h2);
        assert!(m.lookup("x").is_empty());
    }
}
