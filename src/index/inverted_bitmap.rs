//! Inverted Bitmap matcher: closed-world pre-expansion over a fixed
//! topic universe.
//!
//! Every subscription pattern is expanded, at subscribe time, against the
//! full universe of concrete topics the caller will ever look up. This
//! buys O(1) lookup (one bitmap's worth of ids, no per-call matching) at
//! the cost of O(|T|) subscribe. Only sensible when the universe `T` is
//! known up front and small; the closed-world assumption is a design
//! choice, not a bug.

use hashbrown::HashMap;
use parking_lot::RwLock;
use roaring::RoaringBitmap;
use std::hash::Hash;
use tracing::debug;

use crate::error::{MatcherError, Result};
use crate::index::ids::IdPool;
use crate::matcher::Matcher;
use crate::subscription::Subscription;
use crate::topic as topic_mod;

struct State<S> {
    bitmaps: HashMap<String, RoaringBitmap>,
    subscribers: HashMap<u32, S>,
    ids: IdPool,
}

/// Closed-world bitmap matcher. See module docs.
pub struct InvertedBitmapMatcher<S> {
    state: RwLock<State<S>>,
}

impl<S> InvertedBitmapMatcher<S> {
    /// Builds a matcher over the given topic universe `topics`. Every
    /// future `Lookup` outside this set returns the empty set, regardless
    /// of what patterns are subscribed.
    pub fn new<I, T>(topics: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let bitmaps = topics
            .into_iter()
            .map(|t| (t.into(), RoaringBitmap::new()))
            .collect();
        Self {
            state: RwLock::new(State {
                bitmaps,
                subscribers: HashMap::new(),
                ids: IdPool::new(),
            }),
        }
    }
}

impl<S: Clone + Eq + Hash> Matcher<S> for InvertedBitmapMatcher<S> {
    fn subscribe(&self, topic: &str, subscriber: S) -> Result<Subscription<S>> {
        let mut state = self.state.write();
        let id = state.ids.alloc();

        let mut matched_any = false;
        for (t, bitmap) in &mut state.bitmaps {
            // Symmetric predicate: either argument may carry a wildcard,
            // which is what lets a pattern like "forex.*" pre-expand
            // against concrete universe topics here.
            if topic_mod::matches(topic, t) {
                bitmap.insert(id);
                matched_any = true;
            }
        }

        if !matched_any {
            state.ids.release_unused(id);
            debug!(topic, "inverted bitmap matcher: rejected, matches no topic in universe");
            return Err(MatcherError::bad_topic(format!(
                "pattern {topic:?} matches no topic in the configured universe"
            )));
        }

        state.subscribers.insert(id, subscriber.clone());
        debug!(topic, id, "inverted bitmap matcher: subscribed");
        Ok(Subscription::new(id, topic.to_string(), subscriber))
    }

    fn unsubscribe(&self, handle: Subscription<S>) {
        let mut state = self.state.write();
        let id = handle.id();
        for bitmap in state.bitmaps.values_mut() {
            bitmap.remove(id);
        }
        state.ids.free(id);
        state.subscribers.remove(&id);
        debug!(id, "inverted bitmap matcher: unsubscribed");
    }

    fn lookup(&self, topic: &str) -> Vec<S> {
        let state = self.state.read();
        let Some(bitmap) = state.bitmaps.get(topic) else {
            return Vec::new();
        };
        bitmap
            .iter()
            .filter_map(|id| state.subscribers.get(&id).cloned())
            .collect()
    }
}
