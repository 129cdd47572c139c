//! Concurrent Trie matcher: the baseline, lock-guarded variant.
//!
//! Edges are labeled by constituent string (including the wildcard);
//! each node holds a subscriber refcount map plus its children. A single
//! `parking_lot::RwLock` guards the whole arena, matching the shared
//! whole-structure lock every other variant also uses. A copy-on-write
//! alternative is possible, but nothing in `examples/original_source/`
//! implements one to ground a second trie on (see `DESIGN.md`), so this
//! crate builds only the baseline.
//!
//! Nodes live in a `Vec<Node<S>>` arena rather than behind `Rc`/raw
//! pointers: a parent link here is strictly a back-reference, never an
//! owner, and an index is the most literal way to express "reference,
//! not owner" in safe Rust.

use hashbrown::{HashMap, HashSet};
use parking_lot::RwLock;
use smallvec::SmallVec;
use std::hash::Hash;
use tracing::debug;

use crate::error::Result;
use crate::matcher::Matcher;
use crate::subscription::Subscription;
use crate::topic::{self as topic_mod, WILDCARD};

const ROOT: usize = 0;

struct Node<S> {
    parent: Option<usize>,
    /// The edge label from `parent` to this node; unused for the root.
    word: String,
    children: HashMap<String, usize>,
    /// Refcounted like Hash's subscriber map (see that module's doc
    /// comment): two handles for the same `(topic, subscriber)` pair must
    /// each survive until both are unsubscribed.
    subs: HashMap<S, u32>,
}

impl<S> Node<S> {
    fn leaf(parent: usize, word: String) -> Self {
        Self {
            parent: Some(parent),
            word,
            children: HashMap::new(),
            subs: HashMap::new(),
        }
    }

    fn root() -> Self {
        Self {
            parent: None,
            word: String::new(),
            children: HashMap::new(),
            subs: HashMap::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.subs.is_empty() && self.children.is_empty()
    }
}

struct State<S> {
    /// `None` entries are pruned slots, kept to avoid renumbering live
    /// indices elsewhere in the arena; `alloc` reuses them before
    /// growing.
    arena: Vec<Option<Node<S>>>,
    free: Vec<usize>,
}

impl<S> State<S> {
    fn node(&self, idx: usize) -> &Node<S> {
        self.arena[idx].as_ref().expect("live trie index")
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<S> {
        self.arena[idx].as_mut().expect("live trie index")
    }

    fn alloc(&mut self, node: Node<S>) -> usize {
        if let Some(idx) = self.free.pop() {
            self.arena[idx] = Some(node);
            idx
        } else {
            self.arena.push(Some(node));
            self.arena.len() - 1
        }
    }

    /// Removes an emptied node from its parent and frees its slot,
    /// repeating upward while ancestors are likewise empty. The root is
    /// never pruned.
    fn prune(&mut self, mut idx: usize) {
        while idx != ROOT {
            let (parent, word) = {
                let node = self.node(idx);
                (node.parent.expect("non-root has a parent"), node.word.clone())
            };
            if !self.node(idx).is_empty() {
                break;
            }
            self.node_mut(parent).children.remove(&word);
            self.arena[idx] = None;
            self.free.push(idx);
            idx = parent;
        }
    }
}

/// Arena-backed, lock-guarded trie matcher. See module docs.
pub struct TrieMatcher<S> {
    state: RwLock<State<S>>,
}

impl<S> Default for TrieMatcher<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> TrieMatcher<S> {
    /// Creates a matcher with just the root node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                arena: vec![Some(Node::root())],
                free: Vec::new(),
            }),
        }
    }

    /// Number of live nodes, root included, for tests that want to
    /// observe pruning directly (spec scenario 6) without walking edges.
    #[must_use]
    pub fn live_node_count(&self) -> usize {
        self.state.read().arena.iter().filter(|n| n.is_some()).count()
    }
}

impl<S: Clone + Eq + Hash> Matcher<S> for TrieMatcher<S> {
    fn subscribe(&self, topic: &str, subscriber: S) -> Result<Subscription<S>> {
        let mut state = self.state.write();
        let mut curr = ROOT;
        for word in topic_mod::constituents(topic) {
            let existing = state.node(curr).children.get(word).copied();
            curr = match existing {
                Some(child) => child,
                None => {
                    let child = state.alloc(Node::leaf(curr, word.to_string()));
                    state.node_mut(curr).children.insert(word.to_string(), child);
                    child
                }
            };
        }
        *state.node_mut(curr).subs.entry(subscriber.clone()).or_insert(0) += 1;
        debug!(topic, "trie matcher: subscribed");
        // The trie never fails a subscribe and doesn't assign a
        // meaningful numeric id (unlike the bitmap variants, nothing here
        // is indexed by id); 0 is a constant placeholder.
        Ok(Subscription::new(0, topic.to_string(), subscriber))
    }

    fn unsubscribe(&self, handle: Subscription<S>) {
        let mut state = self.state.write();
        let mut curr = ROOT;
        for word in topic_mod::constituents(handle.topic()) {
            match state.node(curr).children.get(word).copied() {
                Some(child) => curr = child,
                // Missing segment: the handle is stale. Silent no-op;
                // this is the one variant where a stale handle is
                // expected rather than a caller bug.
                None => {
                    debug!(topic = handle.topic(), "trie matcher: unsubscribe on stale handle");
                    return;
                }
            }
        }

        let node = state.node_mut(curr);
        if let Some(count) = node.subs.get_mut(handle.subscriber()) {
            *count -= 1;
            if *count == 0 {
                node.subs.remove(handle.subscriber());
            }
        }

        if curr != ROOT && state.node(curr).is_empty() {
            state.prune(curr);
        }
        debug!(topic = handle.topic(), "trie matcher: unsubscribed");
    }

    fn lookup(&self, topic: &str) -> Vec<S> {
        let state = self.state.read();
        let words: SmallVec<[&str; 8]> = topic_mod::constituents(topic).collect();
        let mut out: HashSet<S> = HashSet::new();
        collect(&state, ROOT, &words, &mut out);
        out.into_iter().collect()
    }
}

fn collect<S: Clone + Eq + Hash>(
    state: &State<S>,
    node: usize,
    words: &[&str],
    out: &mut HashSet<S>,
) {
    let Some((first, rest)) = words.split_first() else {
        out.extend(state.node(node).subs.keys().cloned());
        return;
    };
    if let Some(&child) = state.node(node).children.get(*first) {
        collect(state, child, rest, out);
    }
    if let Some(&child) = state.node(node).children.get(WILDCARD) {
        collect(state, child, rest, out);
    }
}
