//! The subscription handle returned by `Subscribe` and consumed by
//! `Unsubscribe`.

/// An immutable receipt for a single `Subscribe` call.
///
/// `id` is assigned by the issuing matcher and is only meaningful within
/// that matcher instance; callers must treat it as opaque and never
/// fabricate or alter one by hand. The only way to obtain a `Subscription`
/// is from [`crate::matcher::Matcher::subscribe`].
#[derive(Debug, Clone)]
pub struct Subscription<S> {
    id: u32,
    topic: String,
    subscriber: S,
}

impl<S> Subscription<S> {
    pub(crate) fn new(id: u32, topic: String, subscriber: S) -> Self {
        Self {
            id,
            topic,
            subscriber,
        }
    }

    /// The id assigned by the issuing matcher. Meaningless outside it.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// The pattern topic this subscription was registered under.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// The subscriber that was registered.
    #[must_use]
    pub const fn subscriber(&self) -> &S {
        &self.subscriber
    }
}
