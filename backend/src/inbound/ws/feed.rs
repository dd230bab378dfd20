//! Broadcast state backing the recipe change feed.
//!
//! The feed is a bounded broadcast channel: publication never blocks and
//! never fails, and a subscriber that falls behind sees a lag error on its
//! receiver instead of unbounded buffering. The connection loop treats lag
//! as fatal for that subscriber, matching the product's wholesale-replace
//! semantics (a lagged client should refetch, not replay).

use tokio::sync::broadcast;
use tracing::trace;

use crate::domain::RecipeEvent;
use crate::domain::ports::RecipeEventPublisher;

/// Events buffered per subscriber before lag kicks in.
const FEED_CAPACITY: usize = 64;

/// Shared publisher handed to services and subscribed to by connections.
#[derive(Clone)]
pub struct RecipeFeed {
    sender: broadcast::Sender<RecipeEvent>,
}

impl RecipeFeed {
    /// Create a feed with the default buffer capacity.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(FEED_CAPACITY);
        Self { sender }
    }

    /// Open a subscription receiving every event published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<RecipeEvent> {
        self.sender.subscribe()
    }
}

impl Default for RecipeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeEventPublisher for RecipeFeed {
    fn publish(&self, event: RecipeEvent) {
        if self.sender.send(event).is_err() {
            trace!("recipe event dropped: no feed subscribers");
        }
    }
}
