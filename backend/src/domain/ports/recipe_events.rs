//! Port for publishing recipe mutation events.
//!
//! Services publish through this trait; the WebSocket inbound adapter owns
//! the concrete broadcast implementation. Publication is fire-and-forget —
//! a mutation must never fail because nobody is listening.

use crate::domain::RecipeEvent;

/// Port for fanning recipe mutations out to change-feed subscribers.
pub trait RecipeEventPublisher: Send + Sync {
    /// Publish an event to all current subscribers.
    fn publish(&self, event: RecipeEvent);
}

/// Publisher that drops every event. Used in tests and when no feed is
/// mounted.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpRecipeEventPublisher;

impl RecipeEventPublisher for NoOpRecipeEventPublisher {
    fn publish(&self, _event: RecipeEvent) {}
}
