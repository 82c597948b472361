//! Drag gesture routing
//!
//! Translates the horizontal offset of a released drag into a tab change.
//! Dragging left (negative offset) moves to the next tab, dragging right
//! moves to the previous one. Short drags and drags past either end snap
//! back without touching navigation state.

use serde::{Deserialize, Serialize};

use crate::navigation::{NavigationState, TabTransition};
use crate::tokens::gesture::SWIPE_THRESHOLD;

/// What a drag release did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureOutcome {
    /// The release changed tab
    Navigated(TabTransition),
    /// The dragged pane returns elastically to its origin
    SnapBack,
}

impl GestureOutcome {
    /// Whether the release changed tab
    pub fn navigated(&self) -> bool {
        matches!(self, GestureOutcome::Navigated(_))
    }
}

/// Routes drag releases to [`NavigationState::select`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureRouter {
    threshold: f32,
}

impl Default for GestureRouter {
    fn default() -> Self {
        Self {
            threshold: SWIPE_THRESHOLD,
        }
    }
}

impl GestureRouter {
    /// Create a router with the default 100px threshold
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the threshold (px). Negative or non-finite values fall back to
    /// the default.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = if threshold.is_finite() && threshold >= 0.0 {
            threshold
        } else {
            SWIPE_THRESHOLD
        };
        self
    }

    /// Current threshold in pixels
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Route a drag release with horizontal offset `offset_x` (px)
    pub fn release(&self, state: &mut NavigationState, offset_x: f32) -> GestureOutcome {
        let target = if offset_x < -self.threshold && state.has_next() {
            Some(state.active_index() + 1)
        } else if offset_x > self.threshold && state.has_previous() {
            Some(state.active_index() - 1)
        } else {
            None
        };

        // Targets are bounds-checked above, so select cannot fail here
        match target.map(|index| state.select(index)) {
            Some(Ok(transition)) => GestureOutcome::Navigated(transition),
            _ => {
                tracing::debug!(offset_x, index = state.active_index(), "drag absorbed");
                GestureOutcome::SnapBack
            }
        }
    }
}
