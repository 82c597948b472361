//! Design tokens for the invitation viewer
//!
//! Breakpoints, motion timings and gesture thresholds shared by the
//! navigation, gesture and transition modules.

use serde::{Deserialize, Serialize};

// =============================================================================
// Breakpoint Tokens
// =============================================================================

/// Layout selected from the viewport width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Narrow, touch-driven layout (< 768px); drag gestures are routed
    #[default]
    Touch,
    /// Wide layout (>= 768px); shows the backdrop image
    Desktop,
}

impl Layout {
    /// Whether drag releases should be routed to navigation
    pub fn accepts_gestures(&self) -> bool {
        matches!(self, Layout::Touch)
    }

    /// Whether the decorative backdrop is shown behind the card
    pub fn shows_backdrop(&self) -> bool {
        matches!(self, Layout::Desktop)
    }
}

/// Breakpoint widths
pub mod breakpoints {
    /// Desktop breakpoint (768px)
    pub const DESKTOP: u32 = 768;

    /// Check if width is at least the desktop breakpoint
    pub fn is_desktop(width: u32) -> bool {
        width >= DESKTOP
    }

    /// Get the layout for a viewport width
    pub fn layout(width: u32) -> super::Layout {
        if is_desktop(width) {
            super::Layout::Desktop
        } else {
            super::Layout::Touch
        }
    }
}

// =============================================================================
// Animation Tokens
// =============================================================================

/// Animation durations
pub mod duration {
    use std::time::Duration;

    /// Pane slide-in (400ms)
    pub const ENTER: Duration = Duration::from_millis(400);
    /// Pane slide-out (300ms)
    pub const EXIT: Duration = Duration::from_millis(300);
    /// Content image fade-in (200ms)
    pub const MEDIA_FADE: Duration = Duration::from_millis(200);
}

/// Easing functions
pub mod easing {
    /// Ease in out
    pub const EASE_IN_OUT: &str = "easeInOut";
}

/// Slide geometry and opacity levels
pub mod motion {
    /// Horizontal offset of an off-screen pane, in percent of its width
    pub const SLIDE_OFFSET_PERCENT: f32 = 100.0;
    /// Opacity of a pane while it is off-screen
    pub const OFFSCREEN_OPACITY: f32 = 0.7;
    /// Opacity of a settled pane
    pub const FULL_OPACITY: f32 = 1.0;
}

// =============================================================================
// Gesture Tokens
// =============================================================================

/// Drag gesture tuning
pub mod gesture {
    /// Minimum horizontal drag distance (px) that changes tab
    pub const SWIPE_THRESHOLD: f32 = 100.0;
}
