//! User interface state for the wedding invitation
//!
//! This crate holds the framework-independent UI core: the accent-derived
//! theme, tab navigation, drag gesture routing and pane transitions. It
//! renders nothing itself; a front end reads these values each frame.
//!
//! # Modules
//!
//! - [`theme`] - Contrast engine and the derived theme record
//! - [`tokens`] - Breakpoints, motion timings and gesture thresholds
//! - [`navigation`] - Tab set and navigation state
//! - [`gesture`] - Drag release routing
//! - [`transition`] - Pane enter/exit state machine
//!
//! # Example
//!
//! ```rust
//! use app_ui::{GestureRouter, NavigationState, TransitionView};
//!
//! let mut nav = NavigationState::default();
//! let mut view = TransitionView::new(nav.active_index());
//!
//! if let app_ui::GestureOutcome::Navigated(t) = GestureRouter::new().release(&mut nav, -150.0) {
//!     view.apply(t);
//! }
//! assert_eq!(nav.active_index(), 1);
//! assert_eq!(view.current().tab_index(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod gesture;
pub mod navigation;
pub mod theme;
pub mod tokens;
pub mod transition;

// Re-export commonly used types
pub use theme::{
    brightness, compute_theme, contrast_color, with_opacity, Color, FormStyle, Rgb, TabStyle,
    Theme, ThemeColor,
};

pub use tokens::{breakpoints, duration, easing, gesture as gesture_tokens, motion, Layout};

pub use navigation::{
    MediaRef, NavigationError, NavigationState, Tab, TabSet, TabTransition,
};

pub use gesture::{GestureOutcome, GestureRouter};

pub use transition::{Frame, Pane, PaneId, Phase, SlideAnimation, TransitionView};
