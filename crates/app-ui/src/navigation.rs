//! Tab navigation for the invitation viewer
//!
//! This module provides:
//! - The fixed, ordered tab sequence and its media references
//! - Navigation state (active tab + direction of the last move)
//! - The single `select` transition every input funnels through

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Errors
// =============================================================================

/// Navigation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// Requested index does not name a tab
    #[error("Tab index {index} out of range for {count} tabs")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of tabs
        count: usize,
    },

    /// Requested title does not name a tab
    #[error("Unknown tab: {0}")]
    UnknownTab(String),

    /// A tab set was built with no tabs
    #[error("A tab set needs at least one tab")]
    EmptyTabSet,

    /// Two tabs share a title
    #[error("Duplicate tab title: {0}")]
    DuplicateTitle(String),
}

/// Result type for navigation operations
pub type Result<T> = std::result::Result<T, NavigationError>;

// =============================================================================
// Tabs
// =============================================================================

/// Reference to a media asset (image path or URL)
pub type MediaRef = String;

/// Titles of the standard invitation tabs
pub mod titles {
    /// The invitation card
    pub const INVITATION: &str = "Invitation";
    /// Event schedule
    pub const SCHEDULE: &str = "Schedule";
    /// Venue and travel information
    pub const INFORMATION: &str = "Information";
    /// RSVP form
    pub const RSVP: &str = "RSVP";
}

/// A single tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    /// Unique title, also the button label
    pub title: String,
    /// Media displayed while this tab is active
    pub media: MediaRef,
}

impl Tab {
    /// Create a new tab
    pub fn new(title: impl Into<String>, media: impl Into<MediaRef>) -> Self {
        Self {
            title: title.into(),
            media: media.into(),
        }
    }
}

/// The fixed, ordered tab sequence. Never empty, titles are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabSet {
    tabs: Vec<Tab>,
}

impl TabSet {
    /// Build a tab set, rejecting empty sequences and duplicate titles
    pub fn new(tabs: Vec<Tab>) -> Result<Self> {
        if tabs.is_empty() {
            return Err(NavigationError::EmptyTabSet);
        }
        for (i, tab) in tabs.iter().enumerate() {
            if tabs[..i].iter().any(|other| other.title == tab.title) {
                return Err(NavigationError::DuplicateTitle(tab.title.clone()));
            }
        }
        Ok(Self { tabs })
    }

    /// The standard Invitation / Schedule / Information / RSVP sequence
    pub fn invitation() -> Self {
        Self {
            tabs: vec![
                Tab::new(titles::INVITATION, "img/image3.png"),
                Tab::new(titles::SCHEDULE, "img/image3.png"),
                Tab::new(titles::INFORMATION, "img/image3.png"),
                Tab::new(titles::RSVP, "img/image4.png"),
            ],
        }
    }

    /// Number of tabs
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Whether the set has no tabs (never true for a constructed set)
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Get a tab by index
    pub fn get(&self, index: usize) -> Option<&Tab> {
        self.tabs.get(index)
    }

    /// Find the index of a tab by title
    pub fn position(&self, title: &str) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.title == title)
    }

    /// Iterate tabs in order
    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }
}

impl Default for TabSet {
    fn default() -> Self {
        Self::invitation()
    }
}

// =============================================================================
// Navigation State
// =============================================================================

/// A completed `select` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabTransition {
    /// Index before the transition
    pub from: usize,
    /// Index after the transition
    pub to: usize,
    /// `true` when `to > from`
    pub direction: bool,
}

impl TabTransition {
    /// Whether this transition re-selected the active tab
    pub fn is_reselect(&self) -> bool {
        self.from == self.to
    }
}

/// Active tab and the direction of the last move.
///
/// `direction` is derived by [`NavigationState::select`] and cannot be set
/// independently. `active_index` always names a tab in `tabs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    tabs: TabSet,
    active_index: usize,
    direction: bool,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(TabSet::default())
    }
}

impl NavigationState {
    /// Start on the first tab, moving forward
    pub fn new(tabs: TabSet) -> Self {
        Self {
            tabs,
            active_index: 0,
            direction: true,
        }
    }

    /// Select a tab by index.
    ///
    /// Sets `direction = index > active_index`, then `active_index = index`.
    /// Re-selecting the active tab is a valid transition with
    /// `direction == false`.
    pub fn select(&mut self, index: usize) -> Result<TabTransition> {
        if index >= self.tabs.len() {
            return Err(NavigationError::IndexOutOfRange {
                index,
                count: self.tabs.len(),
            });
        }

        let transition = TabTransition {
            from: self.active_index,
            to: index,
            direction: index > self.active_index,
        };
        self.direction = transition.direction;
        self.active_index = index;

        tracing::debug!(
            from = transition.from,
            to = transition.to,
            forward = transition.direction,
            "tab selected"
        );
        Ok(transition)
    }

    /// Select a tab by title
    pub fn select_by_title(&mut self, title: &str) -> Result<TabTransition> {
        let index = self
            .tabs
            .position(title)
            .ok_or_else(|| NavigationError::UnknownTab(title.to_string()))?;
        self.select(index)
    }

    /// Active tab index
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Direction of the last transition (`true` = forward)
    pub fn direction(&self) -> bool {
        self.direction
    }

    /// Active tab
    pub fn active_tab(&self) -> &Tab {
        // active_index is validated by select() and starts at 0 in a non-empty set
        &self.tabs.tabs[self.active_index]
    }

    /// Media of the active tab
    pub fn active_media(&self) -> &str {
        &self.active_tab().media
    }

    /// Whether the given tab is active
    pub fn is_active(&self, index: usize) -> bool {
        self.active_index == index
    }

    /// All tabs
    pub fn tabs(&self) -> &TabSet {
        &self.tabs
    }

    /// Number of tabs
    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    /// Whether there is a tab after the active one
    pub fn has_next(&self) -> bool {
        self.active_index + 1 < self.tabs.len()
    }

    /// Whether there is a tab before the active one
    pub fn has_previous(&self) -> bool {
        self.active_index > 0
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invitation_tabs() {
        let tabs = TabSet::invitation();
        let titles: Vec<_> = tabs.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Invitation", "Schedule", "Information", "RSVP"]);
        assert_eq!(tabs.get(3).unwrap().media, "img/image4.png");
        assert_eq!(tabs.position("RSVP"), Some(3));
        assert_eq!(tabs.position("Gifts"), None);
    }

    #[test]
    fn test_tab_set_rejects_empty() {
        assert_eq!(TabSet::new(vec![]), Err(NavigationError::EmptyTabSet));
    }

    #[test]
    fn test_tab_set_rejects_duplicate_titles() {
        let result = TabSet::new(vec![Tab::new("A", "a.png"), Tab::new("A", "b.png")]);
        assert_eq!(result, Err(NavigationError::DuplicateTitle("A".to_string())));
    }

    #[test]
    fn test_navigation_state_default() {
        let state = NavigationState::default();
        assert_eq!(state.active_index(), 0);
        assert!(state.direction());
        assert_eq!(state.active_tab().title, titles::INVITATION);
        assert!(!state.has_previous());
        assert!(state.has_next());
    }

    #[test]
    fn test_select_sets_index_and_direction() {
        let mut state = NavigationState::default();

        for (prev, next) in [(0, 2), (2, 1), (1, 3), (3, 0), (0, 0)] {
            assert_eq!(state.active_index(), prev);
            let transition = state.select(next).unwrap();
            assert_eq!(state.active_index(), next);
            assert_eq!(state.direction(), next > prev);
            assert_eq!(transition, TabTransition { from: prev, to: next, direction: next > prev });
        }
    }

    #[test]
    fn test_reselect_is_backward_transition() {
        let mut state = NavigationState::default();
        state.select(2).unwrap();
        let transition = state.select(2).unwrap();
        assert!(transition.is_reselect());
        assert!(!transition.direction);
        assert!(!state.direction());
        assert_eq!(state.active_index(), 2);
    }

    #[test]
    fn test_select_out_of_range() {
        let mut state = NavigationState::default();
        state.select(1).unwrap();
        let err = state.select(4).unwrap_err();
        assert_eq!(err, NavigationError::IndexOutOfRange { index: 4, count: 4 });
        // State is untouched
        assert_eq!(state.active_index(), 1);
        assert!(state.direction());
    }

    #[test]
    fn test_select_by_title_swaps_media() {
        let tabs = TabSet::new(vec![
            Tab::new("One", "one.png"),
            Tab::new("Two", "two.png"),
        ])
        .unwrap();
        let mut state = NavigationState::new(tabs);
        assert_eq!(state.active_media(), "one.png");

        state.select_by_title("Two").unwrap();
        assert_eq!(state.active_index(), 1);
        assert_eq!(state.active_media(), "two.png");

        assert_eq!(
            state.select_by_title("Three"),
            Err(NavigationError::UnknownTab("Three".to_string()))
        );
    }

    #[test]
    fn test_navigation_state_serialization() {
        let mut state = NavigationState::default();
        state.select(2).unwrap();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["active_index"], 2);
        assert_eq!(json["direction"], true);
    }
}
