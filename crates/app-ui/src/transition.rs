//! Slide transitions between tab panes
//!
//! Each tab change mounts a new pane that slides in while the previous pane
//! slides out. Panes move through `Entering -> Entered -> Exiting -> Exited`,
//! driven either by elapsed time ([`TransitionView::advance`]) or by explicit
//! completion callbacks from whatever renders them. An exiting pane stays
//! mounted until its exit finishes; only one pane is ever current.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::navigation::TabTransition;
use crate::tokens::{duration, easing, motion};

// =============================================================================
// Animation
// =============================================================================

/// Lifecycle phase of a pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Sliding in
    Entering,
    /// Settled and fully visible
    Entered,
    /// Sliding out
    Exiting,
    /// Exit finished; the pane is unmounted
    Exited,
}

/// Position and opacity of a pane at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Horizontal offset in percent of the pane width
    pub x_percent: f32,
    /// Pane opacity
    pub opacity: f32,
}

impl Frame {
    /// A settled pane
    pub const SETTLED: Frame = Frame {
        x_percent: 0.0,
        opacity: motion::FULL_OPACITY,
    };
}

/// A slide + fade between two frames
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlideAnimation {
    /// Starting frame
    pub from: Frame,
    /// Final frame
    pub to: Frame,
    /// Total duration
    pub duration: Duration,
    /// Easing curve name
    pub easing: &'static str,
}

impl SlideAnimation {
    /// Slide in from the right when moving forward, from the left otherwise
    pub fn enter(direction: bool) -> Self {
        Self {
            from: Frame {
                x_percent: offscreen(direction),
                opacity: motion::OFFSCREEN_OPACITY,
            },
            to: Frame::SETTLED,
            duration: duration::ENTER,
            easing: easing::EASE_IN_OUT,
        }
    }

    /// Slide out to the side opposite the incoming pane
    pub fn exit(direction: bool) -> Self {
        Self {
            from: Frame::SETTLED,
            to: Frame {
                x_percent: -offscreen(direction),
                opacity: motion::OFFSCREEN_OPACITY,
            },
            duration: duration::EXIT,
            easing: easing::EASE_IN_OUT,
        }
    }

    /// Frame after `elapsed` time
    pub fn sample(&self, elapsed: Duration) -> Frame {
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        let t = ease_in_out(progress);
        Frame {
            x_percent: lerp(self.from.x_percent, self.to.x_percent, t),
            opacity: lerp(self.from.opacity, self.to.opacity, t),
        }
    }
}

fn offscreen(direction: bool) -> f32 {
    if direction {
        motion::SLIDE_OFFSET_PERCENT
    } else {
        -motion::SLIDE_OFFSET_PERCENT
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cubic ease-in-out on `[0, 1]`
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

// =============================================================================
// Panes
// =============================================================================

/// Identity of a mounted pane.
///
/// The generation makes re-selecting the same tab mount a distinct pane, so
/// its enter animation replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaneId {
    /// Tab shown by the pane
    pub tab_index: usize,
    /// Mount counter
    pub generation: u64,
}

/// A mounted content pane
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pane {
    id: PaneId,
    phase: Phase,
    animation: Option<SlideAnimation>,
    elapsed: Duration,
    media_elapsed: Duration,
}

impl Pane {
    fn settled(id: PaneId) -> Self {
        Self {
            id,
            phase: Phase::Entered,
            animation: None,
            elapsed: Duration::ZERO,
            media_elapsed: duration::MEDIA_FADE,
        }
    }

    fn entering(id: PaneId, direction: bool) -> Self {
        Self {
            id,
            phase: Phase::Entering,
            animation: Some(SlideAnimation::enter(direction)),
            elapsed: Duration::ZERO,
            media_elapsed: Duration::ZERO,
        }
    }

    fn begin_exit(&mut self, direction: bool) {
        self.phase = Phase::Exiting;
        self.animation = Some(SlideAnimation::exit(direction));
        self.elapsed = Duration::ZERO;
    }

    fn finish(&mut self) {
        self.phase = match self.phase {
            Phase::Entering => Phase::Entered,
            Phase::Exiting => Phase::Exited,
            settled => settled,
        };
        if self.phase == Phase::Entered {
            self.animation = None;
        }
        if let Some(animation) = &self.animation {
            self.elapsed = animation.duration;
        }
    }

    fn tick(&mut self, dt: Duration) {
        self.media_elapsed = (self.media_elapsed + dt).min(duration::MEDIA_FADE);
        let Some(animation) = self.animation else {
            return;
        };
        if matches!(self.phase, Phase::Entering | Phase::Exiting) {
            self.elapsed += dt;
            if self.elapsed >= animation.duration {
                self.finish();
            }
        }
    }

    /// Pane identity
    pub fn id(&self) -> PaneId {
        self.id
    }

    /// Tab shown by the pane
    pub fn tab_index(&self) -> usize {
        self.id.tab_index
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Running animation, if any
    pub fn animation(&self) -> Option<&SlideAnimation> {
        self.animation.as_ref()
    }

    /// Current position and opacity
    pub fn frame(&self) -> Frame {
        match &self.animation {
            Some(animation) => animation.sample(self.elapsed),
            None => Frame::SETTLED,
        }
    }

    /// Opacity of the content image, fading in after mount
    pub fn media_opacity(&self) -> f32 {
        (self.media_elapsed.as_secs_f32() / duration::MEDIA_FADE.as_secs_f32()).min(1.0)
    }
}

// =============================================================================
// Transition View
// =============================================================================

/// Tracks the current pane and any panes still sliding out
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionView {
    current: Pane,
    leaving: Vec<Pane>,
    next_generation: u64,
}

impl Default for TransitionView {
    fn default() -> Self {
        Self::new(0)
    }
}

impl TransitionView {
    /// Mount the first pane already settled; start-up does not animate
    pub fn new(initial_index: usize) -> Self {
        Self {
            current: Pane::settled(PaneId {
                tab_index: initial_index,
                generation: 0,
            }),
            leaving: Vec::new(),
            next_generation: 1,
        }
    }

    /// Start animating a navigation transition.
    ///
    /// The current pane begins exiting and a new pane for `transition.to`
    /// begins entering. Re-selecting the active tab replays the animation.
    pub fn apply(&mut self, transition: TabTransition) -> PaneId {
        let id = PaneId {
            tab_index: transition.to,
            generation: self.next_generation,
        };
        self.next_generation += 1;

        let mut outgoing =
            std::mem::replace(&mut self.current, Pane::entering(id, transition.direction));
        outgoing.begin_exit(transition.direction);
        self.leaving.push(outgoing);

        tracing::debug!(
            tab = id.tab_index,
            generation = id.generation,
            leaving = self.leaving.len(),
            "pane mounted"
        );
        id
    }

    /// Advance every running animation by `dt`, unmounting finished exits
    pub fn advance(&mut self, dt: Duration) {
        self.current.tick(dt);
        for pane in &mut self.leaving {
            pane.tick(dt);
        }
        self.leaving.retain(|pane| pane.phase != Phase::Exited);
    }

    /// Enter-complete callback. Returns false if `id` is not entering.
    pub fn complete_enter(&mut self, id: PaneId) -> bool {
        if self.current.id == id && self.current.phase == Phase::Entering {
            self.current.finish();
            true
        } else {
            false
        }
    }

    /// Exit-complete callback; unmounts and returns the finished pane
    pub fn complete_exit(&mut self, id: PaneId) -> Option<Pane> {
        let position = self
            .leaving
            .iter()
            .position(|pane| pane.id == id && pane.phase == Phase::Exiting)?;
        let mut pane = self.leaving.remove(position);
        pane.finish();
        Some(pane)
    }

    /// The pane for the active tab
    pub fn current(&self) -> &Pane {
        &self.current
    }

    /// Panes still sliding out, oldest first
    pub fn leaving(&self) -> &[Pane] {
        &self.leaving
    }

    /// Every mounted pane, outgoing first
    pub fn mounted(&self) -> impl Iterator<Item = &Pane> {
        self.leaving.iter().chain(std::iter::once(&self.current))
    }

    /// Whether any pane is still moving
    pub fn is_animating(&self) -> bool {
        !self.leaving.is_empty() || self.current.phase == Phase::Entering
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward(from: usize, to: usize) -> TabTransition {
        TabTransition { from, to, direction: to > from }
    }

    #[test]
    fn test_initial_pane_is_settled() {
        let view = TransitionView::new(0);
        assert_eq!(view.current().phase(), Phase::Entered);
        assert_eq!(view.current().frame(), Frame::SETTLED);
        assert_eq!(view.current().media_opacity(), 1.0);
        assert!(!view.is_animating());
        assert_eq!(view.mounted().count(), 1);
    }

    #[test]
    fn test_forward_enter_and_exit_vectors() {
        let enter = SlideAnimation::enter(true);
        assert_eq!(enter.from.x_percent, 100.0);
        assert_eq!(enter.from.opacity, 0.7);
        assert_eq!(enter.to, Frame::SETTLED);

        let exit = SlideAnimation::exit(true);
        assert_eq!(exit.from, Frame::SETTLED);
        assert_eq!(exit.to.x_percent, -100.0);
        assert_eq!(exit.to.opacity, 0.7);
    }

    #[test]
    fn test_backward_enter_and_exit_vectors() {
        assert_eq!(SlideAnimation::enter(false).from.x_percent, -100.0);
        assert_eq!(SlideAnimation::exit(false).to.x_percent, 100.0);
    }

    #[test]
    fn test_apply_mounts_new_pane_and_exits_old() {
        let mut view = TransitionView::new(0);
        let id = view.apply(forward(0, 1));

        assert_eq!(view.current().id(), id);
        assert_eq!(view.current().tab_index(), 1);
        assert_eq!(view.current().phase(), Phase::Entering);
        assert_eq!(view.leaving().len(), 1);
        assert_eq!(view.leaving()[0].tab_index(), 0);
        assert_eq!(view.leaving()[0].phase(), Phase::Exiting);
        assert!(view.is_animating());
    }

    #[test]
    fn test_advance_runs_phases_to_completion() {
        let mut view = TransitionView::new(0);
        view.apply(forward(0, 1));

        view.advance(Duration::from_millis(300));
        // Exit (300ms) finished and unmounted, enter (400ms) still running
        assert!(view.leaving().is_empty());
        assert_eq!(view.current().phase(), Phase::Entering);
        assert_eq!(view.current().media_opacity(), 1.0);

        view.advance(Duration::from_millis(100));
        assert_eq!(view.current().phase(), Phase::Entered);
        assert_eq!(view.current().frame(), Frame::SETTLED);
        assert!(!view.is_animating());
    }

    #[test]
    fn test_frames_interpolate() {
        let mut view = TransitionView::new(0);
        view.apply(forward(0, 2));

        let start = view.current().frame();
        assert_eq!(start.x_percent, 100.0);
        assert_eq!(start.opacity, 0.7);

        view.advance(Duration::from_millis(200));
        let mid = view.current().frame();
        assert!(mid.x_percent > 0.0 && mid.x_percent < 100.0);
        assert!(mid.opacity > 0.7 && mid.opacity < 1.0);

        let outgoing = view.leaving()[0].frame();
        assert!(outgoing.x_percent < 0.0);
    }

    #[test]
    fn test_completion_callbacks() {
        let mut view = TransitionView::new(0);
        let old = view.current().id();
        let new = view.apply(forward(0, 1));

        assert!(!view.complete_enter(old));
        assert!(view.complete_enter(new));
        assert!(!view.complete_enter(new));
        assert_eq!(view.current().phase(), Phase::Entered);

        let exited = view.complete_exit(old).unwrap();
        assert_eq!(exited.phase(), Phase::Exited);
        assert!(view.complete_exit(old).is_none());
        assert_eq!(view.mounted().count(), 1);
    }

    #[test]
    fn test_reselect_replays_with_distinct_pane() {
        let mut view = TransitionView::new(2);
        let first = view.current().id();
        let replay = view.apply(TabTransition { from: 2, to: 2, direction: false });

        assert_ne!(first, replay);
        assert_eq!(replay.tab_index, 2);
        assert_eq!(view.current().phase(), Phase::Entering);
        assert_eq!(view.current().frame().x_percent, -100.0);
        assert_eq!(view.leaving()[0].id(), first);
    }

    #[test]
    fn test_rapid_transitions_keep_one_current_pane() {
        let mut view = TransitionView::new(0);
        view.apply(forward(0, 1));
        view.advance(Duration::from_millis(100));
        view.apply(forward(1, 2));
        view.apply(forward(2, 3));

        let entering = view.mounted().filter(|p| p.phase() != Phase::Exiting).count();
        assert_eq!(entering, 1);
        assert_eq!(view.current().tab_index(), 3);
        assert_eq!(view.leaving().len(), 3);

        view.advance(Duration::from_millis(400));
        assert_eq!(view.mounted().count(), 1);
        assert_eq!(view.current().phase(), Phase::Entered);
    }

    #[test]
    fn test_ease_in_out_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
        assert_eq!(ease_in_out(-3.0), 0.0);
        assert_eq!(ease_in_out(3.0), 1.0);
    }
}
