//! Wedding invitation
//!
//! Composes the UI core crates into one session: a tabbed viewer whose
//! accent color is sampled from a reference image, with slide transitions,
//! drag navigation on touch layouts and an RSVP form.
//!
//! ```no_run
//! use wedding_invitation::{AppConfig, InvitationApp};
//!
//! # async fn run() -> anyhow::Result<()> {
//! wedding_invitation::init_tracing();
//! let config = AppConfig::from_env()?;
//! let mut app = InvitationApp::from_config(&config)?;
//!
//! app.select_tab_by_title("Schedule")?;
//! app.wait_for_theme().await;
//! println!("accent {}", app.theme().accent);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod telemetry;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use app_core::RsvpController;
use app_state::{theme_cell, SampleOutcome, ThemeHandle, ThemeSampler};
use app_ui::navigation::titles;
use app_ui::{
    breakpoints, FormStyle, GestureOutcome, GestureRouter, Layout, NavigationError,
    NavigationState, PaneId, TabStyle, Theme, TransitionView,
};
use media_processing::{FileImageSource, ImageSource, MedianCutExtractor, PaletteExtractor};
use networking::{DisabledTransport, SubmissionTransport};
use tokio::task::JoinHandle;

pub use config::AppConfig;
pub use telemetry::init_tracing;

/// Decorative backdrop shown on desktop layouts
pub const BACKDROP_MEDIA: &str = "img/bg-image.png";

/// One mounted invitation session.
///
/// Dropping it releases the theme cell, so a sampler that finishes later
/// writes nothing.
pub struct InvitationApp {
    navigation: NavigationState,
    view: TransitionView,
    router: GestureRouter,
    layout: Layout,
    theme: ThemeHandle,
    sampler: Option<JoinHandle<SampleOutcome>>,
    rsvp: RsvpController,
    rsvp_enabled: bool,
}

impl std::fmt::Debug for InvitationApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvitationApp")
            .field("active_index", &self.navigation.active_index())
            .field("layout", &self.layout)
            .field("sampled", &self.theme.is_sampled())
            .finish_non_exhaustive()
    }
}

impl InvitationApp {
    /// Mount a session and start theme sampling.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(
        config: &AppConfig,
        source: Arc<dyn ImageSource>,
        extractor: Arc<dyn PaletteExtractor>,
        transport: Arc<dyn SubmissionTransport>,
    ) -> Self {
        let navigation = NavigationState::default();
        let view = TransitionView::new(navigation.active_index());
        let (writer, theme) = theme_cell();
        let sampler = ThemeSampler::new(source, extractor).spawn(writer);

        tracing::info!(
            tabs = navigation.tab_count(),
            viewport = config.viewport_width,
            "invitation mounted"
        );

        Self {
            navigation,
            view,
            router: GestureRouter::new().with_threshold(config.swipe_threshold),
            layout: breakpoints::layout(config.viewport_width),
            theme,
            sampler: Some(sampler),
            rsvp: RsvpController::new(transport).with_policy(config.unknown_policy),
            rsvp_enabled: true,
        }
    }

    /// Mount with the file-backed image source, the median-cut extractor and
    /// the configured transport.
    ///
    /// Without an endpoint the app still mounts; RSVP submissions then fail
    /// with the generic message and [`InvitationApp::rsvp_enabled`] is false.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let transport: Arc<dyn SubmissionTransport> = match &config.transport {
            Some(transport_config) => networking::build_transport(transport_config)
                .context("failed to build submission transport")?,
            None => Arc::new(DisabledTransport),
        };

        let mut app = Self::mount(
            config,
            Arc::new(FileImageSource::new(&config.reference_image)),
            Arc::new(MedianCutExtractor::new()),
            transport,
        );
        app.rsvp_enabled = config.transport.is_some();
        Ok(app)
    }

    /// Tear the session down, returning the sampler task if it was never
    /// awaited. A sampler finishing after this writes nothing.
    pub fn unmount(self) -> Option<JoinHandle<SampleOutcome>> {
        let Self { sampler, .. } = self;
        sampler
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Select a tab by index and start its transition
    pub fn select_tab(&mut self, index: usize) -> Result<PaneId, NavigationError> {
        let transition = self.navigation.select(index)?;
        Ok(self.view.apply(transition))
    }

    /// Select a tab by title
    pub fn select_tab_by_title(&mut self, title: &str) -> Result<PaneId, NavigationError> {
        let transition = self.navigation.select_by_title(title)?;
        Ok(self.view.apply(transition))
    }

    /// Route a drag release. Desktop layouts ignore drags.
    pub fn drag_released(&mut self, offset_x: f32) -> GestureOutcome {
        if !self.layout.accepts_gestures() {
            tracing::debug!(offset_x, "drag ignored on desktop layout");
            return GestureOutcome::SnapBack;
        }

        let outcome = self.router.release(&mut self.navigation, offset_x);
        if let GestureOutcome::Navigated(transition) = outcome {
            self.view.apply(transition);
        }
        outcome
    }

    /// Advance running animations
    pub fn advance(&mut self, elapsed: Duration) {
        self.view.advance(elapsed);
    }

    /// Navigation state
    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    /// Mounted panes
    pub fn view(&self) -> &TransitionView {
        &self.view
    }

    /// Media of the active tab
    pub fn active_media(&self) -> &str {
        self.navigation.active_media()
    }

    /// Whether the RSVP form is visible
    pub fn show_rsvp_form(&self) -> bool {
        self.navigation.active_tab().title == titles::RSVP
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Current layout
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Re-evaluate the layout for a new viewport width
    pub fn set_viewport_width(&mut self, width: u32) {
        let layout = breakpoints::layout(width);
        if layout != self.layout {
            tracing::debug!(width, ?layout, "layout changed");
            self.layout = layout;
        }
    }

    /// Backdrop image, on layouts that show one
    pub fn backdrop(&self) -> Option<&'static str> {
        self.layout.shows_backdrop().then_some(BACKDROP_MEDIA)
    }

    // =========================================================================
    // Theme
    // =========================================================================

    /// Current derived theme
    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    /// Reader handle for the theme cell
    pub fn theme_handle(&self) -> ThemeHandle {
        self.theme.clone()
    }

    /// Style of the tab button at `index`
    pub fn tab_style(&self, index: usize) -> TabStyle {
        self.theme().tab_style(self.navigation.is_active(index))
    }

    /// Style of the RSVP form
    pub fn form_style(&self) -> FormStyle {
        self.theme().form_style()
    }

    /// Wait for the sampler to finish. `None` if it was already awaited or
    /// the task failed.
    pub async fn wait_for_theme(&mut self) -> Option<SampleOutcome> {
        let handle = self.sampler.take()?;
        match handle.await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                tracing::error!(error = %e, "theme sampler task failed");
                None
            }
        }
    }

    // =========================================================================
    // RSVP
    // =========================================================================

    /// RSVP form controller
    pub fn rsvp(&self) -> &RsvpController {
        &self.rsvp
    }

    /// Whether submissions reach an endpoint
    pub fn rsvp_enabled(&self) -> bool {
        self.rsvp_enabled
    }
}
