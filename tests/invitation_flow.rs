//! End-to-end invitation session tests
//!
//! Mounts the full app against a reference image on disk and a recording
//! transport.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use app_core::{RsvpError, RsvpStatus, FAILURE_MESSAGE};
use app_state::SampleOutcome;
use app_ui::{compute_theme, GestureOutcome, Layout, Phase, ThemeColor};
use async_trait::async_trait;
use image::{DynamicImage, Rgb, RgbImage};
use media_processing::{FileImageSource, ImageSource, MedianCutExtractor};
use networking::{RsvpPayload, SubmissionResult, SubmissionTransport, TransportConfig};
use tempfile::TempDir;
use tokio::sync::Notify;
use wedding_invitation::{AppConfig, InvitationApp, BACKDROP_MEDIA};

struct RecordingTransport {
    calls: AtomicUsize,
    result: SubmissionResult,
}

impl RecordingTransport {
    fn new(result: SubmissionResult) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            result,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubmissionTransport for RecordingTransport {
    async fn submit(&self, _payload: &RsvpPayload) -> SubmissionResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// Write a solid-color PNG and return its directory and a source for it
fn reference_image(color: [u8; 3]) -> (TempDir, FileImageSource) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reference.png");
    RgbImage::from_pixel(32, 32, Rgb(color)).save(&path).unwrap();
    (dir, FileImageSource::new(path))
}

fn mount(source: impl ImageSource + 'static, transport: Arc<RecordingTransport>) -> InvitationApp {
    InvitationApp::mount(
        &AppConfig::default(),
        Arc::new(source),
        Arc::new(MedianCutExtractor::new()),
        transport,
    )
}

#[tokio::test]
async fn test_theme_sampled_from_reference_image() {
    let (_dir, source) = reference_image([40, 40, 120]);
    let mut app = mount(source, RecordingTransport::new(SubmissionResult::Success));

    let outcome = app.wait_for_theme().await.unwrap();
    let SampleOutcome::Adopted(color) = outcome else {
        panic!("expected adoption, got {outcome:?}");
    };

    let theme = app.theme();
    assert_eq!(theme, compute_theme(color));
    assert_eq!(theme.foreground, "#ffffff");
    assert_eq!(app.tab_style(0).background, theme.accent);
    assert_eq!(app.tab_style(1).background, theme.tab_inactive_background);
    assert_eq!(app.form_style().focus_ring, theme.accent);
}

#[tokio::test]
async fn test_missing_image_keeps_default_theme() {
    let dir = TempDir::new().unwrap();
    let source = FileImageSource::new(dir.path().join("missing.png"));
    let mut app = mount(source, RecordingTransport::new(SubmissionResult::Success));

    let outcome = app.wait_for_theme().await.unwrap();
    assert!(matches!(outcome, SampleOutcome::Retained { .. }));
    assert_eq!(app.theme(), compute_theme(ThemeColor::default()));
    assert_eq!(app.theme().foreground, "#333333");
    assert!(app.wait_for_theme().await.is_none());
}

#[tokio::test]
async fn test_tab_selection_drives_view_and_form() {
    let (_dir, source) = reference_image([200, 100, 100]);
    let mut app = mount(source, RecordingTransport::new(SubmissionResult::Success));

    assert_eq!(app.navigation().active_index(), 0);
    assert_eq!(app.view().current().phase(), Phase::Entered);
    assert!(!app.show_rsvp_form());

    app.select_tab_by_title("RSVP").unwrap();
    assert!(app.show_rsvp_form());
    assert!(app.navigation().direction());
    assert_eq!(app.active_media(), "img/image4.png");
    assert_eq!(app.view().current().tab_index(), 3);
    assert_eq!(app.view().current().phase(), Phase::Entering);
    assert_eq!(app.view().leaving().len(), 1);

    app.advance(Duration::from_millis(450));
    assert_eq!(app.view().current().phase(), Phase::Entered);
    assert!(app.view().leaving().is_empty());

    app.select_tab(1).unwrap();
    assert!(!app.navigation().direction());
    assert!(!app.show_rsvp_form());
    assert_eq!(app.active_media(), "img/image3.png");

    assert!(app.select_tab(9).is_err());
    assert!(app.select_tab_by_title("Gifts").is_err());
    assert_eq!(app.navigation().active_index(), 1);
}

#[tokio::test]
async fn test_drag_navigation_depends_on_layout() {
    let (_dir, source) = reference_image([10, 10, 10]);
    let mut app = mount(source, RecordingTransport::new(SubmissionResult::Success));

    assert_eq!(app.layout(), Layout::Touch);
    assert!(app.backdrop().is_none());

    let outcome = app.drag_released(-150.0);
    assert!(outcome.navigated());
    assert_eq!(app.navigation().active_index(), 1);
    assert_eq!(app.view().current().tab_index(), 1);

    assert_eq!(app.drag_released(50.0), GestureOutcome::SnapBack);
    assert_eq!(app.navigation().active_index(), 1);

    app.set_viewport_width(1280);
    assert_eq!(app.layout(), Layout::Desktop);
    assert_eq!(app.backdrop(), Some(BACKDROP_MEDIA));
    assert_eq!(app.drag_released(-300.0), GestureOutcome::SnapBack);
    assert_eq!(app.navigation().active_index(), 1);
}

#[tokio::test]
async fn test_rsvp_submission_through_app() {
    let (_dir, source) = reference_image([10, 120, 10]);
    let transport = RecordingTransport::new(SubmissionResult::Success);
    let app = mount(source, transport.clone());

    let rsvp = app.rsvp();
    assert!(matches!(rsvp.submit().await, Err(RsvpError::Validation(_))));
    assert_eq!(transport.calls(), 0);

    rsvp.set_name("Asha").await;
    rsvp.set_phone("9999999999").await;
    assert_eq!(rsvp.submit().await.unwrap(), RsvpStatus::Submitted);
    assert_eq!(transport.calls(), 1);

    let form = rsvp.snapshot().await;
    assert_eq!(form.name(), "");
    assert_eq!(
        form.acknowledgment(),
        Some("Thank you Asha! Your RSVP has been received.")
    );

    rsvp.reset().await.unwrap();
    assert_eq!(rsvp.status().await, RsvpStatus::Idle);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_fire_and_forget_outcome_is_optimistic() {
    let (_dir, source) = reference_image([10, 120, 10]);
    let transport = RecordingTransport::new(SubmissionResult::Unknown);
    let app = mount(source, transport.clone());

    app.rsvp().set_name("Ravi").await;
    assert_eq!(app.rsvp().submit().await.unwrap(), RsvpStatus::Submitted);
    assert_eq!(transport.calls(), 1);
}

/// Holds the image until released
struct GatedSource {
    release: Arc<Notify>,
}

#[async_trait]
impl ImageSource for GatedSource {
    async fn load(&self) -> media_processing::Result<DynamicImage> {
        self.release.notified().await;
        Ok(DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([90, 30, 30]))))
    }

    fn describe(&self) -> String {
        "gated".to_string()
    }
}

#[tokio::test]
async fn test_unmount_before_sampling_completes() {
    let release = Arc::new(Notify::new());
    let app = mount(
        GatedSource {
            release: release.clone(),
        },
        RecordingTransport::new(SubmissionResult::Success),
    );

    let sampler = app.unmount().unwrap();
    release.notify_one();

    let outcome = sampler.await.unwrap();
    assert!(matches!(outcome, SampleOutcome::Detached(_)), "got {outcome:?}");
}

#[tokio::test]
async fn test_unmount_with_live_handle_still_adopts() {
    let release = Arc::new(Notify::new());
    let app = mount(
        GatedSource {
            release: release.clone(),
        },
        RecordingTransport::new(SubmissionResult::Success),
    );
    let handle = app.theme_handle();

    let sampler = app.unmount().unwrap();
    release.notify_one();

    assert!(matches!(sampler.await.unwrap(), SampleOutcome::Adopted(_)));
    assert!(handle.is_sampled());
}

#[tokio::test]
async fn test_mounts_without_endpoint() {
    let (dir, _source) = reference_image([40, 40, 120]);
    let config = AppConfig::default().with_reference_image(dir.path().join("reference.png"));
    assert!(config.transport.is_none());

    let mut app = InvitationApp::from_config(&config).unwrap();
    assert!(!app.rsvp_enabled());
    assert!(matches!(
        app.wait_for_theme().await,
        Some(SampleOutcome::Adopted(_))
    ));

    app.select_tab_by_title("RSVP").unwrap();
    assert!(app.show_rsvp_form());

    app.rsvp().set_name("Asha").await;
    let status = app.rsvp().submit().await.unwrap();
    assert!(matches!(status, RsvpStatus::Failed(_)));
    let form = app.rsvp().snapshot().await;
    assert_eq!(form.error(), Some(FAILURE_MESSAGE));
    assert_eq!(form.name(), "Asha");
}

#[tokio::test]
async fn test_from_config_with_endpoint_enables_rsvp() {
    let (dir, _source) = reference_image([40, 40, 120]);
    let config = AppConfig::default()
        .with_reference_image(dir.path().join("reference.png"))
        .with_transport(TransportConfig::new("https://example.com/rsvp"));

    let app = InvitationApp::from_config(&config).unwrap();
    assert!(app.rsvp_enabled());
}
