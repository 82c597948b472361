//! Contrast engine and derived theme for the invitation
//!
//! The whole UI is tinted by a single accent color sampled from the event
//! artwork. Everything else (foreground text, borders, tab backgrounds) is
//! derived from that accent by the pure functions in this module.
//!
//! # Usage
//!
//! ```rust
//! use app_ui::theme::{compute_theme, contrast_color, with_opacity, ThemeColor};
//!
//! let theme = compute_theme(ThemeColor::default());
//! assert_eq!(theme.accent, "rgb(254,218,218)");
//! assert_eq!(theme.foreground, "#333333");
//!
//! assert_eq!(contrast_color(Some("rgb(20,20,60)")), "#ffffff");
//! assert_eq!(with_opacity(Some("rgb(1,2,3)"), 0.5), "rgba(1,2,3,0.5)");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

// =============================================================================
// Color Types
// =============================================================================

/// A color rendered as a CSS string (e.g. "rgb(1,2,3)", "#333333")
pub type Color = String;

/// Dark neutral used on bright backgrounds
pub const DARK_NEUTRAL: &str = "#333333";

/// Light neutral used on dark backgrounds
pub const LIGHT_NEUTRAL: &str = "#ffffff";

/// Foreground returned when the background cannot be read
pub const LIGHT_DEFAULT: &str = "#ffffff";

/// Translucent color returned when the input cannot be read
pub const TRANSLUCENT_DEFAULT: &str = "rgba(0,0,0,0.1)";

/// Brightness above which a dark foreground is chosen
pub const BRIGHTNESS_THRESHOLD: f64 = 128.0;

/// Accent used until sampling completes (#fedada)
pub const DEFAULT_THEME_RGB: Rgb = Rgb::new(0xfe, 0xda, 0xda);

static RGB_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*rgba?\(\s*([^,()\s]+)\s*,\s*([^,()\s]+)\s*,\s*([^,()\s]+)\s*(?:,\s*([^,()\s]+)\s*)?\)\s*$",
    )
    .expect("static regex is valid")
});

/// An opaque RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a CSS color string.
    ///
    /// Accepts `rgb(r,g,b)`, `rgba(r,g,b,a)` (alpha is ignored), `#rrggbb`,
    /// `#rrggbbaa` and `#rgb`. Channels outside `0..=255` are clamped.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.starts_with('#') {
            return Self::from_hex(input);
        }
        let caps = RGB_FUNCTION.captures(input)?;
        let channel = |i: usize| caps.get(i).and_then(|m| parse_channel(m.as_str()));
        Some(Self::new(channel(1)?, channel(2)?, channel(3)?))
    }

    /// Parse a hex color string ("#FFFFFF", "FFFFFF", "#FFF")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            3 => {
                let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
                Some(Self::new(digit(0)?, digit(1)?, digit(2)?))
            }
            6 | 8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::new(r, g, b))
            }
            _ => None,
        }
    }

    /// Convert to a hex string
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Weighted luma (0.299 R + 0.587 G + 0.114 B), in `0.0..=255.0`
    pub fn brightness(&self) -> f64 {
        0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)
    }

    /// Foreground that stays legible on top of this color
    pub fn contrast(&self) -> &'static str {
        if self.brightness() > BRIGHTNESS_THRESHOLD {
            DARK_NEUTRAL
        } else {
            LIGHT_NEUTRAL
        }
    }

    /// Render as `rgba(r,g,b,alpha)` with alpha clamped to `[0, 1]`
    pub fn to_rgba(&self, alpha: f64) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, clamp_alpha(alpha))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

fn parse_channel(raw: &str) -> Option<u8> {
    let value: f64 = raw.parse().ok()?;
    if value.is_nan() {
        return None;
    }
    Some(value.round().clamp(0.0, 255.0) as u8)
}

fn clamp_alpha(alpha: f64) -> f64 {
    if alpha.is_finite() {
        alpha.clamp(0.0, 1.0)
    } else {
        1.0
    }
}

// =============================================================================
// Contrast Engine
// =============================================================================

/// Weighted luma of an RGB color
pub fn brightness(rgb: Rgb) -> f64 {
    rgb.brightness()
}

/// Pick a readable foreground for the given background color string.
///
/// Returns [`DARK_NEUTRAL`] when the background is brighter than
/// [`BRIGHTNESS_THRESHOLD`], [`LIGHT_NEUTRAL`] otherwise, and
/// [`LIGHT_DEFAULT`] when the input is absent or unparseable.
pub fn contrast_color(color: Option<&str>) -> &'static str {
    color
        .and_then(Rgb::parse)
        .map(|rgb| rgb.contrast())
        .unwrap_or(LIGHT_DEFAULT)
}

/// Rewrite a color string as `rgba(...)` with the given alpha.
///
/// Absent or unparseable input yields [`TRANSLUCENT_DEFAULT`]; this never
/// panics.
pub fn with_opacity(color: Option<&str>, alpha: f64) -> String {
    color
        .and_then(Rgb::parse)
        .map(|rgb| rgb.to_rgba(alpha))
        .unwrap_or_else(|| TRANSLUCENT_DEFAULT.to_string())
}

// =============================================================================
// Theme Color
// =============================================================================

/// The session accent color.
///
/// Starts at `#fedada` and is replaced at most once by the sampled swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThemeColor(Rgb);

impl ThemeColor {
    /// Wrap a sampled color
    pub const fn new(rgb: Rgb) -> Self {
        Self(rgb)
    }

    /// The underlying channels
    pub fn rgb(&self) -> Rgb {
        self.0
    }

    /// CSS form, always `rgb(r,g,b)`
    pub fn css(&self) -> String {
        self.0.to_string()
    }

    /// Whether this is still the start-up default
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_THEME_RGB
    }
}

impl Default for ThemeColor {
    fn default() -> Self {
        Self(DEFAULT_THEME_RGB)
    }
}

impl From<Rgb> for ThemeColor {
    fn from(rgb: Rgb) -> Self {
        Self(rgb)
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// =============================================================================
// Derived Theme
// =============================================================================

/// Colors for one tab button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabStyle {
    /// Button fill
    pub background: Color,
    /// Button border
    pub border: Color,
    /// Label color
    pub text: Color,
}

/// Colors for the RSVP form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormStyle {
    /// Input border
    pub input_border: Color,
    /// Input text and placeholder
    pub input_text: Color,
    /// Focus ring
    pub focus_ring: Color,
    /// Submit button fill
    pub button_background: Color,
    /// Submit button label
    pub button_text: Color,
    /// Inline validation/error message
    pub error_text: Color,
}

/// Every UI color derived from the accent, built once per theme change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// The color this theme was derived from
    pub color: ThemeColor,
    /// Accent in CSS form
    pub accent: Color,
    /// Foreground on top of the accent
    pub foreground: Color,
    /// Foreground for inactive controls
    pub foreground_muted: Color,
    /// Border of the active tab
    pub border_active: Color,
    /// Border of inactive tabs
    pub border_inactive: Color,
    /// Fill of inactive tabs
    pub tab_inactive_background: Color,
}

impl Theme {
    /// Style for a tab button
    pub fn tab_style(&self, active: bool) -> TabStyle {
        if active {
            TabStyle {
                background: self.accent.clone(),
                border: self.border_active.clone(),
                text: self.foreground.clone(),
            }
        } else {
            TabStyle {
                background: self.tab_inactive_background.clone(),
                border: self.border_inactive.clone(),
                text: self.foreground_muted.clone(),
            }
        }
    }

    /// Style for the RSVP form
    pub fn form_style(&self) -> FormStyle {
        FormStyle {
            input_border: self.foreground.clone(),
            input_text: self.foreground.clone(),
            focus_ring: self.accent.clone(),
            button_background: self.accent.clone(),
            button_text: self.foreground.clone(),
            error_text: self.foreground.clone(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        compute_theme(ThemeColor::default())
    }
}

/// Derive the full theme record from an accent color
pub fn compute_theme(color: ThemeColor) -> Theme {
    let accent = color.css();
    let foreground = contrast_color(Some(&accent)).to_string();
    let inactive_tint = with_opacity(Some(&accent), 0.2);

    Theme {
        color,
        foreground_muted: with_opacity(Some(&foreground), 0.7),
        border_active: with_opacity(Some(&accent), 0.5),
        tab_inactive_background: contrast_color(Some(&inactive_tint)).to_string(),
        border_inactive: inactive_tint,
        foreground,
        accent,
    }
}
