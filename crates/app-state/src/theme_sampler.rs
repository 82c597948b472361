//! One-shot theme sampling
//!
//! Loads the reference artwork, extracts a small palette and commits the
//! most dominant swatch to the session theme cell. The sampler consumes both
//! itself and the cell's writer, so it runs at most once per session.
//! Failures are cosmetic: they are logged and the default color stays.

use std::sync::Arc;

use app_ui::theme::{Rgb, ThemeColor};
use media_processing::{ImageSource, MediaError, PaletteExtractor};
use tokio::task::JoinHandle;

use crate::theme_cell::ThemeWriter;

/// Palette size sampled from the reference image
pub const DEFAULT_PALETTE_SIZE: usize = 2;

/// Sampler configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplerConfig {
    /// Number of swatches to extract; the first one is adopted
    pub palette_size: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            palette_size: DEFAULT_PALETTE_SIZE,
        }
    }
}

/// How a sampling run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleOutcome {
    /// The sampled color replaced the default
    Adopted(ThemeColor),
    /// Sampling failed; the default color was kept
    Retained {
        /// Why sampling failed
        reason: String,
    },
    /// Sampling succeeded but the cell was already torn down
    Detached(ThemeColor),
}

/// Samples the session accent color from a reference image
pub struct ThemeSampler {
    source: Arc<dyn ImageSource>,
    extractor: Arc<dyn PaletteExtractor>,
    config: SamplerConfig,
}

impl std::fmt::Debug for ThemeSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeSampler")
            .field("source", &self.source.describe())
            .field("config", &self.config)
            .finish()
    }
}

impl ThemeSampler {
    /// Create a sampler with the default palette size
    pub fn new(source: Arc<dyn ImageSource>, extractor: Arc<dyn PaletteExtractor>) -> Self {
        Self {
            source,
            extractor,
            config: SamplerConfig::default(),
        }
    }

    /// Override the configuration
    pub fn with_config(mut self, config: SamplerConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the image and return its most dominant color
    pub async fn sample(&self) -> media_processing::Result<ThemeColor> {
        let image = self.source.load().await?;
        let extractor = Arc::clone(&self.extractor);
        let count = self.config.palette_size;

        let palette = tokio::task::spawn_blocking(move || extractor.extract(&image, count))
            .await
            .map_err(|e| MediaError::Task(e.to_string()))??;

        let swatch = palette.first().ok_or(MediaError::EmptyPalette)?;
        Ok(ThemeColor::new(Rgb::new(swatch.r, swatch.g, swatch.b)))
    }

    /// Sample once and commit the result, logging instead of failing
    pub async fn run(self, writer: ThemeWriter) -> SampleOutcome {
        match self.sample().await {
            Ok(color) => {
                if writer.commit(color) {
                    tracing::info!(color = %color, source = %self.source.describe(), "theme color sampled");
                    SampleOutcome::Adopted(color)
                } else {
                    SampleOutcome::Detached(color)
                }
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    source = %self.source.describe(),
                    "theme sampling failed; keeping default color"
                );
                SampleOutcome::Retained {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Run on the tokio runtime
    pub fn spawn(self, writer: ThemeWriter) -> JoinHandle<SampleOutcome> {
        tokio::spawn(self.run(writer))
    }
}
