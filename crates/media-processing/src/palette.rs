//! Dominant color extraction
//!
//! A median-cut quantizer over a 5-bit-per-channel histogram. Pixels are
//! sampled every `quality` steps; mostly transparent and near-white pixels
//! are ignored so that paper backgrounds do not dominate the palette.
//! Swatches are returned most dominant first.

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::{MediaError, Result};

/// Bits kept per channel in the histogram
const SIGBITS: usize = 5;
/// Buckets per channel
const SIDE: usize = 1 << SIGBITS;
/// Width of one bucket in channel units
const BUCKET: u32 = 1 << (8 - SIGBITS);

/// Pixels with alpha below this are skipped
pub const MIN_ALPHA: u8 = 125;

/// Pixels with every channel above this are skipped
pub const NEAR_WHITE: u8 = 250;

/// Default sampling stride
pub const DEFAULT_QUALITY: u32 = 10;

/// A dominant color and the number of sampled pixels it represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Swatch {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Sampled pixels in this swatch
    pub population: u64,
}

impl Swatch {
    /// Channels as an array
    pub fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Extracts an ordered palette from a decoded image
pub trait PaletteExtractor: Send + Sync {
    /// Return up to `count` swatches, most dominant first
    fn extract(&self, image: &DynamicImage, count: usize) -> Result<Vec<Swatch>>;
}

/// Median-cut palette extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MedianCutExtractor {
    quality: u32,
}

impl Default for MedianCutExtractor {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
        }
    }
}

impl MedianCutExtractor {
    /// Create an extractor with the default sampling stride
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample every `quality`-th pixel (1 = every pixel)
    pub fn with_quality(mut self, quality: u32) -> Self {
        self.quality = quality.max(1);
        self
    }

    /// Sampling stride
    pub fn quality(&self) -> u32 {
        self.quality
    }

    fn histogram(&self, image: &DynamicImage) -> Histogram {
        let rgba = image.to_rgba8();
        let mut histogram = Histogram::new();
        for pixel in rgba.pixels().step_by(self.quality as usize) {
            let [r, g, b, a] = pixel.0;
            if a < MIN_ALPHA || (r > NEAR_WHITE && g > NEAR_WHITE && b > NEAR_WHITE) {
                continue;
            }
            histogram.add([r, g, b]);
        }
        histogram
    }
}

impl PaletteExtractor for MedianCutExtractor {
    fn extract(&self, image: &DynamicImage, count: usize) -> Result<Vec<Swatch>> {
        if count == 0 {
            return Err(MediaError::InvalidPaletteSize(count));
        }

        let histogram = self.histogram(image);
        let root = VBox::full().fit(&histogram).ok_or(MediaError::EmptyPalette)?;

        let mut boxes = vec![root];
        while boxes.len() < count {
            let Some(index) = boxes
                .iter()
                .enumerate()
                .filter(|(_, vbox)| vbox.volume() > 1)
                .max_by_key(|(_, vbox)| vbox.population)
                .map(|(i, _)| i)
            else {
                break;
            };
            let vbox = boxes.swap_remove(index);
            match vbox.split(&histogram) {
                Some((left, right)) => {
                    boxes.push(left);
                    boxes.push(right);
                }
                None => {
                    boxes.push(vbox);
                    break;
                }
            }
        }

        let mut swatches: Vec<Swatch> = boxes.iter().map(|vbox| vbox.average(&histogram)).collect();
        swatches.sort_by(|a, b| b.population.cmp(&a.population));
        Ok(swatches)
    }
}

// =============================================================================
// Histogram
// =============================================================================

struct Histogram {
    counts: Vec<u64>,
}

impl Histogram {
    fn new() -> Self {
        Self {
            counts: vec![0; SIDE * SIDE * SIDE],
        }
    }

    fn index(cell: [usize; 3]) -> usize {
        (cell[0] << (2 * SIGBITS)) | (cell[1] << SIGBITS) | cell[2]
    }

    fn add(&mut self, rgb: [u8; 3]) {
        let cell = rgb.map(|c| usize::from(c) >> (8 - SIGBITS));
        self.counts[Self::index(cell)] += 1;
    }

    fn get(&self, cell: [usize; 3]) -> u64 {
        self.counts[Self::index(cell)]
    }
}

// =============================================================================
// Color Box
// =============================================================================

/// An axis-aligned box of histogram cells, bounds inclusive
#[derive(Debug, Clone, Copy)]
struct VBox {
    lo: [usize; 3],
    hi: [usize; 3],
    population: u64,
}

impl VBox {
    fn full() -> Self {
        Self {
            lo: [0; 3],
            hi: [SIDE - 1; 3],
            population: 0,
        }
    }

    fn volume(&self) -> usize {
        (0..3).map(|axis| self.hi[axis] - self.lo[axis] + 1).product()
    }

    fn cells(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        (self.lo[0]..=self.hi[0]).flat_map(move |r| {
            (self.lo[1]..=self.hi[1])
                .flat_map(move |g| (self.lo[2]..=self.hi[2]).map(move |b| [r, g, b]))
        })
    }

    /// Shrink to the populated cells; `None` if the box is empty
    fn fit(self, histogram: &Histogram) -> Option<Self> {
        let mut lo = [SIDE; 3];
        let mut hi = [0; 3];
        let mut population = 0;
        for cell in self.cells() {
            let count = histogram.get(cell);
            if count == 0 {
                continue;
            }
            population += count;
            for axis in 0..3 {
                lo[axis] = lo[axis].min(cell[axis]);
                hi[axis] = hi[axis].max(cell[axis]);
            }
        }
        (population > 0).then_some(Self { lo, hi, population })
    }

    /// Cut at the population median along the longest axis
    fn split(&self, histogram: &Histogram) -> Option<(Self, Self)> {
        let axis = (0..3).max_by_key(|&axis| self.hi[axis] - self.lo[axis])?;
        if self.hi[axis] == self.lo[axis] {
            return None;
        }

        let mut slices = vec![0u64; self.hi[axis] - self.lo[axis] + 1];
        for cell in self.cells() {
            slices[cell[axis] - self.lo[axis]] += histogram.get(cell);
        }

        let half = self.population.div_ceil(2);
        let mut cumulative = 0;
        let mut cut = self.lo[axis];
        for (offset, count) in slices.iter().enumerate() {
            cumulative += count;
            cut = self.lo[axis] + offset;
            if cumulative >= half {
                break;
            }
        }
        let cut = cut.min(self.hi[axis] - 1);

        let mut left = *self;
        left.hi[axis] = cut;
        let mut right = *self;
        right.lo[axis] = cut + 1;

        match (left.fit(histogram), right.fit(histogram)) {
            (Some(left), Some(right)) => Some((left, right)),
            _ => None,
        }
    }

    fn average(&self, histogram: &Histogram) -> Swatch {
        let mut sums = [0u64; 3];
        let mut total = 0u64;
        for cell in self.cells() {
            let count = histogram.get(cell);
            if count == 0 {
                continue;
            }
            total += count;
            for axis in 0..3 {
                sums[axis] += count * (cell[axis] as u64 * u64::from(BUCKET) + u64::from(BUCKET / 2));
            }
        }
        let channel = |axis: usize| (sums[axis] / total.max(1)).min(255) as u8;
        Swatch {
            r: channel(0),
            g: channel(1),
            b: channel(2),
            population: total,
        }
    }
}
