//! Session state for the wedding invitation
//!
//! This crate owns the state that outlives a single render: the session
//! theme cell and the one-shot sampler that fills it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod theme_cell;
pub mod theme_sampler;

pub use theme_cell::{theme_cell, SessionTheme, ThemeHandle, ThemeWriter};
pub use theme_sampler::{SampleOutcome, SamplerConfig, ThemeSampler, DEFAULT_PALETTE_SIZE};
