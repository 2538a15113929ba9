//! ASCII conversion engine for reiscii.
//!
//! Converts pixel frames to character grids: resampling, tone, error
//! diffusion, glyph and color mapping, and shimmer frame generation.

pub mod animation;
pub mod color_map;
pub mod compositor;
pub mod dither;
pub mod luminance;
pub mod palette;
pub mod resample;
pub mod shimmer;
