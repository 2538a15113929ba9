//! Terminal output for reiscii.
//!
//! Provides truecolor serialization of grids, frame pacing, and the
//! animation player loop.
pub mod ansi;
pub mod pacing;
pub mod player;
