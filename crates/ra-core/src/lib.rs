//! Configuration, types, and shared structures for reiscii.
//!
//! This crate contains all shared types and configuration logic used across
//! the reiscii workspace. It never touches the terminal: sizes come in as
//! already-resolved values.

pub mod animation;
pub mod charset;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod sizing;

pub use animation::AnimationSpec;
pub use charset::Charset;
pub use config::RenderConfig;
pub use error::CoreError;
pub use frame::{AsciiCell, AsciiGrid, FrameBuffer, Sample, SampleGrid};
