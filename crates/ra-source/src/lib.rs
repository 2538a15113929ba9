//! Visual source for reiscii: decodes still images into pixel buffers.

pub mod image;
