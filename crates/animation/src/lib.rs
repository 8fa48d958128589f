//! Frame sequences and GIF assembly.
//!
//! Frames are persisted as numbered PNGs in a temporary directory owned by
//! the [`FrameSequence`]; dropping the sequence removes them.

pub mod frames;
pub mod gif;

pub use frames::FrameSequence;
pub use gif::GifAssembler;
