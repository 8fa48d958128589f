//! Common types and utilities shared across the spiderweb crates.

pub mod color;
pub mod error;
pub mod frame;

pub use color::{Color, Palette};
pub use error::{SpiderError, SpiderResult};
pub use frame::FrameShape;
