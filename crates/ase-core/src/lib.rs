//! # ase-core
//!
//! Core types for the ase-rs sprite decoder.
//!
//! This crate provides the foundational types used by the format decoder:
//!
//! - [`Point`], [`Size`], [`Rect`] - Geometry primitives
//! - [`PixelType`] - Pixel sample interpretation (RGBA, greyscale, indexed)
//! - [`ImageSpec`] - Dimensions plus pixel type of a buffer to build
//! - [`ImageBuffer`] - A single owned allocation with stride-aware addressing
//!
//! ## Design Philosophy
//!
//! `ImageBuffer` is one contiguous allocation addressed by index arithmetic
//! over a row stride. There are no row-pointer tables and no aliased typed
//! views; row and pixel addresses are computed, not stored.
//!
//! ## Crate Structure
//!
//! This crate has no format knowledge and no internal dependencies.
//! The decoder crate depends on it:
//!
//! ```text
//! ase-core (this crate)
//!    ^
//!    |
//!    +-- ase-io (file parsing, pixel reconstruction)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod pixel;
pub mod rect;
pub mod spec;

// Re-exports for convenience
pub use error::{CoreError, CoreResult};
pub use image::ImageBuffer;
pub use pixel::PixelType;
pub use rect::{Point, Rect, Size};
pub use spec::ImageSpec;
