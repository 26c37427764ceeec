//! Pixel sample interpretation.
//!
//! The sprite format stores one of three sample layouts, selected by the
//! header's color depth: 32-bit RGBA, 16-bit greyscale (value + alpha) or
//! 8-bit palette indices. RGB exists for completeness and is stored in
//! 32-bit samples like RGBA.

use crate::error::{CoreError, CoreResult};

/// How the samples of an image buffer are to be interpreted.
///
/// Determines bytes-per-pixel and therefore the row stride of an
/// [`crate::ImageBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelType {
    /// 24-bit RGB, stored in 32-bit samples.
    Rgb,
    /// 32-bit RGBA.
    Rgba,
    /// 16-bit greyscale: value byte plus alpha byte.
    Greyscale,
    /// 8-bit palette index.
    Indexed,
}

impl PixelType {
    /// Maps the header's bits-per-pixel field to a pixel type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ase_core::PixelType;
    ///
    /// assert_eq!(PixelType::from_depth(32).unwrap(), PixelType::Rgba);
    /// assert_eq!(PixelType::from_depth(16).unwrap(), PixelType::Greyscale);
    /// assert_eq!(PixelType::from_depth(8).unwrap(), PixelType::Indexed);
    /// assert!(PixelType::from_depth(12).is_err());
    /// ```
    pub fn from_depth(depth: u16) -> CoreResult<Self> {
        match depth {
            32 => Ok(PixelType::Rgba),
            24 => Ok(PixelType::Rgb),
            16 => Ok(PixelType::Greyscale),
            8 => Ok(PixelType::Indexed),
            other => Err(CoreError::UnsupportedDepth(other)),
        }
    }

    /// Bytes of buffer storage per pixel.
    #[inline]
    pub const fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelType::Rgb | PixelType::Rgba => 4,
            PixelType::Greyscale => 2,
            PixelType::Indexed => 1,
        }
    }

    /// Number of color channels carried by a pixel.
    #[inline]
    pub const fn channels(&self) -> u32 {
        match self {
            PixelType::Rgba => 4,
            PixelType::Rgb => 3,
            PixelType::Greyscale => 2,
            PixelType::Indexed => 1,
        }
    }
}
