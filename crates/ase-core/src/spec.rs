//! Image buffer specification.

use crate::error::CoreResult;
use crate::pixel::PixelType;
use crate::rect::Rect;

/// Dimensions and pixel type of an image buffer to build.
///
/// A spec is validated at construction; every pixel type the format can
/// declare (RGBA, RGB, greyscale, indexed) builds a valid spec, and only a
/// truly unrecognized color depth is an error.
///
/// # Example
///
/// ```rust
/// use ase_core::{ImageSpec, PixelType};
///
/// let spec = ImageSpec::new(64, 32, PixelType::Rgba);
/// assert_eq!(spec.row_bytes(), 64 * 4);
/// assert_eq!(spec.byte_size(), 64 * 4 * 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSpec {
    width: u32,
    height: u32,
    pixel: PixelType,
}

impl ImageSpec {
    /// Creates a spec from explicit dimensions and pixel type.
    #[inline]
    pub const fn new(width: u32, height: u32, pixel: PixelType) -> Self {
        Self {
            width,
            height,
            pixel,
        }
    }

    /// Creates a spec from dimensions and a header color depth.
    pub fn from_depth(width: u32, height: u32, depth: u16) -> CoreResult<Self> {
        Ok(Self::new(width, height, PixelType::from_depth(depth)?))
    }

    /// Image width in pixels.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Pixel sample interpretation.
    #[inline]
    pub const fn pixel_type(&self) -> PixelType {
        self.pixel
    }

    /// Number of color channels.
    #[inline]
    pub const fn channels(&self) -> u32 {
        self.pixel.channels()
    }

    /// Bytes per row. The stride is exactly `bytes_per_pixel * width`;
    /// no alignment padding is added.
    #[inline]
    pub const fn row_bytes(&self) -> usize {
        self.pixel.bytes_per_pixel() * self.width as usize
    }

    /// Total byte size of the buffer this spec describes.
    #[inline]
    pub const fn byte_size(&self) -> usize {
        self.row_bytes() * self.height as usize
    }

    /// Full-image bounds rectangle at the origin.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_from_depth() {
        let spec = ImageSpec::from_depth(8, 4, 16).unwrap();
        assert_eq!(spec.pixel_type(), PixelType::Greyscale);
        assert_eq!(spec.row_bytes(), 16);
        assert_eq!(spec.byte_size(), 64);
    }

    #[test]
    fn spec_rejects_unknown_depth() {
        assert!(ImageSpec::from_depth(8, 4, 48).is_err());
    }
}
