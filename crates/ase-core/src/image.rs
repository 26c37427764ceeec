//! Owned pixel buffer with stride-aware addressing.
//!
//! [`ImageBuffer`] holds one contiguous allocation. Rows are addressed by
//! index arithmetic over [`ImageSpec::row_bytes`]; there are no per-row
//! heap allocations and no pointer tables. The buffer is written once by
//! the decoder and is read-only afterwards, except for the explicit
//! drawing utilities ([`ImageBuffer::fill`], [`ImageBuffer::fill_rect`],
//! [`ImageBuffer::clear`]) which exist for callers that want to scribble
//! on a decoded image, never for decoding itself.

use crate::error::{CoreError, CoreResult};
use crate::pixel::PixelType;
use crate::rect::Rect;
use crate::spec::ImageSpec;

/// A row-major pixel buffer backed by a single allocation.
///
/// Sample width depends on the pixel type: RGBA/RGB pixels are 32-bit
/// little-endian samples, greyscale pixels are 16-bit samples, indexed
/// pixels are single bytes.
///
/// # Example
///
/// ```rust
/// use ase_core::{ImageBuffer, ImageSpec, PixelType};
///
/// let mut img = ImageBuffer::new(ImageSpec::new(4, 2, PixelType::Rgba));
/// img.put_pixel_u32(1, 0, 0xAABBCCDD).unwrap();
/// assert_eq!(img.get_pixel_u32(1, 0).unwrap(), 0xAABBCCDD);
/// assert_eq!(img.row(0).len(), 16);
/// ```
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    spec: ImageSpec,
    data: Vec<u8>,
}

impl ImageBuffer {
    /// Allocates a zero-filled buffer for the given spec.
    pub fn new(spec: ImageSpec) -> Self {
        Self {
            spec,
            data: vec![0u8; spec.byte_size()],
        }
    }

    // === Accessors ===

    /// The spec this buffer was built from.
    #[inline]
    pub const fn spec(&self) -> &ImageSpec {
        &self.spec
    }

    /// Image width in pixels.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.spec.width()
    }

    /// Image height in pixels.
    #[inline]
    pub const fn height(&self) -> u32 {
        self.spec.height()
    }

    /// Number of color channels.
    #[inline]
    pub const fn channels(&self) -> u32 {
        self.spec.channels()
    }

    /// Pixel sample interpretation.
    #[inline]
    pub const fn pixel_type(&self) -> PixelType {
        self.spec.pixel_type()
    }

    /// Row stride in bytes.
    #[inline]
    pub const fn row_bytes(&self) -> usize {
        self.spec.row_bytes()
    }

    /// Total byte size of the allocation.
    #[inline]
    pub fn byte_size(&self) -> usize {
        self.data.len()
    }

    /// The whole buffer as bytes.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// The whole buffer as mutable bytes.
    #[inline]
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    // === Addressing ===

    /// Byte offset of pixel (x, y) within the buffer.
    #[inline]
    pub fn pixel_offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.row_bytes() + x as usize * self.pixel_type().bytes_per_pixel()
    }

    /// Bytes of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y` is out of range, like slice indexing would.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.row_bytes();
        &self.data[start..start + self.row_bytes()]
    }

    /// Mutable bytes of row `y`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.row_bytes();
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    fn check_bounds(&self, x: u32, y: u32) -> CoreResult<()> {
        if x >= self.width() || y >= self.height() {
            return Err(CoreError::OutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(())
    }

    fn check_sample_width(&self, bytes: usize) -> CoreResult<()> {
        if self.pixel_type().bytes_per_pixel() != bytes {
            return Err(CoreError::InvalidPixelType(self.pixel_type()));
        }
        Ok(())
    }

    /// Reads a 32-bit RGBA/RGB sample.
    pub fn get_pixel_u32(&self, x: u32, y: u32) -> CoreResult<u32> {
        self.check_sample_width(4)?;
        self.check_bounds(x, y)?;
        let o = self.pixel_offset(x, y);
        let b: [u8; 4] = self.data[o..o + 4].try_into().unwrap_or([0; 4]);
        Ok(u32::from_le_bytes(b))
    }

    /// Reads a 16-bit greyscale sample.
    pub fn get_pixel_u16(&self, x: u32, y: u32) -> CoreResult<u16> {
        self.check_sample_width(2)?;
        self.check_bounds(x, y)?;
        let o = self.pixel_offset(x, y);
        let b: [u8; 2] = self.data[o..o + 2].try_into().unwrap_or([0; 2]);
        Ok(u16::from_le_bytes(b))
    }

    /// Reads an 8-bit palette index.
    pub fn get_index(&self, x: u32, y: u32) -> CoreResult<u8> {
        self.check_sample_width(1)?;
        self.check_bounds(x, y)?;
        Ok(self.data[self.pixel_offset(x, y)])
    }

    // === Drawing utilities ===

    /// Writes a 32-bit RGBA/RGB sample.
    pub fn put_pixel_u32(&mut self, x: u32, y: u32, value: u32) -> CoreResult<()> {
        self.check_sample_width(4)?;
        self.check_bounds(x, y)?;
        let o = self.pixel_offset(x, y);
        self.data[o..o + 4].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Fills a horizontal run `[x1, x2]` on row `y` with a 32-bit sample.
    pub fn hline_u32(&mut self, x1: u32, x2: u32, y: u32, value: u32) -> CoreResult<()> {
        self.check_sample_width(4)?;
        self.check_bounds(x2.max(x1), y)?;
        for x in x1..=x2 {
            let o = self.pixel_offset(x, y);
            self.data[o..o + 4].copy_from_slice(&value.to_le_bytes());
        }
        Ok(())
    }

    /// Fills a rectangle with a 32-bit sample. The rectangle is clipped
    /// to the image bounds.
    pub fn fill_rect(&mut self, rect: Rect, value: u32) -> CoreResult<()> {
        let clipped = clip(rect, self.width(), self.height());
        if clipped.is_empty() {
            return Ok(());
        }
        for y in clipped.y..clipped.bottom() {
            self.hline_u32(
                clipped.x as u32,
                (clipped.right() - 1) as u32,
                y as u32,
                value,
            )?;
        }
        Ok(())
    }

    /// Fills the whole image with a 32-bit sample.
    pub fn fill(&mut self, value: u32) -> CoreResult<()> {
        self.fill_rect(self.spec.bounds(), value)
    }

    /// Resets every byte of the buffer to zero.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }
}

fn clip(rect: Rect, width: u32, height: u32) -> Rect {
    let x1 = rect.x.max(0);
    let y1 = rect.y.max(0);
    let x2 = rect.right().min(width as i32);
    let y2 = rect.bottom().min(height as i32);
    Rect::new(x1, y1, x2 - x1, y2 - y1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_is_exact() {
        let img = ImageBuffer::new(ImageSpec::new(3, 2, PixelType::Greyscale));
        assert_eq!(img.row_bytes(), 6);
        assert_eq!(img.byte_size(), 12);
        assert_eq!(img.pixel_offset(2, 1), 6 + 4);
    }

    #[test]
    fn pixel_round_trip() {
        let mut img = ImageBuffer::new(ImageSpec::new(2, 2, PixelType::Rgba));
        img.put_pixel_u32(1, 1, 0x01020304).unwrap();
        assert_eq!(img.get_pixel_u32(1, 1).unwrap(), 0x01020304);
        // Little-endian byte order in storage.
        let o = img.pixel_offset(1, 1);
        assert_eq!(&img.bytes()[o..o + 4], &[0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn wrong_sample_width_is_an_error() {
        let img = ImageBuffer::new(ImageSpec::new(2, 2, PixelType::Indexed));
        assert!(matches!(
            img.get_pixel_u32(0, 0),
            Err(CoreError::InvalidPixelType(PixelType::Indexed))
        ));
        assert!(img.get_index(0, 0).is_ok());
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let img = ImageBuffer::new(ImageSpec::new(2, 2, PixelType::Rgba));
        assert!(matches!(
            img.get_pixel_u32(2, 0),
            Err(CoreError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn fill_rect_clips() {
        let mut img = ImageBuffer::new(ImageSpec::new(4, 4, PixelType::Rgba));
        img.fill_rect(Rect::new(2, 2, 10, 10), 0xFFFFFFFF).unwrap();
        assert_eq!(img.get_pixel_u32(3, 3).unwrap(), 0xFFFFFFFF);
        assert_eq!(img.get_pixel_u32(1, 1).unwrap(), 0);
    }

    #[test]
    fn clear_zeroes_everything() {
        let mut img = ImageBuffer::new(ImageSpec::new(2, 1, PixelType::Indexed));
        img.bytes_mut()[0] = 7;
        img.clear();
        assert_eq!(img.bytes(), &[0, 0]);
    }
}
