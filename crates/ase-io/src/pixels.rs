//! Cel pixel reconstruction: zlib inflation and buffer assembly.
//!
//! Compressed cels hold a zlib stream whose inflated size is known up
//! front from the cel dimensions and the header color depth. Inflation
//! streams the input in fixed-size pieces into the exact-size output
//! buffer; a stream that would inflate past that buffer is corrupt and
//! is rejected rather than grown into.

use ase_core::{ImageBuffer, ImageSpec, PixelType};
use miniz_oxide::inflate::stream::{inflate, InflateState};
use miniz_oxide::{DataFormat, MZError, MZFlush, MZStatus};

use crate::error::{AseError, AseResult};
use crate::model::{Cel, CelContent, Header};

/// Input bytes fed to the inflater per call.
pub const INFLATE_CHUNK_SIZE: usize = 4096;

/// Upper bound on how far a zlib stream can expand its input. Declared
/// cel dimensions implying more output than this cannot be met by the
/// payload and must not size an allocation.
const MAX_INFLATE_RATIO: usize = 1032;

/// Inflates a zlib stream into `target`, returning the bytes written.
///
/// The stream must end exactly at or before the end of `target`: output
/// overflow maps to [`AseError::CorruptImage`], a stream that runs out
/// of input before its trailer maps to [`AseError::Decompress`].
pub fn inflate_into(compressed: &[u8], target: &mut [u8]) -> AseResult<usize> {
    let mut state = InflateState::new_boxed(DataFormat::Zlib);
    let mut in_pos = 0usize;
    let mut out_pos = 0usize;

    loop {
        let in_end = (in_pos + INFLATE_CHUNK_SIZE).min(compressed.len());
        let result = inflate(
            &mut state,
            &compressed[in_pos..in_end],
            &mut target[out_pos..],
            MZFlush::None,
        );
        in_pos += result.bytes_consumed;
        out_pos += result.bytes_written;

        match result.status {
            Ok(MZStatus::StreamEnd) => return Ok(out_pos),
            Ok(MZStatus::Ok) | Err(MZError::Buf) => {
                if out_pos == target.len() {
                    // Target full. A valid stream ends exactly here, but
                    // the inflater may have swallowed the whole input in
                    // this call before reporting that; give it scratch
                    // space to tell a finished stream from an overflow.
                    let mut scratch = [0u8; 1];
                    let tail = inflate(
                        &mut state,
                        &compressed[in_pos..],
                        &mut scratch,
                        MZFlush::None,
                    );
                    if tail.bytes_written == 0
                        && matches!(tail.status, Ok(MZStatus::StreamEnd))
                    {
                        return Ok(out_pos);
                    }
                    return Err(AseError::CorruptImage(
                        "compressed cel inflates past its pixel buffer".to_owned(),
                    ));
                }
                if in_pos == compressed.len() {
                    return Err(AseError::Decompress(
                        "compressed cel stream ended before its trailer".to_owned(),
                    ));
                }
            }
            Ok(status) => {
                return Err(AseError::Decompress(format!(
                    "unexpected inflate status {status:?}"
                )));
            }
            Err(err) => {
                return Err(AseError::Decompress(format!("inflate failed: {err:?}")));
            }
        }
    }
}

/// Builds the pixel buffer for one cel.
///
/// The header's color depth decides the sample layout. Raw cels must
/// carry exactly the byte count their dimensions imply; compressed cels
/// must inflate to exactly that count. Linked cels carry no pixels of
/// their own and map to [`AseError::MissingData`]; the caller resolves
/// the link against the target frame instead.
pub fn decode_cel_image(header: &Header, cel: &Cel) -> AseResult<ImageBuffer> {
    let pixel = PixelType::from_depth(header.depth)?;

    match &cel.content {
        CelContent::Raw {
            width,
            height,
            pixels,
        } => {
            let spec = ImageSpec::new(u32::from(*width), u32::from(*height), pixel);
            if pixels.len() != spec.byte_size() {
                return Err(AseError::CorruptImage(format!(
                    "raw cel carries {} bytes, {}x{} at {} bytes/pixel needs {}",
                    pixels.len(),
                    width,
                    height,
                    pixel.bytes_per_pixel(),
                    spec.byte_size()
                )));
            }
            let mut image = ImageBuffer::new(spec);
            image.bytes_mut().copy_from_slice(pixels);
            Ok(image)
        }
        CelContent::Compressed {
            width,
            height,
            data,
        } => {
            let spec = ImageSpec::new(u32::from(*width), u32::from(*height), pixel);
            if spec.byte_size() > data.len().saturating_mul(MAX_INFLATE_RATIO) {
                return Err(AseError::CorruptImage(format!(
                    "compressed cel declares {}x{} pixels but carries only {} compressed bytes",
                    width,
                    height,
                    data.len()
                )));
            }
            let mut image = ImageBuffer::new(spec);
            let written = inflate_into(data, image.bytes_mut())?;
            if written != spec.byte_size() {
                return Err(AseError::CorruptImage(format!(
                    "compressed cel inflated to {} bytes, {}x{} at {} bytes/pixel needs {}",
                    written,
                    width,
                    height,
                    pixel.bytes_per_pixel(),
                    spec.byte_size()
                )));
            }
            Ok(image)
        }
        CelContent::Linked { frame } => Err(AseError::MissingData(format!(
            "cel links to frame {frame} and has no pixels of its own"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miniz_oxide::deflate::compress_to_vec_zlib;

    fn header_with_depth(depth: u16) -> Header {
        Header {
            depth,
            ..Default::default()
        }
    }

    fn raw_cel(width: u16, height: u16, pixels: Vec<u8>) -> Cel {
        Cel {
            layer_index: 0,
            x: 0,
            y: 0,
            opacity: 255,
            z_index: 0,
            content: CelContent::Raw {
                width,
                height,
                pixels,
            },
        }
    }

    #[test]
    fn raw_cel_copies_pixels() {
        let pixels: Vec<u8> = (0..16).collect();
        let cel = raw_cel(2, 2, pixels.clone());
        let image = decode_cel_image(&header_with_depth(32), &cel).unwrap();
        assert_eq!(image.bytes(), &pixels[..]);
        assert_eq!(image.get_pixel_u32(0, 0).unwrap(), 0x03020100);
    }

    #[test]
    fn raw_cel_with_wrong_byte_count_is_corrupt() {
        let cel = raw_cel(2, 2, vec![0u8; 15]);
        assert!(matches!(
            decode_cel_image(&header_with_depth(32), &cel),
            Err(AseError::CorruptImage(_))
        ));
    }

    #[test]
    fn compressed_cel_round_trips() {
        let pixels: Vec<u8> = (0..64).map(|i| (i * 3) as u8).collect(); // 4x4 RGBA
        let cel = Cel {
            layer_index: 0,
            x: 0,
            y: 0,
            opacity: 255,
            z_index: 0,
            content: CelContent::Compressed {
                width: 4,
                height: 4,
                data: compress_to_vec_zlib(&pixels, 6),
            },
        };

        let image = decode_cel_image(&header_with_depth(32), &cel).unwrap();
        assert_eq!(image.bytes(), &pixels[..]);
    }

    #[test]
    fn greyscale_cel_uses_two_bytes_per_pixel() {
        let pixels = vec![0x34, 0x12, 0xCD, 0xAB]; // 2x1 greyscale
        let cel = raw_cel(2, 1, pixels);
        let image = decode_cel_image(&header_with_depth(16), &cel).unwrap();
        assert_eq!(image.get_pixel_u16(0, 0).unwrap(), 0x1234);
        assert_eq!(image.get_pixel_u16(1, 0).unwrap(), 0xABCD);
    }

    #[test]
    fn oversized_stream_is_corrupt() {
        // Declares 1x1 RGBA (4 bytes) but inflates to 64.
        let cel = Cel {
            layer_index: 0,
            x: 0,
            y: 0,
            opacity: 255,
            z_index: 0,
            content: CelContent::Compressed {
                width: 1,
                height: 1,
                data: compress_to_vec_zlib(&[0xAB; 64], 6),
            },
        };
        assert!(matches!(
            decode_cel_image(&header_with_depth(32), &cel),
            Err(AseError::CorruptImage(_))
        ));
    }

    #[test]
    fn huge_declared_dimensions_fail_before_allocating() {
        // 65535x65535 RGBA implies a ~17 GB buffer; a few compressed
        // bytes can never inflate to that, so the cel is rejected up
        // front instead of sizing the allocation from the declaration.
        let cel = Cel {
            layer_index: 0,
            x: 0,
            y: 0,
            opacity: 255,
            z_index: 0,
            content: CelContent::Compressed {
                width: u16::MAX,
                height: u16::MAX,
                data: compress_to_vec_zlib(&[0u8; 4], 6),
            },
        };
        assert!(matches!(
            decode_cel_image(&header_with_depth(32), &cel),
            Err(AseError::CorruptImage(_))
        ));
    }

    #[test]
    fn garbage_stream_fails_to_decompress() {
        let cel = Cel {
            layer_index: 0,
            x: 0,
            y: 0,
            opacity: 255,
            z_index: 0,
            content: CelContent::Compressed {
                width: 1,
                height: 1,
                data: vec![0x00, 0x11, 0x22, 0x33],
            },
        };
        assert!(decode_cel_image(&header_with_depth(32), &cel).is_err());
    }

    #[test]
    fn linked_cel_has_no_pixels() {
        let cel = Cel {
            layer_index: 0,
            x: 0,
            y: 0,
            opacity: 255,
            z_index: 0,
            content: CelContent::Linked { frame: 3 },
        };
        assert!(matches!(
            decode_cel_image(&header_with_depth(32), &cel),
            Err(AseError::MissingData(_))
        ));
    }

    #[test]
    fn inflate_handles_streams_longer_than_one_input_chunk() {
        // Compressed stream larger than INFLATE_CHUNK_SIZE forces the
        // loop to feed input in pieces. Random-ish bytes resist deflate.
        let mut pixels = Vec::with_capacity(64 * 64 * 4);
        let mut state = 0x12345678u32;
        for _ in 0..64 * 64 * 4 {
            state = state.wrapping_mul(1664525).wrapping_add(1013904223);
            pixels.push((state >> 24) as u8);
        }
        let compressed = compress_to_vec_zlib(&pixels, 6);
        assert!(compressed.len() > INFLATE_CHUNK_SIZE);

        let mut target = vec![0u8; pixels.len()];
        let written = inflate_into(&compressed, &mut target).unwrap();
        assert_eq!(written, pixels.len());
        assert_eq!(target, pixels);
    }
}
