//! Slice chunk decoder (tag 0x2022).

use ase_core::{Point, Rect};

use crate::error::AseResult;
use crate::model::{Slice, SliceKey};
use crate::stream::ByteReader;

/// Flag bit: keys carry a 9-slice center rectangle.
pub const FLAG_NINE_SLICE: u32 = 0x1;
/// Flag bit: keys carry a pivot point.
pub const FLAG_PIVOT: u32 = 0x2;

/// Decodes one slice chunk payload.
///
/// The chunk-level flags decide which optional fields every key carries,
/// so the key layout is uniform within a chunk.
pub fn decode(payload: &[u8]) -> AseResult<Slice> {
    let mut r = ByteReader::new(payload);

    let num_keys = r.read_u32()?;
    let flags = r.read_u32()?;
    r.skip(4)?;
    let name = r.read_string()?;

    let mut keys = Vec::with_capacity(num_keys.min(1024) as usize);
    for _ in 0..num_keys {
        let frame = r.read_u32()?;
        let x = r.read_i32()?;
        let y = r.read_i32()?;
        let width = r.read_u32()? as i32;
        let height = r.read_u32()? as i32;
        let bounds = Rect::new(x, y, width, height);

        let center = if flags & FLAG_NINE_SLICE != 0 {
            let cx = r.read_i32()?;
            let cy = r.read_i32()?;
            let cw = r.read_u32()? as i32;
            let ch = r.read_u32()? as i32;
            Some(Rect::new(cx, cy, cw, ch))
        } else {
            None
        };

        let pivot = if flags & FLAG_PIVOT != 0 {
            let px = r.read_i32()?;
            let py = r.read_i32()?;
            Some(Point::new(px, py))
        } else {
            None
        };

        keys.push(SliceKey {
            frame,
            bounds,
            center,
            pivot,
        });
    }

    Ok(Slice { flags, name, keys })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice_header(num_keys: u32, flags: u32, name: &str) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&num_keys.to_le_bytes());
        data.extend_from_slice(&flags.to_le_bytes());
        data.extend_from_slice(&[0u8; 4]);
        data.extend_from_slice(&(name.len() as u16).to_le_bytes());
        data.extend_from_slice(name.as_bytes());
        data
    }

    fn key_bounds(frame: u32, x: i32, y: i32, w: u32, h: u32) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&frame.to_le_bytes());
        data.extend_from_slice(&x.to_le_bytes());
        data.extend_from_slice(&y.to_le_bytes());
        data.extend_from_slice(&w.to_le_bytes());
        data.extend_from_slice(&h.to_le_bytes());
        data
    }

    #[test]
    fn plain_slice() {
        let mut data = slice_header(1, 0, "hitbox");
        data.extend_from_slice(&key_bounds(0, 1, 2, 10, 20));

        let slice = decode(&data).unwrap();
        assert_eq!(slice.name, "hitbox");
        assert_eq!(slice.keys.len(), 1);
        assert_eq!(slice.keys[0].bounds, Rect::new(1, 2, 10, 20));
        assert_eq!(slice.keys[0].center, None);
        assert_eq!(slice.keys[0].pivot, None);
    }

    #[test]
    fn nine_slice_with_pivot() {
        let mut data = slice_header(1, FLAG_NINE_SLICE | FLAG_PIVOT, "button");
        data.extend_from_slice(&key_bounds(2, 0, 0, 32, 32));
        // Center rect.
        data.extend_from_slice(&4i32.to_le_bytes());
        data.extend_from_slice(&4i32.to_le_bytes());
        data.extend_from_slice(&24u32.to_le_bytes());
        data.extend_from_slice(&24u32.to_le_bytes());
        // Pivot.
        data.extend_from_slice(&16i32.to_le_bytes());
        data.extend_from_slice(&31i32.to_le_bytes());

        let slice = decode(&data).unwrap();
        let key = &slice.keys[0];
        assert_eq!(key.frame, 2);
        assert_eq!(key.center, Some(Rect::new(4, 4, 24, 24)));
        assert_eq!(key.pivot, Some(Point::new(16, 31)));
    }

    #[test]
    fn pivot_only() {
        let mut data = slice_header(1, FLAG_PIVOT, "p");
        data.extend_from_slice(&key_bounds(0, 0, 0, 8, 8));
        data.extend_from_slice(&(-4i32).to_le_bytes());
        data.extend_from_slice(&0i32.to_le_bytes());

        let slice = decode(&data).unwrap();
        assert_eq!(slice.keys[0].center, None);
        assert_eq!(slice.keys[0].pivot, Some(Point::new(-4, 0)));
    }
}
