//! Recursive decoder for user-data property values.
//!
//! Property values are a tagged union over a 16-bit type tag. Most tags
//! carry a fixed-width payload; vectors recurse into this same decoder
//! when their element type is heterogeneous (element type 0).
//!
//! Two branches of the format are recognized but deliberately not
//! reconstructed, and both surface [`AseError::UnsupportedProperty`]
//! rather than pretending to decode:
//!
//! - homogeneous vectors (non-zero element type): the payload is
//!   advanced 4 bytes per element to keep the stream aligned, but no
//!   typed values are produced;
//! - nested property maps: their extent cannot be computed without
//!   decoding, so the cursor is left untouched and the enclosing map
//!   stops decoding.
//!
//! Unknown tags likewise stop the enclosing map: an unknown payload has
//! unknowable extent, and guessing would corrupt the stream cursor.

use ase_core::{Point, Rect, Size};

use crate::error::{AseError, AseResult};
use crate::stream::ByteReader;

/// Property type tags (16-bit, little-endian).
pub mod tag {
    /// Boolean.
    pub const BOOL: u16 = 0x0001;
    /// Signed 8-bit integer.
    pub const INT8: u16 = 0x0002;
    /// Signed 16-bit integer.
    pub const INT16: u16 = 0x0004;
    /// Unsigned 16-bit integer.
    pub const UINT16: u16 = 0x0005;
    /// Signed 32-bit integer.
    pub const INT32: u16 = 0x0006;
    /// Unsigned 32-bit integer.
    pub const UINT32: u16 = 0x0007;
    /// Signed 64-bit integer.
    pub const INT64: u16 = 0x0008;
    /// Unsigned 64-bit integer.
    pub const UINT64: u16 = 0x0009;
    /// Fixed-point number.
    pub const FIXED: u16 = 0x000A;
    /// 32-bit float.
    pub const FLOAT: u16 = 0x000B;
    /// 64-bit float.
    pub const DOUBLE: u16 = 0x000C;
    /// Length-prefixed string.
    pub const STRING: u16 = 0x000D;
    /// Two signed 32-bit integers.
    pub const POINT: u16 = 0x000E;
    /// Two signed 32-bit integers.
    pub const SIZE: u16 = 0x000F;
    /// Four signed 32-bit integers.
    pub const RECT: u16 = 0x0010;
    /// Element count + element type + elements.
    pub const VECTOR: u16 = 0x0011;
    /// Nested string-keyed property map.
    pub const NESTED_MAP: u16 = 0x0012;
    /// 16 raw bytes.
    pub const UUID: u16 = 0x0013;
}

/// A decoded property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// Boolean.
    Bool(bool),
    /// Signed 8-bit integer.
    I8(i8),
    /// Signed 16-bit integer.
    I16(i16),
    /// Unsigned 16-bit integer.
    U16(u16),
    /// Signed 32-bit integer.
    I32(i32),
    /// Unsigned 32-bit integer.
    U32(u32),
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// Fixed-point number, read as a 64-bit float.
    Fixed(f64),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// UTF-8 string.
    Str(String),
    /// 2D point.
    Point(Point),
    /// 2D extent.
    Size(Size),
    /// Rectangle.
    Rect(Rect),
    /// Heterogeneous vector; each element carried its own type tag.
    Vector(Vec<PropValue>),
    /// Raw UUID bytes.
    Uuid([u8; 16]),
}

impl PropValue {
    /// Short kind name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            PropValue::Bool(_) => "bool",
            PropValue::I8(_) => "int8",
            PropValue::I16(_) => "int16",
            PropValue::U16(_) => "uint16",
            PropValue::I32(_) => "int32",
            PropValue::U32(_) => "uint32",
            PropValue::I64(_) => "int64",
            PropValue::U64(_) => "uint64",
            PropValue::Fixed(_) => "fixed",
            PropValue::Float(_) => "float",
            PropValue::Double(_) => "double",
            PropValue::Str(_) => "string",
            PropValue::Point(_) => "point",
            PropValue::Size(_) => "size",
            PropValue::Rect(_) => "rect",
            PropValue::Vector(_) => "vector",
            PropValue::Uuid(_) => "uuid",
        }
    }
}

/// Decodes one value for the given type tag, recursing for vectors.
pub fn decode_value(r: &mut ByteReader<'_>, type_tag: u16) -> AseResult<PropValue> {
    match type_tag {
        tag::BOOL => Ok(PropValue::Bool(r.read_u8()? != 0)),
        tag::INT8 => Ok(PropValue::I8(r.read_i8()?)),
        tag::INT16 => Ok(PropValue::I16(r.read_i16()?)),
        tag::UINT16 => Ok(PropValue::U16(r.read_u16()?)),
        tag::INT32 => Ok(PropValue::I32(r.read_i32()?)),
        tag::UINT32 => Ok(PropValue::U32(r.read_u32()?)),
        tag::INT64 => Ok(PropValue::I64(r.read_i64()?)),
        tag::UINT64 => Ok(PropValue::U64(r.read_u64()?)),
        tag::FIXED => Ok(PropValue::Fixed(r.read_f64()?)),
        tag::FLOAT => Ok(PropValue::Float(r.read_f32()?)),
        tag::DOUBLE => Ok(PropValue::Double(r.read_f64()?)),
        tag::STRING => Ok(PropValue::Str(r.read_string()?)),
        tag::POINT => {
            let x = r.read_i32()?;
            let y = r.read_i32()?;
            Ok(PropValue::Point(Point::new(x, y)))
        }
        tag::SIZE => {
            let width = r.read_i32()?;
            let height = r.read_i32()?;
            Ok(PropValue::Size(Size::new(width, height)))
        }
        tag::RECT => {
            let x = r.read_i32()?;
            let y = r.read_i32()?;
            let width = r.read_i32()?;
            let height = r.read_i32()?;
            Ok(PropValue::Rect(Rect::new(x, y, width, height)))
        }
        tag::VECTOR => decode_vector(r),
        tag::NESTED_MAP => Err(AseError::UnsupportedProperty(tag::NESTED_MAP)),
        tag::UUID => {
            let mut uuid = [0u8; 16];
            r.read_exact(&mut uuid)?;
            Ok(PropValue::Uuid(uuid))
        }
        unknown => Err(AseError::UnsupportedProperty(unknown)),
    }
}

fn decode_vector(r: &mut ByteReader<'_>) -> AseResult<PropValue> {
    let count = r.read_u32()?;
    let element_type = r.read_u16()?;

    if element_type == 0 {
        // Heterogeneous: each element carries its own tag.
        let mut elements = Vec::with_capacity(count.min(1024) as usize);
        for _ in 0..count {
            let element_tag = r.read_u16()?;
            elements.push(decode_value(r, element_tag)?);
        }
        return Ok(PropValue::Vector(elements));
    }

    // Homogeneous vectors are not reconstructed. Advance the 4 bytes per
    // element the payload occupies, then surface the condition.
    r.skip(count as usize * 4)?;
    Err(AseError::UnsupportedProperty(tag::VECTOR))
}
