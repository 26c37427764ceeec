//! In-memory model of a decoded sprite file.
//!
//! [`AseFile`] is the aggregate produced by one full parse: a header plus
//! an ordered sequence of frames. Each frame first holds its raw chunks
//! ([`RawChunk`]) exactly as read from the stream; the typed collections
//! (layers, cels, palettes, tags, ...) are populated afterwards by the
//! decode passes in [`crate::chunks`]. Typed records are only ever derived
//! from raw chunks, never constructed independently.

use ase_core::{Point, Rect};

use crate::props::PropValue;

/// Magic number at the start of every sprite file.
pub const HEADER_MAGIC: u16 = 0xA5E0;

/// Magic number at the start of every frame sub-header.
pub const FRAME_MAGIC: u16 = 0xF1FA;

/// Size of the fixed file header in bytes.
pub const HEADER_SIZE: usize = 128;

/// Size of the per-frame sub-header in bytes.
pub const FRAME_HEADER_SIZE: usize = 16;

/// Bytes of a chunk taken by its own size + type prefix.
pub const CHUNK_HEADER_SIZE: u32 = 6;

// === Chunk types ===

/// Known chunk type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ChunkType {
    /// Old palette chunk, first flavor.
    OldPalette1 = 0x0004,
    /// Old palette chunk, second flavor.
    OldPalette2 = 0x0011,
    /// Layer definition.
    Layer = 0x2004,
    /// Cel pixel/link data.
    Cel = 0x2005,
    /// Extra cel placement data (no decoder; kept raw).
    CelExtra = 0x2006,
    /// Color profile.
    ColorProfile = 0x2007,
    /// External files table.
    ExternalFiles = 0x2008,
    /// Deprecated bitmap mask.
    Mask = 0x2016,
    /// Animation tags.
    Tags = 0x2018,
    /// New palette chunk.
    NewPalette = 0x2019,
    /// User data attached to the previous chunk.
    UserData = 0x2020,
    /// Slice regions.
    Slice = 0x2022,
    /// Tileset definition (recognized, never decoded).
    Tileset = 0x2023,
}

impl ChunkType {
    /// Maps a raw tag to a known chunk type, if any.
    pub fn from_u16(tag: u16) -> Option<Self> {
        match tag {
            0x0004 => Some(ChunkType::OldPalette1),
            0x0011 => Some(ChunkType::OldPalette2),
            0x2004 => Some(ChunkType::Layer),
            0x2005 => Some(ChunkType::Cel),
            0x2006 => Some(ChunkType::CelExtra),
            0x2007 => Some(ChunkType::ColorProfile),
            0x2008 => Some(ChunkType::ExternalFiles),
            0x2016 => Some(ChunkType::Mask),
            0x2018 => Some(ChunkType::Tags),
            0x2019 => Some(ChunkType::NewPalette),
            0x2020 => Some(ChunkType::UserData),
            0x2022 => Some(ChunkType::Slice),
            0x2023 => Some(ChunkType::Tileset),
            _ => None,
        }
    }
}

/// A raw, undecoded chunk: the parser's unit of dispatch.
#[derive(Debug, Clone)]
pub struct RawChunk {
    /// Declared chunk size including the 6-byte size + type prefix.
    pub size: u32,
    /// Raw type tag as read from the stream. Unknown tags are preserved.
    pub tag: u16,
    /// Payload: `size - 6` bytes.
    pub data: Vec<u8>,
}

impl RawChunk {
    /// The known chunk type, if the tag is one the decoder recognizes.
    #[inline]
    pub fn chunk_type(&self) -> Option<ChunkType> {
        ChunkType::from_u16(self.tag)
    }
}

// === Header ===

/// Fixed 128-byte file header.
#[derive(Debug, Clone, Default)]
pub struct Header {
    /// Total file size in bytes.
    pub file_size: u32,
    /// Must equal [`HEADER_MAGIC`].
    pub magic: u16,
    /// Number of frames that follow.
    pub frames: u16,
    /// Canvas width in pixels.
    pub width: u16,
    /// Canvas height in pixels.
    pub height: u16,
    /// Color depth in bits per pixel: 32 = RGBA, 16 = greyscale, 8 = indexed.
    pub depth: u16,
    /// Header flags.
    pub flags: u32,
    /// Deprecated frame speed in milliseconds.
    pub speed: u16,
    /// Palette entry that represents transparency (indexed sprites).
    pub transparent_index: u8,
    /// Number of colors (0 means 256 in old sprites).
    pub num_colors: u16,
    /// Pixel aspect numerator.
    pub pixel_width: u8,
    /// Pixel aspect denominator.
    pub pixel_height: u8,
    /// Grid origin X.
    pub grid_x: i16,
    /// Grid origin Y.
    pub grid_y: i16,
    /// Grid cell width.
    pub grid_width: u16,
    /// Grid cell height.
    pub grid_height: u16,
}

// === Layers and cels ===

/// Layer kind, from the layer chunk's type field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// Ordinary image layer.
    Normal,
    /// Group layer (holds no cels of its own).
    Group,
    /// Tileset layer. Decoded structurally, semantics unsupported.
    Tilemap,
    /// Forward-compatible unknown value.
    Unknown(u16),
}

impl LayerKind {
    /// Maps the raw type field.
    pub fn from_u16(kind: u16) -> Self {
        match kind {
            0 => LayerKind::Normal,
            1 => LayerKind::Group,
            2 => LayerKind::Tilemap,
            other => LayerKind::Unknown(other),
        }
    }
}

/// A layer in the stack. Its index is positional: the order layer chunks
/// appear in the file is the order layers live in [`Frame::layers`].
#[derive(Debug, Clone)]
pub struct Layer {
    /// Layer flags (bit 0 = visible, bit 1 = editable, ...).
    pub flags: u16,
    /// Layer kind.
    pub kind: LayerKind,
    /// Nesting level below the previous layer (group hierarchy).
    pub child_level: u16,
    /// Blend mode tag.
    pub blend_mode: u16,
    /// Layer opacity, 0-255.
    pub opacity: u8,
    /// Layer name.
    pub name: String,
    /// Cels that reference this layer, in decode order until the
    /// reorder pass runs.
    pub cels: Vec<Cel>,
}

impl Layer {
    /// True if the visible flag is set.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.flags & 0x1 != 0
    }
}

/// Pixel payload of a cel.
#[derive(Debug, Clone)]
pub enum CelContent {
    /// Uncompressed pixels, row-major.
    Raw {
        /// Cel width in pixels.
        width: u16,
        /// Cel height in pixels.
        height: u16,
        /// Raw sample bytes.
        pixels: Vec<u8>,
    },
    /// Back-reference to the cel of another frame on the same layer.
    Linked {
        /// Frame position to link with.
        frame: u16,
    },
    /// Zlib-compressed pixels; inflated on demand by
    /// [`crate::pixels::decode_cel_image`].
    Compressed {
        /// Cel width in pixels.
        width: u16,
        /// Cel height in pixels.
        height: u16,
        /// Compressed byte stream.
        data: Vec<u8>,
    },
}

/// One layer's content contribution to one frame.
#[derive(Debug, Clone)]
pub struct Cel {
    /// Index of the owning layer.
    pub layer_index: u16,
    /// X placement on the canvas.
    pub x: i16,
    /// Y placement on the canvas.
    pub y: i16,
    /// Cel opacity, 0-255.
    pub opacity: u8,
    /// Compositing-order override relative to the layer position.
    pub z_index: i16,
    /// Pixel payload or link.
    pub content: CelContent,
}

impl Cel {
    /// Composite ordering key: layer position first, z-index as a
    /// fine-grained override within it.
    #[inline]
    pub fn order(&self) -> i32 {
        i32::from(self.layer_index) + i32::from(self.z_index)
    }
}

// === Palettes ===

/// One packet of an old-format palette chunk.
#[derive(Debug, Clone)]
pub struct PalettePacket {
    /// RGB triples. A stored color count of zero means 256 entries.
    pub colors: Vec<[u8; 3]>,
}

/// Old-format palette chunk (tags 0x0004 / 0x0011).
#[derive(Debug, Clone)]
pub struct OldPaletteChunk {
    /// Tag this chunk was decoded from.
    pub tag: ChunkType,
    /// Number of leading packets that were skipped.
    pub skipped: u8,
    /// Decoded packets.
    pub packets: Vec<PalettePacket>,
}

/// One entry of a new-format palette chunk.
#[derive(Debug, Clone)]
pub struct PaletteEntry {
    /// Entry flags; bit 0 gates the name.
    pub flags: u16,
    /// RGBA color.
    pub color: [u8; 4],
    /// Optional entry name.
    pub name: Option<String>,
}

/// New-format palette chunk (tag 0x2019).
#[derive(Debug, Clone)]
pub struct NewPaletteChunk {
    /// First palette slot this chunk changes.
    pub first_index: u32,
    /// Last palette slot this chunk changes.
    pub last_index: u32,
    /// Entries, indexed by palette slot starting at `first_index`.
    pub entries: Vec<PaletteEntry>,
}

// === Tags, slices, user data ===

/// Animation-segment metadata. Not used in pixel reconstruction.
#[derive(Debug, Clone)]
pub struct Tag {
    /// First frame of the segment.
    pub from_frame: u16,
    /// Last frame of the segment.
    pub to_frame: u16,
    /// Loop direction (0 forward, 1 reverse, 2 ping-pong, ...).
    pub loop_direction: u8,
    /// Repeat count (0 = infinite).
    pub repeat: u16,
    /// Deprecated tag color.
    pub color: [u8; 3],
    /// Tag name.
    pub name: String,
}

/// Per-frame slice geometry.
#[derive(Debug, Clone)]
pub struct SliceKey {
    /// Frame this key becomes valid from.
    pub frame: u32,
    /// Slice bounds on the canvas.
    pub bounds: Rect,
    /// 9-slice center rect, when the slice flags carry bit 0.
    pub center: Option<Rect>,
    /// Pivot point, when the slice flags carry bit 1.
    pub pivot: Option<Point>,
}

/// A named rectangular region with per-frame keys.
#[derive(Debug, Clone)]
pub struct Slice {
    /// Slice flags: bit 0 = has 9-slice center, bit 1 = has pivot.
    pub flags: u32,
    /// Slice name.
    pub name: String,
    /// Keys, one per frame the slice changes on.
    pub keys: Vec<SliceKey>,
}

/// A named property inside a user-data map.
#[derive(Debug, Clone)]
pub struct UserProp {
    /// Property name.
    pub name: String,
    /// Decoded value.
    pub value: PropValue,
}

/// One property map of a user-data record.
#[derive(Debug, Clone)]
pub struct PropertyMap {
    /// Map key (0 = user properties, otherwise an extension entry ID).
    pub key: u32,
    /// Named properties, in file order. May be shorter than the declared
    /// count if an unsupported property type stopped the map's decoding.
    pub props: Vec<UserProp>,
}

/// User data attached to another chunk.
#[derive(Debug, Clone, Default)]
pub struct UserData {
    /// Flag word: bit 0 = text, bit 1 = color, bit 2 = properties.
    pub flags: u32,
    /// Free text, when flag bit 0 is set.
    pub text: Option<String>,
    /// RGBA color, when flag bit 1 is set.
    pub color: Option<[u8; 4]>,
    /// Property maps, when flag bit 2 is set.
    pub properties: Vec<PropertyMap>,
}

// === Structural-completeness chunks ===

/// Color profile chunk. Decoded for completeness; pixel reconstruction
/// does not consume it.
#[derive(Debug, Clone)]
pub struct ColorProfile {
    /// Profile type (0 none, 1 sRGB, 2 embedded ICC).
    pub kind: u16,
    /// Profile flags.
    pub flags: u16,
    /// Fixed-point gamma.
    pub gamma: f64,
    /// Embedded ICC blob for type 2 profiles.
    pub icc_data: Option<Vec<u8>>,
}

/// Entry of the external files table.
#[derive(Debug, Clone)]
pub struct ExternalFileEntry {
    /// Entry ID referenced by other chunks.
    pub id: u32,
    /// Entry type.
    pub kind: u8,
    /// External file name.
    pub name: String,
}

/// Deprecated bitmap mask chunk.
#[derive(Debug, Clone)]
pub struct MaskData {
    /// X origin.
    pub x: i16,
    /// Y origin.
    pub y: i16,
    /// Mask width in pixels.
    pub width: u16,
    /// Mask height in pixels.
    pub height: u16,
    /// Mask name.
    pub name: String,
    /// Bitmap, `height * ((width + 7) / 8)` bytes.
    pub bitmap: Vec<u8>,
}

// === Frames and files ===

/// One frame: sub-header fields, raw chunks, and the typed collections
/// the decode passes fill in.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Bytes this frame occupies in the file.
    pub bytes_in_frame: u32,
    /// Frame duration in milliseconds.
    pub duration_ms: u16,
    /// Legacy 16-bit chunk count.
    pub num_chunks: u16,
    /// Extended 32-bit chunk count; supersedes the legacy count when
    /// non-zero.
    pub new_num_chunks: u32,
    /// Raw chunks in stream order.
    pub chunks: Vec<RawChunk>,
    /// Layers, filled by [`crate::chunks::decode_layers`].
    pub layers: Vec<Layer>,
    /// Old-format palettes, filled by [`crate::chunks::decode_old_palettes`].
    pub old_palettes: Vec<OldPaletteChunk>,
    /// New-format palettes, filled by [`crate::chunks::decode_new_palettes`].
    pub new_palettes: Vec<NewPaletteChunk>,
    /// Animation tags, filled by [`crate::chunks::decode_tags`].
    pub tags: Vec<Tag>,
    /// Slices, filled by [`crate::chunks::decode_slices`].
    pub slices: Vec<Slice>,
    /// User-data records, filled by [`crate::chunks::decode_user_data`].
    pub user_data: Vec<UserData>,
    /// Color profile, filled by [`crate::chunks::decode_color_profiles`].
    pub color_profile: Option<ColorProfile>,
    /// External files, filled by [`crate::chunks::decode_external_files`].
    pub external_files: Vec<ExternalFileEntry>,
    /// Deprecated masks, filled by [`crate::chunks::decode_masks`].
    pub masks: Vec<MaskData>,
}

impl Frame {
    /// The effective chunk count: the extended count when non-zero,
    /// otherwise the legacy count.
    #[inline]
    pub fn chunk_count(&self) -> u32 {
        if self.new_num_chunks != 0 {
            self.new_num_chunks
        } else {
            u32::from(self.num_chunks)
        }
    }
}

/// A fully parsed sprite file: header plus ordered frames.
///
/// Created once by [`crate::parser::parse`] and retained by the caller;
/// there is no partial-update or incremental-append model.
#[derive(Debug, Clone, Default)]
pub struct AseFile {
    /// File header.
    pub header: Header,
    /// Frames in file order.
    pub frames: Vec<Frame>,
}

impl AseFile {
    /// Runs every chunk decode pass and the cel reorder pass.
    ///
    /// Layers are decoded before cels (cels attach to layers by index);
    /// every other pass is order-insensitive; reordering runs last.
    pub fn decode_chunks(&mut self) -> crate::AseResult<()> {
        crate::chunks::decode_layers(self)?;
        crate::chunks::decode_cels(self)?;
        crate::chunks::decode_old_palettes(self)?;
        crate::chunks::decode_new_palettes(self)?;
        crate::chunks::decode_tags(self)?;
        crate::chunks::decode_slices(self)?;
        crate::chunks::decode_user_data(self)?;
        crate::chunks::decode_color_profiles(self)?;
        crate::chunks::decode_external_files(self)?;
        crate::chunks::decode_masks(self)?;
        crate::chunks::report_tilesets(self);
        crate::order::reorder_cels(self);
        Ok(())
    }
}
