//! End-to-end decoding of synthetic sprite files built byte by byte.

use ase_io::model::{CHUNK_HEADER_SIZE, FRAME_HEADER_SIZE, FRAME_MAGIC, HEADER_MAGIC, HEADER_SIZE};
use ase_io::{read_from_memory, CelContent, LayerKind, SpriteBank};
use miniz_oxide::deflate::compress_to_vec_zlib;

// === File builders ===

fn push_u16(buf: &mut Vec<u8>, v: u16) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn push_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn header_bytes(frames: u16, width: u16, height: u16, depth: u16) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_SIZE);
    push_u32(&mut buf, 0); // file size, not validated
    push_u16(&mut buf, HEADER_MAGIC);
    push_u16(&mut buf, frames);
    push_u16(&mut buf, width);
    push_u16(&mut buf, height);
    push_u16(&mut buf, depth);
    push_u32(&mut buf, 0); // flags
    push_u16(&mut buf, 100); // speed
    buf.extend_from_slice(&[0u8; 8]);
    buf.push(0); // transparent index
    buf.extend_from_slice(&[0u8; 3]);
    push_u16(&mut buf, 0); // num colors
    buf.push(1);
    buf.push(1);
    push_u16(&mut buf, 0);
    push_u16(&mut buf, 0);
    push_u16(&mut buf, 16);
    push_u16(&mut buf, 16);
    buf.extend_from_slice(&[0u8; 84]);
    assert_eq!(buf.len(), HEADER_SIZE);
    buf
}

fn frame_bytes(chunks: &[(u16, Vec<u8>)]) -> Vec<u8> {
    let mut buf = Vec::new();
    let total: u32 = FRAME_HEADER_SIZE as u32
        + chunks
            .iter()
            .map(|(_, payload)| CHUNK_HEADER_SIZE + payload.len() as u32)
            .sum::<u32>();
    push_u32(&mut buf, total);
    push_u16(&mut buf, FRAME_MAGIC);
    push_u16(&mut buf, chunks.len() as u16);
    push_u16(&mut buf, 42); // duration
    buf.extend_from_slice(&[0u8; 2]);
    push_u32(&mut buf, 0);
    for (tag, payload) in chunks {
        push_u32(&mut buf, CHUNK_HEADER_SIZE + payload.len() as u32);
        push_u16(&mut buf, *tag);
        buf.extend_from_slice(payload);
    }
    buf
}

fn layer_chunk(name: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    push_u16(&mut buf, 0x1); // visible
    push_u16(&mut buf, 0); // normal
    push_u16(&mut buf, 0); // child level
    buf.extend_from_slice(&[0u8; 4]);
    push_u16(&mut buf, 0); // blend mode
    buf.push(255); // opacity
    buf.extend_from_slice(&[0u8; 3]);
    push_u16(&mut buf, name.len() as u16);
    buf.extend_from_slice(name.as_bytes());
    buf
}

fn cel_prefix(layer: u16, x: i16, y: i16, cel_type: u16, z: i16) -> Vec<u8> {
    let mut buf = Vec::new();
    push_u16(&mut buf, layer);
    buf.extend_from_slice(&x.to_le_bytes());
    buf.extend_from_slice(&y.to_le_bytes());
    buf.push(255);
    push_u16(&mut buf, cel_type);
    buf.extend_from_slice(&z.to_le_bytes());
    buf.extend_from_slice(&[0u8; 5]);
    buf
}

fn raw_cel_chunk(layer: u16, z: i16, width: u16, height: u16, pixels: &[u8]) -> Vec<u8> {
    let mut buf = cel_prefix(layer, 0, 0, 0, z);
    push_u16(&mut buf, width);
    push_u16(&mut buf, height);
    buf.extend_from_slice(pixels);
    buf
}

fn compressed_cel_chunk(layer: u16, width: u16, height: u16, pixels: &[u8]) -> Vec<u8> {
    let mut buf = cel_prefix(layer, 0, 0, 2, 0);
    push_u16(&mut buf, width);
    push_u16(&mut buf, height);
    buf.extend_from_slice(&compress_to_vec_zlib(pixels, 6));
    buf
}

fn old_palette_chunk(colors: &[[u8; 3]]) -> Vec<u8> {
    let mut buf = Vec::new();
    push_u16(&mut buf, 1); // one packet
    buf.push(0); // skip none
    buf.push(colors.len() as u8);
    for rgb in colors {
        buf.extend_from_slice(rgb);
    }
    buf
}

fn tags_chunk(name: &str, from: u16, to: u16) -> Vec<u8> {
    let mut buf = Vec::new();
    push_u16(&mut buf, 1);
    buf.extend_from_slice(&[0u8; 8]);
    push_u16(&mut buf, from);
    push_u16(&mut buf, to);
    buf.push(0); // forward
    push_u16(&mut buf, 0); // infinite
    buf.extend_from_slice(&[0u8; 6]);
    buf.extend_from_slice(&[0, 0, 0]);
    buf.push(0);
    push_u16(&mut buf, name.len() as u16);
    buf.extend_from_slice(name.as_bytes());
    buf
}

// === Tests ===

#[test]
fn full_file_decodes_typed_collections() {
    // 2x2 RGBA canvas: one layer, one raw cel, a palette and a tag.
    let pixels: Vec<u8> = (0..16).collect();
    let mut data = header_bytes(1, 2, 2, 32);
    data.extend_from_slice(&frame_bytes(&[
        (0x0004, old_palette_chunk(&[[1, 2, 3], [4, 5, 6]])),
        (0x2004, layer_chunk("Background")),
        (0x2005, raw_cel_chunk(0, 0, 2, 2, &pixels)),
        (0x2018, tags_chunk("idle", 0, 0)),
    ]));

    let file = read_from_memory(&data).unwrap();
    assert_eq!(file.header.width, 2);
    assert_eq!(file.frames.len(), 1);

    let frame = &file.frames[0];
    assert_eq!(frame.duration_ms, 42);
    assert_eq!(frame.layers.len(), 1);
    let layer = &frame.layers[0];
    assert_eq!(layer.name, "Background");
    assert_eq!(layer.kind, LayerKind::Normal);
    assert!(layer.is_visible());
    assert_eq!(layer.cels.len(), 1);

    assert_eq!(frame.old_palettes.len(), 1);
    assert_eq!(frame.old_palettes[0].packets[0].colors[1], [4, 5, 6]);
    assert_eq!(frame.tags.len(), 1);
    assert_eq!(frame.tags[0].name, "idle");

    let image = ase_io::decode_cel_image(&file.header, &layer.cels[0]).unwrap();
    assert_eq!(image.bytes(), &pixels[..]);
    assert_eq!(image.get_pixel_u32(1, 1).unwrap(), 0x0F0E0D0C);
}

#[test]
fn compressed_cel_inflates_to_raw_pixels() {
    let pixels: Vec<u8> = (0..64).map(|i| (255 - i) as u8).collect(); // 4x4 RGBA
    let mut data = header_bytes(1, 4, 4, 32);
    data.extend_from_slice(&frame_bytes(&[
        (0x2004, layer_chunk("art")),
        (0x2005, compressed_cel_chunk(0, 4, 4, &pixels)),
    ]));

    let file = read_from_memory(&data).unwrap();
    let cel = &file.frames[0].layers[0].cels[0];
    assert!(matches!(cel.content, CelContent::Compressed { .. }));
    let image = ase_io::decode_cel_image(&file.header, cel).unwrap();
    assert_eq!(image.bytes(), &pixels[..]);
}

#[test]
fn z_index_reorders_cels_within_a_layer() {
    let px = [0u8; 4]; // 1x1 RGBA
    let mut data = header_bytes(1, 1, 1, 32);
    data.extend_from_slice(&frame_bytes(&[
        (0x2004, layer_chunk("stack")),
        (0x2005, raw_cel_chunk(0, 5, 1, 1, &px)),
        (0x2005, raw_cel_chunk(0, 0, 1, 1, &px)),
    ]));

    let file = read_from_memory(&data).unwrap();
    let cels = &file.frames[0].layers[0].cels;
    assert_eq!(cels.len(), 2);
    // Decode order was z=5 first; order keys 5 and 0 swap them.
    assert_eq!(cels[0].z_index, 0);
    assert_eq!(cels[1].z_index, 5);
}

#[test]
fn zero_z_indices_keep_decode_order() {
    let px = [0u8; 4];
    let mut data = header_bytes(1, 1, 1, 32);
    data.extend_from_slice(&frame_bytes(&[
        (0x2004, layer_chunk("a")),
        (0x2004, layer_chunk("b")),
        (0x2005, raw_cel_chunk(1, 0, 1, 1, &px)),
        (0x2005, raw_cel_chunk(0, 0, 1, 1, &px)),
    ]));

    let file = read_from_memory(&data).unwrap();
    let frame = &file.frames[0];
    assert_eq!(frame.layers[0].cels.len(), 1);
    assert_eq!(frame.layers[1].cels.len(), 1);
}

#[test]
fn cel_without_a_layer_target_is_dropped() {
    let px = [7u8; 4];
    let mut link = cel_prefix(0, 0, 0, 1, 0);
    link.extend_from_slice(&0u16.to_le_bytes()); // links to frame 0

    let mut data = header_bytes(2, 1, 1, 32);
    data.extend_from_slice(&frame_bytes(&[
        (0x2004, layer_chunk("art")),
        (0x2005, raw_cel_chunk(0, 0, 1, 1, &px)),
    ]));
    data.extend_from_slice(&frame_bytes(&[(0x2005, link)]));

    // Frame 1 has no layer chunks, so its cel has no attachment target.
    // That drops the cel with a warning instead of failing the file.
    let file = read_from_memory(&data).unwrap();
    assert_eq!(file.frames[0].layers[0].cels.len(), 1);
    assert!(file.frames[1].layers.is_empty());
}

#[test]
fn unknown_chunk_types_are_preserved_raw() {
    let mut data = header_bytes(1, 1, 1, 32);
    data.extend_from_slice(&frame_bytes(&[(0x7777, vec![0xAB; 5])]));

    let file = read_from_memory(&data).unwrap();
    let frame = &file.frames[0];
    assert_eq!(frame.chunks.len(), 1);
    assert_eq!(frame.chunks[0].tag, 0x7777);
    assert_eq!(frame.chunks[0].data, vec![0xAB; 5]);
    assert!(frame.layers.is_empty());
}

#[test]
fn sprite_bank_loads_from_disk_keyed_by_stem() {
    let pixels = [9u8; 4];
    let mut data = header_bytes(1, 1, 1, 32);
    data.extend_from_slice(&frame_bytes(&[
        (0x2004, layer_chunk("art")),
        (0x2005, raw_cel_chunk(0, 0, 1, 1, &pixels)),
    ]));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hero.aseprite");
    std::fs::write(&path, &data).unwrap();

    let mut bank = SpriteBank::new();
    bank.load(&path).unwrap();
    let file = bank.get("hero").unwrap();
    assert_eq!(file.frames[0].layers[0].cels.len(), 1);
    assert!(bank.get("hero.aseprite").is_none());
}
