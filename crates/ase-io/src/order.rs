//! Cel compositing-order pass.
//!
//! Cels carry a signed z-index that offsets their compositing position
//! relative to their layer. Files that never use the feature store zero
//! everywhere, and for those the pass leaves decode order untouched. The
//! z-index scan is file-wide on purpose: a single non-zero value anywhere
//! switches the whole file to explicit ordering.

use crate::model::AseFile;

/// Reorders every layer's cels by their compositing key.
///
/// No-op unless some cel in the file carries a non-zero z-index.
/// Ordering is by [`crate::model::Cel::order`] (layer index plus
/// z-index), with the raw z-index breaking ties; the sort is stable, so
/// fully tied cels keep decode order.
pub fn reorder_cels(file: &mut AseFile) {
    let any_z_index = file
        .frames
        .iter()
        .flat_map(|frame| &frame.layers)
        .flat_map(|layer| &layer.cels)
        .any(|cel| cel.z_index != 0);
    if !any_z_index {
        return;
    }

    for frame in &mut file.frames {
        for layer in &mut frame.layers {
            layer.cels.sort_by_key(|cel| (cel.order(), cel.z_index));
        }
    }
}
