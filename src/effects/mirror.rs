use image::imageops;

use crate::{animation::action::MirrorDirection, foundation::core::Frame};

/// Tile indices: 0 original, 1 horizontal flip, 2 vertical flip, 3 both.
fn layout(direction: MirrorDirection) -> &'static [&'static [u8]] {
    match direction {
        MirrorDirection::AllDirections1 => &[&[3, 2, 3], &[1, 0, 1], &[3, 2, 3]],
        MirrorDirection::Left1 => &[&[1, 0]],
        MirrorDirection::Right1 => &[&[0, 1]],
        MirrorDirection::Left3 => &[&[1, 0, 1, 0]],
        MirrorDirection::Right3 => &[&[0, 1, 0, 1]],
    }
}

/// Canvas size in tiles (columns, rows).
pub fn grid_size(direction: MirrorDirection) -> (u32, u32) {
    let rows = layout(direction);
    let cols = rows.first().map_or(0, |r| r.len());
    (cols as u32, rows.len() as u32)
}

/// Tile the frame with flipped copies of itself so that neighbouring edges match.
pub fn mirror_tile(img: &Frame, direction: MirrorDirection) -> Frame {
    let (w, h) = img.dimensions();
    let (cols, rows) = grid_size(direction);

    let flip_h = imageops::flip_horizontal(img);
    let flip_v = imageops::flip_vertical(img);
    let flip_both = imageops::flip_vertical(&flip_h);
    let tiles: [&Frame; 4] = [img, &flip_h, &flip_v, &flip_both];

    let mut out = Frame::new(w * cols, h * rows);
    for (row, indices) in layout(direction).iter().enumerate() {
        for (col, &idx) in indices.iter().enumerate() {
            let x = i64::from(w) * col as i64;
            let y = i64::from(h) * row as i64;
            imageops::replace(&mut out, tiles[usize::from(idx)], x, y);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/mirror.rs"]
mod tests;
