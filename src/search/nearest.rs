//! Nearest used-texel lookup.
//!
//! The search first shrinks its window with four axis-aligned probes from the query
//! texel, then scans the remaining box exhaustively. A probe hit at distance `d` proves a
//! candidate exists at distance `d`, so every column (or row) past the hit is strictly
//! farther and can be dropped without changing the answer.

use std::ops::RangeInclusive;

use crate::foundation::core::SearchRadius;
use crate::raster::mask::{MASK_VALID, Mask};

/// Find the used texel closest to `(x, y)` by squared Euclidean distance.
///
/// `radius` bounds the square window searched around the query; an unbounded radius
/// searches the whole mask. Among equally distant candidates the first one in row-major
/// order wins. Returns `None` when no used texel lies inside the window.
///
/// `(x, y)` must lie inside the mask.
pub fn find_nearest(mask: &Mask, x: u32, y: u32, radius: SearchRadius) -> Option<(u32, u32)> {
    let (w, h) = mask.dimensions();
    debug_assert!(x < w && y < h, "query ({x}, {y}) outside {w}x{h} mask");

    let (mut startx, mut endx, mut starty, mut endy) = match radius.limit() {
        Some(r) => (
            x.saturating_sub(r),
            x.saturating_add(r).min(w - 1),
            y.saturating_sub(r),
            y.saturating_add(r).min(h - 1),
        ),
        None => (0, w - 1, 0, h - 1),
    };

    // Probe order is left, right, up, down.
    let row = mask.row(y);
    if let Some(hit) = (startx..=x).rev().find(|&px| row[px as usize] == MASK_VALID) {
        startx = hit;
    }
    if let Some(hit) = (x..=endx).find(|&px| row[px as usize] == MASK_VALID) {
        endx = hit;
    }
    if let Some(hit) = (starty..=y).rev().find(|&py| mask.is_valid(x, py)) {
        starty = hit;
    }
    if let Some(hit) = (y..=endy).find(|&py| mask.is_valid(x, py)) {
        endy = hit;
    }

    scan_box(mask, x, y, startx..=endx, starty..=endy)
}

fn scan_box(
    mask: &Mask,
    x: u32,
    y: u32,
    xs: RangeInclusive<u32>,
    ys: RangeInclusive<u32>,
) -> Option<(u32, u32)> {
    let mut best = None;
    let mut min_dist = i64::MAX;

    for py in ys {
        let dy = i64::from(py) - i64::from(y);
        let dy2 = dy * dy;
        if dy2 >= min_dist {
            // No texel in this row can be strictly closer. Below the query, none further down can either.
            if py > y {
                break;
            }
            continue;
        }
        let row = mask.row(py);
        for px in xs.clone() {
            if row[px as usize] != MASK_VALID {
                continue;
            }
            let dx = i64::from(px) - i64::from(x);
            let dist = dx * dx + dy2;
            if dist < min_dist {
                min_dist = dist;
                best = Some((px, py));
            }
        }
    }

    best
}

#[cfg(test)]
#[path = "../../tests/unit/search/nearest.rs"]
mod tests;
