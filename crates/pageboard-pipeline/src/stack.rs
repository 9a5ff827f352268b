//! Vertical stacking: one item per row, each horizontally centered.
//!
//! Two flavors share the same placement rule:
//!
//! - [`vertical_size`] / [`vertical_placements`] lay out images with a
//!   uniform margin on all four edges and between consecutive images.
//! - [`sections_size`] / [`section_placements`] stack already-padded
//!   section canvases edge to edge with a gap between them and no outer
//!   border.

use crate::types::{Offset, PipelineError, Size};

/// Canvas size for images stacked top to bottom with `margin` between
/// them and around the edge.
///
/// Width is the widest image plus a margin on each side; height is the
/// sum of heights plus `count + 1` margins.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `sizes` is empty.
pub fn vertical_size(sizes: &[Size], margin: u32) -> Result<Size, PipelineError> {
    let inner = stacked(sizes, margin)?;
    Ok(Size::new(
        inner.width.saturating_add(margin.saturating_mul(2)),
        inner.height.saturating_add(margin.saturating_mul(2)),
    ))
}

/// Top-left corner of every image in a vertical stack.
#[must_use]
pub fn vertical_placements(sizes: &[Size], margin: u32) -> Vec<Offset> {
    let widest = sizes.iter().map(|s| s.width).max().unwrap_or(0);
    cursor_placements(sizes, margin, margin, |size| {
        margin + (widest - size.width) / 2
    })
}

/// Canvas size for section canvases stacked with `gap` between
/// consecutive sections and no outer border.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `sizes` is empty.
pub fn sections_size(sizes: &[Size], gap: u32) -> Result<Size, PipelineError> {
    stacked(sizes, gap)
}

/// Top-left corner of every section in a section stack.
#[must_use]
pub fn section_placements(sizes: &[Size], gap: u32) -> Vec<Offset> {
    let widest = sizes.iter().map(|s| s.width).max().unwrap_or(0);
    cursor_placements(sizes, 0, gap, |size| (widest - size.width) / 2)
}

/// Widest item, and total height with `spacing` between consecutive items.
fn stacked(sizes: &[Size], spacing: u32) -> Result<Size, PipelineError> {
    let widest = sizes
        .iter()
        .map(|s| s.width)
        .max()
        .ok_or(PipelineError::EmptyInput)?;
    let gaps = u32::try_from(sizes.len() - 1).unwrap_or(u32::MAX);
    let height = sizes
        .iter()
        .fold(spacing.saturating_mul(gaps), |acc, s| {
            acc.saturating_add(s.height)
        });
    Ok(Size::new(widest, height))
}

/// Walk a y-cursor down the canvas, starting at `start` and advancing
/// by each item's height plus `spacing`.
fn cursor_placements(
    sizes: &[Size],
    start: u32,
    spacing: u32,
    x_for: impl Fn(Size) -> u32,
) -> Vec<Offset> {
    sizes
        .iter()
        .scan(start, |cursor, &size| {
            let y = *cursor;
            *cursor += size.height + spacing;
            Some(Offset::new(x_for(size), y))
        })
        .collect()
}
