//! Grid layout sizing.
//!
//! Items fill the grid row-major: item `i` lands in row `i / columns`,
//! column `i % columns`. A column is as wide as its widest item and a
//! row as tall as its tallest, so every item fits its cell. The last
//! row may be partially filled; its trailing cells stay empty.
//!
//! Margins sit between every pair of adjacent columns and rows and
//! around the outer edge: `columns + 1` horizontal and `rows + 1`
//! vertical margin units.

use crate::types::{Offset, PipelineError, Size};

/// Column widths and row heights of a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    column_widths: Vec<u32>,
    row_heights: Vec<u32>,
}

impl GridLayout {
    /// Assign `sizes` to cells and measure every column and row.
    ///
    /// Columns that receive no item (more columns than items) keep a
    /// width of zero but still count toward the margins.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] if `columns` is zero and
    /// [`PipelineError::EmptyInput`] if `sizes` is empty.
    pub fn new(sizes: &[Size], columns: u32) -> Result<Self, PipelineError> {
        if columns == 0 {
            return Err(PipelineError::InvalidConfig(
                "columns must be >= 1".to_owned(),
            ));
        }
        if sizes.is_empty() {
            return Err(PipelineError::EmptyInput);
        }

        let columns = columns as usize;
        let rows = sizes.len().div_ceil(columns);
        let mut column_widths = vec![0; columns];
        let mut row_heights = vec![0; rows];
        for (idx, size) in sizes.iter().enumerate() {
            let (row, col) = (idx / columns, idx % columns);
            column_widths[col] = column_widths[col].max(size.width);
            row_heights[row] = row_heights[row].max(size.height);
        }

        Ok(Self {
            column_widths,
            row_heights,
        })
    }

    /// Width of every column, left to right.
    #[must_use]
    pub fn column_widths(&self) -> &[u32] {
        &self.column_widths
    }

    /// Height of every row, top to bottom.
    #[must_use]
    pub fn row_heights(&self) -> &[u32] {
        &self.row_heights
    }

    /// Number of columns.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.column_widths.len()
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.row_heights.len()
    }

    /// Full canvas size including margins.
    #[must_use]
    pub fn canvas_size(&self, margin: u32) -> Size {
        Size::new(
            span(&self.column_widths, margin),
            span(&self.row_heights, margin),
        )
    }

    /// Size of the cell that holds item `idx`.
    #[must_use]
    pub fn cell_size(&self, idx: usize) -> Size {
        let columns = self.columns();
        Size::new(
            self.column_widths[idx % columns],
            self.row_heights[idx / columns],
        )
    }

    /// Top-left corner of every item, each centered in its cell.
    ///
    /// Odd leftover pixels bias the item toward the cell's top-left.
    /// `sizes` must be the same sequence the layout was built from.
    #[must_use]
    pub fn placements(&self, sizes: &[Size], margin: u32) -> Vec<Offset> {
        let columns = self.columns();
        let column_offsets = track_offsets(&self.column_widths, margin);
        let row_offsets = track_offsets(&self.row_heights, margin);

        sizes
            .iter()
            .enumerate()
            .map(|(idx, size)| {
                let (row, col) = (idx / columns, idx % columns);
                let cell = self.cell_size(idx);
                Offset::new(
                    column_offsets[col] + (cell.width - size.width) / 2,
                    row_offsets[row] + (cell.height - size.height) / 2,
                )
            })
            .collect()
    }
}

/// Compute the grid canvas size for `sizes` without keeping the layout.
///
/// # Errors
///
/// See [`GridLayout::new`].
pub fn grid_size(sizes: &[Size], columns: u32, margin: u32) -> Result<Size, PipelineError> {
    Ok(GridLayout::new(sizes, columns)?.canvas_size(margin))
}

/// Sum of track lengths plus `len + 1` margins.
fn span(tracks: &[u32], margin: u32) -> u32 {
    let gaps = u32::try_from(tracks.len() + 1).unwrap_or(u32::MAX);
    tracks
        .iter()
        .fold(margin.saturating_mul(gaps), |acc, &t| acc.saturating_add(t))
}

/// Starting coordinate of every track: the first sits one margin in,
/// each following one starts a margin after the previous ends.
fn track_offsets(tracks: &[u32], margin: u32) -> Vec<u32> {
    tracks
        .iter()
        .scan(margin, |cursor, &len| {
            let start = *cursor;
            *cursor += len + margin;
            Some(start)
        })
        .collect()
}
