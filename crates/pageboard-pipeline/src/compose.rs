//! Composer: arrange an ordered batch of images on one canvas, or a
//! board of several grid sections stacked with a gap.
//!
//! Steps, for both entry points:
//!
//! 1. Validate configuration and inputs before any pixel work.
//! 2. Measure the unscaled layout and pick a budget scale
//!    ([`fit_scale`]).
//! 3. Convert and downscale every image (no-op at scale 1.0).
//! 4. Re-run the sizer on the actual resized dimensions and paint.

use image::{DynamicImage, Rgb, Rgba};
use tracing::{debug, info};

use crate::budget::fit_scale;
use crate::color::Background;
use crate::grid::{GridLayout, grid_size};
use crate::paint::{Buffer, CanvasPixel, paint};
use crate::resample::{ResampleFilter, resample, scale_length, scale_size};
use crate::stack::{section_placements, sections_size, vertical_placements, vertical_size};
use crate::types::{
    BoardSection, BoardSpec, Composition, LayoutMode, LayoutSpec, PipelineError, Size,
    checked_sizes,
};

/// Compose `images`, in order, onto a single canvas.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidConfig`] for an invalid `spec`,
/// [`PipelineError::EmptyInput`] for an empty batch, and
/// [`PipelineError::ZeroDimension`] for a degenerate image.
pub fn compose(images: &[DynamicImage], spec: &LayoutSpec) -> Result<Composition, PipelineError> {
    spec.validate()?;
    let sizes = checked_sizes(images)?;

    let scale = fit_scale(spec.max_total_pixels, |s| {
        let scaled: Vec<Size> = sizes.iter().map(|&size| scale_size(size, s)).collect();
        measure_single(&scaled, spec.mode, spec.columns, scale_length(spec.margin, s))
    })?;
    let margin = scale_length(spec.margin, scale);

    let image = match spec.background {
        Background::Solid(_) => render_single::<Rgb<u8>>(images, spec, scale, margin)?,
        Background::Transparent => render_single::<Rgba<u8>>(images, spec, scale, margin)?,
    };

    let size = Size::of(&image);
    info!(
        mode = %spec.mode,
        count = images.len(),
        scale,
        filter = %spec.filter,
        %size,
        "composed canvas"
    );
    Ok(Composition { image, scale, size })
}

/// Compose a board of grid sections stacked top to bottom.
///
/// Sections without images are dropped. With one remaining section its
/// grid canvas is the result; otherwise the sections are stacked,
/// horizontally centered, with `spec.gap` between consecutive sections.
/// The pixel budget applies to the whole board.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if every section is empty,
/// [`PipelineError::InvalidConfig`] if a non-empty section has zero
/// columns, and [`PipelineError::ZeroDimension`] for a degenerate image.
pub fn compose_board(
    sections: &[BoardSection],
    spec: &BoardSpec,
) -> Result<Composition, PipelineError> {
    let sections: Vec<&BoardSection> = sections.iter().filter(|s| !s.images.is_empty()).collect();
    if sections.is_empty() {
        return Err(PipelineError::EmptyInput);
    }
    if sections.iter().any(|s| s.columns == 0) {
        return Err(PipelineError::InvalidConfig(
            "columns must be >= 1".to_owned(),
        ));
    }
    let section_sizes = sections
        .iter()
        .map(|s| checked_sizes(&s.images))
        .collect::<Result<Vec<_>, _>>()?;

    let scale = fit_scale(spec.max_total_pixels, |s| {
        let margin = scale_length(spec.margin, s);
        let boards = sections
            .iter()
            .zip(&section_sizes)
            .map(|(section, sizes)| {
                let scaled: Vec<Size> = sizes.iter().map(|&size| scale_size(size, s)).collect();
                grid_size(&scaled, section.columns, margin)
            })
            .collect::<Result<Vec<_>, _>>()?;
        sections_size(&boards, scale_length(spec.gap, s))
    })?;
    let margin = scale_length(spec.margin, scale);
    let gap = scale_length(spec.gap, scale);

    let image = match spec.background {
        Background::Solid(_) => render_board::<Rgb<u8>>(&sections, spec, scale, margin, gap)?,
        Background::Transparent => render_board::<Rgba<u8>>(&sections, spec, scale, margin, gap)?,
    };

    let size = Size::of(&image);
    info!(
        sections = sections.len(),
        scale,
        filter = %spec.filter,
        %size,
        "composed board"
    );
    Ok(Composition { image, scale, size })
}

/// Canvas size of a single-canvas layout.
fn measure_single(
    sizes: &[Size],
    mode: LayoutMode,
    columns: u32,
    margin: u32,
) -> Result<Size, PipelineError> {
    match mode {
        LayoutMode::Vertical => vertical_size(sizes, margin),
        LayoutMode::Grid => grid_size(sizes, columns, margin),
    }
}

/// Convert and downscale every image into pixel format `P`.
fn tiles<P: CanvasPixel>(
    images: &[DynamicImage],
    scale: f64,
    filter: ResampleFilter,
) -> Vec<Buffer<P>> {
    images
        .iter()
        .map(|image| resample(&P::convert(image), scale, filter))
        .collect()
}

fn tile_sizes<P: CanvasPixel>(tiles: &[Buffer<P>]) -> Vec<Size> {
    tiles
        .iter()
        .map(|t| Size::new(t.width(), t.height()))
        .collect()
}

fn render_single<P: CanvasPixel>(
    images: &[DynamicImage],
    spec: &LayoutSpec,
    scale: f64,
    margin: u32,
) -> Result<DynamicImage, PipelineError> {
    let tiles = tiles::<P>(images, scale, spec.filter);
    let sizes = tile_sizes(&tiles);
    let (size, placements) = match spec.mode {
        LayoutMode::Vertical => (
            vertical_size(&sizes, margin)?,
            vertical_placements(&sizes, margin),
        ),
        LayoutMode::Grid => {
            let layout = GridLayout::new(&sizes, spec.columns)?;
            (
                layout.canvas_size(margin),
                layout.placements(&sizes, margin),
            )
        }
    };
    debug!(%size, margin, tiles = tiles.len(), "painting canvas");
    Ok(P::into_dynamic(paint(
        size,
        spec.background,
        &tiles,
        &placements,
    )))
}

fn render_grid<P: CanvasPixel>(
    section: &BoardSection,
    spec: &BoardSpec,
    scale: f64,
    margin: u32,
) -> Result<Buffer<P>, PipelineError> {
    let tiles = tiles::<P>(&section.images, scale, spec.filter);
    let sizes = tile_sizes(&tiles);
    let layout = GridLayout::new(&sizes, section.columns)?;
    let size = layout.canvas_size(margin);
    debug!(%size, columns = section.columns, tiles = tiles.len(), "painting section");
    Ok(paint(
        size,
        spec.background,
        &tiles,
        &layout.placements(&sizes, margin),
    ))
}

fn render_board<P: CanvasPixel>(
    sections: &[&BoardSection],
    spec: &BoardSpec,
    scale: f64,
    margin: u32,
    gap: u32,
) -> Result<DynamicImage, PipelineError> {
    let mut boards = sections
        .iter()
        .map(|section| render_grid::<P>(section, spec, scale, margin))
        .collect::<Result<Vec<_>, _>>()?;

    if boards.len() == 1
        && let Some(only) = boards.pop()
    {
        return Ok(P::into_dynamic(only));
    }

    let sizes = tile_sizes(&boards);
    let size = sections_size(&sizes, gap)?;
    let stacked = paint(
        size,
        spec.background,
        &boards,
        &section_placements(&sizes, gap),
    );
    Ok(P::into_dynamic(stacked))
}
