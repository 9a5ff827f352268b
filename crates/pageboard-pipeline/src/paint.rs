//! Canvas painting.
//!
//! Placement offsets are computed up front by the sizers
//! ([`grid`](crate::grid), [`stack`](crate::stack)); painting only fills
//! a fresh canvas and copies each tile to its offset. Tiles are copied
//! verbatim (including alpha), never blended, and inputs are not
//! mutated.

use image::{DynamicImage, ImageBuffer, Rgb, Rgba};

use crate::color::Background;
use crate::types::{Offset, Size};

/// An owned 8-bit image buffer with pixel type `P`.
pub type Buffer<P> = ImageBuffer<P, Vec<u8>>;

/// Pixel formats a canvas can be painted in.
///
/// Solid backgrounds paint on [`Rgb<u8>`]; transparent backgrounds on
/// [`Rgba<u8>`].
pub trait CanvasPixel: image::Pixel<Subpixel = u8> + 'static {
    /// Convert any decoded image into this pixel format.
    fn convert(image: &DynamicImage) -> Buffer<Self>;

    /// The fill pixel for `background`.
    fn fill(background: Background) -> Self;

    /// Wrap a finished canvas.
    fn into_dynamic(canvas: Buffer<Self>) -> DynamicImage;
}

impl CanvasPixel for Rgb<u8> {
    fn convert(image: &DynamicImage) -> Buffer<Self> {
        image.to_rgb8()
    }

    fn fill(background: Background) -> Self {
        // An RGB canvas has no transparency; fall back to black.
        Self(background.color().map_or([0, 0, 0], |c| c.channels()))
    }

    fn into_dynamic(canvas: Buffer<Self>) -> DynamicImage {
        DynamicImage::ImageRgb8(canvas)
    }
}

impl CanvasPixel for Rgba<u8> {
    fn convert(image: &DynamicImage) -> Buffer<Self> {
        image.to_rgba8()
    }

    fn fill(background: Background) -> Self {
        match background {
            Background::Transparent => Self([0, 0, 0, 0]),
            Background::Solid(c) => Self([c.r, c.g, c.b, 255]),
        }
    }

    fn into_dynamic(canvas: Buffer<Self>) -> DynamicImage {
        DynamicImage::ImageRgba8(canvas)
    }
}

/// Allocate a `size` canvas filled with `background` and copy every tile
/// to its matching placement.
///
/// Tiles and placements are paired by index. A tile that would extend
/// past the canvas is clipped by the copy; the sizers guarantee this
/// never happens for their own layouts.
#[must_use]
pub fn paint<P: CanvasPixel>(
    size: Size,
    background: Background,
    tiles: &[Buffer<P>],
    placements: &[Offset],
) -> Buffer<P> {
    debug_assert_eq!(tiles.len(), placements.len(), "one placement per tile");
    let mut canvas = ImageBuffer::from_pixel(size.width, size.height, P::fill(background));
    for (tile, at) in tiles.iter().zip(placements) {
        image::imageops::replace(&mut canvas, tile, i64::from(at.x), i64::from(at.y));
    }
    canvas
}
