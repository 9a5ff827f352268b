//! Uniform downscaling of images and lengths by a budget scale factor.
//!
//! Every dimension is floored and clamped to at least one pixel, and a
//! scale of 1.0 or more is always a no-op: the engine never upscales.

use std::fmt;

use image::{ImageBuffer, Pixel};
use serde::{Deserialize, Serialize};

use crate::types::Size;

/// Resampling filter used when downscaling.
///
/// Ordered from fastest/lowest-quality to slowest/highest-quality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResampleFilter {
    /// Nearest-neighbor: fastest, blocky artifacts.
    Nearest,
    /// Bilinear interpolation: fast, decent quality.
    Triangle,
    /// Bicubic (Catmull-Rom): moderate speed, good quality.
    CatmullRom,
    /// Gaussian: moderate speed, smooth output.
    Gaussian,
    /// Lanczos with 3 lobes: slowest, sharpest. Best for UI text.
    #[default]
    Lanczos3,
}

impl ResampleFilter {
    /// Convert to the `image` crate's `FilterType`.
    const fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            Self::Nearest => image::imageops::FilterType::Nearest,
            Self::Triangle => image::imageops::FilterType::Triangle,
            Self::CatmullRom => image::imageops::FilterType::CatmullRom,
            Self::Gaussian => image::imageops::FilterType::Gaussian,
            Self::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nearest => f.write_str("Nearest"),
            Self::Triangle => f.write_str("Triangle"),
            Self::CatmullRom => f.write_str("CatmullRom"),
            Self::Gaussian => f.write_str("Gaussian"),
            Self::Lanczos3 => f.write_str("Lanczos3"),
        }
    }
}

/// Scale a pixel length, flooring and clamping to at least 1.
///
/// Returns `length` unchanged when `scale >= 1.0`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn scale_length(length: u32, scale: f64) -> u32 {
    if scale >= 1.0 {
        return length;
    }
    // Float-to-int `as` saturates, so a NaN or negative product lands on 0
    // and is then clamped.
    let scaled = (f64::from(length) * scale).floor() as u32;
    scaled.max(1)
}

/// Scale both axes of a size with [`scale_length`].
#[must_use]
pub fn scale_size(size: Size, scale: f64) -> Size {
    Size::new(
        scale_length(size.width, scale),
        scale_length(size.height, scale),
    )
}

/// Downscale an image buffer by `scale` with the given filter.
///
/// Returns a copy of the input when `scale >= 1.0` or when flooring
/// leaves both axes unchanged.
#[must_use]
pub fn resample<P>(
    image: &ImageBuffer<P, Vec<P::Subpixel>>,
    scale: f64,
    filter: ResampleFilter,
) -> ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    let source = Size::new(image.width(), image.height());
    let target = scale_size(source, scale);
    if target == source {
        return image.clone();
    }
    image::imageops::resize(image, target.width, target.height, filter.to_image_filter())
}
