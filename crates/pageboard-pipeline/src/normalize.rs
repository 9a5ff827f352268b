//! Background normalizer: trim uniform margins and re-pad symmetrically.
//!
//! Each image is handled in exactly one of two modes:
//!
//! - **Alpha**: the image has a transparency channel, or the
//!   configuration forces [`Background::Transparent`]. Content is every pixel whose alpha
//!   exceeds the tolerance; the new margin is fully transparent.
//! - **Color difference**: the image is opaque. The background color is
//!   taken from the configuration or inferred from eight edge samples
//!   ([`sample_background`]). Content is every pixel whose largest
//!   per-channel difference from that color exceeds the tolerance; the
//!   new margin is painted in that color.
//!
//! In both modes the content box is grown by `crop_padding` (clamped to
//! the image), cropped, and pasted onto a fresh canvas with
//! `outer_margin` pixels on every side. An image with no content is
//! reported as [`NormalizeOutcome::NoContent`], not as an error.

use image::{DynamicImage, ImageBuffer, Pixel, Rgb, RgbImage, Rgba, RgbaImage};
use tracing::debug;

use crate::color::{Background, Color};
use crate::paint::{Buffer, CanvasPixel, paint};
use crate::types::{BoundingBox, NormalizeSpec, Offset, PipelineError, Size};

/// How content is told apart from background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionMode {
    /// Content is any pixel with alpha above the tolerance.
    Alpha,
    /// Content is any pixel that differs from this color by more than
    /// the tolerance on some channel.
    ColorDiff(Color),
}

/// A successfully normalized image.
#[derive(Debug, Clone)]
pub struct Normalized {
    /// The trimmed and re-padded image.
    pub image: DynamicImage,
    /// Detected content box in source coordinates.
    pub content: BoundingBox,
    /// Region actually cropped from the source (content plus padding).
    pub crop: BoundingBox,
    /// Fill used for the new margin.
    pub background: Background,
}

/// Result of normalizing one image.
#[derive(Debug, Clone)]
pub enum NormalizeOutcome {
    /// Content was found and the image was rebuilt around it.
    Normalized(Normalized),
    /// The image is entirely background; nothing to write.
    NoContent,
}

impl NormalizeOutcome {
    /// Returns the normalized image, if any.
    #[must_use]
    pub const fn normalized(&self) -> Option<&Normalized> {
        match self {
            Self::Normalized(n) => Some(n),
            Self::NoContent => None,
        }
    }

    /// Returns `true` if the image was skipped for lack of content.
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::NoContent)
    }
}

/// Pick the detection mode for `image` under `spec`.
///
/// Alpha mode wins whenever the image carries alpha or transparency is
/// forced; an explicit color only matters for opaque images.
#[must_use]
pub fn detection_mode(image: &DynamicImage, spec: &NormalizeSpec) -> DetectionMode {
    match spec.background {
        Some(Background::Transparent) => DetectionMode::Alpha,
        _ if image.color().has_alpha() => DetectionMode::Alpha,
        Some(Background::Solid(color)) => DetectionMode::ColorDiff(color),
        None => DetectionMode::ColorDiff(sample_background(&image.to_rgb8())),
    }
}

/// Infer a background color by majority vote over eight samples: the
/// four corners and the midpoints of the four edges.
///
/// Ties go to the color encountered first, in the order top-left,
/// top-right, bottom-left, bottom-right, top-middle, bottom-middle,
/// left-middle, right-middle. The image must not be empty.
#[must_use]
pub fn sample_background(rgb: &RgbImage) -> Color {
    let (w, h) = rgb.dimensions();
    let (right, bottom) = (w.saturating_sub(1), h.saturating_sub(1));
    let points = [
        (0, 0),
        (right, 0),
        (0, bottom),
        (right, bottom),
        (w / 2, 0),
        (w / 2, bottom),
        (0, h / 2),
        (right, h / 2),
    ];

    let mut tally: Vec<([u8; 3], usize)> = Vec::with_capacity(points.len());
    for (x, y) in points {
        let sample = rgb.get_pixel(x, y).0;
        match tally.iter_mut().find(|(color, _)| *color == sample) {
            Some((_, count)) => *count += 1,
            None => tally.push((sample, 1)),
        }
    }

    // Strict `>` keeps the first of equally frequent colors.
    let ([r, g, b], _) = tally
        .into_iter()
        .fold(([0, 0, 0], 0), |best, candidate| {
            if candidate.1 > best.1 { candidate } else { best }
        });
    Color::new(r, g, b)
}

/// Bounding box of pixels whose alpha exceeds `tolerance`.
#[must_use]
pub fn alpha_bbox(rgba: &RgbaImage, tolerance: u8) -> Option<BoundingBox> {
    bbox_where(rgba, |p: &Rgba<u8>| p.0[3] > tolerance)
}

/// Bounding box of pixels whose largest channel difference from
/// `background` exceeds `tolerance`.
#[must_use]
pub fn color_bbox(rgb: &RgbImage, background: Color, tolerance: u8) -> Option<BoundingBox> {
    let bg = background.channels();
    bbox_where(rgb, |p: &Rgb<u8>| {
        p.0.iter()
            .zip(bg)
            .map(|(&c, b)| c.abs_diff(b))
            .max()
            .is_some_and(|diff| diff > tolerance)
    })
}

/// Trim `image` to its content and re-pad it per `spec`.
///
/// Alpha-mode output is RGBA; color-difference output is RGB.
///
/// # Errors
///
/// Returns [`PipelineError::ZeroDimension`] if the image is empty.
pub fn normalize(
    image: &DynamicImage,
    spec: &NormalizeSpec,
) -> Result<NormalizeOutcome, PipelineError> {
    let source = Size::of(image);
    if source.is_degenerate() {
        return Err(PipelineError::ZeroDimension { index: 0 });
    }

    let mode = detection_mode(image, spec);
    let outcome = match mode {
        DetectionMode::Alpha => {
            let rgba = image.to_rgba8();
            alpha_bbox(&rgba, spec.tolerance).map(|content| {
                rebuild(&rgba, content, spec, Background::Transparent)
            })
        }
        DetectionMode::ColorDiff(color) => {
            let rgb = image.to_rgb8();
            color_bbox(&rgb, color, spec.tolerance)
                .map(|content| rebuild(&rgb, content, spec, Background::Solid(color)))
        }
    };

    match outcome {
        Some(normalized) => {
            debug!(
                ?mode,
                %source,
                content = ?normalized.content,
                output = %Size::of(&normalized.image),
                "normalized image"
            );
            Ok(NormalizeOutcome::Normalized(normalized))
        }
        None => {
            debug!(?mode, %source, "no content found");
            Ok(NormalizeOutcome::NoContent)
        }
    }
}

/// Crop `content` (plus padding) out of `source` and center it inside a
/// fresh `outer_margin` border.
fn rebuild<P: CanvasPixel>(
    source: &Buffer<P>,
    content: BoundingBox,
    spec: &NormalizeSpec,
    background: Background,
) -> Normalized {
    let bounds = Size::new(source.width(), source.height());
    let crop = content.expand(spec.crop_padding, bounds);
    let cropped =
        image::imageops::crop_imm(source, crop.left, crop.top, crop.width(), crop.height())
            .to_image();

    let margin = spec.outer_margin;
    let size = Size::new(
        crop.width().saturating_add(margin.saturating_mul(2)),
        crop.height().saturating_add(margin.saturating_mul(2)),
    );
    let canvas = paint(size, background, &[cropped], &[Offset::new(margin, margin)]);

    Normalized {
        image: P::into_dynamic(canvas),
        content,
        crop,
        background,
    }
}

/// Tight bounding box of every pixel matching `is_content`.
fn bbox_where<P: Pixel>(
    image: &ImageBuffer<P, Vec<P::Subpixel>>,
    is_content: impl Fn(&P) -> bool,
) -> Option<BoundingBox> {
    image
        .enumerate_pixels()
        .filter(|(_, _, p)| is_content(p))
        .fold(None, |acc: Option<BoundingBox>, (x, y, _)| {
            Some(acc.map_or_else(
                || BoundingBox::new(x, y, x + 1, y + 1),
                |b| BoundingBox::new(b.left.min(x), b.top.min(y), b.right.max(x + 1), b.bottom.max(y + 1)),
            ))
        })
}
