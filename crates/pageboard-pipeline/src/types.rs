//! Shared types for the pageboard layout and normalization engines.

use serde::{Deserialize, Serialize};

use crate::color::{Background, Color};
use crate::resample::ResampleFilter;

/// Re-export `DynamicImage` so downstream crates can hand images to the
/// engine without depending on `image` directly.
pub use image::DynamicImage;

/// Width and height of an image or canvas in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Size of a decoded image.
    #[must_use]
    pub fn of(image: &DynamicImage) -> Self {
        Self::new(image.width(), image.height())
    }

    /// Total pixel count. Computed in `u64` so large boards cannot overflow.
    #[must_use]
    pub const fn area(self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns `true` if either axis is zero.
    #[must_use]
    pub const fn is_degenerate(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Top-left pixel position of an item placed on a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offset {
    /// Pixels from the left edge.
    pub x: u32,
    /// Pixels from the top edge.
    pub y: u32,
}

impl Offset {
    /// Create a new offset.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Region of non-background content, in pixel coordinates.
///
/// `right` and `bottom` are exclusive, so a box covering a single pixel
/// at `(3, 4)` is `(3, 4, 4, 5)`. The absence of content is modelled as
/// `Option::<BoundingBox>::None`, never as a zero-area box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    /// First content column.
    pub left: u32,
    /// First content row.
    pub top: u32,
    /// One past the last content column.
    pub right: u32,
    /// One past the last content row.
    pub bottom: u32,
}

impl BoundingBox {
    /// Create a new bounding box.
    #[must_use]
    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width of the box.
    #[must_use]
    pub const fn width(self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    /// Height of the box.
    #[must_use]
    pub const fn height(self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Grow the box by `padding` on every side, clamped to `bounds`.
    #[must_use]
    pub fn expand(self, padding: u32, bounds: Size) -> Self {
        Self {
            left: self.left.saturating_sub(padding),
            top: self.top.saturating_sub(padding),
            right: self.right.saturating_add(padding).min(bounds.width),
            bottom: self.bottom.saturating_add(padding).min(bounds.height),
        }
    }
}

/// How images are arranged on a single canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// One image per row, each horizontally centered.
    #[default]
    Vertical,
    /// Row-major grid with a fixed number of columns.
    Grid,
}

impl std::fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertical => f.write_str("vertical"),
            Self::Grid => f.write_str("grid"),
        }
    }
}

/// Configuration for composing a single canvas.
///
/// Fields are public; [`LayoutSpec::validate`] enforces the invariants
/// and is called by [`compose`](crate::compose) before any pixel work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutSpec {
    /// Vertical stack or grid.
    pub mode: LayoutMode,

    /// Grid column count. Only consulted in [`LayoutMode::Grid`];
    /// must be at least 1 there.
    pub columns: u32,

    /// Pixels between adjacent items and around the canvas edge.
    pub margin: u32,

    /// Pixels between vertically stacked sections. Unused by a
    /// single-canvas composition.
    pub gap: u32,

    /// Canvas fill.
    pub background: Background,

    /// Upper bound on `width * height` of the output canvas.
    /// `0` disables downscaling.
    pub max_total_pixels: u64,

    /// Filter used when images are downscaled to meet the budget.
    pub filter: ResampleFilter,
}

impl LayoutSpec {
    /// Default layout mode.
    pub const DEFAULT_MODE: LayoutMode = LayoutMode::Vertical;
    /// Default grid column count.
    pub const DEFAULT_COLUMNS: u32 = 3;
    /// Default margin in pixels.
    pub const DEFAULT_MARGIN: u32 = 40;
    /// Default section gap in pixels.
    pub const DEFAULT_GAP: u32 = 120;
    /// Default canvas fill.
    pub const DEFAULT_BACKGROUND: Background = Background::Solid(Color::WHITE);
    /// Default pixel budget (80 megapixels).
    pub const DEFAULT_MAX_TOTAL_PIXELS: u64 = 80_000_000;

    /// Check the configuration before any image is touched.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] if the mode is
    /// [`LayoutMode::Grid`] and `columns` is zero.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.mode == LayoutMode::Grid && self.columns == 0 {
            return Err(PipelineError::InvalidConfig(
                "columns must be >= 1".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self {
            mode: Self::DEFAULT_MODE,
            columns: Self::DEFAULT_COLUMNS,
            margin: Self::DEFAULT_MARGIN,
            gap: Self::DEFAULT_GAP,
            background: Self::DEFAULT_BACKGROUND,
            max_total_pixels: Self::DEFAULT_MAX_TOTAL_PIXELS,
            filter: ResampleFilter::default(),
        }
    }
}

/// Configuration shared by every section of a multi-section board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardSpec {
    /// Pixels between items and around each section's edge.
    pub margin: u32,
    /// Pixels between consecutive sections.
    pub gap: u32,
    /// Canvas fill for every section and for the stacked board.
    pub background: Background,
    /// Upper bound on the board's total pixel count; `0` disables it.
    pub max_total_pixels: u64,
    /// Filter used when images are downscaled to meet the budget.
    pub filter: ResampleFilter,
}

impl BoardSpec {
    /// Default margin in pixels.
    pub const DEFAULT_MARGIN: u32 = 48;
    /// Default gap between sections in pixels.
    pub const DEFAULT_GAP: u32 = 120;
    /// Default canvas fill (`#F8FAFC`).
    pub const DEFAULT_BACKGROUND: Background = Background::Solid(Color::new(0xF8, 0xFA, 0xFC));
    /// Default pixel budget (120 megapixels).
    pub const DEFAULT_MAX_TOTAL_PIXELS: u64 = 120_000_000;
}

impl Default for BoardSpec {
    fn default() -> Self {
        Self {
            margin: Self::DEFAULT_MARGIN,
            gap: Self::DEFAULT_GAP,
            background: Self::DEFAULT_BACKGROUND,
            max_total_pixels: Self::DEFAULT_MAX_TOTAL_PIXELS,
            filter: ResampleFilter::default(),
        }
    }
}

/// One grid section of a board: its images in display order and its
/// own column count.
#[derive(Debug, Clone)]
pub struct BoardSection {
    /// Images in row-major display order.
    pub images: Vec<DynamicImage>,
    /// Grid column count for this section (at least 1).
    pub columns: u32,
}

/// Configuration for trimming and re-padding a single image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NormalizeSpec {
    /// Forced background. `None` infers the color from the image edges;
    /// [`Background::Transparent`] forces alpha mode.
    pub background: Option<Background>,

    /// Per-channel difference (or alpha level) still treated as
    /// background.
    pub tolerance: u8,

    /// Pixels kept around the detected content before re-padding.
    pub crop_padding: u32,

    /// Uniform background added on every side of the crop.
    pub outer_margin: u32,
}

impl NormalizeSpec {
    /// Default tolerance.
    pub const DEFAULT_TOLERANCE: u8 = 4;
    /// Default crop padding in pixels.
    pub const DEFAULT_CROP_PADDING: u32 = 6;
    /// Default outer margin in pixels.
    pub const DEFAULT_OUTER_MARGIN: u32 = 48;
}

impl Default for NormalizeSpec {
    fn default() -> Self {
        Self {
            background: None,
            tolerance: Self::DEFAULT_TOLERANCE,
            crop_padding: Self::DEFAULT_CROP_PADDING,
            outer_margin: Self::DEFAULT_OUTER_MARGIN,
        }
    }
}

/// A finished composition.
#[derive(Debug, Clone)]
pub struct Composition {
    /// The painted canvas. RGB for solid backgrounds, RGBA for
    /// transparent ones.
    pub image: DynamicImage,
    /// Uniform scale applied to every input (1.0 when no downscale was
    /// needed).
    pub scale: f64,
    /// Final canvas dimensions.
    pub size: Size,
}

/// Errors that can occur in the layout and normalization engines.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// Failed to encode the output image.
    #[error("failed to encode image: {0}")]
    ImageEncode(String),

    /// No images (or empty image bytes) were supplied.
    #[error("input is empty: at least one image is required")]
    EmptyInput,

    /// An input image has zero width or height.
    #[error("image {index} has a zero dimension")]
    ZeroDimension {
        /// Position of the offending image in the input sequence.
        index: usize,
    },

    /// Configuration is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Sizes of every image, rejecting empty input and degenerate images.
pub(crate) fn checked_sizes(images: &[DynamicImage]) -> Result<Vec<Size>, PipelineError> {
    if images.is_empty() {
        return Err(PipelineError::EmptyInput);
    }
    images
        .iter()
        .enumerate()
        .map(|(index, image)| {
            let size = Size::of(image);
            if size.is_degenerate() {
                Err(PipelineError::ZeroDimension { index })
            } else {
                Ok(size)
            }
        })
        .collect()
}
