//! pageboard-pipeline: Pure layout and normalization engine (sans-IO).
//!
//! Two independent engines share the geometry in this crate:
//!
//! - **Composer** ([`compose`], [`compose_board`]): lays out an ordered
//!   batch of images as a vertical stack or a grid, downscales
//!   everything uniformly to respect a total pixel budget, and paints
//!   the result onto one canvas (or several grid sections stacked with
//!   a gap).
//! - **Normalizer** ([`normalize`]): finds the bounding box of
//!   non-background content, crops to it, and re-pads the crop with a
//!   uniform margin.
//!
//! This crate has **no I/O dependencies** -- it operates on decoded
//! in-memory images and byte slices. Path discovery, ordering of files
//! on disk, and persistence live in the `pageboard` binary.

pub mod budget;
pub mod codec;
pub mod color;
pub mod compose;
pub mod grid;
pub mod normalize;
pub mod order;
pub mod paint;
pub mod resample;
pub mod stack;
pub mod types;

pub use budget::fit_scale;
pub use codec::{decode, encode_png};
pub use color::{Background, Color};
pub use compose::{compose, compose_board};
pub use grid::{GridLayout, grid_size};
pub use normalize::{DetectionMode, NormalizeOutcome, Normalized, normalize};
pub use order::{PageOrder, UNRANKED};
pub use resample::ResampleFilter;
pub use stack::{vertical_placements, vertical_size};
pub use types::{
    BoardSection, BoardSpec, BoundingBox, Composition, DynamicImage, LayoutMode, LayoutSpec,
    NormalizeSpec, Offset, PipelineError, Size,
};
