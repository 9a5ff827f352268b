//! Argument types shared by the subcommands.

use clap::ValueEnum;
use pageboard_pipeline::{Background, LayoutMode, ResampleFilter};

/// Layout mode selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// One long image, items stacked top to bottom.
    Vertical,
    /// Rows and columns.
    Grid,
}

impl From<Mode> for LayoutMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Vertical => Self::Vertical,
            Mode::Grid => Self::Grid,
        }
    }
}

/// Resampling filter used when the output is downscaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Filter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<Filter> for ResampleFilter {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Nearest => Self::Nearest,
            Filter::Triangle => Self::Triangle,
            Filter::CatmullRom => Self::CatmullRom,
            Filter::Gaussian => Self::Gaussian,
            Filter::Lanczos3 => Self::Lanczos3,
        }
    }
}

/// Parse `--background`: a color (`white`, `#F8FAFC`, `rgb(1, 2, 3)`) or
/// `transparent`.
pub fn parse_background(s: &str) -> Result<Background, String> {
    Background::parse(s).map_err(|e| e.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pageboard_pipeline::Color;

    use super::*;

    #[test]
    fn background_accepts_colors_and_transparent() {
        assert_eq!(
            parse_background("white").unwrap(),
            Background::Solid(Color::WHITE)
        );
        assert_eq!(
            parse_background("#F8FAFC").unwrap(),
            Background::Solid(Color::new(0xF8, 0xFA, 0xFC))
        );
        assert_eq!(
            parse_background("Transparent").unwrap(),
            Background::Transparent
        );
        assert!(parse_background("not-a-color").is_err());
    }

    #[test]
    fn filter_names_follow_clap_kebab_case() {
        let filter = Filter::from_str("catmull-rom", false).unwrap();
        assert_eq!(ResampleFilter::from(filter), ResampleFilter::CatmullRom);
        assert_eq!(
            ResampleFilter::from(Filter::from_str("lanczos3", false).unwrap()),
            ResampleFilter::Lanczos3
        );
    }
}
