//! `pageboard merge`: compose a list of page PNGs onto one canvas.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use pageboard_pipeline::{Background, LayoutSpec, compose};
use tracing::info;

use crate::args::{Filter, Mode, parse_background};
use crate::files::{read_image, resolve_inputs, write_png};
use crate::pages::MINIAPP_PAGES;

#[derive(clap::Args)]
pub struct Args {
    /// Basenames or file names to merge, in order (default: the 01-15
    /// miniapp pages).
    pub images: Vec<String>,

    /// Directory containing the page PNGs.
    #[arg(long, default_value = "docs/demo/rendered")]
    pub input_dir: PathBuf,

    /// Output image path.
    #[arg(long, default_value = "docs/demo/rendered/miniapp-pages-01-15.png")]
    pub output: PathBuf,

    /// Layout mode: one long image or a grid.
    #[arg(long, value_enum, default_value = "vertical")]
    pub mode: Mode,

    /// Grid columns (only for `--mode grid`).
    #[arg(long, default_value_t = LayoutSpec::DEFAULT_COLUMNS)]
    pub columns: u32,

    /// Margin (px) between images and around the canvas.
    #[arg(long, default_value_t = LayoutSpec::DEFAULT_MARGIN)]
    pub margin: u32,

    /// Canvas color, or `transparent`.
    #[arg(long, default_value = "white", value_parser = parse_background)]
    pub background: Background,

    /// Downscale the output to stay under this pixel count. 0 disables.
    #[arg(long, default_value_t = LayoutSpec::DEFAULT_MAX_TOTAL_PIXELS)]
    pub max_total_pixels: u64,

    /// Resampling filter for downscaling.
    #[arg(long, value_enum, default_value = "lanczos3")]
    pub filter: Filter,

    /// Full layout configuration as JSON. Overrides the layout flags.
    #[arg(long)]
    pub config_json: Option<String>,
}

/// Build the layout from `--config-json` or from the individual flags.
fn layout_spec(args: &Args) -> Result<LayoutSpec> {
    if let Some(json) = &args.config_json {
        return serde_json::from_str(json).context("parsing --config-json");
    }
    Ok(LayoutSpec {
        mode: args.mode.into(),
        columns: args.columns,
        margin: args.margin,
        background: args.background,
        max_total_pixels: args.max_total_pixels,
        filter: args.filter.into(),
        ..LayoutSpec::default()
    })
}

pub fn run(args: &Args) -> Result<()> {
    let spec = layout_spec(args)?;
    spec.validate()?;

    let paths = if args.images.is_empty() {
        resolve_inputs(&args.input_dir, MINIAPP_PAGES)
    } else {
        resolve_inputs(&args.input_dir, &args.images)
    };

    let missing: Vec<String> = paths
        .iter()
        .filter(|p| !p.exists())
        .map(|p| p.display().to_string())
        .collect();
    if !missing.is_empty() {
        bail!("missing input images:\n{}", missing.join("\n"));
    }

    let images = paths
        .iter()
        .map(|p| read_image(p))
        .collect::<Result<Vec<_>>>()?;
    info!(count = images.len(), mode = %spec.mode, "merging pages");

    let composition = compose(&images, &spec).context("composing pages")?;
    write_png(&args.output, &composition.image)?;

    println!("Wrote: {} ({})", args.output.display(), composition.size);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;
    use image::{Rgb, RgbImage};
    use pageboard_pipeline::{Color, LayoutMode};

    use super::*;
    use crate::{Cli, Command};

    fn parse(argv: &[&str]) -> Args {
        let argv = ["pageboard", "merge"].iter().chain(argv);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Merge(args) => args,
            _ => unreachable!(),
        }
    }

    fn save(path: &std::path::Path, width: u32, height: u32) {
        RgbImage::from_pixel(width, height, Rgb([10, 20, 30]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn flags_default_to_layout_constants() {
        let spec = layout_spec(&parse(&[])).unwrap();
        assert_eq!(spec, LayoutSpec::default());
    }

    #[test]
    fn config_json_overrides_flags() {
        let args = parse(&[
            "--margin",
            "3",
            "--config-json",
            r##"{"mode":"grid","columns":2,"background":"#000"}"##,
        ]);
        let spec = layout_spec(&args).unwrap();
        assert_eq!(spec.mode, LayoutMode::Grid);
        assert_eq!(spec.columns, 2);
        assert_eq!(spec.margin, LayoutSpec::DEFAULT_MARGIN);
        assert_eq!(spec.background, Background::Solid(Color::BLACK));
    }

    #[test]
    fn merges_named_images_in_order() {
        let dir = tempfile::tempdir().unwrap();
        save(&dir.path().join("a.png"), 80, 50);
        save(&dir.path().join("b.png"), 100, 50);
        let output = dir.path().join("out").join("merged.png");

        let args = parse(&[
            "a",
            "b.png",
            "--input-dir",
            dir.path().to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--margin",
            "5",
        ]);
        run(&args).unwrap();

        let merged = image::open(&output).unwrap();
        assert_eq!((merged.width(), merged.height()), (110, 115));
    }

    #[test]
    fn grid_mode_lays_out_columns() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a", "b", "c", "d"] {
            save(&dir.path().join(format!("{name}.png")), 100, 100);
        }
        let output = dir.path().join("grid.png");

        let args = parse(&[
            "a", "b", "c", "d",
            "--input-dir",
            dir.path().to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--mode",
            "grid",
            "--columns",
            "2",
            "--margin",
            "10",
        ]);
        run(&args).unwrap();

        let merged = image::open(&output).unwrap();
        assert_eq!((merged.width(), merged.height()), (230, 230));
    }

    #[test]
    fn missing_images_are_all_reported() {
        let dir = tempfile::tempdir().unwrap();
        save(&dir.path().join("present.png"), 4, 4);
        let output = dir.path().join("merged.png");

        let args = parse(&[
            "present",
            "gone-1",
            "gone-2",
            "--input-dir",
            dir.path().to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ]);
        let message = run(&args).unwrap_err().to_string();
        assert!(message.contains("gone-1.png"));
        assert!(message.contains("gone-2.png"));
        assert!(!message.contains("present.png"));
        assert!(!output.exists());
    }

    #[test]
    fn zero_grid_columns_fail_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        let args = parse(&[
            "--input-dir",
            dir.path().to_str().unwrap(),
            "--mode",
            "grid",
            "--columns",
            "0",
        ]);
        let err = run(&args).unwrap_err();
        assert!(err.to_string().contains("columns"));
    }
}
