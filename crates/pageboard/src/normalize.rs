//! `pageboard normalize`: trim empty margins from rendered PNGs and add
//! symmetric padding so the content sits centered.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use pageboard_pipeline::{Background, NormalizeOutcome, NormalizeSpec, normalize};
use tracing::{info, warn};

use crate::args::parse_background;
use crate::files::{expand_paths, read_image, write_png};

#[derive(clap::Args)]
pub struct Args {
    /// PNG files or directories to process.
    #[arg(default_value = "docs/architecture/rendered")]
    pub paths: Vec<PathBuf>,

    /// Overwrite the input PNGs.
    #[arg(long)]
    pub in_place: bool,

    /// Output directory (ignored with `--in-place`). Defaults to
    /// `normalized/` next to the first input.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Force the background color, or `transparent` for alpha trimming.
    /// Detected from the image edges when omitted.
    #[arg(long, value_parser = parse_background)]
    pub background: Option<Background>,

    /// Difference (0-255) still treated as background.
    #[arg(long, default_value_t = NormalizeSpec::DEFAULT_TOLERANCE)]
    pub tolerance: u8,

    /// Extra pixels kept around the detected content.
    #[arg(long, default_value_t = NormalizeSpec::DEFAULT_CROP_PADDING)]
    pub crop_padding: u32,

    /// Symmetric padding (px) around the cropped content.
    #[arg(long, default_value_t = NormalizeSpec::DEFAULT_OUTER_MARGIN)]
    pub outer_margin: u32,

    /// Normalization settings as JSON. Overrides the individual flags.
    #[arg(long)]
    pub config_json: Option<String>,
}

fn normalize_spec(args: &Args) -> Result<NormalizeSpec> {
    if let Some(json) = &args.config_json {
        return serde_json::from_str(json).context("parsing --config-json");
    }
    Ok(NormalizeSpec {
        background: args.background,
        tolerance: args.tolerance,
        crop_padding: args.crop_padding,
        outer_margin: args.outer_margin,
    })
}

/// Where the output for `input` goes.
fn output_path(input: &Path, in_place: bool, out_dir: &Path) -> PathBuf {
    if in_place {
        return input.to_path_buf();
    }
    input
        .file_name()
        .map_or_else(|| out_dir.to_path_buf(), |name| out_dir.join(name))
}

pub fn run(args: &Args) -> Result<()> {
    let spec = normalize_spec(args)?;
    let paths = expand_paths(&args.paths)?;
    let Some(first) = paths.first() else {
        bail!("no PNG files found");
    };

    let out_dir = args.out_dir.clone().unwrap_or_else(|| {
        first
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join("normalized")
    });

    let mut processed = 0_usize;
    let mut skipped = 0_usize;
    for path in &paths {
        let image = read_image(path)?;
        let outcome =
            normalize(&image, &spec).with_context(|| format!("normalizing {}", path.display()))?;
        match outcome {
            NormalizeOutcome::Normalized(result) => {
                let target = output_path(path, args.in_place, &out_dir);
                write_png(&target, &result.image)?;
                info!(
                    input = %path.display(),
                    output = %target.display(),
                    crop = ?result.crop,
                    "normalized"
                );
                processed += 1;
            }
            NormalizeOutcome::NoContent => {
                warn!(input = %path.display(), "no content found, skipping");
                skipped += 1;
            }
        }
    }

    println!("Processed: {processed}, skipped: {skipped}");
    Ok(())
}
