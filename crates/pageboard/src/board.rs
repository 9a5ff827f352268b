//! `pageboard board`: client and admin screenshots as one design board.
//!
//! Screenshots are discovered under `<input-dir>/client/*.png` and
//! `<input-dir>/admin/*.png`, ranked by the canonical page lists, laid
//! out as one grid per section, and stacked client above admin.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use pageboard_pipeline::{Background, BoardSection, BoardSpec, PageOrder, compose_board};
use tracing::info;

use crate::args::{Filter, parse_background};
use crate::files::{list_pngs, read_image, stem, write_png};
use crate::pages::{admin_order, client_order};

#[derive(clap::Args)]
pub struct Args {
    /// Directory holding the `client/` and `admin/` screenshot folders.
    #[arg(long, default_value = "docs/demo/rendered/ui")]
    pub input_dir: PathBuf,

    /// Output image path.
    #[arg(long, default_value = "docs/demo/rendered/ui/ui-all.png")]
    pub output: PathBuf,

    /// Canvas color, or `transparent`.
    #[arg(long, default_value = "#F8FAFC", value_parser = parse_background)]
    pub background: Background,

    /// Margin (px) between images and around each section.
    #[arg(long, default_value_t = BoardSpec::DEFAULT_MARGIN)]
    pub margin: u32,

    /// Gap (px) between the client and admin sections.
    #[arg(long, default_value_t = BoardSpec::DEFAULT_GAP)]
    pub section_gap: u32,

    /// Grid columns for client screenshots.
    #[arg(long, default_value_t = 4)]
    pub client_columns: u32,

    /// Grid columns for admin screenshots.
    #[arg(long, default_value_t = 2)]
    pub admin_columns: u32,

    /// Downscale the output to stay under this pixel count. 0 disables.
    #[arg(long, default_value_t = BoardSpec::DEFAULT_MAX_TOTAL_PIXELS)]
    pub max_total_pixels: u64,

    /// Resampling filter for downscaling.
    #[arg(long, value_enum, default_value = "lanczos3")]
    pub filter: Filter,

    /// Board configuration as JSON. Overrides every flag except the
    /// column counts.
    #[arg(long)]
    pub config_json: Option<String>,
}

fn board_spec(args: &Args) -> Result<BoardSpec> {
    if let Some(json) = &args.config_json {
        return serde_json::from_str(json).context("parsing --config-json");
    }
    Ok(BoardSpec {
        margin: args.margin,
        gap: args.section_gap,
        background: args.background,
        max_total_pixels: args.max_total_pixels,
        filter: args.filter.into(),
    })
}

/// PNGs of one section folder in canonical order.
fn section_paths(dir: &Path, order: &PageOrder) -> Result<Vec<PathBuf>> {
    let mut paths = list_pngs(dir)?;
    order.sort_by_stem(&mut paths, |p| stem(p));
    Ok(paths)
}

fn load_section(paths: &[PathBuf], columns: u32) -> Result<BoardSection> {
    let images = paths
        .iter()
        .map(|p| read_image(p))
        .collect::<Result<Vec<_>>>()?;
    Ok(BoardSection { images, columns })
}

pub fn run(args: &Args) -> Result<()> {
    let spec = board_spec(args)?;

    let client_dir = args.input_dir.join("client");
    let admin_dir = args.input_dir.join("admin");
    let client = section_paths(&client_dir, &client_order())?;
    let admin = section_paths(&admin_dir, &admin_order())?;

    if client.is_empty() && admin.is_empty() {
        bail!(
            "no screenshots found; expected {}/*.png and/or {}/*.png",
            client_dir.display(),
            admin_dir.display()
        );
    }
    for (paths, columns, flag) in [
        (&client, args.client_columns, "--client-columns"),
        (&admin, args.admin_columns, "--admin-columns"),
    ] {
        if !paths.is_empty() && columns == 0 {
            bail!("{flag} must be >= 1");
        }
    }
    info!(
        client = client.len(),
        admin = admin.len(),
        "composing board"
    );

    let sections = [
        load_section(&client, args.client_columns)?,
        load_section(&admin, args.admin_columns)?,
    ];
    let composition = compose_board(&sections, &spec).context("composing board")?;
    write_png(&args.output, &composition.image)?;

    println!("Wrote: {} ({})", args.output.display(), composition.size);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use clap::Parser;
    use image::{Rgb, RgbImage};
    use pageboard_pipeline::Color;

    use super::*;
    use crate::{Cli, Command};

    fn parse(argv: &[&str]) -> Args {
        let argv = ["pageboard", "board"].iter().chain(argv);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Board(args) => args,
            _ => unreachable!(),
        }
    }

    fn save(path: &Path, width: u32, height: u32, color: [u8; 3]) {
        RgbImage::from_pixel(width, height, Rgb(color))
            .save(path)
            .unwrap();
    }

    #[test]
    fn flags_default_to_board_constants() {
        let args = parse(&[]);
        assert_eq!(board_spec(&args).unwrap(), BoardSpec::default());
        assert_eq!(args.client_columns, 4);
        assert_eq!(args.admin_columns, 2);
        assert_eq!(
            args.background,
            Background::Solid(Color::new(0xF8, 0xFA, 0xFC))
        );
    }

    #[test]
    fn sections_follow_canonical_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["client-me", "client-zz-extra", "client-home", "client-login"] {
            fs::write(dir.path().join(format!("{name}.png")), b"").unwrap();
        }
        let paths = section_paths(dir.path(), &client_order()).unwrap();
        let stems: Vec<_> = paths.iter().map(|p| stem(p)).collect();
        assert_eq!(
            stems,
            vec!["client-home", "client-login", "client-me", "client-zz-extra"]
        );
    }

    #[test]
    fn stacks_client_above_admin() {
        let dir = tempfile::tempdir().unwrap();
        let client = dir.path().join("client");
        let admin = dir.path().join("admin");
        fs::create_dir_all(&client).unwrap();
        fs::create_dir_all(&admin).unwrap();
        for name in ["client-home", "client-search"] {
            save(&client.join(format!("{name}.png")), 40, 80, [200, 0, 0]);
        }
        save(&admin.join("admin-login.png"), 60, 40, [0, 0, 200]);
        let output = dir.path().join("board.png");

        let args = parse(&[
            "--input-dir",
            dir.path().to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--margin",
            "10",
            "--section-gap",
            "20",
            "--client-columns",
            "2",
        ]);
        run(&args).unwrap();

        // client: 2*40 + 3*10 = 110 x 100; admin keeps an empty second
        // column: 60 + 0 + 3*10 = 90 x 60.
        let board = image::open(&output).unwrap();
        assert_eq!((board.width(), board.height()), (110, 180));
    }

    #[test]
    fn admin_only_board_is_its_grid() {
        let dir = tempfile::tempdir().unwrap();
        let admin = dir.path().join("admin");
        fs::create_dir_all(&admin).unwrap();
        save(&admin.join("admin-login.png"), 60, 40, [0, 0, 200]);
        let output = dir.path().join("board.png");

        let args = parse(&[
            "--input-dir",
            dir.path().to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--margin",
            "5",
        ]);
        run(&args).unwrap();

        let board = image::open(&output).unwrap();
        // Two admin columns, the second empty: 60 + 0 + 3*5.
        assert_eq!((board.width(), board.height()), (75, 50));
    }

    #[test]
    fn zero_columns_fail_before_decoding() {
        let dir = tempfile::tempdir().unwrap();
        let client = dir.path().join("client");
        fs::create_dir_all(&client).unwrap();
        // Not a PNG: reading it would fail with a decode error.
        fs::write(client.join("client-home.png"), b"").unwrap();

        let args = parse(&[
            "--input-dir",
            dir.path().to_str().unwrap(),
            "--client-columns",
            "0",
        ]);
        let message = run(&args).unwrap_err().to_string();
        assert!(message.contains("--client-columns"), "got {message}");
        assert!(!message.contains("decoding"), "got {message}");
    }

    #[test]
    fn zero_columns_allowed_for_empty_section() {
        let dir = tempfile::tempdir().unwrap();
        let admin = dir.path().join("admin");
        fs::create_dir_all(&admin).unwrap();
        save(&admin.join("admin-login.png"), 60, 40, [0, 0, 200]);
        let output = dir.path().join("board.png");

        let args = parse(&[
            "--input-dir",
            dir.path().to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--client-columns",
            "0",
        ]);
        run(&args).unwrap();
        assert!(output.exists());
    }

    #[test]
    fn empty_input_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let args = parse(&["--input-dir", dir.path().to_str().unwrap()]);
        let err = run(&args).unwrap_err();
        assert!(err.to_string().contains("no screenshots found"));
    }
}
