//! File discovery, decode from disk, and PNG persistence.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pageboard_pipeline::{DynamicImage, decode, encode_png};
use tracing::debug;

/// The `*.png` entries of `dir`, sorted by path. A missing directory or a
/// path that is not a directory yields no entries.
pub fn list_pngs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry
            .with_context(|| format!("listing {}", dir.display()))?
            .path();
        if path.is_file() && path.extension() == Some(OsStr::new("png")) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Resolve image names against `input_dir`.
///
/// Names without an extension get `.png`. Relative names keep only their
/// file name and are looked up directly inside `input_dir`; absolute
/// paths are used as given.
pub fn resolve_inputs<S: AsRef<str>>(input_dir: &Path, names: &[S]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let mut path = PathBuf::from(name.as_ref());
            if path.extension().is_none() {
                path.set_extension("png");
            }
            if path.is_absolute() {
                path
            } else {
                path.file_name()
                    .map_or_else(|| input_dir.to_path_buf(), |file| input_dir.join(file))
            }
        })
        .collect()
}

/// Expand directories into their sorted `*.png` entries and drop
/// duplicates by canonical path, keeping the first occurrence.
pub fn expand_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut expanded = Vec::new();
    for path in paths {
        if path.is_dir() {
            expanded.extend(list_pngs(path)?);
        } else {
            expanded.push(path.clone());
        }
    }

    let mut seen = HashSet::new();
    expanded.retain(|path| seen.insert(fs::canonicalize(path).unwrap_or_else(|_| path.clone())));
    Ok(expanded)
}

/// File stem used for ranking, or `""` when it is not valid UTF-8.
pub fn stem(path: &Path) -> &str {
    path.file_stem().and_then(OsStr::to_str).unwrap_or_default()
}

pub fn read_image(path: &Path) -> Result<DynamicImage> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let image = decode(&bytes).with_context(|| format!("decoding {}", path.display()))?;
    debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "decoded image"
    );
    Ok(image)
}

/// Encode `image` as PNG and write it, creating parent directories.
pub fn write_png(path: &Path, image: &DynamicImage) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    let bytes = encode_png(image).with_context(|| format!("encoding {}", path.display()))?;
    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}
