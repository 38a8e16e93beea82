use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::prelude::*;

use crate::foundation::error::{CineloreError, CineloreResult};

/// How an asset is decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetKind {
    /// PNG, JPEG, WebP and the other formats `image` decodes.
    Raster,
    /// SVG document.
    Svg,
}

impl AssetKind {
    /// Guess from the URL's extension.
    pub fn from_url(url: &str) -> Self {
        let ext = Path::new(url)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("svg") => Self::Svg,
            _ => Self::Raster,
        }
    }
}

/// Asset that decoded successfully.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LoadedAsset {
    /// URL as listed.
    pub url: String,
    /// Decoder used.
    pub kind: AssetKind,
    /// Intrinsic width, px.
    pub width: u32,
    /// Intrinsic height, px.
    pub height: u32,
}

/// Asset that could not be read or decoded.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FailedAsset {
    /// URL as listed.
    pub url: String,
    /// Error message.
    pub reason: String,
}

/// Outcome of [`preload_assets`], in input order within each list.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct PreloadReport {
    /// Decoded assets.
    pub loaded: Vec<LoadedAsset>,
    /// Unreadable or undecodable assets.
    pub failed: Vec<FailedAsset>,
    /// Remote URLs that were not fetched.
    pub skipped: Vec<String>,
}

impl PreloadReport {
    /// Every listed asset was either decoded or deliberately skipped.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of assets considered.
    pub fn total(&self) -> usize {
        self.loaded.len() + self.failed.len() + self.skipped.len()
    }
}

enum Outcome {
    Loaded(LoadedAsset),
    Failed(FailedAsset),
    Skipped(String),
}

fn is_remote(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Resolve a listed URL against `root`; leading slashes are site-relative.
pub fn resolve_asset_path(root: &Path, url: &str) -> PathBuf {
    root.join(url.trim_start_matches('/'))
}

/// Decode every listed asset in parallel.
///
/// Never fails as a whole: each failure is logged and reported, and remote URLs are skipped
/// since there is no network client.
#[tracing::instrument(skip_all, fields(root = %root.display(), count = urls.len()))]
pub fn preload_assets<S: AsRef<str> + Sync>(root: &Path, urls: &[S]) -> PreloadReport {
    let outcomes: Vec<Outcome> = urls
        .par_iter()
        .map(|url| {
            let url = url.as_ref();
            if is_remote(url) {
                tracing::warn!(url, "skipping remote asset");
                return Outcome::Skipped(url.to_owned());
            }
            match load_asset(root, url) {
                Ok(asset) => Outcome::Loaded(asset),
                Err(e) => {
                    tracing::warn!(url, error = %e, "asset preload failed");
                    Outcome::Failed(FailedAsset {
                        url: url.to_owned(),
                        reason: e.to_string(),
                    })
                }
            }
        })
        .collect();

    let mut report = PreloadReport::default();
    for outcome in outcomes {
        match outcome {
            Outcome::Loaded(a) => report.loaded.push(a),
            Outcome::Failed(f) => report.failed.push(f),
            Outcome::Skipped(u) => report.skipped.push(u),
        }
    }
    tracing::info!(
        loaded = report.loaded.len(),
        failed = report.failed.len(),
        skipped = report.skipped.len(),
        "assets preloaded"
    );
    report
}

/// Read and decode a single local asset.
pub fn load_asset(root: &Path, url: &str) -> CineloreResult<LoadedAsset> {
    let path = resolve_asset_path(root, url);
    let bytes =
        std::fs::read(&path).with_context(|| format!("read asset '{}'", path.display()))?;
    let kind = AssetKind::from_url(url);
    let (width, height) = match kind {
        AssetKind::Raster => raster_dimensions(&bytes)?,
        AssetKind::Svg => svg_dimensions(&bytes, path.parent())?,
    };
    tracing::debug!(url, width, height, "asset decoded");
    Ok(LoadedAsset {
        url: url.to_owned(),
        kind,
        width,
        height,
    })
}

/// Decode raster bytes and return their dimensions.
pub fn raster_dimensions(bytes: &[u8]) -> CineloreResult<(u32, u32)> {
    let img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok((img.width(), img.height()))
}

/// Parse SVG bytes and return their rounded-up intrinsic size.
pub fn svg_dimensions(bytes: &[u8], resources_dir: Option<&Path>) -> CineloreResult<(u32, u32)> {
    let opts = usvg::Options {
        resources_dir: resources_dir.map(Path::to_path_buf),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    let size = tree.size();
    let (w, h) = (size.width().ceil(), size.height().ceil());
    if w < 1.0 || h < 1.0 {
        return Err(CineloreError::validation(format!(
            "svg has an empty canvas ({w}x{h})"
        )));
    }
    Ok((w as u32, h as u32))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/preload.rs"]
mod tests;
