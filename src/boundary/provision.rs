//! Idempotent download and extraction of the boundary dataset bundle.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

/// Ensure the boundary shapefile exists under `data_dir`, downloading and
/// extracting the zip bundle from `url` if the directory is missing or
/// empty. A populated directory short-circuits, so repeated runs reuse the
/// on-disk dataset. Returns the path to the `.shp` file.
pub async fn ensure_dataset(data_dir: &Path, url: &str) -> Result<PathBuf> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;

    if dir_is_empty(data_dir)? {
        // Stage into a temp dir that is removed on any failure, so a
        // half-finished download or extraction leaves `data_dir` empty and
        // the next run retries instead of short-circuiting.
        let staging = tempfile::tempdir_in(data_dir)
            .context("Failed to create staging directory")?;
        download_and_extract(staging.path(), url).await?;
        promote(staging.path(), data_dir)?;
    } else {
        debug!("Data directory {} already populated", data_dir.display());
    }

    find_shapefile(data_dir)
}

/// Move the staged dataset files into the data directory.
fn promote(staging: &Path, data_dir: &Path) -> Result<()> {
    for entry in fs::read_dir(staging)? {
        let entry = entry?;
        fs::rename(entry.path(), data_dir.join(entry.file_name()))?;
    }
    Ok(())
}

fn dir_is_empty(dir: &Path) -> Result<bool> {
    Ok(fs::read_dir(dir)?.next().is_none())
}

async fn download_and_extract(dest: &Path, url: &str) -> Result<()> {
    info!("Downloading boundary dataset from {}", url);

    let response = reqwest::get(url)
        .await
        .context("Failed to download boundary dataset")?
        .error_for_status()
        .context("Boundary dataset download returned an error status")?;
    let bytes = response
        .bytes()
        .await
        .context("Failed to read boundary dataset body")?;

    let zip_path = dest.join("boundaries.zip");
    fs::write(&zip_path, &bytes)
        .with_context(|| format!("Failed to write {}", zip_path.display()))?;

    info!("Extracting boundary dataset...");
    let file = fs::File::open(&zip_path)?;
    let mut archive = zip::ZipArchive::new(file).context("Failed to open dataset archive")?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let rel = match entry.enclosed_name() {
            Some(rel) => rel,
            None => continue,
        };
        let out_path = dest.join(rel);
        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = fs::File::create(&out_path)?;
        io::copy(&mut entry, &mut out)?;
    }

    fs::remove_file(&zip_path)?;
    debug!("Removed {}", zip_path.display());

    Ok(())
}

fn find_shapefile(dir: &Path) -> Result<PathBuf> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_shp = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("shp"))
            .unwrap_or(false);
        if is_shp {
            return Ok(path);
        }
    }
    bail!("No .shp file found in {}", dir.display())
}
