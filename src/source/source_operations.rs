//! Texture Source Operations
//!
//! Pulls PNG textures out of a directory tree, a tar archive or a zip/jar
//! and normalizes them to square textures of one size. Entries are processed in path order
//! so that duplicate names resolve the same way on every run.

use super::source_data::{ExtractedTextures, SourceEntry, SourceKind};
use crate::error::{BuildError, BuildResult, BuildWarning, ErrorContext};
use flate2::read::GzDecoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use walkdir::WalkDir;
use zip::result::ZipResult;
use zip::ZipArchive;

/// Work out the container type from the path
pub fn detect_source_kind(path: &Path) -> BuildResult<SourceKind> {
    if path.is_dir() {
        return Ok(SourceKind::Directory);
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if file_name.ends_with(".tar.gz") || file_name.ends_with(".tgz") {
        Ok(SourceKind::TarGz)
    } else if file_name.ends_with(".tar") {
        Ok(SourceKind::Tar)
    } else if file_name.ends_with(".zip") || file_name.ends_with(".jar") {
        Ok(SourceKind::Zip)
    } else {
        Err(BuildError::UnsupportedSource {
            path: path.to_path_buf(),
        })
    }
}

/// Extract every texture under `prefix` and normalize it to `texture_size`
pub fn extract_textures(path: &Path, prefix: &str, texture_size: u32) -> BuildResult<ExtractedTextures> {
    let kind = detect_source_kind(path)?;
    log::info!("Reading {:?} texture source {}", kind, path.display());

    let mut entries = match kind {
        SourceKind::Directory => collect_directory(path, prefix)?,
        SourceKind::Tar => {
            let file = File::open(path).with_path(path)?;
            collect_tar(BufReader::new(file), prefix).with_path(path)?
        }
        SourceKind::TarGz => {
            let file = File::open(path).with_path(path)?;
            collect_tar(GzDecoder::new(BufReader::new(file)), prefix).with_path(path)?
        }
        SourceKind::Zip => {
            let file = File::open(path).with_path(path)?;
            collect_zip(BufReader::new(file), prefix).map_err(|source| BuildError::Archive {
                path: path.to_path_buf(),
                source,
            })?
        }
    };

    entries.sort_by(|a, b| a.path.cmp(&b.path));
    log::info!("Found {} block textures", entries.len());

    let extracted = decode_entries(entries, texture_size);
    log::info!(
        "Successfully extracted {} textures ({} skipped)",
        extracted.images.len(),
        extracted.warnings.len()
    );
    Ok(extracted)
}

/// Decode entries in order; first entry wins for a repeated name
pub fn decode_entries(entries: Vec<SourceEntry>, texture_size: u32) -> ExtractedTextures {
    let mut extracted = ExtractedTextures::default();

    for entry in entries {
        let image = match image::load_from_memory_with_format(&entry.bytes, ImageFormat::Png) {
            Ok(image) => image,
            Err(e) => {
                skip(&mut extracted, entry.path, e.to_string());
                continue;
            }
        };

        if extracted.images.contains_key(&entry.name) {
            let reason = format!("duplicate texture name '{}'", entry.name);
            skip(&mut extracted, entry.path, reason);
            continue;
        }
        extracted
            .images
            .insert(entry.name, normalize_texture(image, texture_size));
    }

    extracted
}

/// Convert to RGBA, keep the first animation frame and scale to `size`
///
/// Animated textures are stored as a vertical strip of square frames, so a
/// source taller than it is wide is cropped to its top square.
pub fn normalize_texture(image: DynamicImage, size: u32) -> RgbaImage {
    let mut rgba = image.to_rgba8();

    if rgba.height() > rgba.width() {
        let side = rgba.width();
        rgba = imageops::crop_imm(&rgba, 0, 0, side, side).to_image();
    }

    if rgba.width() != size || rgba.height() != size {
        rgba = imageops::resize(&rgba, size, size, FilterType::Nearest);
    }

    rgba
}

/// Texture name for an archive path, if the path is a texture under `prefix`
pub fn texture_name(relative_path: &str, prefix: &str) -> Option<String> {
    let relative_path = relative_path.trim_start_matches("./");
    let rest = relative_path.strip_prefix(prefix)?;
    let file_name = rest.rsplit('/').next()?;
    let stem = file_name.strip_suffix(".png")?;
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

fn collect_directory(root: &Path, prefix: &str) -> BuildResult<Vec<SourceEntry>> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            BuildError::Io {
                path,
                source: e.into(),
            }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = match entry.path().strip_prefix(root) {
            Ok(relative) => relative,
            Err(_) => continue,
        };
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        if let Some(name) = texture_name(&relative, prefix) {
            let bytes = std::fs::read(entry.path()).with_path(entry.path())?;
            entries.push(SourceEntry {
                path: relative,
                name,
                bytes,
            });
        }
    }

    Ok(entries)
}

fn collect_tar<R: Read>(reader: R, prefix: &str) -> std::io::Result<Vec<SourceEntry>> {
    let mut archive = tar::Archive::new(reader);
    let mut entries = Vec::new();

    for entry in archive.entries()? {
        let mut entry = entry?;
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let path = entry.path()?.to_string_lossy().replace('\\', "/");
        if let Some(name) = texture_name(&path, prefix) {
            let mut bytes = Vec::new();
            entry.read_to_end(&mut bytes)?;
            entries.push(SourceEntry { path, name, bytes });
        }
    }

    Ok(entries)
}

fn collect_zip<R: Read + Seek>(reader: R, prefix: &str) -> ZipResult<Vec<SourceEntry>> {
    let mut archive = ZipArchive::new(reader)?;
    let mut entries = Vec::new();

    for index in 0..archive.len() {
        let mut file = archive.by_index(index)?;
        if file.is_dir() {
            continue;
        }

        let path = file.name().replace('\\', "/");
        if let Some(name) = texture_name(&path, prefix) {
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)?;
            entries.push(SourceEntry { path, name, bytes });
        }
    }

    Ok(entries)
}

fn skip(extracted: &mut ExtractedTextures, entry: String, reason: String) {
    log::warn!(
        "[source_operations::extract_textures] Failed to load {}: {}",
        entry,
        reason
    );
    extracted
        .warnings
        .push(BuildWarning::SkippedTexture { entry, reason });
}
