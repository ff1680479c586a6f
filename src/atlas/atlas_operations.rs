//! Texture Atlas Operations
//!
//! Free functions over the atlas data. Packing is a pure function of the
//! sorted name list and the canvas/cell sizes: the same inputs always give the
//! same canvas bytes and the same mapping.

use super::atlas_data::{
    AtlasLayout, AtlasMapping, AtlasSlot, AtlasUV, NamedImages, PackReport, PackedAtlas,
};
use crate::error::{BuildError, BuildResult, BuildWarning};
use glam::{UVec2, Vec2};
use image::{imageops, RgbaImage};

/// Largest canvas the packer will allocate
pub const MAX_CANVAS_SIZE: u32 = 16384;

/// Check canvas and cell sizes and derive the grid
pub fn validate_layout(canvas_size: u32, cell_size: u32) -> BuildResult<AtlasLayout> {
    if !canvas_size.is_power_of_two() {
        return Err(BuildError::InvalidConfig {
            field: "canvas_size".to_string(),
            value: canvas_size.to_string(),
            reason: "must be a positive power of two".to_string(),
        });
    }
    if canvas_size > MAX_CANVAS_SIZE {
        return Err(BuildError::InvalidConfig {
            field: "canvas_size".to_string(),
            value: canvas_size.to_string(),
            reason: format!("must not exceed {}", MAX_CANVAS_SIZE),
        });
    }
    if cell_size == 0 || cell_size > canvas_size {
        return Err(BuildError::InvalidConfig {
            field: "cell_size".to_string(),
            value: cell_size.to_string(),
            reason: format!("must be between 1 and canvas size {}", canvas_size),
        });
    }

    let cells_per_row = canvas_size / cell_size;
    Ok(AtlasLayout {
        canvas_size,
        cell_size,
        cells_per_row,
        capacity: (cells_per_row as usize) * (cells_per_row as usize),
    })
}

/// Grid cell for a sort rank, row-major
pub fn grid_position(layout: &AtlasLayout, index: u32) -> UVec2 {
    UVec2::new(index % layout.cells_per_row, index / layout.cells_per_row)
}

/// Normalized UV rectangle for a pixel origin
///
/// The canvas size is a power of two, so every value here is an exact binary
/// fraction and neighbouring cells share edges without overlapping.
pub fn slot_uv(layout: &AtlasLayout, pixel_origin: UVec2) -> AtlasUV {
    let canvas = layout.canvas_size as f32;
    let cell = layout.cell_size;
    AtlasUV {
        min: Vec2::new(
            pixel_origin.x as f32 / canvas,
            pixel_origin.y as f32 / canvas,
        ),
        max: Vec2::new(
            (pixel_origin.x + cell) as f32 / canvas,
            (pixel_origin.y + cell) as f32 / canvas,
        ),
    }
}

/// Pack named textures into a uniform grid
///
/// Names are placed in lexicographic order. When there are more textures than
/// cells the tail of the sorted list is dropped and reported as a warning.
pub fn pack_atlas(images: NamedImages, canvas_size: u32, cell_size: u32) -> BuildResult<PackedAtlas> {
    let layout = validate_layout(canvas_size, cell_size)?;

    if images.is_empty() {
        return Err(BuildError::EmptyInput);
    }

    for (name, image) in &images {
        if image.width() != cell_size || image.height() != cell_size {
            return Err(BuildError::TextureSizeMismatch {
                name: name.clone(),
                width: image.width(),
                height: image.height(),
                expected: cell_size,
            });
        }
    }

    let supplied = images.len();
    let mut report = PackReport::default();

    log::info!(
        "Building {}x{} atlas ({}x{} = {} slots) from {} textures",
        canvas_size,
        canvas_size,
        layout.cells_per_row,
        layout.cells_per_row,
        layout.capacity,
        supplied
    );

    let mut canvas = RgbaImage::new(canvas_size, canvas_size);
    let mut mapping = AtlasMapping::new();

    // BTreeMap iteration is the sorted order
    for (idx, (name, image)) in images.into_iter().enumerate() {
        if idx >= layout.capacity {
            report.dropped.push(name);
            continue;
        }

        let index = idx as u32;
        let grid = grid_position(&layout, index);
        let pixel_origin = grid * cell_size;

        imageops::replace(
            &mut canvas,
            &image,
            i64::from(pixel_origin.x),
            i64::from(pixel_origin.y),
        );

        let slot = AtlasSlot {
            name: name.clone(),
            index,
            grid,
            pixel_origin,
            uv: slot_uv(&layout, pixel_origin),
        };
        mapping.insert(name, slot);
    }

    report.placed = mapping.len();

    if !report.dropped.is_empty() {
        log::warn!(
            "[atlas_operations::pack_atlas] Too many textures ({}) for atlas size. Max is {}. {} skipped, first skipped '{}'",
            supplied,
            layout.capacity,
            report.dropped.len(),
            report.dropped[0]
        );
        report.warnings.push(BuildWarning::CapacityExceeded {
            capacity: layout.capacity,
            supplied,
            dropped: report.dropped.clone(),
        });
    }

    log::info!("Placed {} textures in atlas", report.placed);

    Ok(PackedAtlas {
        layout,
        canvas,
        mapping,
        report,
    })
}

/// Get UV coordinates for a texture name
pub fn get_uv(mapping: &AtlasMapping, name: &str) -> Option<AtlasUV> {
    mapping.get(name).map(|slot| slot.uv)
}

/// Transform local UV (0-1) to atlas UV
pub fn transform_uv(atlas_uv: &AtlasUV, local_uv: Vec2) -> Vec2 {
    atlas_uv.min + (atlas_uv.max - atlas_uv.min) * local_uv
}

/// Get atlas utilization percentage
pub fn utilization(packed: &PackedAtlas) -> f32 {
    let cell_area = u64::from(packed.layout.cell_size).pow(2);
    let used_area = packed.mapping.len() as u64 * cell_area;
    let total_area = u64::from(packed.layout.canvas_size).pow(2);
    (used_area as f64 / total_area as f64 * 100.0) as f32
}

/// CRC-32 over the raw canvas bytes
pub fn atlas_checksum(canvas: &RgbaImage) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(canvas.as_raw());
    hasher.finalize()
}
