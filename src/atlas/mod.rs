//! Texture atlas packing
//!
//! Lays fixed-size square textures into a uniform grid on a power-of-two
//! canvas and records where each one landed.

pub mod atlas_data;
pub mod atlas_operations;

pub use atlas_data::{
    AtlasLayout, AtlasMapping, AtlasSlot, AtlasUV, NamedImages, PackReport, PackedAtlas,
    DEFAULT_CANVAS_SIZE, DEFAULT_CELL_SIZE,
};
pub use atlas_operations::{
    atlas_checksum, get_uv, grid_position, pack_atlas, slot_uv, transform_uv, utilization,
    validate_layout, MAX_CANVAS_SIZE,
};
