//! Texture Atlas Data
//!
//! Plain data. All transformations happen in atlas_operations.rs

use crate::error::BuildWarning;
use glam::{UVec2, Vec2};
use image::RgbaImage;
use serde::Serialize;
use std::collections::BTreeMap;

/// Default per-texture side length in pixels
pub const DEFAULT_CELL_SIZE: u32 = 16;

/// Default atlas side length in pixels
pub const DEFAULT_CANVAS_SIZE: u32 = 4096;

/// Source textures keyed by name. Names carry no path and no extension.
pub type NamedImages = BTreeMap<String, RgbaImage>;

/// UV coordinates within the atlas
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AtlasUV {
    pub min: Vec2,
    pub max: Vec2,
}

/// One placed texture
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtlasSlot {
    #[serde(skip)]
    pub name: String,
    /// Rank of the name in sorted order
    pub index: u32,
    pub grid: UVec2,
    #[serde(rename = "pixel")]
    pub pixel_origin: UVec2,
    pub uv: AtlasUV,
}

/// Name to slot mapping, iterated in name order
pub type AtlasMapping = BTreeMap<String, AtlasSlot>;

/// Grid geometry derived from the canvas and cell sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasLayout {
    pub canvas_size: u32,
    pub cell_size: u32,
    pub cells_per_row: u32,
    pub capacity: usize,
}

/// Result of a packing pass. The canvas is moved out to the writer; the
/// mapping is read-only once built.
#[derive(Debug, Clone)]
pub struct PackedAtlas {
    pub layout: AtlasLayout,
    pub canvas: RgbaImage,
    pub mapping: AtlasMapping,
    pub report: PackReport,
}

/// What happened during packing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackReport {
    pub placed: usize,
    /// Names that did not fit, in sorted order
    pub dropped: Vec<String>,
    pub warnings: Vec<BuildWarning>,
}
