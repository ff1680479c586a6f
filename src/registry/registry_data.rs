//! Block Registry Data
//!
//! Plain data. All transformations happen in registry_operations.rs

use crate::atlas::AtlasUV;
use crate::error::BuildWarning;
use serde::Serialize;
use std::collections::BTreeMap;

/// A face bound to a placed texture
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaceTexture {
    pub name: String,
    pub uv: AtlasUV,
}

/// Catalog entry with its texture references looked up in the atlas
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedEntity {
    pub name: String,
    /// Catalog index
    pub id: u32,
    pub opaque: bool,
    pub solid: bool,
    /// `None` for textureless entities and for an `all` texture that is missing
    pub textures: Option<BTreeMap<String, FaceTexture>>,
}

/// Output of a resolve pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveReport {
    pub entities: Vec<ResolvedEntity>,
    pub warnings: Vec<BuildWarning>,
}
