//! Entity Catalog Data
//!
//! Plain data. Parsing and validation live in catalog_operations.rs

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

/// How an entity binds textures to its faces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityFaceSpec {
    /// No visual
    None,
    /// One texture on every face
    All(String),
    /// Explicit, possibly partial, face to texture table
    Faces(BTreeMap<String, String>),
}

/// One catalog row. Row order assigns ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub faces: EntityFaceSpec,
}

/// Entity names excluded from the opaque and solid flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExclusionSets {
    #[serde(default)]
    pub non_opaque: BTreeSet<String>,
    #[serde(default)]
    pub non_solid: BTreeSet<String>,
}

/// Ordered entity catalog plus the flag exclusions that go with it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub entries: Vec<CatalogEntry>,
    pub exclusions: ExclusionSets,
}

/// On-disk catalog layout
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CatalogFile {
    #[serde(default)]
    pub exclusions: ExclusionSets,
    #[serde(default, rename = "entity")]
    pub entities: Vec<CatalogEntryFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CatalogEntryFile {
    pub name: String,
    pub all: Option<String>,
    pub faces: Option<BTreeMap<String, String>>,
}
