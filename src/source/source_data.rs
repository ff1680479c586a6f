//! Texture Source Data

use crate::atlas::NamedImages;
use crate::error::BuildWarning;

/// Where block textures live inside a game archive
pub const DEFAULT_TEXTURE_PREFIX: &str = "assets/minecraft/textures/block/";

/// Supported texture containers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Directory,
    Tar,
    TarGz,
    /// `.zip` or a game client `.jar`
    Zip,
}

/// Archive entry selected for decoding
#[derive(Debug, Clone)]
pub struct SourceEntry {
    /// Path relative to the source root, `/` separated
    pub path: String,
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Square textures ready for packing plus everything that was left out
#[derive(Debug, Clone, Default)]
pub struct ExtractedTextures {
    pub images: NamedImages,
    pub warnings: Vec<BuildWarning>,
}
