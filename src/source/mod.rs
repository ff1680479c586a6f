//! Texture extraction
//!
//! Supplies the packer with `name -> square texture` pairs read from a
//! directory tree or a tar archive.

pub mod source_data;
pub mod source_operations;

pub use source_data::{ExtractedTextures, SourceEntry, SourceKind, DEFAULT_TEXTURE_PREFIX};
pub use source_operations::{
    decode_entries, detect_source_kind, extract_textures, normalize_texture, texture_name,
};
