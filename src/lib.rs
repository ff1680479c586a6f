// Block Atlas - texture atlas and block registry builder
//
// Packs named square textures into one grid atlas and resolves a block
// catalog against the resulting UV table.
//
// - atlas: deterministic grid packing and UV math
// - registry: catalog parsing and texture resolution
// - source / output: reading textures in, writing artifacts out
// - pipeline: the batch driver tying them together

pub mod atlas;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod registry;
pub mod source;

pub use atlas::{pack_atlas, AtlasMapping, AtlasSlot, AtlasUV, NamedImages, PackedAtlas};
pub use config::{load_config, validate_config, BuildConfig};
pub use error::{BuildError, BuildResult, BuildWarning, ErrorContext};
pub use output::{generate_identifier_listing, IdentifierFormat};
pub use pipeline::{build_from_textures, run_build, BuildSummary};
pub use registry::{
    resolve_catalog, resolve_registry, BlockFace, Catalog, CatalogEntry, EntityFaceSpec,
    ResolvedEntity,
};
pub use source::extract_textures;
