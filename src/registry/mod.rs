//! Entity catalog and registry resolution
//!
//! The catalog is configuration: an ordered list of entities and the faces
//! they bind. Resolution looks every reference up in the atlas mapping.

pub mod catalog_data;
pub mod catalog_operations;
mod face;
pub mod registry_data;
pub mod registry_operations;

pub use catalog_data::{Catalog, CatalogEntry, EntityFaceSpec, ExclusionSets};
pub use catalog_operations::{
    default_catalog, is_opaque, is_rust_keyword, is_solid, load_catalog, parse_catalog,
    DEFAULT_CATALOG,
};
pub use face::{BlockFace, ALL_FACES_KEY};
pub use registry_data::{FaceTexture, ResolveReport, ResolvedEntity};
pub use registry_operations::{
    face_uv, find_by_id, find_by_name, resolve_catalog, resolve_registry,
};
