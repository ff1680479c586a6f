//! Block Registry Operations
//!
//! Resolves catalog face references against the atlas mapping. The resolver
//! knows nothing about particular entity names: opacity and solidity come in
//! as predicates.

use super::catalog_data::{Catalog, CatalogEntry, EntityFaceSpec};
use super::catalog_operations;
use super::face::{BlockFace, ALL_FACES_KEY};
use super::registry_data::{FaceTexture, ResolveReport, ResolvedEntity};
use crate::atlas::{AtlasMapping, AtlasUV};
use crate::error::BuildWarning;
use std::collections::BTreeMap;

/// Resolve every catalog entry, in catalog order
///
/// Ids are catalog indices. A reference missing from the atlas is reported
/// and degrades that face (or the whole `all` binding); it never stops the
/// pass.
pub fn resolve_registry<O, S>(
    entries: &[CatalogEntry],
    mapping: &AtlasMapping,
    is_opaque: O,
    is_solid: S,
) -> ResolveReport
where
    O: Fn(&str) -> bool,
    S: Fn(&str) -> bool,
{
    let mut report = ResolveReport {
        entities: Vec::with_capacity(entries.len()),
        warnings: Vec::new(),
    };

    for (id, entry) in entries.iter().enumerate() {
        let textures = match &entry.faces {
            EntityFaceSpec::None => None,
            EntityFaceSpec::All(texture) => {
                match lookup_face(mapping, &entry.name, ALL_FACES_KEY, texture, &mut report.warnings) {
                    Some(face) => {
                        let mut textures = BTreeMap::new();
                        textures.insert(ALL_FACES_KEY.to_string(), face);
                        Some(textures)
                    }
                    None => None,
                }
            }
            EntityFaceSpec::Faces(faces) => {
                let mut textures = BTreeMap::new();
                for (face, texture) in faces {
                    if let Some(resolved) =
                        lookup_face(mapping, &entry.name, face, texture, &mut report.warnings)
                    {
                        textures.insert(face.clone(), resolved);
                    }
                }
                Some(textures)
            }
        };

        report.entities.push(ResolvedEntity {
            name: entry.name.clone(),
            id: id as u32,
            opaque: is_opaque(&entry.name),
            solid: is_solid(&entry.name),
            textures,
        });
    }

    log::info!(
        "Resolved {} entities ({} missing texture references)",
        report.entities.len(),
        report.warnings.len()
    );

    report
}

/// Resolve a catalog using its own exclusion sets
pub fn resolve_catalog(catalog: &Catalog, mapping: &AtlasMapping) -> ResolveReport {
    resolve_registry(
        &catalog.entries,
        mapping,
        |name| catalog_operations::is_opaque(&catalog.exclusions, name),
        |name| catalog_operations::is_solid(&catalog.exclusions, name),
    )
}

fn lookup_face(
    mapping: &AtlasMapping,
    entity: &str,
    face: &str,
    texture: &str,
    warnings: &mut Vec<BuildWarning>,
) -> Option<FaceTexture> {
    match mapping.get(texture) {
        Some(slot) => Some(FaceTexture {
            name: texture.to_string(),
            uv: slot.uv,
        }),
        None => {
            log::warn!(
                "[registry_operations::resolve_registry] Texture '{}' not found for {}.{}",
                texture,
                entity,
                face
            );
            warnings.push(BuildWarning::MissingTexture {
                entity: entity.to_string(),
                face: face.to_string(),
                texture: texture.to_string(),
            });
            None
        }
    }
}

/// UV rectangle a renderer should use for one cube face
pub fn face_uv(entity: &ResolvedEntity, face: BlockFace) -> Option<AtlasUV> {
    let textures = entity.textures.as_ref()?;
    face.lookup_keys()
        .iter()
        .find_map(|key| textures.get(*key))
        .map(|texture| texture.uv)
}

/// Get a resolved entity by name
pub fn find_by_name<'a>(entities: &'a [ResolvedEntity], name: &str) -> Option<&'a ResolvedEntity> {
    entities.iter().find(|entity| entity.name == name)
}

/// Get a resolved entity by id
pub fn find_by_id(entities: &[ResolvedEntity], id: u32) -> Option<&ResolvedEntity> {
    entities.get(id as usize).filter(|entity| entity.id == id)
}
