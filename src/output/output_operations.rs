//! Output Operations
//!
//! Serializes the packed atlas, the mapping and the resolved registry. The
//! formatting functions are pure; only `write_outputs` touches the disk.

use super::output_data::{IdentifierFormat, IdentifierListing, OutputFiles, WrittenOutputs};
use crate::atlas::{AtlasMapping, PackedAtlas};
use crate::error::{BuildError, BuildResult, ErrorContext};
use crate::registry::{CatalogEntry, ResolvedEntity};
use image::ImageFormat;
use serde::Serialize;
use std::path::Path;

const GENERATED_MARKER: &str = "AUTO-GENERATED FILE - DO NOT EDIT";

#[derive(Serialize)]
struct RegistryDocument<'a> {
    blocks: &'a [ResolvedEntity],
}

/// Pretty JSON of the UV table, keyed and ordered by texture name
pub fn mapping_to_json(mapping: &AtlasMapping) -> BuildResult<String> {
    Ok(serde_json::to_string_pretty(mapping)?)
}

/// Pretty JSON of the resolved registry: `{ "blocks": [...] }`
pub fn registry_to_json(entities: &[ResolvedEntity]) -> BuildResult<String> {
    Ok(serde_json::to_string_pretty(&RegistryDocument { blocks: entities })?)
}

/// Enumeration of entity names and ids in the requested language
pub fn generate_identifier_listing(entities: &[ResolvedEntity], listing: &IdentifierListing) -> String {
    match listing.format {
        IdentifierFormat::Rust => rust_listing(entities),
        IdentifierFormat::Cpp => cpp_listing(entities, &listing.namespace),
    }
}

/// Smallest unsigned width that holds every id and the count
fn id_width(count: usize) -> u32 {
    if count <= u8::MAX as usize {
        8
    } else if count <= u16::MAX as usize {
        16
    } else {
        32
    }
}

fn rust_listing(entities: &[ResolvedEntity]) -> String {
    let mut out = format!("// {}\n// Generated by block-atlas\n\n", GENERATED_MARKER);
    out.push_str("/// Block identifiers in catalog order\n");
    out.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]\n");
    if !entities.is_empty() {
        out.push_str(&format!("#[repr(u{})]\n", id_width(entities.len())));
    }
    out.push_str("pub enum BlockId {\n");
    for entity in entities {
        out.push_str(&format!("    {} = {},\n", entity.name, entity.id));
    }
    out.push_str("}\n\n");
    out.push_str(&format!("pub const BLOCK_COUNT: usize = {};\n", entities.len()));
    out
}

fn cpp_listing(entities: &[ResolvedEntity], namespace: &str) -> String {
    let mut out = format!(
        "#pragma once\n\n// {}\n// Generated by block-atlas\n\n#include <cstdint>\n\n",
        GENERATED_MARKER
    );
    out.push_str(&format!("namespace {} {{\n\n", namespace));
    out.push_str(&format!(
        "enum class BlockID : uint{}_t {{\n",
        id_width(entities.len())
    ));
    for entity in entities {
        out.push_str(&format!("    {} = {},\n", entity.name, entity.id));
    }
    out.push_str(&format!("    {} = {}\n", CPP_COUNT_ENUMERATOR, entities.len()));
    out.push_str("};\n\n");
    out.push_str(&format!("constexpr uint32_t BLOCK_COUNT = {};\n\n", entities.len()));
    out.push_str(&format!("}} // namespace {}\n", namespace));
    out
}

/// C++20 keywords and alternative operator tokens
const CPP_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "compl", "concept",
    "const", "consteval", "constexpr", "constinit", "const_cast", "continue", "co_await",
    "co_return", "co_yield", "decltype", "default", "delete", "do", "double", "dynamic_cast",
    "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
    "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "thread_local",
    "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

/// Enumerator appended after the entities in the C++ listing
const CPP_COUNT_ENUMERATOR: &str = "COUNT";

/// Keyword or implementation-reserved name (`__x`, `_X`) in C++
pub fn is_cpp_reserved(name: &str) -> bool {
    let mut chars = name.chars();
    let reserved_prefix = chars.next() == Some('_')
        && matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_uppercase());
    reserved_prefix || CPP_KEYWORDS.contains(&name)
}

/// Reject entity names the listing in `format` cannot declare
///
/// Rust keywords are already refused when the catalog is parsed.
pub fn validate_listing_names(entries: &[CatalogEntry], format: IdentifierFormat) -> BuildResult<()> {
    if format != IdentifierFormat::Cpp {
        return Ok(());
    }

    for entry in entries {
        if is_cpp_reserved(&entry.name) || entry.name == CPP_COUNT_ENUMERATOR {
            return Err(BuildError::InvalidCatalog(format!(
                "entity name '{}' cannot be declared in the {} listing",
                entry.name, format
            )));
        }
    }
    Ok(())
}

/// Write the atlas image, both JSON documents and the identifier listing
///
/// Takes the packed atlas by value; the canvas is not needed after it is
/// encoded.
pub fn write_outputs(
    dir: &Path,
    files: &OutputFiles,
    packed: PackedAtlas,
    entities: &[ResolvedEntity],
    listing: &IdentifierListing,
) -> BuildResult<WrittenOutputs> {
    std::fs::create_dir_all(dir).with_path(dir)?;

    let identifiers_name = files
        .identifiers
        .as_deref()
        .unwrap_or_else(|| listing.format.default_file_name());

    let written = WrittenOutputs {
        atlas: dir.join(&files.atlas),
        mapping: dir.join(&files.mapping),
        registry: dir.join(&files.registry),
        identifiers: dir.join(identifiers_name),
    };

    packed
        .canvas
        .save_with_format(&written.atlas, ImageFormat::Png)?;
    log::info!("Saved atlas: {}", written.atlas.display());

    std::fs::write(&written.mapping, mapping_to_json(&packed.mapping)?).with_path(&written.mapping)?;
    log::info!("Saved mapping: {}", written.mapping.display());

    std::fs::write(&written.registry, registry_to_json(entities)?).with_path(&written.registry)?;
    log::info!("Saved registry: {}", written.registry.display());

    std::fs::write(&written.identifiers, generate_identifier_listing(entities, listing))
        .with_path(&written.identifiers)?;
    log::info!("Saved {} identifiers: {}", listing.format, written.identifiers.display());

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::{pack_atlas, NamedImages};
    use crate::registry::{parse_catalog, resolve_registry, EntityFaceSpec};
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    fn create_test_atlas() -> PackedAtlas {
        let images: NamedImages = ["a", "b", "c"]
            .iter()
            .map(|name| (name.to_string(), RgbaImage::from_pixel(16, 16, Rgba([1, 2, 3, 255]))))
            .collect();
        pack_atlas(images, 32, 16).expect("pack failed")
    }

    fn create_test_entities(packed: &PackedAtlas) -> Vec<ResolvedEntity> {
        let entries = vec![
            CatalogEntry {
                name: "Air".to_string(),
                faces: EntityFaceSpec::None,
            },
            CatalogEntry {
                name: "Stone".to_string(),
                faces: EntityFaceSpec::All("b".to_string()),
            },
        ];
        resolve_registry(&entries, &packed.mapping, |name| name != "Air", |name| name != "Air").entities
    }

    fn listing(format: IdentifierFormat) -> IdentifierListing {
        IdentifierListing {
            format,
            namespace: "MCPP".to_string(),
        }
    }

    #[test]
    fn test_mapping_json_shape() {
        let packed = create_test_atlas();
        let json: serde_json::Value =
            serde_json::from_str(&mapping_to_json(&packed.mapping).expect("json")).expect("parse");

        let b = &json["b"];
        assert_eq!(b["index"], 1);
        assert_eq!(b["grid"], serde_json::json!([1, 0]));
        assert_eq!(b["pixel"], serde_json::json!([16, 0]));
        assert_eq!(b["uv"]["min"], serde_json::json!([0.5, 0.0]));
        assert_eq!(b["uv"]["max"], serde_json::json!([1.0, 0.5]));
        assert!(b.get("name").is_none());
    }

    #[test]
    fn test_registry_json_shape() {
        let packed = create_test_atlas();
        let entities = create_test_entities(&packed);
        let json: serde_json::Value =
            serde_json::from_str(&registry_to_json(&entities).expect("json")).expect("parse");

        let blocks = json["blocks"].as_array().expect("blocks array");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0]["name"], "Air");
        assert_eq!(blocks[0]["id"], 0);
        assert_eq!(blocks[0]["opaque"], false);
        assert!(blocks[0]["textures"].is_null());
        assert_eq!(blocks[1]["solid"], true);
        assert_eq!(blocks[1]["textures"]["all"]["name"], "b");
        assert_eq!(blocks[1]["textures"]["all"]["uv"]["min"], serde_json::json!([0.5, 0.0]));
    }

    #[test]
    fn test_rust_listing() {
        let packed = create_test_atlas();
        let entities = create_test_entities(&packed);
        let text = generate_identifier_listing(&entities, &listing(IdentifierFormat::Rust));

        assert!(text.starts_with("// AUTO-GENERATED FILE - DO NOT EDIT\n"));
        assert!(text.contains("#[repr(u8)]\npub enum BlockId {\n    Air = 0,\n    Stone = 1,\n}\n"));
        assert!(text.contains("pub const BLOCK_COUNT: usize = 2;"));
    }

    #[test]
    fn test_cpp_listing() {
        let packed = create_test_atlas();
        let entities = create_test_entities(&packed);
        let text = generate_identifier_listing(&entities, &listing(IdentifierFormat::Cpp));

        assert!(text.starts_with("#pragma once\n"));
        assert!(text.contains("namespace MCPP {\n"));
        assert!(text.contains(
            "enum class BlockID : uint8_t {\n    Air = 0,\n    Stone = 1,\n    COUNT = 2\n};"
        ));
        assert!(text.contains("constexpr uint32_t BLOCK_COUNT = 2;"));
        assert!(text.trim_end().ends_with("} // namespace MCPP"));
    }

    #[test]
    fn test_cpp_listing_rejects_reserved_names() {
        for name in ["class", "int", "COUNT", "__hidden", "_Reserved"] {
            let catalog =
                parse_catalog(&format!("[[entity]]\nname = \"{}\"\n", name)).expect("catalog");
            assert!(
                matches!(
                    validate_listing_names(&catalog.entries, IdentifierFormat::Cpp),
                    Err(BuildError::InvalidCatalog(_))
                ),
                "{} should be rejected",
                name
            );
            assert!(validate_listing_names(&catalog.entries, IdentifierFormat::Rust).is_ok());
        }

        let catalog = crate::registry::default_catalog().expect("default catalog");
        assert!(validate_listing_names(&catalog.entries, IdentifierFormat::Cpp).is_ok());
    }

    #[test]
    fn test_listing_widens_for_large_catalogs() {
        assert_eq!(id_width(41), 8);
        assert_eq!(id_width(255), 8);
        assert_eq!(id_width(256), 16);
        assert_eq!(id_width(70_000), 32);
    }

    #[test]
    fn test_identifier_format_parsing() {
        assert_eq!("rust".parse::<IdentifierFormat>(), Ok(IdentifierFormat::Rust));
        assert_eq!("C++".parse::<IdentifierFormat>(), Ok(IdentifierFormat::Cpp));
        assert!("java".parse::<IdentifierFormat>().is_err());
    }

    #[test]
    fn test_write_outputs() {
        let dir = TempDir::new().expect("Failed to create temporary directory for test");
        let out_dir = dir.path().join("out");
        let packed = create_test_atlas();
        let entities = create_test_entities(&packed);

        let written = write_outputs(
            &out_dir,
            &OutputFiles::default(),
            packed,
            &entities,
            &listing(IdentifierFormat::Cpp),
        )
        .expect("write outputs");

        assert_eq!(written.identifiers, out_dir.join("BlockTypes.generated.h"));
        let atlas = image::open(&written.atlas).expect("open atlas").to_rgba8();
        assert_eq!(atlas.dimensions(), (32, 32));
        assert_eq!(*atlas.get_pixel(0, 0), Rgba([1, 2, 3, 255]));
        assert_eq!(*atlas.get_pixel(31, 31), Rgba([0, 0, 0, 0]));
        assert!(written.mapping.is_file());
        assert!(written.registry.is_file());
    }
}
