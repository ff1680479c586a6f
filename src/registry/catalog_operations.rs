//! Entity Catalog Operations
//!
//! Turns the declarative TOML catalog into validated catalog data and answers
//! the opaque/solid membership questions the resolver asks.

use super::catalog_data::{Catalog, CatalogEntry, CatalogFile, EntityFaceSpec, ExclusionSets};
use crate::error::{BuildError, BuildResult, ErrorContext};
use std::collections::HashSet;
use std::path::Path;

/// Catalog shipped with the tool
pub const DEFAULT_CATALOG: &str = include_str!("../../catalog/blocks.toml");

/// Parse the built-in block catalog
pub fn default_catalog() -> BuildResult<Catalog> {
    parse_catalog(DEFAULT_CATALOG)
}

/// Load a catalog from a TOML file
pub fn load_catalog(path: &Path) -> BuildResult<Catalog> {
    let text = std::fs::read_to_string(path).with_path(path)?;
    let catalog = parse_catalog(&text)?;
    log::info!(
        "Loaded {} catalog entries from {}",
        catalog.entries.len(),
        path.display()
    );
    Ok(catalog)
}

/// Parse and validate catalog TOML
pub fn parse_catalog(text: &str) -> BuildResult<Catalog> {
    let file: CatalogFile = toml::from_str(text)?;

    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(file.entities.len());

    for entry in file.entities {
        validate_entity_name(&entry.name)?;
        if !seen.insert(entry.name.clone()) {
            return Err(BuildError::InvalidCatalog(format!(
                "duplicate entity '{}'",
                entry.name
            )));
        }

        let faces = match (entry.all, entry.faces) {
            (None, None) => EntityFaceSpec::None,
            (Some(texture), None) => EntityFaceSpec::All(texture),
            (None, Some(faces)) => {
                if faces.is_empty() {
                    return Err(BuildError::InvalidCatalog(format!(
                        "entity '{}' has an empty faces table",
                        entry.name
                    )));
                }
                EntityFaceSpec::Faces(faces)
            }
            (Some(_), Some(_)) => {
                return Err(BuildError::InvalidCatalog(format!(
                    "entity '{}' sets both 'all' and 'faces'",
                    entry.name
                )));
            }
        };

        entries.push(CatalogEntry {
            name: entry.name,
            faces,
        });
    }

    Ok(Catalog {
        entries,
        exclusions: file.exclusions,
    })
}

/// Strict and reserved keywords of Rust 2021
const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

pub fn is_rust_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name)
}

/// Entity names become variants of the generated Rust enum
fn validate_entity_name(name: &str) -> BuildResult<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if !valid || name == "_" {
        return Err(BuildError::InvalidCatalog(format!(
            "entity name '{}' is not a valid identifier",
            name
        )));
    }
    if is_rust_keyword(name) {
        return Err(BuildError::InvalidCatalog(format!(
            "entity name '{}' is a Rust keyword",
            name
        )));
    }
    Ok(())
}

pub fn is_opaque(exclusions: &ExclusionSets, name: &str) -> bool {
    !exclusions.non_opaque.contains(name)
}

pub fn is_solid(exclusions: &ExclusionSets, name: &str) -> bool {
    !exclusions.non_solid.contains(name)
}
