//! Output Data

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Language of the generated identifier listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierFormat {
    #[default]
    Rust,
    Cpp,
}

impl IdentifierFormat {
    pub fn default_file_name(&self) -> &'static str {
        match self {
            IdentifierFormat::Rust => "block_types.rs",
            IdentifierFormat::Cpp => "BlockTypes.generated.h",
        }
    }
}

impl FromStr for IdentifierFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rust" | "rs" => Ok(IdentifierFormat::Rust),
            "cpp" | "c++" => Ok(IdentifierFormat::Cpp),
            other => Err(format!("unknown identifier format '{}' (expected rust or cpp)", other)),
        }
    }
}

impl fmt::Display for IdentifierFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierFormat::Rust => write!(f, "rust"),
            IdentifierFormat::Cpp => write!(f, "cpp"),
        }
    }
}

/// Identifier listing settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierListing {
    pub format: IdentifierFormat,
    /// C++ namespace; unused for Rust
    pub namespace: String,
}

/// File names written into the output directory
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputFiles {
    pub atlas: String,
    pub mapping: String,
    pub registry: String,
    /// Defaults to a name matching the listing format
    pub identifiers: Option<String>,
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            atlas: "block_atlas.png".to_string(),
            mapping: "atlas_mapping.json".to_string(),
            registry: "block_registry.json".to_string(),
            identifiers: None,
        }
    }
}

/// Paths of everything a run wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutputs {
    pub atlas: PathBuf,
    pub mapping: PathBuf,
    pub registry: PathBuf,
    pub identifiers: PathBuf,
}
