//! Build configuration
//!
//! Every field has a default, so a config file only needs the values it
//! changes. Command-line flags are applied on top by the binary.

use crate::atlas::{validate_layout, AtlasLayout, DEFAULT_CANVAS_SIZE, DEFAULT_CELL_SIZE};
use crate::error::{BuildError, BuildResult, ErrorContext};
use crate::output::{is_cpp_reserved, IdentifierFormat, IdentifierListing, OutputFiles};
use crate::source::DEFAULT_TEXTURE_PREFIX;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main build configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Texture directory, `.tar`, `.tar.gz` or `.jar`/`.zip`
    pub source: PathBuf,
    pub output_dir: PathBuf,
    /// Atlas side length; must be a power of two
    pub canvas_size: u32,
    /// Side length every texture is normalized to
    pub cell_size: u32,
    /// Only source entries under this path are used
    pub texture_prefix: String,
    /// Entity catalog; the built-in block catalog when unset
    pub catalog: Option<PathBuf>,
    pub identifier_format: IdentifierFormat,
    pub namespace: String,
    pub files: OutputFiles,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("client.tar.gz"),
            output_dir: PathBuf::from("assets/textures/blocks"),
            canvas_size: DEFAULT_CANVAS_SIZE,
            cell_size: DEFAULT_CELL_SIZE,
            texture_prefix: DEFAULT_TEXTURE_PREFIX.to_string(),
            catalog: None,
            identifier_format: IdentifierFormat::default(),
            namespace: "blocks".to_string(),
            files: OutputFiles::default(),
        }
    }
}

impl BuildConfig {
    pub fn identifier_listing(&self) -> IdentifierListing {
        IdentifierListing {
            format: self.identifier_format,
            namespace: self.namespace.clone(),
        }
    }
}

/// Parse a TOML config
pub fn parse_config(text: &str) -> BuildResult<BuildConfig> {
    Ok(toml::from_str(text)?)
}

/// Load a TOML config file
pub fn load_config(path: &Path) -> BuildResult<BuildConfig> {
    let text = std::fs::read_to_string(path).with_path(path)?;
    parse_config(&text)
}

/// Reject configurations the build cannot run with
pub fn validate_config(config: &BuildConfig) -> BuildResult<AtlasLayout> {
    let layout = validate_layout(config.canvas_size, config.cell_size)?;

    if config.identifier_format == IdentifierFormat::Cpp && !is_cpp_namespace(&config.namespace) {
        return Err(BuildError::InvalidConfig {
            field: "namespace".to_string(),
            value: config.namespace.clone(),
            reason: "must be a C++ identifier, optionally joined with '::'".to_string(),
        });
    }

    for (field, name) in [
        ("files.atlas", &config.files.atlas),
        ("files.mapping", &config.files.mapping),
        ("files.registry", &config.files.registry),
    ] {
        if name.is_empty() {
            return Err(BuildError::InvalidConfig {
                field: field.to_string(),
                value: String::new(),
                reason: "file name must not be empty".to_string(),
            });
        }
    }

    Ok(layout)
}

fn is_cpp_namespace(namespace: &str) -> bool {
    !namespace.is_empty()
        && namespace.split("::").all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
                && !is_cpp_reserved(part)
        })
}
