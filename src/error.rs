//! Error handling for the atlas build
//!
//! Fatal conditions are `BuildError` values and abort the batch. Conditions the
//! build can survive are `BuildWarning` values; they are collected into the
//! stage reports and never returned as `Err`.

use std::fmt;
use std::path::{Path, PathBuf};

/// Fatal error type for the atlas build
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    // Configuration Errors
    #[error("Invalid config: {field} = {value} ({reason})")]
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Unsupported texture source: {}", .path.display())]
    UnsupportedSource { path: PathBuf },

    // Packing Errors
    #[error("No textures supplied to the atlas packer")]
    EmptyInput,

    #[error("Texture '{name}' is {width}x{height}, expected {expected}x{expected}")]
    TextureSizeMismatch {
        name: String,
        width: u32,
        height: u32,
        expected: u32,
    },

    // System Errors
    #[error("IO error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Archive error for {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Serialization error in {context}: {source}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] toml::de::Error),
}

/// Type alias for Results in the atlas build
pub type BuildResult<T> = Result<T, BuildError>;

impl From<std::io::Error> for BuildError {
    fn from(source: std::io::Error) -> Self {
        BuildError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

impl From<serde_json::Error> for BuildError {
    fn from(source: serde_json::Error) -> Self {
        BuildError::Serialization {
            context: "json".to_string(),
            source,
        }
    }
}

/// Non-fatal conditions reported at the end of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    /// More images than grid slots; the names after the cut were not placed
    CapacityExceeded {
        capacity: usize,
        supplied: usize,
        dropped: Vec<String>,
    },
    /// A catalog face references a texture that is not in the atlas
    MissingTexture {
        entity: String,
        face: String,
        texture: String,
    },
    /// A source entry could not be turned into a texture
    SkippedTexture { entry: String, reason: String },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildWarning::CapacityExceeded {
                capacity,
                supplied,
                dropped,
            } => write!(
                f,
                "Too many textures ({}) for atlas capacity {}; {} dropped",
                supplied,
                capacity,
                dropped.len()
            ),
            BuildWarning::MissingTexture {
                entity,
                face,
                texture,
            } => write!(
                f,
                "Texture '{}' not found for {}.{}",
                texture, entity, face
            ),
            BuildWarning::SkippedTexture { entry, reason } => {
                write!(f, "Skipped texture {}: {}", entry, reason)
            }
        }
    }
}

/// Extension trait for attaching a path to I/O errors
pub trait ErrorContext<T> {
    fn with_path(self, path: &Path) -> BuildResult<T>;
}

impl<T> ErrorContext<T> for Result<T, std::io::Error> {
    fn with_path(self, path: &Path) -> BuildResult<T> {
        self.map_err(|source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
