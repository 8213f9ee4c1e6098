//! Error types for asset loading.

use thiserror::Error;

use super::AssetKind;

/// Boxed error reported by a resource factory.
pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

/// Why an asset could not be produced.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The asset source has no entry with this name.
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// The asset exists but could not be read.
    #[error("Failed to read asset '{name}'")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The backend rejected the asset's contents.
    #[error("Failed to decode {kind} '{name}'")]
    Decode {
        name: String,
        kind: AssetKind,
        #[source]
        source: BackendError,
    },

    /// The backend cannot produce this kind of resource.
    #[error("Unsupported asset type {kind} for '{name}'")]
    Unsupported { name: String, kind: AssetKind },

    /// The name is already cached under a different kind.
    #[error("No conversion: '{name}' is loaded as {cached}, requested {requested}")]
    TypeMismatch {
        name: String,
        cached: AssetKind,
        requested: AssetKind,
    },

    /// A temporary copy for a streamed asset could not be written.
    #[error("Failed to stage temporary file for '{name}'")]
    TempFile {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl AssetError {
    /// True for cache type conflicts, which are lookups rather than load failures.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }
}
