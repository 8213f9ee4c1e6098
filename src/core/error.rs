//=========================================================================
// Game Errors
//=========================================================================
//
// Crate-level error returned to the host frame driver.
//
// Asset failures are recovered locally by the assets manager and only
// surface here when a caller used the raising `get` family. Everything a
// state callback reports is passed through untouched.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::assets::AssetError;

//=== GameError ===========================================================

/// Errors surfaced by the loop driver to the host.
#[derive(Debug, Error)]
pub enum GameError {
    /// An asset requested through [`AssetsManager::get`] could not be loaded.
    ///
    /// [`AssetsManager::get`]: crate::core::assets::AssetsManager::get
    #[error("Asset \"{name}\" couldn't be loaded")]
    AssetLoad {
        name: String,
        #[source]
        source: AssetError,
    },

    /// A state callback failed.
    #[error("State \"{state}\" failed: {message}")]
    State { state: &'static str, message: String },

    /// I/O failure outside of asset loading.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GameError {
    /// Convenience constructor for state callback failures.
    pub fn state(state: &'static str, message: impl Into<String>) -> Self {
        Self::State {
            state,
            message: message.into(),
        }
    }
}

/// Result type returned by state callbacks.
pub type StateResult = Result<(), GameError>;
