//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`GiantError`] covers every way the scene can fail to
//! come up:
//! - Asset fetching and glTF decoding errors
//! - Malformed assets (missing sea mesh, too few animation clips)
//! - Invalid configuration
//! - Missing DOM elements and JS-side failures on the web
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, GiantError>`.
//!
//! ```rust,ignore
//! use atlas_giant::errors::{GiantError, Result};
//!
//! fn load_asset() -> Result<()> {
//!     // Operations that may fail return Result
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the giant scene.
///
/// Every variant except [`GiantError::Render`] is a startup failure: once the
/// frame loop is running the only thing that can go wrong is the renderer.
#[derive(Error, Debug)]
pub enum GiantError {
    // ========================================================================
    // I/O & Network Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The requested asset was not found.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// HTTP response error with status code.
    #[error("HTTP response error for {url}: status {status}")]
    HttpStatus {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    // ========================================================================
    // Format & Parsing Errors
    // ========================================================================
    /// glTF parsing or loading error.
    #[error("glTF error: {0}")]
    Gltf(String),

    /// JSON parsing error (configuration files).
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // Asset Content Errors
    // ========================================================================
    /// The asset has no scene to instantiate.
    #[error("glTF asset contains no scene")]
    EmptyScene,

    /// The named mesh node the sea animation drives is absent.
    #[error("Mesh node '{0}' not found in loaded scene")]
    MeshNotFound(String),

    /// The asset carries fewer animation clips than the scene plays.
    #[error("Asset has {found} animation clips, expected at least {expected}")]
    NotEnoughClips {
        /// Number of clips the scene plays
        expected: usize,
        /// Number of clips present in the asset
        found: usize,
    },

    // ========================================================================
    // Configuration & Host Errors
    // ========================================================================
    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A required page element is missing.
    #[error("Missing page element: #{0}")]
    MissingElement(String),

    /// Renderer backend failure.
    #[error("Render error: {0}")]
    Render(String),

    /// WASM-specific error.
    #[cfg(target_arch = "wasm32")]
    #[error("WASM error: {0}")]
    Wasm(String),
}

// ============================================================================
// Convenient conversion implementations
// ============================================================================

impl From<gltf::Error> for GiantError {
    fn from(err: gltf::Error) -> Self {
        GiantError::Gltf(err.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for GiantError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        GiantError::Wasm(format!("{value:?}"))
    }
}

/// Alias for `Result<T, GiantError>`.
pub type Result<T> = std::result::Result<T, GiantError>;
