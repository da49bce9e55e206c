//! Error types for the region-select-core library.
//!
//! This module provides granular error variants for the different failure
//! modes of an overlay activation. None of them is fatal to the host: the
//! selector always reaches a terminal outcome, these errors only describe
//! what went wrong on the way there.

use thiserror::Error;

/// Errors that can occur within the region-select-core library.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors (unparsable or out-of-range values).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The device scale was zero, negative or not a finite number.
    #[error("Invalid device scale: {0}")]
    InvalidScale(f64),

    /// Delivering an outcome or close request to the host failed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A converted rectangle has no area and must not be emitted.
    #[error("Invalid geometry: {width}x{height}")]
    InvalidGeometry {
        /// Physical width after conversion.
        width: u32,
        /// Physical height after conversion.
        height: u32,
    },

    /// The overlay was hidden while a drag was in progress.
    #[error("Stale selection session: overlay was hidden mid-drag")]
    StaleSession,

    /// Display enumeration failed.
    #[error("Display enumeration failed: {0}")]
    DisplayEnumeration(String),

    /// Requested display handle was not found.
    #[error("Display not found: handle {0}")]
    DisplayNotFound(i64),

    /// UI-related errors (viewport creation, event loop).
    #[error("UI error: {0}")]
    Ui(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a transport error with the given message.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Creates a display enumeration error with the given message.
    pub fn display(msg: impl Into<String>) -> Self {
        Self::DisplayEnumeration(msg.into())
    }

    /// Creates a UI error with the given message.
    pub fn ui(msg: impl Into<String>) -> Self {
        Self::Ui(msg.into())
    }
}

/// A convenient alias for Result with [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
