//! Crate-level error types.

use std::fmt;

use crate::resource::LoadError;

/// Errors produced by the femview crate.
#[derive(Debug)]
pub enum ViewError {
    /// Degenerate frustum or camera parameters (fov out of range,
    /// `near >= far`, `eye == target`, non-positive scale).
    Configuration(String),
    /// Zero-length normalization, parallel basis vectors or a singular
    /// matrix.
    DegenerateGeometry(String),
    /// An external resource could not be loaded.
    ResourceLoad(LoadError),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(msg) => {
                write!(f, "invalid configuration: {msg}")
            }
            Self::DegenerateGeometry(msg) => {
                write!(f, "degenerate geometry: {msg}")
            }
            Self::ResourceLoad(e) => write!(f, "resource load error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for ViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ResourceLoad(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LoadError> for ViewError {
    fn from(e: LoadError) -> Self {
        Self::ResourceLoad(e)
    }
}

impl From<std::io::Error> for ViewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
