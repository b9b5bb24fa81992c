//! Scroll engine error types

use thiserror::Error;

/// Errors surfaced by configuration loading and checked accessors
///
/// Scrolling itself never fails: a surface in a degenerate state simply
/// does nothing.
#[derive(Error, Debug)]
pub enum ScrollError {
    /// The surface has no pan adapter attached
    #[error("No pan adapter attached to scroll surface")]
    MissingPan,

    /// A configuration value was rejected
    #[error("Invalid scroll configuration: {0}")]
    InvalidConfig(String),

    /// Failed to parse a TOML configuration document
    #[error("Failed to parse scroll configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Failed to read a configuration file
    #[error("Failed to read scroll configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for scroll engine operations
pub type Result<T> = std::result::Result<T, ScrollError>;
