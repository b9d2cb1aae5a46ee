//! Error types for palette operations

use thiserror::Error;

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// A character that is not a hex digit, including signs
    #[error("invalid hex digit '{0}'")]
    InvalidDigit(char),
}

/// Error returned when a palette cannot be built.
#[derive(Debug, Error)]
pub enum PaletteError {
    /// No colors were provided or none survived parsing
    #[error("palette cannot be empty")]
    Empty,
    /// The palette file could not be read
    #[error("failed to read palette file: {0}")]
    Io(#[from] std::io::Error),
}
