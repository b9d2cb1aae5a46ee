use std::path::PathBuf;

use palettize_core::DitherError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),

    #[error("Image encode error: {0}")]
    ImageEncode(String),

    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Dither error: {0}")]
    Dither(#[from] DitherError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unknown settings format for {0} (expected .json, .yaml or .yml)")]
    UnknownFormat(PathBuf),

    #[error("Invalid JSON settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML settings: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
