//! Palette types and utilities
//!
//! This module provides the [`Palette`] type, its text loader, and the
//! error types for color parsing and palette construction.

mod error;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use palette::Palette;
