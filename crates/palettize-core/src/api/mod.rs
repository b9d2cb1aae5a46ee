//! Public API for the palettize-core crate.
//!
//! This module provides the high-level API: the [`Ditherer`] builder and
//! the [`DitherError`] unified error type.

mod builder;
mod error;

pub use builder::Ditherer;
pub use error::DitherError;
