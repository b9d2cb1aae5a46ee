//! Palettize - reduce images to a fixed palette
//!
//! File-level front end for `palettize-core`: settings files, PNG I/O and
//! the load-dither-save pipeline. This library exposes modules for
//! integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
