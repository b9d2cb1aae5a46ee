//! Test fixtures: palettes and PNG files on disk.

use std::path::{Path, PathBuf};

use palettize::rendering;
use palettize_core::RasterBuf;

/// Palette files used across tests
pub mod palettes {
    /// Black and white
    pub const BW: &str = "000000\nffffff\n";

    /// Six-color e-paper style palette
    pub const SPECTRA6: &str = "000000\nffffff\nff0000\n00ff00\n0000ff\nffff00\n";
}

/// Write a palette file into `dir`.
pub fn write_palette(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("palette.txt");
    std::fs::write(&path, text).unwrap();
    path
}

/// Write an image as PNG into `dir`.
pub fn write_png(dir: &Path, name: &str, image: &RasterBuf) -> PathBuf {
    let path = dir.join(name);
    rendering::save_png(&path, image, false).unwrap();
    path
}

/// RGB gradient: red rises left to right, green top to bottom, blue fixed.
pub fn rgb_gradient(width: usize, height: usize) -> RasterBuf {
    let data = (0..height)
        .flat_map(|y| {
            (0..width).flat_map(move |x| {
                [
                    (x * 255 / (width - 1).max(1)) as u8,
                    (y * 255 / (height - 1).max(1)) as u8,
                    96,
                ]
            })
        })
        .collect();
    RasterBuf::new(width, height, 3, data).unwrap()
}

/// Parse palette text into RGB byte triples.
pub fn palette_bytes(text: &str) -> Vec<[u8; 3]> {
    text.lines()
        .filter(|l| !l.is_empty())
        .map(|l| {
            let v = u32::from_str_radix(l, 16).unwrap();
            [(v >> 16) as u8, (v >> 8) as u8, v as u8]
        })
        .collect()
}
