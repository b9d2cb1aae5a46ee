//! PNG decoding and encoding between files and [`RasterBuf`].

use std::io::Cursor;
use std::path::Path;

use palettize_core::{Raster, RasterBuf};

use crate::error::AppError;

/// Decode PNG bytes into an 8-bit raster.
///
/// Palette images and tRNS chunks are expanded, 16-bit samples are
/// stripped to 8 bits. The channel count follows the decoded color type:
/// gray, gray + alpha, RGB or RGBA.
pub fn decode_png(bytes: &[u8]) -> Result<RasterBuf, AppError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| AppError::ImageDecode(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| AppError::ImageDecode(e.to_string()))?;
    buf.truncate(info.buffer_size());

    if info.bit_depth != png::BitDepth::Eight {
        return Err(AppError::UnsupportedImage(format!(
            "bit depth {:?} after expansion",
            info.bit_depth
        )));
    }
    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Indexed => {
            return Err(AppError::UnsupportedImage(
                "indexed color was not expanded".to_string(),
            ))
        }
    };

    // Rows may be padded only for sub-byte depths, which EXPAND removes.
    RasterBuf::new(info.width as usize, info.height as usize, channels, buf)
        .map_err(|e| AppError::ImageDecode(e.to_string()))
}

/// Encode a raster as an 8-bit PNG with the matching color type.
pub fn encode_png(image: &RasterBuf) -> Result<Vec<u8>, AppError> {
    let color_type = match image.channels() {
        1 => png::ColorType::Grayscale,
        2 => png::ColorType::GrayscaleAlpha,
        3 => png::ColorType::Rgb,
        _ => png::ColorType::Rgba,
    };
    let width = u32::try_from(image.width())
        .map_err(|_| AppError::ImageEncode(format!("width {} too large", image.width())))?;
    let height = u32::try_from(image.height())
        .map_err(|_| AppError::ImageEncode(format!("height {} too large", image.height())))?;

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| AppError::ImageEncode(e.to_string()))?;
        writer
            .write_image_data(image.data())
            .map_err(|e| AppError::ImageEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Re-compress PNG bytes with oxipng, falling back to the input on failure.
pub fn optimize_png(bytes: Vec<u8>) -> Vec<u8> {
    match oxipng::optimize_from_memory(
        &bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) => {
            tracing::debug!(before = bytes.len(), after = optimized.len(), "Optimized PNG");
            optimized
        }
        Err(e) => {
            tracing::warn!(%e, "PNG optimization failed, keeping encoder output");
            bytes
        }
    }
}

/// Read and decode a PNG file.
pub fn load_png(path: &Path) -> Result<RasterBuf, AppError> {
    let bytes = std::fs::read(path)?;
    let image = decode_png(&bytes)?;
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        channels = image.channels(),
        "Decoded PNG"
    );
    Ok(image)
}

/// Encode and write a PNG file, optionally running oxipng first.
pub fn save_png(path: &Path, image: &RasterBuf, optimize: bool) -> Result<(), AppError> {
    let mut bytes = encode_png(image)?;
    if optimize {
        bytes = optimize_png(bytes);
    }
    std::fs::write(path, &bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote PNG");
    Ok(())
}
