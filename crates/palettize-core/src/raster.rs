//! Raster access: the byte-level image interface the engines work on.
//!
//! The core never decodes files. Callers hand it anything implementing
//! [`Raster`]; [`RasterBuf`] is the owned implementation used by the CLI and
//! the tests.

use thiserror::Error;

use crate::color::{Color, MathMode};

/// Interleaved 8-bit image storage.
///
/// Channel layouts: 1 = gray, 2 = gray + alpha, 3 = RGB, 4 = RGBA. Byte
/// `index` addresses the flat, row-major, interleaved buffer.
pub trait Raster {
    /// Width in pixels.
    fn width(&self) -> usize;
    /// Height in pixels.
    fn height(&self) -> usize;
    /// Channels per pixel, 1 to 4.
    fn channels(&self) -> usize;
    /// Byte at flat `index`.
    fn get(&self, index: usize) -> u8;
    /// Overwrite the byte at flat `index`.
    fn set(&mut self, index: usize, value: u8);

    /// True for gray and gray + alpha images.
    #[inline]
    fn is_achromatic(&self) -> bool {
        self.channels() <= 2
    }

    /// True when the layout carries an alpha channel.
    #[inline]
    fn has_alpha(&self) -> bool {
        matches!(self.channels(), 2 | 4)
    }

    /// Flat index of the first byte of pixel `(x, y)`.
    #[inline]
    fn pixel_offset(&self, x: usize, y: usize) -> usize {
        (y * self.width() + x) * self.channels()
    }
}

/// Error returned when raster dimensions and data disagree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    /// Channel count outside 1..=4
    #[error("unsupported channel count {0} (expected 1 to 4)")]
    Channels(usize),
    /// Buffer length does not match `width * height * channels`
    #[error("buffer holds {actual} bytes, expected {expected}")]
    Length {
        /// `width * height * channels`
        expected: usize,
        /// Actual buffer length
        actual: usize,
    },
}

/// An owned raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuf {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl RasterBuf {
    /// Wrap interleaved bytes.
    ///
    /// # Errors
    ///
    /// [`RasterError`] if `channels` is outside 1..=4 or `data` has the
    /// wrong length.
    pub fn new(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Result<Self, RasterError> {
        if !(1..=4).contains(&channels) {
            return Err(RasterError::Channels(channels));
        }
        let expected = width * height * channels;
        if data.len() != expected {
            return Err(RasterError::Length {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Image filled with one pixel value (`pixel.len()` is the channel count).
    ///
    /// # Errors
    ///
    /// As [`RasterBuf::new`].
    pub fn filled(width: usize, height: usize, pixel: &[u8]) -> Result<Self, RasterError> {
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take(width * height * pixel.len())
            .collect();
        Self::new(width, height, pixel.len(), data)
    }

    /// Copy any raster into an owned buffer.
    pub fn copy_from<R: Raster + ?Sized>(raster: &R) -> Self {
        let len = raster.width() * raster.height() * raster.channels();
        Self {
            width: raster.width(),
            height: raster.height(),
            channels: raster.channels(),
            data: (0..len).map(|i| raster.get(i)).collect(),
        }
    }

    /// The interleaved bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume into the interleaved bytes.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

impl Raster for RasterBuf {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    fn get(&self, index: usize) -> u8 {
        self.data[index]
    }

    #[inline]
    fn set(&mut self, index: usize, value: u8) {
        self.data[index] = value;
    }
}

/// Decode the pixel at `(x, y)`.
///
/// Gray layouts broadcast the single value; layouts without alpha read as
/// opaque.
pub fn read_color<R: Raster + ?Sized>(raster: &R, x: usize, y: usize) -> Color {
    let i = raster.pixel_offset(x, y);
    match raster.channels() {
        1 => {
            let v = raster.get(i);
            Color::from_rgba8(v, v, v, 255)
        }
        2 => {
            let v = raster.get(i);
            Color::from_rgba8(v, v, v, raster.get(i + 1))
        }
        3 => Color::from_rgba8(raster.get(i), raster.get(i + 1), raster.get(i + 2), 255),
        _ => Color::from_rgba8(
            raster.get(i),
            raster.get(i + 1),
            raster.get(i + 2),
            raster.get(i + 3),
        ),
    }
}

/// Decode every pixel, row-major.
pub fn read_colors<R: Raster + ?Sized>(raster: &R) -> Vec<Color> {
    let mut out = Vec::with_capacity(raster.width() * raster.height());
    for y in 0..raster.height() {
        for x in 0..raster.width() {
            out.push(read_color(raster, x, y));
        }
    }
    out
}

/// Encode `color` into `out`, whose length is the channel count.
///
/// Gray layouts store the red channel.
#[inline]
pub fn encode_pixel(color: &Color, out: &mut [u8]) {
    let [r, g, b, a] = color.to_rgba8();
    match out.len() {
        1 => out[0] = r,
        2 => {
            out[0] = r;
            out[1] = a;
        }
        3 => out.copy_from_slice(&[r, g, b]),
        _ => out[..4].copy_from_slice(&[r, g, b, a]),
    }
}

/// Encode `color` into pixel `(x, y)`.
pub fn write_color<R: Raster + ?Sized>(raster: &mut R, x: usize, y: usize, color: &Color) {
    let mut bytes = [0u8; 4];
    let channels = raster.channels();
    encode_pixel(color, &mut bytes[..channels]);
    let i = raster.pixel_offset(x, y);
    for (c, &byte) in bytes[..channels].iter().enumerate() {
        raster.set(i + c, byte);
    }
}

/// Convert to gray (or gray + alpha) using [`Color::lightness`] in `mode`.
///
/// Already-gray rasters are copied unchanged.
pub fn to_grayscale<R: Raster + ?Sized>(raster: &R, mode: MathMode) -> RasterBuf {
    if raster.is_achromatic() {
        return RasterBuf::copy_from(raster);
    }

    let channels = if raster.has_alpha() { 2 } else { 1 };
    let mut data = Vec::with_capacity(raster.width() * raster.height() * channels);
    let mut pixel = [0u8; 2];
    for y in 0..raster.height() {
        for x in 0..raster.width() {
            let gray = read_color(raster, x, y).to_grayscale(mode);
            encode_pixel(&gray, &mut pixel[..channels]);
            data.extend_from_slice(&pixel[..channels]);
        }
    }
    RasterBuf {
        width: raster.width(),
        height: raster.height(),
        channels,
        data,
    }
}
