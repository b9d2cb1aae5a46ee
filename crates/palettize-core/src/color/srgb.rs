//! Encoded sRGB color type and the transfer curve.
//!
//! The transfer constants are a refit of the IEC 61966-2-1 curve whose two
//! segments meet exactly at the threshold, which keeps the encode/decode
//! round trip reproducible to the last few ulps.

use std::str::FromStr;

use super::linear_rgb::LinearRgb;
use crate::palette::ParseColorError;

/// Exponent of the power segment.
pub const GAMMA: f64 = 2.4125093745073549;
/// Offset of the power segment.
pub const OFFSET: f64 = 0.056317370387926696;
/// Slope of the linear segment.
pub const SLOPE: f64 = 12.920750283132739;
/// Linear-light value where the two segments meet.
pub const LINEAR_THRESHOLD: f64 = 0.0030857681800844569;
/// Encoded value where the two segments meet (`SLOPE * LINEAR_THRESHOLD`).
pub const ENCODED_THRESHOLD: f64 = 0.039870440086508217;

/// Decode one encoded channel to linear light.
#[inline]
pub fn decode_channel(s: f64) -> f64 {
    if s <= ENCODED_THRESHOLD {
        s / SLOPE
    } else {
        ((s + OFFSET) / (1.0 + OFFSET)).powf(GAMMA)
    }
}

/// Encode one linear-light channel.
#[inline]
pub fn encode_channel(l: f64) -> f64 {
    if l <= LINEAR_THRESHOLD {
        SLOPE * l
    } else {
        (1.0 + OFFSET) * l.powf(1.0 / GAMMA) - OFFSET
    }
}

/// A color in gamma-encoded sRGB.
///
/// Components are nominally in `0.0..=1.0`. Values are not clamped on
/// construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    /// Red channel
    pub r: f64,
    /// Green channel
    pub g: f64,
    /// Blue channel
    pub b: f64,
}

impl Srgb {
    /// Create a new Srgb color from float values.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create an Srgb color from 8-bit values.
    ///
    /// # Example
    /// ```
    /// use palettize_core::Srgb;
    /// let red = Srgb::from_u8(255, 0, 0);
    /// assert_eq!(red.r, 1.0);
    /// ```
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
        }
    }

    /// Convert to `[R, G, B]` bytes, rounding and clamping to `0..=255`.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [to_byte(self.r), to_byte(self.g), to_byte(self.b)]
    }

    /// True when all three channels are numerically equal.
    #[inline]
    pub fn is_gray(self) -> bool {
        self.r == self.g && self.g == self.b
    }

    /// True when every channel lies in `[0, 1]`.
    #[inline]
    pub fn in_gamut(self) -> bool {
        (0.0..=1.0).contains(&self.r)
            && (0.0..=1.0).contains(&self.g)
            && (0.0..=1.0).contains(&self.b)
    }

    #[inline]
    pub(crate) fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    pub(crate) fn from_array(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// Round and clamp a unit value to a byte.
#[inline]
pub(crate) fn to_byte(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

impl From<LinearRgb> for Srgb {
    fn from(linear: LinearRgb) -> Self {
        if linear.is_gray() {
            let v = encode_channel(linear.r);
            return Self::new(v, v, v);
        }
        Self {
            r: encode_channel(linear.r),
            g: encode_channel(linear.g),
            b: encode_channel(linear.b),
        }
    }
}

impl FromStr for Srgb {
    type Err = ParseColorError;

    /// Parse a hex color: `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB`.
    ///
    /// ```
    /// use palettize_core::Srgb;
    ///
    /// let white: Srgb = "#FFFFFF".parse().unwrap();
    /// assert_eq!(white.r, 1.0);
    ///
    /// let red: Srgb = "f00".parse().unwrap();
    /// assert_eq!(red.g, 0.0);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.is_ascii() || !matches!(hex.len(), 3 | 6) {
            return Err(ParseColorError::InvalidLength);
        }

        let mut digits = [0u8; 6];
        for (slot, c) in digits.iter_mut().zip(hex.chars()) {
            *slot = c
                .to_digit(16)
                .ok_or(ParseColorError::InvalidDigit(c))? as u8;
        }

        match hex.len() {
            6 => Ok(Self::from_u8(
                digits[0] * 16 + digits[1],
                digits[2] * 16 + digits[3],
                digits[4] * 16 + digits[5],
            )),
            _ => Ok(Self::from_u8(digits[0] * 17, digits[1] * 17, digits[2] * 17)),
        }
    }
}
