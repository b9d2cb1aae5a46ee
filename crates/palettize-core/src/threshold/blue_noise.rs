//! Precomputed 16×16 blue-noise threshold table.
//!
//! Byte values 0..=255, row-major. Values repeat, so this table is not a
//! permutation; only its spectral character matters.

/// Side length of [`BLUE_NOISE_16`].
pub const BLUE_NOISE_SIZE: usize = 16;

/// Row-major blue-noise thresholds.
#[rustfmt::skip]
pub static BLUE_NOISE_16: [u8; BLUE_NOISE_SIZE * BLUE_NOISE_SIZE] = [
    111,  53, 141, 160, 113, 194,  73, 176, 200,  53, 150,  94,  68,  42,  86, 252,
     31,  99, 238, 221,  37, 250, 147,  26,  42, 105, 219, 168, 193, 137,  21, 165,
    124, 176,  80,  22,  67, 172, 122,  87, 211, 130, 247,  29, 115,  57, 228, 211,
     45, 200, 150, 130, 188, 104,  56, 235, 159,  64,   6, 179,  78, 241, 146,  69,
      9, 244,  58,  91, 229,  13, 203,  33, 185, 101, 143, 205,  38,  92, 189, 106,
    222, 162, 114,  40, 213, 155, 138,  72, 245,  85, 225,  51, 125, 156,  24, 134,
     84, 194,  27, 254,  77,  49, 177, 114,  20,  45, 167, 104, 253, 175, 210,  62,
    100, 179, 143, 121, 171,  97, 235, 128, 214, 148, 198,  17,  73,  32, 238,  48,
    231,  37,  70,  20, 204,  61,  25, 191,  88,  62, 111, 220, 139,  87, 119, 152,
    207, 129, 243, 159, 223, 109,  39, 247, 163,  30, 233, 182,  55, 197, 169,  15,
    107, 187,  54,  90, 136, 185, 152,  79,  51, 133,  98, 156,  40, 249,  95,  65,
     24,  76, 218,  43,   0,  68, 227, 120, 195, 239,  11,  75, 126,  27, 226, 142,
    246, 173, 119, 199, 251, 103, 145,  21, 208, 172, 109, 217, 191,  83, 202, 162,
     34,  93, 149,  28, 165, 181,  58,  36,  90,  66,  46, 139, 166,  59, 116,  49,
    215, 232,  63, 127,  82, 237, 216, 117, 158, 255, 184,  33, 242, 102,  12, 132,
     75, 190,  17, 209,  47,  96,  15, 135, 230,  81,  19, 123, 224, 206, 154, 181,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_byte_range() {
        assert_eq!(BLUE_NOISE_16.iter().min(), Some(&0));
        assert_eq!(BLUE_NOISE_16.iter().max(), Some(&255));
    }

    #[test]
    fn test_table_is_roughly_balanced() {
        let mean = BLUE_NOISE_16.iter().map(|&v| v as f64).sum::<f64>() / 256.0;
        assert!((mean - 127.5).abs() < 10.0, "mean threshold {mean}");
    }
}
