mod png_io;

pub use png_io::{decode_png, encode_png, load_png, optimize_png, save_png};
