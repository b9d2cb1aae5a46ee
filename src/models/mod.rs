mod config;

pub use config::{OrderedScaleSetting, Settings};
