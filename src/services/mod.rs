mod pipeline;

pub use pipeline::{default_output_path, DitherPipeline, PipelineReport};
