pub mod consts;
mod model;

pub use model::PipelineConfig;
