pub mod fetch;
pub mod merge;
pub mod render;
