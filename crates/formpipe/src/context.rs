//! Global context for CLI commands

use anyhow::Result;
use std::env;

use formpipe_core::config::PipelineConfig;

/// Context shared by every command: the resolved pipeline layout
pub struct Context {
    pub config: PipelineConfig,
    pub verbose: bool,
}

impl Context {
    /// Build a context from the working directory
    ///
    /// Reads `formpipe.toml` if one exists, otherwise the fixed
    /// default layout. All paths are rooted at the working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed
    pub fn new(verbose: bool) -> Result<Self> {
        let cwd = env::current_dir()?;
        let config = PipelineConfig::load_or_default(&cwd)?;

        Ok(Self { config, verbose })
    }
}
