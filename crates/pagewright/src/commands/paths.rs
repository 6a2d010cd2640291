//! Static paths command.

use anyhow::{Context, Result};
use pagewright_static::PageRenderer;

use crate::config::Config;

/// Print every page path under the docs directory as JSON.
pub fn run(config: &Config) -> Result<()> {
    let renderer = PageRenderer::new(&config.docs.dir);
    let paths = renderer
        .static_paths()
        .with_context(|| format!("Failed to list {}", config.docs.dir.display()))?;

    println!("{}", serde_json::to_string_pretty(&paths)?);
    Ok(())
}
