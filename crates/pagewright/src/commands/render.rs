//! Single page render command.

use anyhow::{Context, Result};
use pagewright_static::{url_segments, PageRenderer};

use crate::config::Config;

/// Print the props of the page at `path` as JSON.
///
/// A missing page prints the not-found props and still succeeds.
pub fn run(config: &Config, path: &str) -> Result<()> {
    let renderer = PageRenderer::new(&config.docs.dir);
    let props = renderer
        .static_props(&url_segments(path))
        .with_context(|| format!("Failed to render {}", path))?;

    if props.is_not_found() {
        tracing::warn!("No document for {}", path);
    }

    println!("{}", serde_json::to_string_pretty(&props)?);
    Ok(())
}
