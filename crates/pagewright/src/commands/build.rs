//! Static site build command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use pagewright_static::{BuildConfig, StaticBuilder};

use crate::config::Config;

/// Run the build command.
pub async fn run(file_config: Config, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Building static site...");

    let config = BuildConfig {
        docs_dir: file_config.docs.dir,
        output_dir: output.unwrap_or(file_config.docs.output),
        minify: minify.unwrap_or(file_config.build.minify),
        base_url: file_config.docs.base_url,
        title: file_config.docs.title,
    };

    let result = tokio::task::spawn_blocking(move || StaticBuilder::new(config).build())
        .await
        .context("Build task failed")??;

    tracing::info!(
        "Built {} pages in {}ms",
        result.pages,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
