//! Documentation server command.

use std::path::PathBuf;

use anyhow::Result;
use pagewright_server::{DocsServer, ServerConfig};

use crate::config::Config;

/// Run the serve command.
pub async fn run(
    file_config: Config,
    port: Option<u16>,
    dir: Option<PathBuf>,
    open: bool,
) -> Result<()> {
    if let Some(dir) = &dir {
        if !dir.exists() {
            anyhow::bail!(
                "Directory not found: {}. Run 'pagewright build' first.",
                dir.display()
            );
        }
    }

    let config = ServerConfig {
        docs_dir: file_config.docs.dir,
        output_dir: dir,
        port: port.unwrap_or(file_config.server.port),
        host: file_config.server.host,
        open,
        title: file_config.docs.title,
    };

    DocsServer::new(config).start().await?;

    Ok(())
}
