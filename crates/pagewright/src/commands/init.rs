//! Initialize documentation in a project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    let root = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    scaffold(root, config_path, yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'pagewright serve' to start the documentation server.");

    Ok(())
}

/// Write the config and sample docs tree, keeping existing files unless `yes`.
fn scaffold(root: &Path, config_path: &Path, yes: bool) -> Result<()> {
    let docs_dir = root.join("docs");

    if docs_dir.exists() && !yes {
        tracing::warn!("docs/ directory already exists. Use --yes to overwrite.");
        return Ok(());
    }

    write_file(config_path, DEFAULT_CONFIG, yes)?;
    write_file(&docs_dir.join("index.mdx"), DEFAULT_INDEX, yes)?;
    write_file(
        &docs_dir.join("scripting/functions/SetTimer.md"),
        DEFAULT_FUNCTION_DOC,
        yes,
    )?;

    Ok(())
}

fn write_file(path: &Path, content: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());
    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# pagewright configuration

[docs]
# Source directory for documentation
dir = "docs"

# Output directory for built site
output = "dist"

# Site title
title = "My Documentation"

# Base URL (for deployment)
base_url = "/"

[build]
# Minify the stylesheet
minify = true

[server]
host = "127.0.0.1"
port = 3000
"#;

const DEFAULT_INDEX: &str = r#"---
title: Welcome
---

This is your documentation site, powered by **pagewright**.

## Writing pages

Every `.md` or `.mdx` file under `docs/` becomes a page. A file at
`docs/scripting/functions/SetTimer.md` is served at
`/docs/scripting/functions/SetTimer`.

:::tip
Write coloured text as {label}(#2e8555): the label is shown in that colour.
:::
"#;

const DEFAULT_FUNCTION_DOC: &str = r#"---
title: SetTimer
description: Sets a timer to call a function after an interval.
---

<Badge text="native" />

## Parameters

| Name     | Description                           |
| -------- | ------------------------------------- |
| interval | Interval in milliseconds              |
| repeat   | Whether the timer repeats             |

## Returns

The ID of the timer, used by {KillTimer}(#ff0000).

<Warning title="Precision">

Intervals below 10ms are not reliable.

</Warning>

:::note Related
See also `KillTimer`.
:::
"#;
