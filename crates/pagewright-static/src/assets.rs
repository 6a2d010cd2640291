//! Stylesheet for generated documentation pages.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Public path of the stylesheet, relative to the site base URL.
    pub const CSS_PATH: &'static str = "assets/main.css";

    /// Generate the main CSS file.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Generate the main CSS file, minified when `minify` is set.
    ///
    /// Falls back to the unminified stylesheet if minification fails.
    pub fn stylesheet(minify: bool) -> String {
        let css = Self::generate_css();
        if !minify {
            return css;
        }

        match Self::minify_css(&css) {
            Ok(minified) => minified,
            Err(e) => {
                tracing::warn!("{}", e);
                css
            }
        }
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const DEFAULT_CSS: &str = r#"/* pagewright docs theme */

:root {
  --sidebar-width: 260px;
  --toc-width: 220px;
  --content-max-width: 820px;
  --background: #ffffff;
  --foreground: #1c1e21;
  --muted: #f5f6f7;
  --border: #dadde1;
  --primary: #2e8555;
  --note: #4b6cb7;
  --tip: #2e8555;
  --info: #2196f3;
  --caution: #e6a700;
  --warning: #e6a700;
  --danger: #e13238;
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: system-ui, -apple-system, sans-serif;
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
}

.layout {
  display: grid;
  grid-template-columns: var(--sidebar-width) 1fr var(--toc-width);
  min-height: 100vh;
}

/* Sidebar */
.sidebar {
  background: var(--muted);
  border-right: 1px solid var(--border);
  padding: 1.5rem;
  position: sticky;
  top: 0;
  height: 100vh;
  overflow-y: auto;
}

.nav-header {
  margin-bottom: 1.5rem;
}

.nav-logo {
  font-weight: 700;
  font-size: 1.125rem;
  color: var(--foreground);
  text-decoration: none;
}

.nav-list,
.nav-children {
  list-style: none;
  margin: 0;
  padding: 0;
}

.nav-children {
  padding-left: 1rem;
}

.nav-item a {
  display: block;
  padding: 0.25rem 0.5rem;
  border-radius: 4px;
  color: var(--foreground);
  text-decoration: none;
}

.nav-item.active > a {
  color: var(--primary);
  font-weight: 600;
}

/* Content */
.main {
  padding: 2rem 3rem;
  max-width: var(--content-max-width);
}

.content pre {
  background: var(--muted);
  border: 1px solid var(--border);
  border-radius: 6px;
  padding: 1rem;
  overflow-x: auto;
}

.content code {
  font-family: ui-monospace, SFMono-Regular, Menlo, monospace;
  font-size: 0.875em;
}

.content table {
  border-collapse: collapse;
}

.content th,
.content td {
  border: 1px solid var(--border);
  padding: 0.5rem 0.75rem;
}

/* Table of contents */
.toc {
  padding: 2rem 1rem;
  position: sticky;
  top: 0;
  height: 100vh;
  font-size: 0.875rem;
}

.toc h2 {
  font-size: 0.75rem;
  text-transform: uppercase;
}

.toc ul {
  list-style: none;
  padding: 0;
}

.toc-level-3 {
  padding-left: 0.75rem;
}

.toc-level-4 {
  padding-left: 1.5rem;
}

/* Admonitions */
.admonition {
  border-left: 4px solid var(--border);
  border-radius: 4px;
  background: var(--muted);
  padding: 0.75rem 1rem;
  margin: 1rem 0;
}

.admonition-heading h5 {
  margin: 0 0 0.25rem;
  font-weight: 700;
  text-transform: uppercase;
  font-size: 0.8125rem;
}

.admonition-note { border-color: var(--note); }
.admonition-tip { border-color: var(--tip); }
.admonition-info { border-color: var(--info); }
.admonition-caution { border-color: var(--caution); }
.admonition-warning { border-color: var(--warning); }
.admonition-danger { border-color: var(--danger); }

/* Components */
.callout {
  border: 1px solid var(--border);
  border-radius: 6px;
  padding: 0.75rem 1rem;
  margin: 1rem 0;
}

.callout-title,
.deprecated-title {
  margin: 0 0 0.25rem;
  font-weight: 700;
}

.callout-note { border-color: var(--note); }
.callout-warning { border-color: var(--warning); }

.deprecated {
  border: 1px solid var(--danger);
  border-radius: 6px;
  padding: 0.75rem 1rem;
  margin: 1rem 0;
}

.badge {
  display: inline-block;
  padding: 0 0.5rem;
  border-radius: 999px;
  background: var(--primary);
  color: #ffffff;
  font-size: 0.75rem;
  font-weight: 600;
}

/* Error page */
.error {
  padding: 4rem;
  text-align: center;
}

@media (max-width: 1024px) {
  .layout {
    grid-template-columns: var(--sidebar-width) 1fr;
  }

  .toc {
    display: none;
  }
}
"#;
