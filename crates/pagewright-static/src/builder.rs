//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;

use crate::assets::AssetPipeline;
use crate::paths::url_segments;
use crate::pipeline::{PageRenderer, RenderError};
use crate::resolve::is_valid_segment;
use crate::templates::{build_navigation, Site, TemplateEngine};

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Source docs directory
    pub docs_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Minify CSS output
    pub minify: bool,

    /// Base URL for the site
    pub base_url: String,

    /// Site title
    pub title: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("../docs"),
            output_dir: PathBuf::from("dist"),
            minify: true,
            base_url: "/".to_string(),
            title: "Documentation".to_string(),
        }
    }
}

impl BuildConfig {
    /// Site values for templates, with the base URL normalised to end in `/`.
    pub fn site(&self) -> Site {
        let mut base_url = self.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Site {
            title: self.title.clone(),
            base_url,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read docs directory: {0}")]
    ReadError(#[source] RenderError),

    #[error("Failed to render {path}: {source}")]
    Render {
        path: String,
        #[source]
        source: RenderError,
    },

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    renderer: PageRenderer,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            renderer: PageRenderer::new(&config.docs_dir),
            templates: TemplateEngine::new(),
            config,
        }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Build the static site.
    ///
    /// Pages render in parallel; the first failing page aborts the build.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let paths = self
            .renderer
            .static_paths()
            .map_err(BuildError::ReadError)?
            .paths;

        tracing::info!(
            "Building {} pages from {}",
            paths.len(),
            self.config.docs_dir.display()
        );

        let site = self.config.site();

        paths
            .par_iter()
            .try_for_each(|url| self.build_page(&site, &paths, url))?;

        self.generate_assets()?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: paths.len(),
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Render one page and its props into `<out>/docs/<url>/`.
    fn build_page(&self, site: &Site, paths: &[String], url: &str) -> Result<(), BuildError> {
        let props = self
            .renderer
            .static_props(&url_segments(url))
            .map_err(|e| BuildError::Render {
                path: url.to_string(),
                source: e,
            })?;

        let nav = build_navigation(site, paths, url);
        let html = self
            .templates
            .render_props(site, &props, nav)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        let json =
            serde_json::to_string(&props).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let page_dir = self
            .page_dir(url)
            .ok_or_else(|| BuildError::WriteError(format!("Invalid page path: {}", url)))?;
        fs::create_dir_all(&page_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;
        fs::write(page_dir.join("index.html"), html)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;
        fs::write(page_dir.join("props.json"), json)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        tracing::debug!("Built {}", url);
        Ok(())
    }

    /// Output directory of the page at `url`.
    pub fn page_dir(&self, url: &str) -> Option<PathBuf> {
        page_dir(&self.config.output_dir, url)
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let css_path = self.config.output_dir.join(AssetPipeline::CSS_PATH);
        if let Some(parent) = css_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        fs::write(css_path, AssetPipeline::stylesheet(self.config.minify))
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }
}

/// Directory holding the pre-rendered files of the page at `url` under `output_dir`.
///
/// Returns `None` when a segment of `url` would leave the output directory.
pub fn page_dir(output_dir: &Path, url: &str) -> Option<PathBuf> {
    let segments = url_segments(url);
    if segments.is_empty() || !segments.iter().all(|s| is_valid_segment(s)) {
        return None;
    }

    Some(
        segments
            .into_iter()
            .fold(output_dir.join("docs"), |dir, segment| dir.join(segment)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_docs(docs: &Path) {
        fs::create_dir_all(docs.join("scripting")).unwrap();
        fs::write(
            docs.join("index.mdx"),
            r#"---
title: Home
---
# Welcome
"#,
        )
        .unwrap();
        fs::write(
            docs.join("scripting/SetTimer.md"),
            "---\ntitle: SetTimer\n---\nRuns {later}(#00ff00).\n",
        )
        .unwrap();
    }

    #[test]
    fn builds_simple_site() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        let out = temp.path().join("dist");
        write_docs(&docs);

        let config = BuildConfig {
            docs_dir: docs,
            output_dir: out.clone(),
            ..Default::default()
        };

        let builder = StaticBuilder::new(config);
        let result = builder.build().unwrap();

        assert_eq!(result.pages, 2);
        assert!(out.join("docs/index/index.html").exists());
        assert!(out.join("assets/main.css").exists());

        let html = fs::read_to_string(out.join("docs/scripting/SetTimer/index.html")).unwrap();
        assert!(html.contains("<title>SetTimer - Documentation</title>"));
        assert!(html.contains(r#"<span style="color: #00ff00">later</span>"#));
    }

    #[test]
    fn writes_props_json() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        let out = temp.path().join("dist");
        write_docs(&docs);

        StaticBuilder::new(BuildConfig {
            docs_dir: docs,
            output_dir: out.clone(),
            ..Default::default()
        })
        .build()
        .unwrap();

        let json = fs::read_to_string(out.join("docs/index/props.json")).unwrap();
        let props: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(props["data"]["title"], "Home");
        assert_eq!(props["source"]["toc"][0]["id"], "welcome");
    }

    #[test]
    fn fails_on_missing_docs_dir() {
        let temp = tempdir().unwrap();

        let builder = StaticBuilder::new(BuildConfig {
            docs_dir: temp.path().join("missing"),
            output_dir: temp.path().join("dist"),
            ..Default::default()
        });

        assert!(matches!(builder.build(), Err(BuildError::ReadError(_))));
    }

    #[test]
    fn page_error_aborts_build() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        fs::create_dir_all(&docs).unwrap();
        fs::write(docs.join("bad.mdx"), "<Badge />\n").unwrap();

        let builder = StaticBuilder::new(BuildConfig {
            docs_dir: docs,
            output_dir: temp.path().join("dist"),
            ..Default::default()
        });

        match builder.build() {
            Err(BuildError::Render { path, .. }) => assert_eq!(path, "/bad"),
            other => panic!("expected render error, got {:?}", other),
        }
    }

    #[test]
    fn normalises_base_url() {
        let config = BuildConfig {
            base_url: "/omp".to_string(),
            ..Default::default()
        };

        assert_eq!(config.site().base_url, "/omp/");
    }

    #[test]
    fn maps_urls_to_page_dirs() {
        assert_eq!(
            page_dir(Path::new("dist"), "/a/b"),
            Some(Path::new("dist").join("docs").join("a").join("b"))
        );
    }

    #[test]
    fn rejects_page_dirs_outside_output() {
        assert_eq!(page_dir(Path::new("dist"), "/../../private"), None);
        assert_eq!(page_dir(Path::new("dist"), "/a/./b"), None);
        assert_eq!(page_dir(Path::new("dist"), "/"), None);
    }
}
