//! Documentation server implementation.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use pagewright_static::{
    build_navigation, page_dir, url_segments, AssetPipeline, PageProps, PageRenderer, Site,
    TemplateEngine,
};

use crate::error::ServerError;

/// Configuration for the documentation server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory containing docs
    pub docs_dir: PathBuf,

    /// Build output to serve pre-rendered pages from
    pub output_dir: Option<PathBuf>,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,

    /// Site title
    pub title: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("../docs"),
            output_dir: None,
            port: 3000,
            host: "127.0.0.1".to_string(),
            open: true,
            title: "Documentation".to_string(),
        }
    }
}

/// Shared server state.
pub struct AppState {
    renderer: PageRenderer,
    templates: TemplateEngine,
    site: Site,
    output_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            renderer: PageRenderer::new(&config.docs_dir),
            templates: TemplateEngine::new(),
            site: Site {
                title: config.title.clone(),
                base_url: "/".to_string(),
            },
            output_dir: config.output_dir.clone(),
        }
    }

    /// Props of the page at `url`.
    fn props(&self, url: &str) -> Result<PageProps, ServerError> {
        Ok(self.renderer.static_props(&url_segments(url))?)
    }

    /// Render the page at `url` into a full HTML document.
    fn render_page(&self, url: &str) -> Result<(StatusCode, String), ServerError> {
        let props = self.props(url)?;

        let status = if props.is_not_found() {
            tracing::warn!("No document for {}", url);
            StatusCode::NOT_FOUND
        } else {
            tracing::debug!("Rendered {} on demand", url);
            StatusCode::OK
        };

        let paths = match self.renderer.static_paths() {
            Ok(paths) => paths.paths,
            Err(e) => {
                tracing::warn!("{}", e);
                Vec::new()
            }
        };

        let nav = build_navigation(&self.site, &paths, url);
        let html = self
            .templates
            .render_props(&self.site, &props, nav)
            .map_err(|e| ServerError::Template(e.to_string()))?;

        Ok((status, html))
    }

    /// Pre-rendered HTML of the page at `url`, when a build output has it.
    async fn prebuilt(&self, url: &str) -> Option<String> {
        let out = self.output_dir.as_ref()?;
        let file = page_dir(out, url)?.join("index.html");
        tokio::fs::read_to_string(file).await.ok()
    }
}

/// Run `f` against the state on the blocking thread pool.
async fn blocking<T, F>(state: Arc<AppState>, f: F) -> Result<T, ServerError>
where
    T: Send + 'static,
    F: FnOnce(&AppState) -> Result<T, ServerError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&state))
        .await
        .map_err(|e| ServerError::Task(e.to_string()))?
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let assets = state
        .output_dir
        .as_ref()
        .map(|out| out.join("assets"))
        .filter(|dir| dir.is_dir());

    let app = Router::new()
        .route("/", get(|| async { Redirect::temporary("/docs/index") }))
        .route("/docs/{*path}", get(docs_handler))
        .route(
            "/api/props/{*path}",
            get(props_handler).layer(CorsLayer::permissive()),
        );

    let app = match assets {
        Some(dir) => app.nest_service("/assets", ServeDir::new(dir)),
        None => app.route("/assets/main.css", get(css_handler)),
    };

    app.with_state(state)
}

/// Documentation server.
pub struct DocsServer {
    config: ServerConfig,
}

impl DocsServer {
    /// Create a new documentation server.
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Start the server and run until it stops.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|_| {
                ServerError::InvalidAddress(format!("{}:{}", self.config.host, self.config.port))
            })?;

        let app = router(Arc::new(AppState::new(&self.config)));

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        tracing::info!("Serving docs from {}", self.config.docs_dir.display());
        tracing::info!("Listening on http://{}", addr);

        if self.config.open {
            let url = format!("http://{}/docs/index", addr);
            if let Err(e) = open::that(&url) {
                tracing::warn!("Failed to open browser: {}", e);
            }
        }

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

/// Handler for documentation pages.
async fn docs_handler(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Response, ServerError> {
    let url = format!("/{}", path.trim_matches('/'));

    if let Some(html) = state.prebuilt(&url).await {
        return Ok(Html(html).into_response());
    }

    let (status, html) = blocking(state, move |state| state.render_page(&url)).await?;
    Ok((status, Html(html)).into_response())
}

/// Handler for the props of a page.
async fn props_handler(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Response, ServerError> {
    let url = format!("/{}", path.trim_matches('/'));
    let props = blocking(state, move |state| state.props(&url)).await?;

    let status = if props.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };

    Ok((status, Json(props)).into_response())
}

/// Handler for the stylesheet when no build output is served.
async fn css_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css")],
        AssetPipeline::generate_css(),
    )
}
