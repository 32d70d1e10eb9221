//! Read-only JSON API over the content store

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use crate::content::ArticleSummary;
use crate::error::StoreError;
use crate::store::ContentStore;
use crate::Site;

/// Store shared between handlers and the reload task
pub type SharedStore = Arc<RwLock<ContentStore>>;

/// Lookup failure rendered as a JSON 404
struct ApiError(StoreError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Build the API router
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/articles", get(list_handler))
        .route("/articles/:id", get(article_handler))
        .route("/articles/:id/excerpt", get(excerpt_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

async fn list_handler(State(store): State<SharedStore>) -> Response {
    let store = store.read().await;
    let summaries: Vec<ArticleSummary> = store.list().iter().map(|a| a.summary()).collect();
    Json(summaries).into_response()
}

async fn article_handler(State(store): State<SharedStore>, Path(id): Path<String>) -> Response {
    let store = store.read().await;
    match store.get(&id) {
        Ok(article) => Json(article.detail()).into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

async fn excerpt_handler(State(store): State<SharedStore>, Path(id): Path<String>) -> Response {
    let store = store.read().await;
    match store.get(&id) {
        Ok(article) => (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            ContentStore::excerpt(article).to_string(),
        )
            .into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

/// Start the API server
pub async fn start(site: &Site, ip: &str, port: u16, watch: bool) -> Result<()> {
    let store: SharedStore = Arc::new(RwLock::new(site.load_store()?));
    tracing::info!("Serving {} articles", store.read().await.len());

    let app = router(store.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}/articles", ip, port);
    if watch {
        println!("Watching {:?} for changes...", site.posts_dir);
    }
    println!("Press Ctrl+C to stop.");

    if watch {
        let site = site.clone();
        let store = store.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(site, store) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Watch the site directory, swapping in a fresh store when articles or the
/// config change
fn watch_and_reload(site: Site, store: SharedStore) -> Result<()> {
    // Events carry canonical paths
    let base_dir = site
        .base_dir
        .canonicalize()
        .unwrap_or_else(|_| site.base_dir.clone());
    let mut site = Site::with_config(base_dir, site.config);

    let (tx, rx) = std::sync::mpsc::channel();

    // Create debouncer to avoid multiple rapid reloads
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    // The posts directory may not exist yet, or may move with a config change
    debouncer
        .watcher()
        .watch(&site.base_dir, RecursiveMode::Recursive)?;
    tracing::debug!("Watching: {:?}", site.base_dir);

    if !site.posts_dir.starts_with(&site.base_dir) && site.posts_dir.exists() {
        debouncer
            .watcher()
            .watch(&site.posts_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", site.posts_dir);
    }

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let changed: Vec<_> = events
                    .iter()
                    .filter(|e| is_relevant(&site, &e.path))
                    .collect();
                if changed.is_empty() {
                    continue;
                }

                for event in &changed {
                    tracing::info!("File changed: {}", event.path.display());
                }

                reload_into(&mut site, &store);
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

/// Whether a changed path affects the loaded articles
fn is_relevant(site: &Site, path: &std::path::Path) -> bool {
    let path_str = path.to_string_lossy();
    if path_str.contains(".git") || path_str.contains(".DS_Store") || path_str.ends_with('~') {
        return false;
    }
    path.starts_with(&site.posts_dir) || path == site.config_path()
}

/// Re-read the config and load every article again
fn reload(site: &Site) -> Result<(Site, ContentStore)> {
    let fresh = Site::new(&site.base_dir)?;
    let store = fresh.load_store()?;
    Ok((fresh, store))
}

/// Reload into the shared store; on failure the previous articles stay
fn reload_into(site: &mut Site, store: &SharedStore) -> bool {
    match reload(site) {
        Ok((fresh_site, fresh)) => {
            let count = fresh.len();
            *store.blocking_write() = fresh;
            if fresh_site.posts_dir != site.posts_dir {
                tracing::info!("Posts directory is now {:?}", fresh_site.posts_dir);
            }
            *site = fresh_site;
            tracing::info!("Reloaded {} articles", count);
            true
        }
        Err(e) => {
            tracing::error!("Reload failed, keeping previous articles: {}", e);
            false
        }
    }
}
