//! Payment-callback redirect shim.
//!
//! The payment gateway always calls back to one fixed dev port. This service
//! listens there and forwards the browser, query string untouched, to the
//! port where the storefront is really running:
//!
//! - `GET`/`HEAD` on the callback path answers `200` with a short
//!   "processing" page that replaces itself with the target URL after a delay;
//! - every other request gets an immediate `302 Found`.
//!
//! The callback path matches case-insensitively, with or without one
//! trailing `/`.

pub mod page;

use crate::domain::ports::ShimSettings;
use crate::utils::error::{KitError, Result};
use axum::extract::{OriginalUri, State};
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Resolved, immutable settings shared by every request.
#[derive(Debug, Clone)]
pub struct ShimState {
    pub target_origin: String,
    pub callback_path: String,
    pub delay: Duration,
}

impl ShimState {
    pub fn from_settings<C: ShimSettings + ?Sized>(settings: &C) -> Self {
        Self {
            target_origin: settings.target_origin().trim_end_matches('/').to_string(),
            callback_path: settings.callback_path().to_string(),
            delay: settings.redirect_delay(),
        }
    }

    /// Same path on the target origin, query appended only when non-empty.
    pub fn callback_target(&self, path: &str, query: Option<&str>) -> String {
        match query {
            Some(q) if !q.is_empty() => format!("{}{}?{}", self.target_origin, path, q),
            _ => format!("{}{}", self.target_origin, path),
        }
    }

    /// Whether `path` is the callback path, ignoring ASCII case and one
    /// trailing slash on either side.
    pub fn is_callback(&self, path: &str) -> bool {
        fn trim(p: &str) -> &str {
            p.strip_suffix('/').unwrap_or(p)
        }
        trim(path).eq_ignore_ascii_case(trim(&self.callback_path))
    }

    /// Origin swap of the full request path and query, byte for byte.
    pub fn forward_target(&self, path_and_query: &str) -> String {
        format!("{}{}", self.target_origin, path_and_query)
    }
}

pub fn build_router<C: ShimSettings + ?Sized>(settings: &C) -> Router {
    let state = Arc::new(ShimState::from_settings(settings));

    // The configured path is matched in `dispatch`, never parsed as an axum route pattern.
    Router::new()
        .fallback(dispatch)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn dispatch(
    State(state): State<Arc<ShimState>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
) -> Response {
    let is_read = method == Method::GET || method == Method::HEAD;
    if is_read && state.is_callback(uri.path()) {
        payment_result(&state, &uri).into_response()
    } else {
        forward(&state, &uri).into_response()
    }
}

fn payment_result(state: &ShimState, uri: &Uri) -> Html<String> {
    let target = state.callback_target(uri.path(), uri.query());
    tracing::info!("💳 Payment result redirect: {} -> {}", uri, target);

    Html(page::render_processing_page(&target, state.delay))
}

fn forward(state: &ShimState, uri: &Uri) -> impl IntoResponse {
    let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    let target = state.forward_target(path_and_query);
    tracing::info!("🔄 General redirect: {} -> {}", path_and_query, target);

    (StatusCode::FOUND, [(header::LOCATION, target)])
}

pub async fn bind<C: ShimSettings + ?Sized>(settings: &C) -> Result<TcpListener> {
    let addr = format!("{}:{}", settings.listen_host(), settings.listen_port());
    TcpListener::bind(&addr)
        .await
        .map_err(|e| KitError::ServerError {
            message: format!("cannot listen on {}: {}", addr, e),
        })
}

/// Serves `router` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| KitError::ServerError {
            message: e.to_string(),
        })
}

/// Binds, logs the routing summary and serves until Ctrl+C / SIGTERM.
pub async fn run<C: ShimSettings + ?Sized>(settings: &C) -> Result<()> {
    let listener = bind(settings).await?;
    let local_addr = listener.local_addr()?;
    let state = ShimState::from_settings(settings);

    tracing::info!("🔄 Payment redirect server running on http://{}", local_addr);
    tracing::info!("📡 Redirecting to main app on {}", state.target_origin);
    tracing::info!(
        "💳 Payment results: {}{} -> {}{}",
        local_addr,
        state.callback_path,
        state.target_origin,
        state.callback_path
    );

    serve(listener, build_router(settings), shutdown_signal()).await?;

    tracing::info!("✅ Redirect server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("🛑 Received Ctrl+C, stopping redirect server"),
        _ = terminate => tracing::info!("🛑 Received SIGTERM, stopping redirect server"),
    }
}
