use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use backend_client::BackendClient;
use clap::Parser;
use serde::Serialize;
use shared::error::{ApiError, ErrorCode};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;
mod templates;
mod view;

use app_state::AppState;
use config::{load_settings, Cli};
use templates::{Page, TemplateRegistry};
use view::{build_index_view, build_scheduler_view};

type PageResult = Result<Html<String>, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = load_settings(&cli)?;

    let templates = TemplateRegistry::load(&settings.template_dir).with_context(|| {
        format!(
            "failed to load templates from '{}'",
            settings.template_dir.display()
        )
    })?;
    let backend = BackendClient::new(settings.backend_url.clone(), settings.backend_timeout())?;

    let state = AppState {
        backend: Arc::new(backend),
        templates: Arc::new(templates),
        backend_url: settings.backend_url.clone(),
    };
    let app = build_router(state);

    let addr: SocketAddr = settings
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.bind_addr))?;
    info!(
        %addr,
        backend_url = %settings.backend_url,
        timeout_secs = settings.backend_timeout_secs,
        "frontend listening"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/scheduler", get(scheduler))
        .route("/healthz", get(healthz))
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn index(State(state): State<AppState>) -> PageResult {
    let view = build_index_view(state.backend.as_ref(), &state.backend_url)
        .await
        .map_err(|e| (e.http_status(), Json(ApiError::from(&e))))?;
    render_page(&state, Page::Index, &view)
}

async fn scheduler(State(state): State<AppState>) -> PageResult {
    let view = build_scheduler_view(&state.backend_url);
    render_page(&state, Page::Scheduler, &view)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new(ErrorCode::NotFound, "page not found")),
    )
}

fn render_page<S: Serialize>(state: &AppState, page: Page, view: &S) -> PageResult {
    state.templates.render(page, view).map(Html).map_err(|e| {
        error!(error = %e, "template render failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::new(ErrorCode::Internal, e.to_string())),
        )
    })
}

#[cfg(test)]
#[path = "tests/test_support.rs"]
mod test_support;

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
