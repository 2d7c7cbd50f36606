//! HTTP server for browsing and adding cafés.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Landing page |
//! | `GET`  | `/cafes` | Table of every café in the store |
//! | `GET`  | `/add` | Empty submission form |
//! | `POST` | `/add` | Validate, append, and redirect to `/cafes` |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! Invalid submissions are not errors: the form is re-rendered with `200 OK`
//! and a message next to each offending field, and nothing is written.
//! Store failures (missing or unwritable file) produce a generic `500` page;
//! the underlying error is logged, not shown.

use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::{Config, SecretKey};
use crate::csrf::CsrfTokens;
use crate::form::{CafeForm, CafeSubmission, FormErrors};
use crate::models::CafeRow;
use crate::pages;
use crate::rating::RatingChoices;
use crate::store::CsvStore;

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
struct AppState {
    store: CsvStore,
    /// Form rules and the rating choice table, built once at startup.
    form: Arc<CafeForm>,
    csrf: Arc<CsrfTokens>,
}

/// Build the application router.
///
/// The rating choices and form rules are constructed here, once, and shared
/// by every request.
pub fn build_router(config: &Config, secret: SecretKey) -> Router {
    let choices = Arc::new(RatingChoices::new());
    let state = AppState {
        store: CsvStore::from_config(config),
        form: Arc::new(CafeForm::new(choices)),
        csrf: Arc::new(CsrfTokens::new(secret, config.server.csrf_time_limit_secs)),
    };

    Router::new()
        .route("/", get(handle_index))
        .route("/cafes", get(handle_cafes))
        .route("/add", get(handle_add_form).post(handle_add_submit))
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the HTTP server.
///
/// Binds to `[server].bind` and serves until the process is terminated.
/// The secret must already have been loaded; see [`SecretKey::from_env`].
pub async fn run_server(config: &Config, secret: SecretKey) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let app = build_router(config, secret);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    tracing::info!(
        store = %config.store.path.display(),
        "Cafe server listening on http://{}",
        bind_addr
    );

    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

/// Internal error type that converts into a generic HTML error page.
struct AppError {
    status: StatusCode,
    message: String,
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!("request failed: {:#}", err);
        AppError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Something went wrong on our side. Please try again later.".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let title = self
            .status
            .canonical_reason()
            .unwrap_or("Error")
            .to_string();
        (self.status, Html(pages::error_page(&title, &self.message))).into_response()
    }
}

/// Run blocking store I/O off the async worker threads.
async fn blocking<T, F>(f: F) -> anyhow::Result<T>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .context("store task failed")?
}

// ============ GET / ============

async fn handle_index() -> Html<String> {
    Html(pages::index_page())
}

// ============ GET /cafes ============

async fn handle_cafes(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let store = state.store.clone();
    let rows: Vec<CafeRow> = blocking(move || store.list_all()?.collect()).await?;
    Ok(Html(pages::cafes_page(&rows)))
}

// ============ GET /add ============

async fn handle_add_form(State(state): State<AppState>) -> Html<String> {
    Html(pages::add_page(
        &state.form,
        &CafeSubmission::default(),
        &FormErrors::default(),
        &state.csrf.issue(),
    ))
}

// ============ POST /add ============

/// Handler for `POST /add`.
///
/// Checks the CSRF token and every field. Only a fully valid submission is
/// encoded and appended; the client is then redirected to `/cafes`.
async fn handle_add_submit(
    State(state): State<AppState>,
    Form(submission): Form<CafeSubmission>,
) -> Result<Response, AppError> {
    let csrf = state.csrf.verify(&submission.csrf_token);
    let outcome = state.form.submit(&submission);

    let errors = match (csrf, outcome) {
        (Ok(()), Ok(record)) => {
            let store = state.store.clone();
            let name = record.name.clone();
            blocking(move || store.append(&record)).await?;
            tracing::info!(cafe = %name, "added cafe");
            return Ok(Redirect::to("/cafes").into_response());
        }
        (Err(e), Ok(_)) => {
            let mut errors = FormErrors::default();
            errors.set_form_error(e.message());
            errors
        }
        (csrf, Err(mut errors)) => {
            if let Err(e) = csrf {
                errors.set_form_error(e.message());
            }
            errors
        }
    };

    tracing::info!(
        fields = ?errors.fields().map(|(f, _)| f).collect::<Vec<_>>(),
        form_error = errors.form_error().unwrap_or(""),
        "rejected cafe submission"
    );

    let html = pages::add_page(&state.form, &submission, &errors, &state.csrf.issue());
    Ok(Html(html).into_response())
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
