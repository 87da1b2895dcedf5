use axum::http::header;
use axum::{
    extract::{DefaultBodyLimit, Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::aggregate::engine::aggregate;
use crate::catalog::store::ThreatCatalog;
use crate::cli::ServeArgs;
use crate::core::types::ThreatId;

/// Shared application state
pub struct AppState {
    pub catalog: ThreatCatalog,
}

/// Error payload rendered inline in the affected panel by the front end
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
}

/// Query parameters for the details endpoint
#[derive(Deserialize)]
struct DetailsParams {
    /// Comma-joined threat identifiers, in selection order
    ids: Option<String>,
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the tokio runtime
/// cannot be created, or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    // One-time catalog load; a failure here is terminal, no retry
    let catalog = match (&args.catalog, &args.catalog_url) {
        (Some(path), _) => ThreatCatalog::load_from_file(path)?,
        (None, Some(url)) => ThreatCatalog::load_from_url(url)?,
        (None, None) => ThreatCatalog::load_embedded()?,
    };
    tracing::info!("loaded catalog with {} threats", catalog.len());

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args, catalog).await })
}

/// Create the application router with all routes and middleware configured.
#[allow(clippy::missing_panics_doc)] // Panics only on invalid governor config (constants are valid)
pub fn create_router(catalog: ThreatCatalog) -> Router {
    let state = Arc::new(AppState { catalog });

    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10)
        .burst_size(50)
        .finish()
        .unwrap();

    Router::new()
        .route("/", get(index_handler))
        .route("/api/threats", get(threats_handler))
        .route("/api/details", get(details_handler))
        // Static file routes
        .route("/static/css/styles.css", get(styles_css_handler))
        .route("/static/js/app.js", get(app_js_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Security headers for browser protection
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                // IP-based rate limiting to prevent abuse
                .layer(GovernorLayer {
                    config: Arc::new(governor_conf),
                })
                // Request timeout to prevent slow client attacks
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(30),
                ))
                .layer(ConcurrencyLimitLayer::new(100))
                .layer(DefaultBodyLimit::max(64 * 1024)),
        )
}

async fn run_server(args: ServeArgs, catalog: ThreatCatalog) -> anyhow::Result<()> {
    let app = create_router(catalog);

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting threat-browser web server at http://{addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Main page handler
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("templates/index.html"))
}

async fn styles_css_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        include_str!("static/css/styles.css"),
    )
}

async fn app_js_handler() -> impl IntoResponse {
    (
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        include_str!("static/js/app.js"),
    )
}

/// List endpoint: threat identifiers in catalog order
async fn threats_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let ids = state.catalog.sorted_ids();

    Json(serde_json::json!({
        "count": ids.len(),
        "threats": ids,
    }))
}

/// Details endpoint: pre-aggregated union for a comma-joined id set.
///
/// Unknown identifiers are skipped, never errors; an empty id set is the
/// one user-visible precondition and comes back as an inline 400 payload.
async fn details_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DetailsParams>,
) -> impl IntoResponse {
    let ids: Vec<ThreatId> = params
        .ids
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ThreatId::new)
        .collect();

    if ids.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Select at least one threat".to_string(),
                error_type: "empty_selection".to_string(),
            }),
        )
            .into_response();
    }

    let combined = aggregate(&ids, &state.catalog);
    Json(combined).into_response()
}
