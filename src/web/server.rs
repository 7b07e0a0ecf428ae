use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
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

use crate::catalog::store::SequenceCatalog;
use crate::cli::ServeArgs;
use crate::core::profile::BuyerHardwareProfile;
use crate::matching::engine::{MatchError, MatchingEngine};
use crate::matching::ranking::{RankingConfig, RankingQuery, SortKey};
use crate::utils::validation::{validate_buyer_profile, validate_sequence_id, ValidationError};

/// Security configuration constants to prevent `DoS` attacks
pub const MAX_BODY_SIZE: usize = 1024 * 1024; // 1MB
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const MAX_CONCURRENT_REQUESTS: usize = 100;

/// Shared application state
pub struct AppState {
    pub catalog: SequenceCatalog,
    pub ranking: RankingConfig,
}

impl AppState {
    pub fn new(catalog: SequenceCatalog) -> Self {
        Self {
            catalog,
            ranking: RankingConfig::default(),
        }
    }
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Body of `POST /api/compatibility/score`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub sequence_id: String,
    pub user_input: BuyerHardwareProfile,
}

/// Body of `POST /api/compatibility/sequences`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankRequest {
    pub user_input: BuyerHardwareProfile,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sort: Option<SortKey>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub min_compatibility_score: Option<f64>,
}

impl RankRequest {
    fn to_query(&self) -> RankingQuery {
        RankingQuery {
            category: self.category.clone(),
            sort: self.sort.unwrap_or_default(),
            page: self.page.unwrap_or(1),
            limit: self.limit,
            min_compatibility_score: self.min_compatibility_score.unwrap_or(0.0),
        }
    }
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    // Log detailed error server-side for debugging (not exposed to client)
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None, // Never expose internal details to prevent information disclosure
    }
}

fn error_response(status: StatusCode, error_type: &str, message: &str) -> Response {
    (
        status,
        Json(create_safe_error_response(error_type, message, None)),
    )
        .into_response()
}

fn validation_error_response(err: &ValidationError) -> Response {
    error_response(StatusCode::BAD_REQUEST, err.error_type(), &err.to_string())
}

fn rejection_response(rejection: &JsonRejection) -> Response {
    tracing::debug!("Rejected request body: {}", rejection.body_text());
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            "payload_too_large",
            "Request body exceeds the size limit",
        );
    }
    error_response(
        StatusCode::BAD_REQUEST,
        "invalid_request",
        "Request body is not valid JSON for this endpoint",
    )
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// Build the application routes with security headers, timeouts and limits.
///
/// Per-IP rate limiting needs the peer address, so it is added separately in
/// [`create_router`].
pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/catalog", get(catalog_handler))
        .route("/api/compatibility/score", post(score_handler))
        .route("/api/compatibility/sequences", post(rank_handler))
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
                // Request timeout to prevent slow client attacks
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(REQUEST_TIMEOUT_SECS),
                ))
                // Limit concurrent requests to prevent DOS
                .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
}

/// Create the full application router, including IP-based rate limiting.
///
/// # Errors
///
/// Returns an error if the rate limiter configuration is rejected.
pub fn create_router(catalog: SequenceCatalog) -> anyhow::Result<Router> {
    let state = Arc::new(AppState::new(catalog));

    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50) // Allow bursts of 50 requests
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?;

    Ok(build_app(state).layer(GovernorLayer {
        config: Arc::new(governor_conf),
    }))
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let catalog = SequenceCatalog::load(args.catalog.as_deref())?;
    tracing::info!("Loaded catalog with {} sequences", catalog.len());

    let app = create_router(catalog)?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting sequence-fit web server at http://{addr}");

    if args.open {
        if let Err(e) = open::that(format!("http://{addr}/api/catalog")) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "sequences": state.catalog.len(),
    }))
}

/// List the catalog without profile detail
async fn catalog_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let sequences: Vec<serde_json::Value> = state
        .catalog
        .sequences
        .iter()
        .map(|s| {
            serde_json::json!({
                "id": s.id,
                "title": s.title,
                "category": s.category,
                "priceCents": s.price_cents,
                "profileCount": s.profiles.len(),
            })
        })
        .collect();

    Json(serde_json::json!({
        "count": state.catalog.len(),
        "categories": state.catalog.categories(),
        "sequences": sequences,
    }))
}

/// Score every compatibility profile of one sequence against the buyer
async fn score_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Response {
    let start_time = std::time::Instant::now();

    let Json(request) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejection_response(&rejection),
    };

    let sequence_id = match validate_sequence_id(&request.sequence_id) {
        Ok(id) => id,
        Err(e) => return validation_error_response(&e),
    };

    if let Err(e) = validate_buyer_profile(&request.user_input) {
        return validation_error_response(&e);
    }

    let engine = MatchingEngine::with_config(&state.catalog, state.ranking.clone());
    match engine.score_by_id(&request.user_input, &sequence_id) {
        Ok(result) => {
            tracing::info!(
                sequence = %sequence_id,
                best = result.best_score.score.total_score,
                elapsed_ms = start_time.elapsed().as_millis(),
                "Scored sequence compatibility"
            );
            Json(result).into_response()
        }
        Err(MatchError::UnknownSequence(_)) => error_response(
            StatusCode::NOT_FOUND,
            "sequence_not_found",
            "Sequence not found",
        ),
        Err(MatchError::NoProfiles(_)) => error_response(
            StatusCode::NOT_FOUND,
            "no_compatibility_profiles",
            "Sequence has no compatibility profiles",
        ),
    }
}

/// Rank the catalog for a buyer with optional filters, ordering and paging
async fn rank_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RankRequest>, JsonRejection>,
) -> Response {
    let start_time = std::time::Instant::now();

    let Json(request) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejection_response(&rejection),
    };

    if let Err(e) = validate_buyer_profile(&request.user_input) {
        return validation_error_response(&e);
    }

    let engine = MatchingEngine::with_config(&state.catalog, state.ranking.clone());
    let page = engine.rank(&request.user_input, &request.to_query());

    tracing::info!(
        total = page.pagination.total,
        returned = page.sequences.len(),
        elapsed_ms = start_time.elapsed().as_millis(),
        "Ranked catalog by compatibility"
    );

    Json(page).into_response()
}
