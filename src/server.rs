use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, warn};

use crate::catalog::CatalogSeed;
use crate::config::Config;
use crate::roadmap::{DirectionScore, RoadmapResult};
use crate::store::{CatalogStore, RoadmapInputs};

#[derive(Clone)]
struct ApiState {
    config: Config,
    db_path: PathBuf,
}

#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    ok: bool,
    error: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    fn internal(error: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorBody {
            ok: false,
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct ScoresResponse {
    user_id: String,
    directions: Vec<DirectionScore>,
}

pub async fn run_server(config: Config, bind: SocketAddr) -> Result<()> {
    let db_path = config.resolved_db_path();
    if let Some(catalog_path) = config.resolved_catalog_path() {
        let seed = CatalogSeed::from_path(&catalog_path)?;
        let mut store = CatalogStore::open(&db_path)?;
        store.seed(&seed, false)?;
        info!("seeded catalog from {}", catalog_path.display());
    } else {
        CatalogStore::open(&db_path)?;
    }

    let app = router(ApiState { config, db_path });
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("REST API listening on http://{bind}");
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/v1/roadmap", get(roadmap))
        .route("/v1/roadmap/scores", get(scores))
        .route("/v1/config", get(show_config))
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<ApiResponse<HealthResponse>> {
    ok(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn show_config(State(state): State<ApiState>) -> Json<ApiResponse<Config>> {
    ok(state.config)
}

// Bare roadmap document, no `ok`/`data` envelope.
async fn roadmap(
    State(state): State<ApiState>,
    headers: HeaderMap,
) -> std::result::Result<Json<RoadmapResult>, ApiError> {
    let (user_id, inputs) = load_user_inputs(&state, &headers)?;
    let result = inputs.compute();
    debug!(
        user_id = %user_id,
        steps = result.steps.len(),
        current = ?result.current_group_id,
        "roadmap computed"
    );
    Ok(Json(result))
}

async fn scores(
    State(state): State<ApiState>,
    headers: HeaderMap,
) -> std::result::Result<Json<ApiResponse<ScoresResponse>>, ApiError> {
    let (user_id, inputs) = load_user_inputs(&state, &headers)?;
    Ok(ok(ScoresResponse {
        directions: inputs.ranked_directions(),
        user_id,
    }))
}

fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse { ok: true, data })
}

fn authenticated_user(
    state: &ApiState,
    headers: &HeaderMap,
) -> std::result::Result<String, ApiError> {
    let header = state.config.auth.user_header.as_str();
    headers
        .get(header)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::unauthorized(format!("missing {header} header")))
}

fn load_user_inputs(
    state: &ApiState,
    headers: &HeaderMap,
) -> std::result::Result<(String, RoadmapInputs), ApiError> {
    let user_id = authenticated_user(state, headers)?;
    let store = CatalogStore::open(&state.db_path).map_err(ApiError::internal)?;
    let inputs = store
        .load_inputs(&user_id)
        .map_err(ApiError::internal)?
        .ok_or_else(|| ApiError::not_found(format!("no profile for user {user_id}")))?;
    for issue in inputs.issues() {
        warn!("catalog issue: {issue}");
    }
    Ok((user_id, inputs))
}
