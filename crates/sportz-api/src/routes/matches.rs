//! Routes for listing, creating, reading and scoring matches.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use sportz_core::records::Match;
use sportz_matches::application::{command_handlers, query_handlers};
use sportz_matches::domain::validation::ListMatchesParams;

use crate::error::ApiError;
use crate::state::AppState;

const FETCH_FAILED: &str = "Failed to fetch matches";
const CREATE_FAILED: &str = "Failed to create match";
const FETCH_ONE_FAILED: &str = "Failed to fetch match";
const SCORE_FAILED: &str = "Failed to update match score";

/// Success envelope for match responses.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    /// Response payload.
    pub data: T,
}

/// GET /matches?limit=<n>
#[instrument(skip(state, params))]
async fn list_matches(
    State(state): State<AppState>,
    params: Result<Query<ListMatchesParams>, QueryRejection>,
) -> Result<Json<DataResponse<Vec<Match>>>, ApiError> {
    let Query(params) = params.map_err(|rejection| {
        ApiError::from_query_rejection(&rejection, "limit", FETCH_FAILED)
    })?;

    let data = query_handlers::list_recent_matches(&params, &*state.matches)
        .await
        .map_err(ApiError::during(FETCH_FAILED))?;

    Ok(Json(DataResponse { data }))
}

/// POST /matches
#[instrument(skip(state, body))]
async fn create_match(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<Match>>), ApiError> {
    let Json(body) =
        body.map_err(|rejection| ApiError::from_json_rejection(&rejection, CREATE_FAILED))?;

    let created =
        command_handlers::handle_create_match(&body, state.clock.as_ref(), &*state.matches)
            .await
            .map_err(ApiError::during(CREATE_FAILED))?;

    info!(match_id = created.id, "handled create_match");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /matches/{id}
#[instrument(skip(state))]
async fn get_match(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Match>>, ApiError> {
    let data = query_handlers::get_match_by_id(&id, state.clock.as_ref(), &*state.matches)
        .await
        .map_err(ApiError::during(FETCH_ONE_FAILED))?;

    Ok(Json(DataResponse { data }))
}

/// PATCH /matches/{id}/score
#[instrument(skip(state, body))]
async fn update_score(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<DataResponse<Match>>, ApiError> {
    let Json(body) =
        body.map_err(|rejection| ApiError::from_json_rejection(&rejection, SCORE_FAILED))?;

    let data = command_handlers::handle_update_score(&id, &body, &*state.matches)
        .await
        .map_err(ApiError::during(SCORE_FAILED))?;

    Ok(Json(DataResponse { data }))
}

/// Returns the router for the matches resource.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_matches).post(create_match))
        .route("/{id}", get(get_match))
        .route("/{id}/score", patch(update_score))
}
