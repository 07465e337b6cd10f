use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    AppState,
    error::AppResult,
    models::{CreateMovieDto, ListQuery, MoviePatch, ReadMovieDto, UpdateMovieDto},
};

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(dto): Json<CreateMovieDto>,
) -> AppResult<Response> {
    let movie = state.movies.create(dto).await?;
    let location = format!("{}/{}", state.config.route_prefix, movie.id);

    let mut resp = (StatusCode::CREATED, Json(movie)).into_response();
    resp.headers_mut().insert(
        header::LOCATION,
        HeaderValue::from_str(&location).map_err(anyhow::Error::new)?,
    );
    Ok(resp)
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ListQuery>,
) -> AppResult<Json<Vec<ReadMovieDto>>> {
    Ok(Json(state.movies.list(q.skip, q.take).await?))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<ReadMovieDto>> {
    Ok(Json(state.movies.get(id).await?))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(dto): Json<UpdateMovieDto>,
) -> AppResult<StatusCode> {
    state.movies.update(id, dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn patch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(patch): Json<MoviePatch>,
) -> AppResult<StatusCode> {
    state.movies.patch(id, patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.movies.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    match state.movies.db().ping().await {
        Ok(()) => Json(json!({ "status": "ok" })).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "database ping failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "status": "unavailable" })))
                .into_response()
        },
    }
}
