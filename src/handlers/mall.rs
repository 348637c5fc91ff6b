//! Mall handlers: nine read routes and three guarded mutations.

use crate::error::AppError;
use crate::extractors::Credential;
use crate::model::{Mall, MallInput};
use crate::service::MallService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Mall>>, AppError> {
    Ok(Json(state.store.list_all().await?))
}

/// Absent ids answer `null`, not 404.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Option<Mall>>, AppError> {
    Ok(Json(state.store.find_by_id(id).await?))
}

pub async fn get_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Option<Mall>>, AppError> {
    Ok(Json(state.store.find_by_name(&name).await?))
}

pub async fn list_by_score(
    State(state): State<AppState>,
    Path(score): Path<i32>,
) -> Result<Json<Vec<Mall>>, AppError> {
    Ok(Json(state.store.find_by_score(score).await?))
}

pub async fn get_by_location(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> Result<Json<Option<Mall>>, AppError> {
    Ok(Json(state.store.find_by_location(&location).await?))
}

pub async fn list_by_restaurants(
    State(state): State<AppState>,
    Path(has_restaurants): Path<bool>,
) -> Result<Json<Vec<Mall>>, AppError> {
    Ok(Json(state.store.find_by_restaurants(has_restaurants).await?))
}

pub async fn list_names(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.store.list_names().await?))
}

pub async fn count(State(state): State<AppState>) -> Result<Json<i64>, AppError> {
    Ok(Json(state.store.count().await?))
}

pub async fn list_by_min_score(
    State(state): State<AppState>,
    Path(min_score): Path<i32>,
) -> Result<Json<Vec<Mall>>, AppError> {
    Ok(Json(state.store.find_by_min_score(min_score).await?))
}

pub async fn create(
    State(state): State<AppState>,
    credential: Credential,
    Json(body): Json<MallInput>,
) -> Result<Json<Mall>, AppError> {
    state.guard.check(credential.as_deref())?;
    let mall = MallService::create(state.store.as_ref(), &body).await?;
    Ok(Json(mall))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    credential: Credential,
    Json(body): Json<MallInput>,
) -> Result<Json<Mall>, AppError> {
    state.guard.check(credential.as_deref())?;
    let outcome = MallService::update(state.store.as_ref(), id, &body).await?;
    Ok(Json(outcome.into_mall()))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    credential: Credential,
) -> Result<Json<Mall>, AppError> {
    state.guard.check(credential.as_deref())?;
    let mall = MallService::delete(state.store.as_ref(), id).await?;
    Ok(Json(mall))
}
