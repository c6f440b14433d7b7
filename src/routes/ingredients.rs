use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::AppState;
use crate::error::AppError;

#[derive(Debug, Serialize, FromRow)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct IngredientInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 64))]
    pub measurement_unit: String,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Ingredient>>, AppError> {
    let rows = sqlx::query_as::<_, Ingredient>(
        "SELECT id, name, measurement_unit FROM ingredients ORDER BY id",
    )
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(rows))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<IngredientInput>,
) -> Result<(StatusCode, Json<Ingredient>), AppError> {
    input.validate()?;

    let row = sqlx::query_as::<_, Ingredient>(
        "INSERT INTO ingredients (name, measurement_unit) VALUES (?1, ?2) \
         RETURNING id, name, measurement_unit",
    )
    .bind(&input.name)
    .bind(&input.measurement_unit)
    .fetch_one(&state.db_pool)
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Ingredient>, AppError> {
    let row = sqlx::query_as::<_, Ingredient>(
        "SELECT id, name, measurement_unit FROM ingredients WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or(AppError::NotFound("ingredient"))?;

    Ok(Json(row))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<IngredientInput>,
) -> Result<Json<Ingredient>, AppError> {
    input.validate()?;

    let row = sqlx::query_as::<_, Ingredient>(
        "UPDATE ingredients SET name = ?1, measurement_unit = ?2 WHERE id = ?3 \
         RETURNING id, name, measurement_unit",
    )
    .bind(&input.name)
    .bind(&input.measurement_unit)
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or(AppError::NotFound("ingredient"))?;

    Ok(Json(row))
}

pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM ingredients WHERE id = ?1")
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("ingredient"));
    }

    Ok(StatusCode::NO_CONTENT)
}
