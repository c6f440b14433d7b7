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
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub slug: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TagInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Hex color used by clients when rendering the tag chip.
    #[validate(length(min = 1, max = 16))]
    pub color: String,
    #[validate(length(min = 1, max = 100))]
    pub slug: String,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Tag>>, AppError> {
    let rows = sqlx::query_as::<_, Tag>("SELECT id, name, color, slug FROM tags ORDER BY id")
        .fetch_all(&state.db_pool)
        .await?;

    Ok(Json(rows))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<TagInput>,
) -> Result<(StatusCode, Json<Tag>), AppError> {
    input.validate()?;

    let row = sqlx::query_as::<_, Tag>(
        "INSERT INTO tags (name, color, slug) VALUES (?1, ?2, ?3) \
         RETURNING id, name, color, slug",
    )
    .bind(&input.name)
    .bind(&input.color)
    .bind(&input.slug)
    .fetch_one(&state.db_pool)
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Tag>, AppError> {
    let row = sqlx::query_as::<_, Tag>("SELECT id, name, color, slug FROM tags WHERE id = ?1")
        .bind(id)
        .fetch_optional(&state.db_pool)
        .await?
        .ok_or(AppError::NotFound("tag"))?;

    Ok(Json(row))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<TagInput>,
) -> Result<Json<Tag>, AppError> {
    input.validate()?;

    let row = sqlx::query_as::<_, Tag>(
        "UPDATE tags SET name = ?1, color = ?2, slug = ?3 WHERE id = ?4 \
         RETURNING id, name, color, slug",
    )
    .bind(&input.name)
    .bind(&input.color)
    .bind(&input.slug)
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or(AppError::NotFound("tag"))?;

    Ok(Json(row))
}

pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM tags WHERE id = ?1")
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("tag"));
    }

    Ok(StatusCode::NO_CONTENT)
}
