use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;
use serde_json::json;
use sqlx::FromRow;

use super::AppState;
use crate::error::AppError;
use crate::middleware::Auth;

#[derive(Debug, Serialize, FromRow)]
pub struct Favorite {
    pub id: i64,
    pub user_id: i64,
    pub recipe_id: i64,
}

/// GET /favorites - the calling user's favorite recipes
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
) -> Result<Json<Vec<Favorite>>, AppError> {
    let rows = sqlx::query_as::<_, Favorite>(
        "SELECT id, user_id, recipe_id FROM favorites WHERE user_id = ?1 ORDER BY id",
    )
    .bind(auth.user_id)
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(rows))
}

/// GET /favorites/{id}/add - mark a recipe as favorite (get-or-create)
pub async fn add(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<i64>,
) -> Result<Json<Favorite>, AppError> {
    sqlx::query_scalar::<_, i64>("SELECT id FROM recipes WHERE id = ?1")
        .bind(id)
        .fetch_optional(&state.db_pool)
        .await?
        .ok_or(AppError::NotFound("recipe"))?;

    sqlx::query("INSERT OR IGNORE INTO favorites (user_id, recipe_id) VALUES (?1, ?2)")
        .bind(auth.user_id)
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    let row = sqlx::query_as::<_, Favorite>(
        "SELECT id, user_id, recipe_id FROM favorites WHERE user_id = ?1 AND recipe_id = ?2",
    )
    .bind(auth.user_id)
    .bind(id)
    .fetch_one(&state.db_pool)
    .await?;

    Ok(Json(row))
}

/// DELETE /favorites/{id}/del - remove a recipe from favorites
pub async fn remove(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = sqlx::query("DELETE FROM favorites WHERE user_id = ?1 AND recipe_id = ?2")
        .bind(auth.user_id)
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("favorite"));
    }

    Ok(Json(json!({ "message": "Рецепт удален из избранного!" })))
}
