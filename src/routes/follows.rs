use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Serialize;
use serde_json::json;
use sqlx::FromRow;

use super::{AppState, Page, Pagination};
use crate::error::AppError;
use crate::middleware::Auth;

#[derive(Debug, Serialize, FromRow)]
pub struct Follow {
    pub id: i64,
    pub user_id: i64,
    pub following_id: i64,
}

/// GET /follows - the calling user's subscriptions, paginated
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Page<Follow>>, AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE user_id = ?1")
        .bind(auth.user_id)
        .fetch_one(&state.db_pool)
        .await?;

    let results = sqlx::query_as::<_, Follow>(
        "SELECT id, user_id, following_id FROM follows WHERE user_id = ?1 \
         ORDER BY id LIMIT ?2 OFFSET ?3",
    )
    .bind(auth.user_id)
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(Page { count, results }))
}

/// GET /follows/{id}/subscribe - follow a user (get-or-create)
pub async fn subscribe(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<i64>,
) -> Result<Json<Follow>, AppError> {
    sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE id = ?1")
        .bind(id)
        .fetch_optional(&state.db_pool)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    sqlx::query("INSERT OR IGNORE INTO follows (user_id, following_id) VALUES (?1, ?2)")
        .bind(auth.user_id)
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    let row = sqlx::query_as::<_, Follow>(
        "SELECT id, user_id, following_id FROM follows WHERE user_id = ?1 AND following_id = ?2",
    )
    .bind(auth.user_id)
    .bind(id)
    .fetch_one(&state.db_pool)
    .await?;

    Ok(Json(row))
}

/// DELETE /follows/{id}/unsubscribe - stop following a user
pub async fn unsubscribe(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = sqlx::query("DELETE FROM follows WHERE user_id = ?1 AND following_id = ?2")
        .bind(auth.user_id)
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("follow"));
    }

    Ok(Json(json!({ "message": "Вы отписались от пользователя!" })))
}
