use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};
use mealshare_shopping::{aggregate, render_report, CartLine};
use serde_json::json;
use sqlx::FromRow;

use super::{recipes::RecipeRow, AppState};
use crate::error::AppError;
use crate::middleware::Auth;

/// GET /shopping_cart/{id}/add - put a recipe in the calling user's cart
///
/// Idempotent: adding a recipe that is already in the cart is a no-op.
pub async fn add(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<i64>,
) -> Result<Json<RecipeRow>, AppError> {
    let recipe = sqlx::query_as::<_, RecipeRow>(
        "SELECT id, author_id, name, text, cooking_time FROM recipes WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or(AppError::NotFound("recipe"))?;

    sqlx::query("INSERT OR IGNORE INTO shopping_cart (user_id, recipe_id) VALUES (?1, ?2)")
        .bind(auth.user_id)
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    tracing::debug!(user = auth.user_id, recipe = id, "recipe added to cart");

    Ok(Json(recipe))
}

/// DELETE /shopping_cart/{id}/del - take a recipe out of the cart
pub async fn remove(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    sqlx::query_scalar::<_, i64>("SELECT id FROM recipes WHERE id = ?1")
        .bind(id)
        .fetch_optional(&state.db_pool)
        .await?
        .ok_or(AppError::NotFound("recipe"))?;

    sqlx::query("DELETE FROM shopping_cart WHERE user_id = ?1 AND recipe_id = ?2")
        .bind(auth.user_id)
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    tracing::debug!(user = auth.user_id, recipe = id, "recipe removed from cart");

    Ok(Json(json!({ "message": "Рецепт удален из списка покупок!" })))
}

#[derive(Debug, FromRow)]
struct CartRow {
    name: String,
    amount: f64,
    unit: String,
}

/// GET /shopping_cart/download - export the cart as a PDF report
///
/// Joins the ingredient amounts of every recipe in the caller's cart,
/// aggregates them by ingredient name, and returns the rendered document
/// as an attachment with a fixed filename.
pub async fn download(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
) -> Result<Response, AppError> {
    let rows = sqlx::query_as::<_, CartRow>(
        "SELECT i.name, a.amount, i.measurement_unit AS unit \
         FROM amounts a \
         JOIN ingredients i ON i.id = a.ingredient_id \
         JOIN shopping_cart c ON c.recipe_id = a.recipe_id \
         WHERE c.user_id = ?1 \
         ORDER BY a.id",
    )
    .bind(auth.user_id)
    .fetch_all(&state.db_pool)
    .await?;

    let lines = aggregate(
        rows.into_iter()
            .map(|row| CartLine::new(row.name, row.amount, row.unit)),
    );
    let pdf = render_report(&lines)?;

    tracing::info!(
        user = auth.user_id,
        lines = lines.len(),
        bytes = pdf.len(),
        "shopping list exported"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"somefilename.pdf\"",
            ),
        ],
        pdf,
    )
        .into_response())
}
