use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use validator::Validate;

use super::{AppState, Page, Pagination};
use crate::error::AppError;
use crate::middleware::Auth;

#[derive(Debug, Serialize, FromRow)]
pub struct RecipeRow {
    pub id: i64,
    pub author_id: i64,
    pub name: String,
    pub text: String,
    pub cooking_time: i64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct RecipeIngredient {
    pub ingredient_id: i64,
    pub name: String,
    pub amount: f64,
    pub measurement_unit: String,
}

#[derive(Debug, Serialize)]
pub struct RecipeDetail {
    pub id: i64,
    pub author_id: i64,
    pub name: String,
    pub text: String,
    pub cooking_time: i64,
    pub ingredients: Vec<RecipeIngredient>,
    pub tags: Vec<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RecipeInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub text: String,
    #[validate(range(min = 1))]
    pub cooking_time: i64,
    #[validate(nested)]
    pub ingredients: Vec<AmountInput>,
    #[serde(default)]
    pub tags: Vec<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AmountInput {
    pub ingredient_id: i64,
    #[validate(range(min = 0.0))]
    pub amount: f64,
}

pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Page<RecipeRow>>, AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
        .fetch_one(&state.db_pool)
        .await?;

    let results = sqlx::query_as::<_, RecipeRow>(
        "SELECT id, author_id, name, text, cooking_time FROM recipes \
         ORDER BY id LIMIT ?1 OFFSET ?2",
    )
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(Page { count, results }))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Json(input): Json<RecipeInput>,
) -> Result<(StatusCode, Json<RecipeDetail>), AppError> {
    input.validate()?;

    let mut tx = state.db_pool.begin().await?;

    let recipe_id: i64 = sqlx::query_scalar(
        "INSERT INTO recipes (author_id, name, text, cooking_time) \
         VALUES (?1, ?2, ?3, ?4) RETURNING id",
    )
    .bind(auth.user_id)
    .bind(&input.name)
    .bind(&input.text)
    .bind(input.cooking_time)
    .fetch_one(&mut *tx)
    .await?;

    insert_amounts_and_tags(&mut tx, recipe_id, &input).await?;
    tx.commit().await?;

    tracing::info!(user = auth.user_id, recipe = recipe_id, "recipe created");

    let detail = load_detail(&state.db_pool, recipe_id).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RecipeDetail>, AppError> {
    let detail = load_detail(&state.db_pool, id).await?;
    Ok(Json(detail))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<i64>,
    Json(input): Json<RecipeInput>,
) -> Result<Json<RecipeDetail>, AppError> {
    input.validate()?;
    ensure_author(&state.db_pool, id, auth.user_id).await?;

    let mut tx = state.db_pool.begin().await?;

    sqlx::query("UPDATE recipes SET name = ?1, text = ?2, cooking_time = ?3 WHERE id = ?4")
        .bind(&input.name)
        .bind(&input.text)
        .bind(input.cooking_time)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    // Ingredient amounts and tags are replaced wholesale on update.
    sqlx::query("DELETE FROM amounts WHERE recipe_id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    insert_amounts_and_tags(&mut tx, id, &input).await?;
    tx.commit().await?;

    let detail = load_detail(&state.db_pool, id).await?;
    Ok(Json(detail))
}

pub async fn destroy(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    ensure_author(&state.db_pool, id, auth.user_id).await?;

    sqlx::query("DELETE FROM recipes WHERE id = ?1")
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    tracing::info!(user = auth.user_id, recipe = id, "recipe deleted");

    Ok(StatusCode::NO_CONTENT)
}

async fn insert_amounts_and_tags(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    recipe_id: i64,
    input: &RecipeInput,
) -> Result<(), AppError> {
    for amount in &input.ingredients {
        sqlx::query("INSERT INTO amounts (recipe_id, ingredient_id, amount) VALUES (?1, ?2, ?3)")
            .bind(recipe_id)
            .bind(amount.ingredient_id)
            .bind(amount.amount)
            .execute(&mut **tx)
            .await?;
    }

    for tag_id in &input.tags {
        sqlx::query("INSERT OR IGNORE INTO recipe_tags (recipe_id, tag_id) VALUES (?1, ?2)")
            .bind(recipe_id)
            .bind(tag_id)
            .execute(&mut **tx)
            .await?;
    }

    Ok(())
}

/// Mutations are restricted to the recipe's author.
async fn ensure_author(pool: &SqlitePool, recipe_id: i64, user_id: i64) -> Result<(), AppError> {
    let author_id: i64 = sqlx::query_scalar("SELECT author_id FROM recipes WHERE id = ?1")
        .bind(recipe_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("recipe"))?;

    if author_id != user_id {
        return Err(AppError::PermissionDenied);
    }

    Ok(())
}

async fn load_detail(pool: &SqlitePool, id: i64) -> Result<RecipeDetail, AppError> {
    let recipe = sqlx::query_as::<_, RecipeRow>(
        "SELECT id, author_id, name, text, cooking_time FROM recipes WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound("recipe"))?;

    let ingredients = sqlx::query_as::<_, RecipeIngredient>(
        "SELECT a.ingredient_id, i.name, a.amount, i.measurement_unit \
         FROM amounts a JOIN ingredients i ON i.id = a.ingredient_id \
         WHERE a.recipe_id = ?1 ORDER BY a.id",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let tags: Vec<i64> =
        sqlx::query_scalar("SELECT tag_id FROM recipe_tags WHERE recipe_id = ?1 ORDER BY tag_id")
            .bind(id)
            .fetch_all(pool)
            .await?;

    Ok(RecipeDetail {
        id: recipe.id,
        author_id: recipe.author_id,
        name: recipe.name,
        text: recipe.text,
        cooking_time: recipe.cooking_time,
        ingredients,
        tags,
    })
}
