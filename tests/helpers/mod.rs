//! Test helper functions for database setup and request plumbing.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use mealshare::auth::generate_jwt;
use sqlx::SqlitePool;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test-secret-key-minimum-32-characters";

/// Set up the app router against a fresh in-memory database.
///
/// The pool is pinned to one connection: every pooled connection to
/// `sqlite::memory:` would otherwise open its own empty database.
pub async fn setup_test_app() -> anyhow::Result<(Router, SqlitePool)> {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app = mealshare::create_app(pool.clone(), JWT_SECRET.to_string());
    Ok((app, pool))
}

pub async fn create_test_user(pool: &SqlitePool, username: &str) -> anyhow::Result<i64> {
    let id = sqlx::query_scalar(
        "INSERT INTO users (username, email) VALUES (?1, ?2) RETURNING id",
    )
    .bind(username)
    .bind(format!("{username}@example.com"))
    .fetch_one(pool)
    .await?;

    Ok(id)
}

pub async fn create_test_ingredient(
    pool: &SqlitePool,
    name: &str,
    unit: &str,
) -> anyhow::Result<i64> {
    let id = sqlx::query_scalar(
        "INSERT INTO ingredients (name, measurement_unit) VALUES (?1, ?2) RETURNING id",
    )
    .bind(name)
    .bind(unit)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

pub async fn create_test_recipe(
    pool: &SqlitePool,
    author_id: i64,
    name: &str,
) -> anyhow::Result<i64> {
    let id = sqlx::query_scalar(
        "INSERT INTO recipes (author_id, name, text, cooking_time) \
         VALUES (?1, ?2, 'test instructions', 30) RETURNING id",
    )
    .bind(author_id)
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

pub async fn add_amount(
    pool: &SqlitePool,
    recipe_id: i64,
    ingredient_id: i64,
    amount: f64,
) -> anyhow::Result<()> {
    sqlx::query("INSERT INTO amounts (recipe_id, ingredient_id, amount) VALUES (?1, ?2, ?3)")
        .bind(recipe_id)
        .bind(ingredient_id)
        .bind(amount)
        .execute(pool)
        .await?;

    Ok(())
}

/// Cookie header value carrying a freshly minted token for the user.
pub fn auth_cookie(user_id: i64) -> String {
    let token = generate_jwt(user_id, JWT_SECRET, 7).expect("token generation");
    format!("auth_token={token}")
}

/// Send an authenticated request without a body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    user_id: i64,
) -> anyhow::Result<Response<Body>> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, auth_cookie(user_id))
        .body(Body::empty())?;

    Ok(app.clone().oneshot(request).await?)
}

/// Send an authenticated request with a JSON body.
pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    user_id: i64,
    body: serde_json::Value,
) -> anyhow::Result<Response<Body>> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, auth_cookie(user_id))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))?;

    Ok(app.clone().oneshot(request).await?)
}

pub async fn body_bytes(response: Response<Body>) -> anyhow::Result<Vec<u8>> {
    Ok(response.into_body().collect().await?.to_bytes().to_vec())
}

pub async fn body_json(response: Response<Body>) -> anyhow::Result<serde_json::Value> {
    let bytes = body_bytes(response).await?;
    Ok(serde_json::from_slice(&bytes)?)
}
