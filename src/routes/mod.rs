use axum::{
    middleware as axum_middleware,
    routing::{delete, get},
    Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::middleware::auth_middleware;

mod favorites;
mod follows;
mod health;
mod ingredients;
mod recipes;
mod shopping_cart;
mod tags;

pub use health::{health, ready};
pub use recipes::RecipeRow;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub jwt_secret: String,
}

/// Page size the list endpoints fall back to.
const DEFAULT_PAGE_SIZE: u32 = 6;
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct Pagination {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl Pagination {
    pub fn limit(&self) -> i64 {
        i64::from(self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE))
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page.unwrap_or(1).max(1) - 1) * self.limit()
    }
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: i64,
    pub results: Vec<T>,
}

pub fn router(state: AppState) -> Router {
    // Everything except the health probes sits behind the auth cookie.
    let protected = Router::new()
        .route(
            "/ingredients",
            get(ingredients::list).post(ingredients::create),
        )
        .route(
            "/ingredients/{id}",
            get(ingredients::retrieve)
                .put(ingredients::update)
                .delete(ingredients::destroy),
        )
        .route("/tags", get(tags::list).post(tags::create))
        .route(
            "/tags/{id}",
            get(tags::retrieve).put(tags::update).delete(tags::destroy),
        )
        .route("/recipes", get(recipes::list).post(recipes::create))
        .route(
            "/recipes/{id}",
            get(recipes::retrieve)
                .put(recipes::update)
                .delete(recipes::destroy),
        )
        .route("/follows", get(follows::list))
        .route("/follows/{id}/subscribe", get(follows::subscribe))
        .route("/follows/{id}/unsubscribe", delete(follows::unsubscribe))
        .route("/favorites", get(favorites::list))
        .route("/favorites/{id}/add", get(favorites::add))
        .route("/favorites/{id}/del", delete(favorites::remove))
        .route("/shopping_cart/{id}/add", get(shopping_cart::add))
        .route("/shopping_cart/{id}/del", delete(shopping_cart::remove))
        .route("/shopping_cart/download", get(shopping_cart::download))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        // Health check endpoints (no auth required)
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(state.db_pool.clone())
        .merge(protected.with_state(state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults() {
        let p = Pagination {
            page: None,
            limit: None,
        };
        assert_eq!(p.limit(), 6);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn pagination_second_page() {
        let p = Pagination {
            page: Some(3),
            limit: Some(10),
        };
        assert_eq!(p.limit(), 10);
        assert_eq!(p.offset(), 20);
    }

    #[test]
    fn pagination_limit_is_clamped() {
        let p = Pagination {
            page: Some(1),
            limit: Some(1000),
        };
        assert_eq!(p.limit(), 100);
    }
}
