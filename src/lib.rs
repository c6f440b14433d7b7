pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod routes;

pub use routes::AppState;

/// Create the app router
///
/// This builds the Axum router with all routes configured, also used by
/// integration tests to drive the API without starting the full server.
pub fn create_app(db_pool: sqlx::SqlitePool, jwt_secret: String) -> axum::Router {
    routes::router(AppState { db_pool, jwt_secret })
}
