use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use serde_json::json;

use crate::auth::validate_jwt;
use crate::routes::AppState;

/// Auth extension containing the user id extracted from the JWT
#[derive(Clone, Debug)]
pub struct Auth {
    pub user_id: i64,
}

fn unauthorized(reason: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": reason })),
    )
        .into_response()
}

/// Authentication middleware that validates the JWT from the auth cookie
///
/// Extracts the auth_token cookie, validates the JWT, verifies the user
/// row still exists, and inserts an [`Auth`] extension with the user id.
/// Responds 401 if the token is missing, invalid, or the user is gone.
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let token = match jar.get("auth_token") {
        Some(cookie) => cookie.value(),
        None => {
            tracing::warn!("Missing auth_token cookie");
            return unauthorized("authentication required");
        }
    };

    let claims = match validate_jwt(token, &state.jwt_secret) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(err = %e, "Invalid JWT token");
            return unauthorized("invalid token");
        }
    };

    let user_id: i64 = match claims.sub.parse() {
        Ok(id) => id,
        Err(_) => {
            tracing::warn!(sub = %claims.sub, "JWT subject is not a user id");
            return unauthorized("invalid token");
        }
    };

    // The user may have been deleted since the token was issued.
    let user_exists = sqlx::query("SELECT id FROM users WHERE id = ?1")
        .bind(user_id)
        .fetch_optional(&state.db_pool)
        .await;

    match user_exists {
        Ok(Some(_)) => {
            req.extensions_mut().insert(Auth { user_id });
            next.run(req).await
        }
        Ok(None) => {
            tracing::warn!(user = user_id, "User from token no longer exists");
            unauthorized("invalid token")
        }
        Err(e) => {
            tracing::error!(err = %e, "Database error checking user existence");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "An unexpected error occurred. Please try again later." })),
            )
                .into_response()
        }
    }
}
