use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Header carrying the opaque session token
pub const AUTHENTICATION_HEADER: &str = "x-authentication-token";

/// Extension type storing the authenticated user's identity in request
/// extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware guarding protected routes.
///
/// Extracts the token from the `x-authentication-token` header and
/// resolves it through the auth service, which re-checks the embedded
/// version against the stored one on every request. A missing header and
/// every verification failure produce the same opaque 401.
pub async fn authenticate<R>(
    State(state): State<AppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository,
{
    let token = req
        .headers()
        .get(AUTHENTICATION_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            ApiError::Unauthorized("Authentication error".to_string()).into_response()
        })?;

    let user = state
        .auth_service
        .authenticate(token)
        .await
        .map_err(|err| ApiError::from(err).into_response())?;

    req.extensions_mut()
        .insert(AuthenticatedUser { user_id: user.id });

    Ok(next.run(req).await)
}
