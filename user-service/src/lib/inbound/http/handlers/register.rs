use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::AuthSession;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn register<R>(
    State(state): State<AppState<R>>,
    body: Option<Json<RegisterRequest>>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError>
where
    R: UserRepository,
{
    let Json(body) = body.ok_or_else(|| ApiError::from(UserError::InvalidPayload))?;

    state
        .auth_service
        .register(body.into_command())
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::CREATED, session.into()))
}

/// HTTP request body for registration (raw JSON).
///
/// Fields default to empty strings so that an omitted key surfaces as
/// the field's own `may not be empty` validation message instead of a
/// deserialization error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    last_name: String,
    first_name: String,
    email: String,
    password: String,
}

impl RegisterRequest {
    fn into_command(self) -> RegisterUserCommand {
        RegisterUserCommand {
            last_name: self.last_name,
            first_name: self.first_name,
            email: self.email,
            password: self.password,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponseData {
    pub user_id: String,
    pub token: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&AuthSession> for RegisterResponseData {
    fn from(session: &AuthSession) -> Self {
        Self {
            user_id: session.user.id.to_string(),
            token: session.token.clone(),
            first_name: session.user.first_name.clone(),
            last_name: session.user.last_name.clone(),
            email: session.user.email.as_str().to_string(),
        }
    }
}
