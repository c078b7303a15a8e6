use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::list_users::UserData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// HTTP request body for a profile update (raw JSON).
///
/// The body is extracted as `Option` so that an absent or unparseable
/// payload does not short-circuit the request before the ownership check
/// has run; the service reports it as a 400 only for the profile owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UpdateProfileRequest {
    fn into_command(self) -> UpdateProfileCommand {
        UpdateProfileCommand {
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }
}

pub async fn update_profile<R>(
    State(state): State<AppState<R>>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(user_id): Path<String>,
    body: Option<Json<UpdateProfileRequest>>,
) -> Result<ApiSuccess<UserData>, ApiError>
where
    R: UserRepository,
{
    let target = UserId::from_string(&user_id).map_err(UserError::from)?;
    let payload = body.map(|Json(req)| req.into_command());

    state
        .auth_service
        .update_profile(&actor.user_id, &target, payload)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
