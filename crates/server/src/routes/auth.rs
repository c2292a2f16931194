use crate::{state::AppState, utils::auth::CurrentUser};
use axum::{Json, Router, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub user_id: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(me))
}

/// Returns the user id taken from the caller's JWT
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Successfully authenticated", body = MeResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Authentication"
)]
pub async fn me(CurrentUser(user_id): CurrentUser) -> Json<MeResponse> {
    Json(MeResponse { user_id })
}
