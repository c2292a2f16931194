pub mod analysis;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod mentor;
pub mod mentorship;
pub mod review;
pub mod root;
pub mod session;

use crate::state::AppState;
use axum::Router;

/// Every authenticated endpoint, to be nested under `/api`
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(mentor::router())
        .merge(mentorship::router())
        .merge(session::router())
        .merge(review::router())
        .merge(dashboard::router())
        .merge(analysis::router())
}
