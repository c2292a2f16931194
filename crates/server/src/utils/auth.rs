use crate::error::ApiError;
use axum::{extract::FromRequestParts, http::request::Parts};
use tower_oauth2_resource_server::claims::DefaultClaims;

/// The caller's user id, taken from the `sub` claim of a validated JWT.
/// Requests without one are rejected with 401
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub String);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<DefaultClaims>()
            .and_then(|claims| claims.sub.clone())
            .filter(|sub| !sub.is_empty())
            .map(CurrentUser)
            .ok_or(ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use axum::http::{Request, StatusCode};

    #[tokio::test]
    async fn test_missing_claims_is_unauthorized() {
        let (mut parts, _) = Request::new(()).into_parts();

        let err = CurrentUser::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }
}
