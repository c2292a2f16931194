use crate::error::ApiError;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, OptionalFromRequest, Path, Query, Request},
};
use serde::de::DeserializeOwned;

/// `Json` whose rejections are reported as [`ApiError`]
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `Query` whose rejections are reported as [`ApiError`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// `Path` whose rejections are reported as [`ApiError`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// A request without a `Content-Type` header has no body. A body that is
/// present but malformed is still rejected
impl<T, S> OptionalFromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        let json = <Json<T> as OptionalFromRequest<S>>::from_request(req, state).await?;
        Ok(json.map(|Json(value)| ApiJson(value)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dtos::mentorship::MentorshipQueryParams;
    use axum::{
        Router,
        body::Body,
        http::{StatusCode, header::CONTENT_TYPE},
        routing::get,
    };
    use models::mentorship::MentorshipStatus;
    use serde::Deserialize;
    use tower::Service;
    use uuid::Uuid;

    #[derive(Debug, Deserialize)]
    struct Minutes {
        minutes: Option<i32>,
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    fn bare_request() -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_json_body() {
        let request = json_request(r#"{"minutes":45}"#);
        let ApiJson(body) = <ApiJson<Minutes> as FromRequest<()>>::from_request(request, &())
            .await
            .unwrap();
        assert_eq!(body.minutes, Some(45));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let err = <ApiJson<Minutes> as FromRequest<()>>::from_request(bare_request(), &())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_wrong_field_type_is_bad_request() {
        let request = json_request(r#"{"minutes":"an hour"}"#);
        let err = <ApiJson<Minutes> as FromRequest<()>>::from_request(request, &())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_optional_body_may_be_absent() {
        let body = <ApiJson<Minutes> as OptionalFromRequest<()>>::from_request(bare_request(), &())
            .await
            .unwrap();
        assert!(body.is_none());

        let request = json_request(r#"{"minutes":30}"#);
        let body = <ApiJson<Minutes> as OptionalFromRequest<()>>::from_request(request, &())
            .await
            .unwrap();
        assert_eq!(body.map(|ApiJson(body)| body.minutes), Some(Some(30)));
    }

    #[tokio::test]
    async fn test_optional_body_rejects_malformed_json() {
        let request = json_request("{not json");
        let err = <ApiJson<Minutes> as OptionalFromRequest<()>>::from_request(request, &())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_query() {
        let (mut parts, _) = Request::builder()
            .uri("/mentorship/as-mentor?status=Active")
            .body(())
            .unwrap()
            .into_parts();
        let ApiQuery(params) =
            ApiQuery::<MentorshipQueryParams>::from_request_parts(&mut parts, &())
                .await
                .unwrap();
        assert_eq!(params.status, Some(MentorshipStatus::Active));

        let (mut parts, _) = Request::builder()
            .uri("/mentorship/as-mentor?status=unknown")
            .body(())
            .unwrap()
            .into_parts();
        let err = ApiQuery::<MentorshipQueryParams>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_path_is_json_bad_request() {
        let mut app: Router = Router::new().route(
            "/sessions/{id}",
            get(|ApiPath(id): ApiPath<Uuid>| async move { id.to_string() }),
        );

        let request = Request::builder()
            .uri("/sessions/not-a-uuid")
            .body(Body::empty())
            .unwrap();
        let response = app.call(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    }
}
