//! Request extractors
//!
//! [`ApiJson`] behaves like [`axum::Json`] but reports a body that fails to
//! parse or deserialize as a JSON [`ApiError`] (400) instead of axum's
//! plain-text rejection.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        routing::post,
        Router,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::*;

    #[derive(Deserialize)]
    struct Payload {
        #[allow(dead_code)]
        value: f64,
    }

    async fn handler(ApiJson(_): ApiJson<Payload>) -> StatusCode {
        StatusCode::OK
    }

    async fn send(body: &'static str, content_type: Option<&str>) -> (StatusCode, serde_json::Value) {
        let app = Router::new().route("/", post(handler));
        let mut request = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        let response = app.oneshot(request.body(Body::from(body)).unwrap()).await.unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let (status, _) = send(r#"{"value": 1.5}"#, Some("application/json")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rejections_are_json_bad_requests() {
        let cases = [
            (r#"{}"#, Some("application/json")),
            (r#"{"value": "1.5"}"#, Some("application/json")),
            (r#"{"value": "#, Some("application/json")),
            (r#"{"value": 1.5}"#, None),
        ];

        for (body, content_type) in cases {
            let (status, json) = send(body, content_type).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(json["code"], "BAD_REQUEST", "{body}");
            assert!(json["error"].as_str().is_some_and(|e| !e.is_empty()), "{body}");
        }
    }
}
