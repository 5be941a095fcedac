//! # Request Extractors
//!
//! Thin wrappers over axum's `Json` and `Query` extractors that route
//! deserialization failures through the shared rejection handlers, so
//! malformed bodies and query strings answer in the standard
//! `{success, code, message}` format.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    response::Response,
    Json,
};
use error::rejection::{handle_json_rejection, handle_query_rejection};
use serde::de::DeserializeOwned;

/// JSON body extractor with standardized rejections.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(handle_json_rejection(rejection)),
        }
    }
}

/// Query string extractor with standardized rejections.
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ApiQuery(value)),
            Err(rejection) => Err(handle_query_rejection(rejection)),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::StatusCode};
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct Payload {
        #[allow(dead_code)]
        name: String,
    }

    fn json_request(body: &str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_api_json_accepts_valid_body() {
        let req = json_request(r#"{"name": "Amina"}"#);
        let result = ApiJson::<Payload>::from_request(req, &()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_api_json_missing_field_is_bad_request() {
        let req = json_request("{}");
        let response = ApiJson::<Payload>::from_request(req, &()).await.unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_api_json_garbage_is_bad_request() {
        let req = json_request("not json at all");
        let response = ApiJson::<Payload>::from_request(req, &()).await.unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
