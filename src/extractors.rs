use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request,
    },
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::failure_body;

/// JSON body extractor whose rejections use the `{success, message, data}`
/// envelope instead of axum's plain-text bodies
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = RequestRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(content_type) = req.headers().get(header::CONTENT_TYPE) {
            let content_type_str = content_type
                .to_str()
                .map_err(|_| RequestRejection::InvalidContentType)?;

            // Extract the media type without parameters (e.g., charset)
            let media_type = content_type_str
                .split(';')
                .next()
                .unwrap_or("")
                .trim()
                .to_lowercase();

            if media_type != "application/json" {
                return Err(RequestRejection::InvalidContentType);
            }
        }

        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(RequestRejection::Json(rejection)),
        }
    }
}

/// Query string extractor with enveloped rejections
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = RequestRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ApiQuery(value)),
            Err(rejection) => Err(RequestRejection::Query(rejection)),
        }
    }
}

#[derive(Debug)]
pub enum RequestRejection {
    InvalidContentType,
    Json(JsonRejection),
    Query(QueryRejection),
}

impl RequestRejection {
    pub fn message(&self) -> String {
        match self {
            RequestRejection::InvalidContentType => {
                "Content-Type must be application/json".to_string()
            }
            RequestRejection::Json(rejection) => {
                format!("Invalid request body: {}", rejection.body_text())
            }
            RequestRejection::Query(rejection) => {
                format!("Invalid query parameters: {}", rejection.body_text())
            }
        }
    }
}

impl IntoResponse for RequestRejection {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(failure_body(&self.message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateUserRequest, ListUsersQuery};
    use axum::{routing::get, routing::post, Router};
    use axum_test::TestServer;
    use serde_json::json;

    fn app() -> Router {
        Router::new()
            .route(
                "/body",
                post(|ApiJson(body): ApiJson<CreateUserRequest>| async move { body.name }),
            )
            .route(
                "/query",
                get(|ApiQuery(query): ApiQuery<ListUsersQuery>| async move {
                    format!("{:?}", query.limit)
                }),
            )
    }

    #[tokio::test]
    async fn test_valid_body_is_extracted() {
        let server = TestServer::new(app()).unwrap();

        let response = server
            .post("/body")
            .json(&json!({"name": "Ada", "email": "ada@example.com"}))
            .await;

        response.assert_status_ok();
        response.assert_text("Ada");
    }

    #[tokio::test]
    async fn test_missing_field_is_enveloped_400() {
        let server = TestServer::new(app()).unwrap();

        let response = server.post("/body").json(&json!({"name": "Ada"})).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().unwrap().contains("email"));
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_wrong_content_type_is_rejected() {
        let server = TestServer::new(app()).unwrap();

        let response = server
            .post("/body")
            .text("name=Ada")
            .content_type("text/plain")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "Content-Type must be application/json");
    }

    #[tokio::test]
    async fn test_non_numeric_query_is_rejected() {
        let server = TestServer::new(app()).unwrap();

        server.get("/query?limit=5").await.assert_text("Some(5)");

        let response = server.get("/query?limit=abc").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid query parameters"));
    }
}
