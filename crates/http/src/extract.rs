//! Extractors that decode a request part and run its `validator` rules
//! before the handler executes.

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use shelf_kernel::{
    validation::{decode, into_details, violations},
    DecodeFields, Validate,
};

use crate::error::AppError;

/// JSON body that decoded and passed validation.
///
/// Fields are decoded one at a time so every missing or mistyped field is
/// listed. Decoding failures and constraint violations are both reported as
/// [`AppError::Validation`].
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DecodeFields + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::validation(
                    vec![json!({
                        "field": "body",
                        "error": "invalid_body",
                        "message": rejection.body_text(),
                    })],
                    "request body could not be decoded",
                )
            })?;

        let value: T = decode(&body).map_err(|found| {
            AppError::validation(into_details(found), "request body could not be decoded")
        })?;

        value.validate().map_err(|errors| {
            AppError::validation(
                into_details(violations(&errors)),
                "request body failed validation",
            )
        })?;

        Ok(Self(value))
    }
}

/// Query string that decoded and passed validation.
#[derive(Debug, Clone)]
pub struct ValidQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::malformed(
                    vec![json!({
                        "field": "query",
                        "error": "invalid_query",
                        "message": rejection.body_text(),
                    })],
                    "query string could not be decoded",
                )
            })?;

        value.validate().map_err(|errors| {
            AppError::malformed(
                into_details(violations(&errors)),
                "query parameter failed validation",
            )
        })?;

        Ok(Self(value))
    }
}

/// Path parameters that decoded and passed validation.
#[derive(Debug, Clone)]
pub struct ValidPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::malformed(
                    vec![json!({
                        "field": "path",
                        "error": "invalid_path",
                        "message": rejection.body_text(),
                    })],
                    "path parameter could not be decoded",
                )
            })?;

        value.validate().map_err(|errors| {
            AppError::malformed(
                into_details(violations(&errors)),
                "path parameter failed validation",
            )
        })?;

        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorEnvelope;
    use axum::{
        body::Body,
        http::{header, Method, StatusCode},
        response::Response,
        routing::{get, post},
        Router,
    };
    use serde::Deserialize;
    use shelf_kernel::FieldDecoder;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct Shelf {
        #[validate(length(min = 2))]
        name: String,
        #[validate(range(exclusive_min = 0))]
        size: i64,
    }

    impl DecodeFields for Shelf {
        fn decode_fields(fields: &mut FieldDecoder<'_>) -> Option<Self> {
            let name = fields.required("name");
            let size = fields.required("size");
            Some(Self {
                name: name?,
                size: size?,
            })
        }
    }

    #[derive(Debug, Deserialize, Validate)]
    struct ShelfId {
        #[validate(range(exclusive_min = 0))]
        shelf_id: i64,
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/shelves",
                post(|ValidJson(shelf): ValidJson<Shelf>| async move { shelf.name })
                    .get(|ValidQuery(shelf): ValidQuery<Shelf>| async move { shelf.name }),
            )
            .route(
                "/shelves/{shelf_id}",
                get(|ValidPath(path): ValidPath<ShelfId>| async move { path.shelf_id.to_string() }),
            )
    }

    async fn send(request: axum::http::Request<Body>) -> Response {
        app().oneshot(request).await.unwrap()
    }

    async fn envelope(response: Response) -> ErrorEnvelope {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_post(body: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .method(Method::POST)
            .uri("/shelves")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_uri(uri: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn valid_json_passes_through() {
        let response = send(json_post(r#"{"name":"ok","size":1}"#)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn json_violations_are_reported_together() {
        let response = send(json_post(r#"{"name":"x","size":0}"#)).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = envelope(response).await;
        assert_eq!(body.error.code, "validation_error");
        let fields: Vec<_> = body
            .error
            .details
            .iter()
            .map(|d| d["field"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(fields, vec!["name", "size"]);
    }

    #[tokio::test]
    async fn undecodable_fields_are_reported_together() {
        let response = send(json_post(r#"{"size":"large"}"#)).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = envelope(response).await;
        assert_eq!(body.error.code, "validation_error");
        let fields: Vec<_> = body
            .error
            .details
            .iter()
            .map(|d| {
                (
                    d["field"].as_str().unwrap().to_string(),
                    d["error"].as_str().unwrap().to_string(),
                )
            })
            .collect();
        assert_eq!(
            fields,
            vec![
                ("name".to_string(), "missing".to_string()),
                ("size".to_string(), "invalid_type".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn malformed_json_is_a_body_error() {
        let response = send(json_post(r#"{"name":"#)).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(envelope(response).await.error.details[0]["field"], "body");
    }

    #[tokio::test]
    async fn query_violation_is_malformed_input() {
        let response = send(get_uri("/shelves?name=ok&size=-3")).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(envelope(response).await.error.code, "malformed_input");
    }

    #[tokio::test]
    async fn path_parse_failure_is_malformed_input() {
        let response = send(get_uri("/shelves/abc")).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(envelope(response).await.error.code, "malformed_input");
    }

    #[tokio::test]
    async fn path_constraint_is_checked() {
        let response = send(get_uri("/shelves/0")).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = send(get_uri("/shelves/7")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
