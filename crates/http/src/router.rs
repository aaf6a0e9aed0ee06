//! Router builder for the shelf HTTP server

use axum::{
    extract::Request,
    http::{HeaderValue, StatusCode},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use uuid::{Timestamp, Uuid};

use shelf_kernel::ModuleRegistry;

/// Builder for constructing the main HTTP router
///
/// Axum only wraps routes that exist when a layer is added, so callers mount
/// routes first and add middleware afterwards.
pub struct RouterBuilder {
    router: Router,
}

impl RouterBuilder {
    /// Create a new router builder
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    /// Add a route to the router
    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Mount a module's router at the root, or under `prefix` when given
    pub fn mount_module(mut self, prefix: Option<&str>, module_router: Router) -> Self {
        self.router = match prefix.and_then(normalize_prefix) {
            Some(path) => self.router.nest(&path, module_router),
            None => self.router.merge(module_router),
        };
        self
    }

    /// Add tracing middleware
    pub fn with_tracing(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        );
        self
    }

    /// Add CORS middleware
    pub fn with_cors(mut self) -> Self {
        self.router = self.router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
        self
    }

    /// Add request ID middleware; the id is echoed back on the response
    pub fn with_request_id(mut self) -> Self {
        self.router = self
            .router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));
        self
    }

    /// Add timeout middleware
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.router = self
            .router
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_millis(timeout_ms),
            ));
        self
    }

    /// Serve an OpenAPI document merged from every module's fragment
    pub fn with_openapi(mut self, registry: &ModuleRegistry, prefix: Option<&str>) -> Self {
        let openapi_spec = merged_openapi(registry, prefix);

        if let Err(err) = serde_json::from_value::<utoipa::openapi::OpenApi>(openapi_spec.clone()) {
            tracing::warn!(error = %err, "merged OpenAPI document does not match the 3.1 schema");
        }

        self.router = self.router.route(
            "/docs/openapi.json",
            get(move || async move { axum::Json(openapi_spec.clone()) }),
        );

        self
    }

    /// Build the final router
    pub fn build(self) -> Router {
        self.router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Ensure a non-empty prefix starts with `/` and has no trailing `/`
fn normalize_prefix(prefix: &str) -> Option<String> {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("/{}", trimmed))
    }
}

/// Build the OpenAPI document by merging module fragments into a base spec
fn merged_openapi(registry: &ModuleRegistry, prefix: Option<&str>) -> serde_json::Value {
    let path_prefix = prefix.and_then(normalize_prefix).unwrap_or_default();

    let mut openapi_spec = serde_json::json!({
        "openapi": "3.1.0",
        "info": {
            "title": "Shelf API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "In-memory book catalog service"
        },
        "paths": {},
        "components": {
            "schemas": {}
        }
    });

    openapi_spec["components"]["schemas"]["ErrorResponse"] = serde_json::json!({
        "type": "object",
        "properties": {
            "error": {
                "type": "object",
                "properties": {
                    "code": { "type": "string" },
                    "message": { "type": "string" },
                    "details": { "type": "array", "items": {} },
                    "trace_id": { "type": "string" },
                    "timestamp": { "type": "string" }
                },
                "required": ["code", "message", "details", "trace_id", "timestamp"]
            }
        },
        "required": ["error"]
    });

    openapi_spec["paths"]["/healthz"] = serde_json::json!({
        "get": {
            "summary": "Health check",
            "responses": {
                "200": {
                    "description": "OK",
                    "content": {
                        "text/plain": { "schema": { "type": "string" } }
                    }
                }
            }
        }
    });

    for module in registry.modules() {
        let Some(module_spec) = module.openapi() else {
            continue;
        };

        if let Some(paths) = module_spec.get("paths").and_then(|p| p.as_object()) {
            for (path, path_item) in paths {
                let prefixed_path = format!("{}{}", path_prefix, path);
                openapi_spec["paths"][prefixed_path] = path_item.clone();
            }
        }

        if let Some(schemas) = module_spec
            .get("components")
            .and_then(|c| c.get("schemas"))
            .and_then(|s| s.as_object())
        {
            for (schema_name, schema_def) in schemas {
                openapi_spec["components"]["schemas"][schema_name] = schema_def.clone();
            }
        }
    }

    openapi_spec
}

/// Request ID generator producing time-ordered UUIDv7 values
#[derive(Clone, Copy)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let timestamp = Timestamp::now(uuid::NoContext);
        let request_id = Uuid::new_v7(timestamp)
            .to_string()
            .parse::<HeaderValue>()
            .ok()?;
        Some(RequestId::new(request_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use tower::ServiceExt;

    fn get_request(uri: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix(""), None);
        assert_eq!(normalize_prefix("/"), None);
        assert_eq!(normalize_prefix("api"), Some("/api".to_string()));
        assert_eq!(normalize_prefix("/api/v1/"), Some("/api/v1".to_string()));
    }

    #[tokio::test]
    async fn test_module_merged_at_root() {
        let module_router = Router::new().route("/books", get(|| async { "module" }));
        let router = RouterBuilder::new().mount_module(None, module_router).build();

        let response = router.oneshot(get_request("/books")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_module_nested_under_prefix() {
        let module_router = Router::new().route("/books", get(|| async { "module" }));
        let router = RouterBuilder::new()
            .mount_module(Some("api"), module_router)
            .build();

        let nested = router
            .clone()
            .oneshot(get_request("/api/books"))
            .await
            .unwrap();
        assert_eq!(nested.status(), StatusCode::OK);

        let root = router.oneshot(get_request("/books")).await.unwrap();
        assert_eq!(root.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_middleware_chain_sets_request_id() {
        let router = RouterBuilder::new()
            .route("/health", get(|| async { "ok" }))
            .with_tracing()
            .with_cors()
            .with_request_id()
            .with_timeout(5000)
            .build();

        let response = router.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let request_id = response
            .headers()
            .get("x-request-id")
            .expect("request id propagated")
            .to_str()
            .unwrap();
        let parsed = Uuid::parse_str(request_id).unwrap();
        assert_eq!(parsed.get_version_num(), 7);
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let registry = ModuleRegistry::new();
        let router = RouterBuilder::new().with_openapi(&registry, None).build();

        let response = router
            .oneshot(get_request("/docs/openapi.json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(doc["openapi"], "3.1.0");
        assert!(doc["paths"].get("/healthz").is_some());
        assert!(doc["components"]["schemas"].get("ErrorResponse").is_some());
    }

    #[tokio::test]
    async fn test_slow_request_times_out() {
        let router = RouterBuilder::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    "late"
                }),
            )
            .with_timeout(20)
            .build();

        let response = router.oneshot(get_request("/slow")).await.unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }
}
