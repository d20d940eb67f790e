use tower_http::cors::{Any, CorsLayer};

// Open CORS: the assessment form is served from arbitrary origins.
pub fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any)
}
