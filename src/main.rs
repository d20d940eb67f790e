use assessment_backend::{
    config::{get_config, init_config},
    middleware::cors::permissive_cors,
    routes,
    store::records::RecordStore,
    AppState,
};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let store = RecordStore::new(config.data_dir.clone());
    store.ensure_dir().await?;
    info!("Assessment data directory: {}", store.data_dir().display());

    let app_state = AppState::new(store);

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let public_api = Router::new()
        .route("/api/submit", post(routes::public::submit_assessment))
        .layer(axum::middleware::from_fn_with_state(
            assessment_backend::middleware::rate_limit::new_rps_state(config.public_rps),
            assessment_backend::middleware::rate_limit::rps_middleware,
        ));

    let admin_api = Router::new()
        .route("/api/assessments", get(routes::admin::list_assessments))
        .route("/api/assessment/:user_id", get(routes::admin::get_assessment))
        .route("/api/analytics", get(routes::admin::get_corpus_analytics))
        .route(
            "/api/analytics/:user_id",
            get(routes::admin::get_assessment_analytics),
        )
        .layer(axum::middleware::from_fn_with_state(
            assessment_backend::middleware::rate_limit::new_rps_state(config.admin_rps),
            assessment_backend::middleware::rate_limit::rps_middleware,
        ));

    let app = base_routes
        .merge(public_api)
        .merge(admin_api)
        .nest_service("/static", ServeDir::new(config.static_dir.clone()))
        .with_state(app_state)
        .layer(permissive_cors())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
