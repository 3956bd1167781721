use axum::{extract::State, routing::get, Json, Router};
use common::types::Health;
use configs::AppConfig;
use service::catalog::ProductService;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::openapi;

pub mod products;

#[derive(Clone)]
pub struct ServerState {
    pub products: ProductService,
}

/// Router knobs that come from config rather than from state.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub images_dir: String,
    pub images_route: String,
    /// Swagger UI mount point; `None` disables the docs.
    pub docs_path: Option<String>,
    pub server_url: Option<String>,
}

impl RouterOptions {
    pub fn from_config(cfg: &AppConfig) -> Self {
        Self {
            images_dir: cfg.assets.images_dir.clone(),
            images_route: cfg.assets.images_route.clone(),
            docs_path: cfg.docs.enabled.then(|| cfg.docs.path.clone()),
            server_url: Some(format!("http://{}", cfg.bind_addr())),
        }
    }
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health(State(state): State<ServerState>) -> Json<Health> {
    Json(Health { status: "ok", products: state.products.count().await })
}

/// Build the full application router: product API, static images, docs.
pub fn build_router(state: ServerState, cors: CorsLayer, opts: &RouterOptions) -> Router {
    let api = Router::new()
        .route("/api/products", get(products::list).post(products::create))
        .route(
            "/api/products/:id",
            get(products::get).patch(products::update).delete(products::delete),
        );

    let mut app = Router::new()
        .route("/health", get(health))
        .merge(api)
        .nest_service(&opts.images_route, ServeDir::new(&opts.images_dir));

    if let Some(docs_path) = &opts.docs_path {
        app = app.merge(openapi::swagger_ui(docs_path, opts.server_url.as_deref()));
    }

    app.with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
