mod analysis;
mod config;
mod doc;
mod dtos;
mod error;
mod routes;
mod state;
mod utils;

use crate::{
    analysis::{client::AnalyzerClient, queue::AnalysisQueue},
    config::Config,
    doc::ApiDoc,
    state::AppState,
    utils::shutdown::shutdown_signal,
};
use axum::{Router, routing::get};
use database::db::create_connection;
use log::info;
use migration::{Migrator, MigratorTrait};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_oauth2_resource_server::server::OAuth2ResourceServer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::from_env()?;

    let db = create_connection(&config.database_url).await?;
    Migrator::up(&db, None).await?;
    info!("Database migrations are up to date");

    let oauth2_resource_server = <OAuth2ResourceServer>::builder()
        .issuer_url(config.oidc_issuer_url.as_str())
        .build()
        .await
        .map_err(|e| format!("Failed to build OAuth2ResourceServer: {e:?}"))?;

    if config.analyzer_url.is_none() {
        info!("ANALYZER_URL not set, analysis requests will use the fallback result");
    }
    let analysis = AnalysisQueue::start(
        AnalyzerClient::new(config.analyzer_url.clone()),
        config.analysis_retention,
    );

    let state = AppState { db, analysis };

    let api = routes::api_router()
        .layer(ServiceBuilder::new().layer(oauth2_resource_server.into_layer()));

    let app = Router::new()
        .route("/", get(routes::root::root))
        .route("/health", get(routes::health::health))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api)
        .layer(CompressionLayer::new())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Running axum on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
