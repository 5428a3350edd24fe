use axum::http::Method;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use floortrack_engine::{
    config::Config,
    db::connection::create_pool,
    docs::ApiDoc,
    handlers,
    repositories::{SessionRepository, SessionRepositoryTrait, SuggestionLookupTrait},
    state::AppState,
    utils::clock::SystemClock,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "floortrack_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    tracing::info!(
        database_url = %config.database_url,
        bind_addr = %config.bind_addr,
        time_zone = %config.time_zone,
        cutoff_time = %config.cutoff_time,
        sweep_interval_secs = config.sweep_interval_secs,
        "Loaded configuration from environment/.env"
    );

    // Initialize database
    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let repository = Arc::new(SessionRepository::new(pool));
    let repo: Arc<dyn SessionRepositoryTrait> = repository.clone();
    let lookup: Arc<dyn SuggestionLookupTrait> = repository;
    let state = AppState::new(repo, lookup, Arc::new(SystemClock), config.clone());

    // Opportunistic cutoff sweep: once now, then on an interval, so
    // yesterday's stragglers close without waiting for any client.
    let sweeper = Arc::clone(&state.sweeper);
    let sweep_interval = std::time::Duration::from_secs(config.sweep_interval_secs.max(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_interval);
        loop {
            interval.tick().await;
            match sweeper.sweep().await {
                Ok(report) if report.closed > 0 || !report.failed.is_empty() => {
                    tracing::info!(
                        closed = report.closed,
                        failed = report.failed.len(),
                        "cutoff sweep finished"
                    );
                }
                Ok(_) => {}
                Err(err) => tracing::warn!(error = %err, "cutoff sweep failed"),
            }
        }
    });

    // Compose app with shared layers (CORS/Trace) and the docs UI
    let app = handlers::router(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                        .allow_headers(Any)
                        .max_age(std::time::Duration::from_secs(24 * 60 * 60)),
                ),
        );

    // Start server
    let addr: std::net::SocketAddr = config.bind_addr.parse()?;
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
