//! One-shot cutoff sweep, for cron or an operator console.

use std::sync::Arc;

use floortrack_engine::{
    config::Config,
    db::connection::create_pool,
    repositories::SessionRepository,
    services::CutoffSweeper,
    utils::clock::SystemClock,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::load()?;
    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let sweeper = CutoffSweeper::new(
        Arc::new(SessionRepository::new(pool)),
        Arc::new(SystemClock),
        config.time_zone,
        config.cutoff_time,
    );

    let report = sweeper
        .sweep()
        .await
        .map_err(|err| anyhow::anyhow!("cutoff sweep failed: {err}"))?;

    if report.closed > 0 {
        tracing::info!("Closed {} sessions past cutoff", report.closed);
    }
    for failure in &report.failed {
        tracing::warn!(
            session_id = %failure.session_id,
            "Failed to close session: {}",
            failure.error
        );
    }

    Ok(())
}
