use chrono::Local;
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use wellness_tracker::{load_data, router, AppState, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Some(parent) = config.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let data = load_data(&config.data_path, config.seed_demo, Local::now().date_naive()).await;
    info!(
        entries = data.entries.len(),
        path = %config.data_path.display(),
        "loaded state"
    );
    let app = router(AppState::new(config.data_path.clone(), data));

    info!("listening on http://{}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
