use tracing_subscriber::EnvFilter;

use orcamento_server::build_router;
use orcamento_server::config::ServerConfig;
use orcamento_server::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ServerConfig::from_env()?;
    let state = AppState::from_config(&config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(
        addr = %config.bind,
        output_dir = %config.output_dir.display(),
        company = %config.company.name,
        "listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
