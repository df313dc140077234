use anyhow::Context;

use mason_infra::DatabaseConfig;

const BIND_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mason_observability::init();

    let config = DatabaseConfig::from_env();
    let app = mason_api::app::build_app(&config)
        .await
        .context("failed to open the shop database")?;

    let listener = tokio::net::TcpListener::bind(BIND_ADDR)
        .await
        .with_context(|| format!("failed to bind {BIND_ADDR}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
