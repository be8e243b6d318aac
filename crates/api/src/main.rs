use moodlens_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    moodlens_observability::init();

    let config = AppConfig::from_env();
    let ctx = moodlens_api::app::bootstrap(&config).await?;
    let app = moodlens_api::app::build_app(ctx);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
