#[tokio::main]
async fn main() -> anyhow::Result<()> {
    labelbase_observability::init();

    let jwt_secret = std::env::var("LABELBASE_JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("LABELBASE_JWT_SECRET not set; using insecure dev default");
        "dev-secret".to_string()
    });
    let bind_addr =
        std::env::var("LABELBASE_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let app = labelbase_api::app::build_app(jwt_secret).await?;

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
