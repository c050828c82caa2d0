use anyhow::Context;
use conduit_config::ConduitConfig;
use conduit_server::{AppState, build_router};

/// Handle `conduit serve`.
pub async fn handle(config: ConduitConfig, bind: Option<&str>) -> anyhow::Result<()> {
    let addr = match bind {
        Some(bind) => bind
            .parse()
            .with_context(|| format!("invalid --bind address '{bind}'"))?,
        None => config.bind_addr()?,
    };

    for (app, upstream) in [
        ("hris", &config.hris),
        ("investigation", &config.investigation),
        ("tax", &config.tax),
    ] {
        tracing::info!(app, base_url = upstream.base(), "upstream");
    }

    let state = AppState::from_config(&config)
        .await
        .context("failed to initialize application state")?;
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "conduit listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await
        .context("server error")
}
