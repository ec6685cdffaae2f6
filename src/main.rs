use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use health_tracker::{router, AppState, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let state = AppState::new(&config);

    let user_id = state.identity.auto_init().await?;
    info!("identity ready: {user_id}");
    info!("calculation service: {}", state.api.base_url());

    let app = router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
