use std::net::{Ipv4Addr, SocketAddr};

use hobby_server::config::AppConfig;
use hobby_server::init;
use hobby_server::middleware::error::{AppError, AppResult};
use hobby_server::middleware::mw_ctx;
use tracing::info;

#[tokio::main]
async fn main() -> AppResult<()> {
    init::init_tracing();

    let config = AppConfig::from_env()?;
    info!("->> data file = {}", config.data_file.display());
    info!("->> codes file = {}", config.codes_file.display());

    let ctx_state = mw_ctx::create_default_ctx_state(&config)?;
    let routes_all = init::main_router(&ctx_state, &config);

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config {
            description: format!("cannot bind {addr}: {e}"),
        })?;
    info!("->> LISTENING on {addr}");

    axum::serve(listener, routes_all.into_make_service())
        .await
        .map_err(|e| AppError::Generic {
            description: e.to_string(),
        })?;

    Ok(())
}
