use crate::{
    config::{GatewayAppState, GatewayConfig},
    handlers::{
        create::create_handler,
        delete::delete_handler,
        read::read_handler,
        update::update_handler,
    },
    tx::{StdTxBuilder, TxBuilder},
};

use std::sync::Arc;
use anyhow::Context;
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use axum_server::Handle;
use tracing::info;

/// The four tx-generation routes under `/{store}`.
pub fn crud_routes(store: &str) -> Router<GatewayAppState> {
    Router::new()
        .route(&format!("/{}/create", store), post(create_handler))
        .route(&format!("/{}/read", store),   post(read_handler))
        .route(&format!("/{}/update", store), post(update_handler))
        .route(&format!("/{}/delete", store), post(delete_handler))
}

pub fn router(state: GatewayAppState) -> Router {
    let limit = state.cfg.max_body_bytes;
    crud_routes(&state.cfg.store_name)
        .layer(DefaultBodyLimit::max(limit))
        .with_state(state)
}

pub fn app_state(cfg: GatewayConfig, builder: Arc<dyn TxBuilder>) -> GatewayAppState {
    GatewayAppState { cfg: Arc::new(cfg), builder }
}

pub fn default_state(cfg: GatewayConfig) -> GatewayAppState {
    let builder = StdTxBuilder::new(cfg.gas_params());
    app_state(cfg, Arc::new(builder))
}

async fn shutdown_on_ctrl_c(handle: Handle) {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
        handle.graceful_shutdown(Some(std::time::Duration::from_secs(10)));
    }
}

pub async fn run(cfg: GatewayConfig) -> anyhow::Result<()> {
    let addr = cfg.listen_addr()?;
    let tls = cfg.tls_paths().map(|(c, k)| (c.to_owned(), k.to_owned()));
    let app = router(default_state(cfg));

    let handle = Handle::new();
    tokio::spawn(shutdown_on_ctrl_c(handle.clone()));

    match tls {
        #[cfg(feature = "tls")]
        Some((cert, key)) => {
            use axum_server::tls_rustls::RustlsConfig;

            let srv_cfg = crate::utils::server_tls_config(&cert, &key)?;
            let tls_config = RustlsConfig::from_config(srv_cfg);
            info!(%addr, "serving HTTPS");
            axum_server::bind_rustls(addr, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("HTTPS server failed")?;
        }
        #[cfg(not(feature = "tls"))]
        Some(_) => anyhow::bail!("https_cert/https_key set but built without the `tls` feature"),
        None => {
            info!(%addr, "serving HTTP");
            axum_server::bind(addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("HTTP server failed")?;
        }
    }

    Ok(())
}
