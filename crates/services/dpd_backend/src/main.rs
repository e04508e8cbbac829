// File: services/dpd_backend/src/main.rs
mod app;

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, Level};

use dpd_auth::SessionProvider;
use dpd_common::logging;
use dpd_config::load_config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    // Raw SOAP traffic is logged at DEBUG.
    if config.dpd.tracing {
        logging::init_with_level(Level::DEBUG);
    } else {
        logging::init();
    }

    let session = Arc::new(SessionProvider::new(config.dpd.clone()));

    // Log in once at startup so bad credentials show up immediately.
    // Requests retry the login, so a failure here is not fatal.
    let _ = logging::log_result(
        session.authorisation().await,
        "DPD login successful",
        "DPD login at startup failed",
    );

    let app = app::build_router(session);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
