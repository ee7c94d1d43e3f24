//! diseasedx HTTP server.

use diseasedx_api::{api_router, load_dataset, ApiConfig, AppState};
use diseasedx_core::{init_logging, DiseaseProvider, LoggingConfig, ServiceConfig};
use log::{error, info};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    if let Some(mut logging) = LoggingConfig::from_env() {
        logging.warnings_to_stderr = true;
        if let Err(err) = init_logging(&logging) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    match serve().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_failed module=api status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn serve() -> Result<(), Box<dyn std::error::Error>> {
    let config = ApiConfig::from_env()?;
    let loaded = load_dataset(&config)?;
    let state = AppState::new(loaded, ServiceConfig::with_page_size(config.page_size));

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    let addr = listener.local_addr()?;
    info!(
        "event=server_start module=api status=ok addr={} source={} records={}",
        addr,
        state.source.label(),
        state.service.provider().records().len()
    );
    eprintln!("diseasedx listening on http://{addr}/api/");

    axum::serve(listener, api_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=api status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=shutdown_signal module=api status=error error={err}");
        std::future::pending::<()>().await;
    }
}
