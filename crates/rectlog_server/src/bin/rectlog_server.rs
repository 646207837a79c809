#![forbid(unsafe_code)]

use log::{error, info};
use rectlog_core::db::open_db;
use rectlog_core::{core_version, init_logging, SharedRecordStore};
use rectlog_server::{router, AppState, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    init_logging(&config.log_level, config.log_dir.as_deref())?;

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=server_start module=server status=error error_code=store_open_failed db_path={} error={}",
                config.db_path.display(),
                err
            );
            return Err(err.into());
        }
    };
    let state = AppState::new(SharedRecordStore::new(conn));
    let existing = state.service.count_records()?;

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(
        "event=server_start module=server status=ok version={} bind={} db_path={} records={}",
        core_version(),
        config.bind,
        config.db_path.display(),
        existing
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(
            "event=server_stop module=server status=error error_code=signal_failed error={}",
            err
        );
        std::future::pending::<()>().await;
    }
    info!("event=shutdown_signal module=server status=ok");
}
