use std::net::SocketAddr;
use std::sync::Arc;

use tokio::{signal, sync::mpsc};
use tracing::info;

use storefront_api as api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = api::config::load_config()?;
    api::config::init_tracing(cfg.log_level(), cfg.log_json);

    // Durable mirror: load the ledger snapshot from disk, seeding on first run.
    let snapshot_store: Arc<dyn api::persistence::SnapshotStore> =
        Arc::new(api::persistence::JsonSnapshotStore::new(cfg.data_dir.clone()));
    let data = api::persistence::load_or_seed(snapshot_store.as_ref())
        .await
        .map_err(|e| anyhow::anyhow!("failed to load ledger snapshot: {}", e))?
        .shared();

    // Domain events: bounded channel drained by a logging task.
    let (event_tx, event_rx) = mpsc::channel(cfg.event_buffer);
    let event_sender = api::events::EventSender::new(event_tx);
    tokio::spawn(api::events::process_events(event_rx));

    let services = api::handlers::AppServices::new(
        data.clone(),
        snapshot_store.clone(),
        event_sender.clone(),
    );

    let app_state = api::AppState {
        config: cfg.clone(),
        data,
        event_sender,
        services,
    };

    let app = api::build_router(app_state);

    let addr: SocketAddr = format!("{}:{}", cfg.host, cfg.port).parse()?;
    info!("storefront-api listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
