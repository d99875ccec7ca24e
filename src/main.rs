use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal::{self, ctrl_c};
use tokio::sync::watch;
use tracing::{error, info};

use live_poll::adapters::{app_router, InMemoryPollRepository, SessionReaper};
use live_poll::config::AppConfig;
use live_poll::domain::poll::{MoodLevel, Profile};
use live_poll::ports::SessionRetirement;
use live_poll::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let settings = config.polling.poll_settings();
    let profiles = Arc::new(InMemoryPollRepository::<Profile>::new(settings));
    let moods = Arc::new(InMemoryPollRepository::<MoodLevel>::new(settings));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let reaper = config.polling.reaper_config().map(|reaper_config| {
        let targets: Vec<Arc<dyn SessionRetirement>> = vec![profiles.clone(), moods.clone()];
        let reaper = SessionReaper::new(targets, reaper_config);
        tokio::spawn(async move { reaper.run(shutdown_rx).await })
    });

    let app = app_router(profiles, moods, &config.server);

    let address = config.server.socket_addr()?;
    let listener = TcpListener::bind(address).await?;
    info!(%address, environment = ?config.server.environment, "live poll server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    if let Some(handle) = reaper {
        if let Err(e) = handle.await {
            error!(error = %e, "session reaper task failed");
        }
    }

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
