use std::sync::Arc;

use anyhow::Result;
use folio::{AppState, Config};
use folio_notification::{Dispatcher, EmailService, EnvSecrets, TelegramService};

pub async fn serve(
    config: Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting folio server...");

    // Use CLI overrides if provided, otherwise use config
    let host = host_override.unwrap_or(config.server.host.to_owned());
    let port = port_override.unwrap_or(config.server.port);

    let missing = config.contact.secrets().missing();
    if !missing.is_empty() {
        tracing::warn!(
            ?missing,
            "Contact secrets not configured yet; submissions fail until they are set"
        );
    }

    let dispatcher = Dispatcher::new(
        Arc::new(TelegramService::new(&config.contact.telegram_api_url)),
        Arc::new(EmailService::new(config.contact.email())),
        Arc::new(EnvSecrets::new(config.contact.secrets())),
    )
    .with_timeout(config.contact.delivery_timeout());

    let state = AppState {
        dispatcher: Arc::new(dispatcher),
    };

    let app = folio::router(state);

    // Start server
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Graceful shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Starting graceful shutdown...");
}
