use anyhow::Context;
use tokio::sync::mpsc;

use review_common::config::AppConfig;
use review_notifier::TelegramNotifier;
use review_watcher::fetcher::StatusFetcher;
use review_watcher::logging;
use review_watcher::poller::{PollSettings, StatusPoller};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first: it decides where logs go
    let config = AppConfig::from_env()?;

    logging::init(config.log_file.as_deref())?;

    tracing::info!(
        status_url = %config.status_url,
        chat_id = %config.telegram_chat_id,
        "Review watcher starting..."
    );

    let fetcher = StatusFetcher::from_config(&config).context("Failed to build status client")?;
    let notifier =
        TelegramNotifier::from_config(&config).context("Failed to build Telegram client")?;

    let start = chrono::Utc::now().timestamp();
    let mut poller = StatusPoller::new(fetcher, notifier, PollSettings::from_config(&config), start);

    // Graceful shutdown on Ctrl+C
    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Received shutdown signal, stopping gracefully...");
                let _ = shutdown_tx.send(()).await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Unable to listen for shutdown signal");
                // Dropping the sender would stop the poller
                let _keep_alive = shutdown_tx;
                std::future::pending::<()>().await
            }
        }
    });

    poller.run(shutdown_rx).await;

    tracing::info!("Review watcher stopped.");
    Ok(())
}
