//! Kiosk entry point.

use std::sync::Arc;

use domain::Catalog;
use kiosk::config::Config;
use kiosk::{Flow, Kiosk};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, closing kiosk");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, closing kiosk");
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = Config::from_env();

    // Logs go to stderr so stdout carries only replies.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut kiosk = Kiosk::new(config, Arc::new(Catalog::standard()));
    tracing::info!(session_id = %kiosk.session().id(), "kiosk started");

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(format!("{}\n", kiosk.greeting()).as_bytes())
        .await?;
    stdout.flush().await?;

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            () = &mut shutdown => break,
        };

        // End of input.
        let Some(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }

        let reply = kiosk.handle_line(&line);
        stdout.write_all(format!("{}\n", reply.text).as_bytes()).await?;
        stdout.flush().await?;

        if reply.flow == Flow::Quit {
            break;
        }
    }

    tracing::info!(
        session_id = %kiosk.session().id(),
        events = kiosk.session().history().len(),
        "kiosk shut down"
    );
    Ok(())
}
