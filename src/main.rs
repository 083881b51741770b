use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use chatrelay::connector::api::{build_router, Container};
use chatrelay::{Cli, Commands, ConversationLog};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    // RUST_LOG wins over --verbose.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_directive()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        None | Some(Commands::Serve) => serve(&cli).await?,

        Some(Commands::Send { ref message }) => {
            let container = Container::new(cli.container_config()).await;
            let log = container.send_message_use_case().execute(message).await?;
            if let Some(reply) = log.last() {
                println!("{}", reply.text());
            }
        }

        Some(Commands::History { json }) => {
            let container = Container::new(cli.container_config()).await;
            let log = container.get_history_use_case().execute().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&log)?);
            } else {
                print_log(&log);
            }
        }
    }

    Ok(())
}

async fn serve(cli: &Cli) -> Result<()> {
    let container = Arc::new(Container::new(cli.container_config()).await);
    let router = build_router(container);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Backend running on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn print_log(log: &ConversationLog) {
    if log.is_empty() {
        println!("No messages yet.");
        return;
    }

    for message in log {
        let label = if message.is_user() { "You" } else { "AI" };
        println!("{}: {}", label, message.text());
    }
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
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
