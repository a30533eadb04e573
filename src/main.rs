use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod app_state;
mod config;
mod db;
mod error;
mod middleware;
mod modules;
mod scheduling;
mod seed;

use app_state::AppState;

#[derive(Parser)]
#[command(name = "tutorhub-backend", about = "Tutoring marketplace backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve,
    /// Seed the database with sample data
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenv().ok();

    let cli = Cli::parse();
    let config = config::init()?.clone();
    let pool = db::init_pool().await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Seed => {
            seed::run(&pool).await?;
        }
        Command::Serve => {
            let addr = config.server_addr();
            let state = AppState::new(pool, config.clone());
            let app = app::create_router(state);

            info!("{} listening on {}", config.app.name, addr);

            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .context("Failed to bind to address")?;

            axum::serve(listener, app)
                .await
                .context("Failed to serve application")?;
        }
    }

    Ok(())
}
