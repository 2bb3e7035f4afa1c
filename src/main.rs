// src/main.rs
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use inventory_api::{build_app, config::Config, database, mail::SmtpMailer, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("invalid configuration")?;
    tracing::info!(origins = config.cors_origins.len(), "configuration loaded");

    // Create database pool and make sure the tables exist
    let db_pool = database::create_pool(&config.database_url)
        .await
        .context("failed to open database")?;
    database::init_schema(&db_pool)
        .await
        .context("failed to create schema")?;

    let mailer = SmtpMailer::new(&config.mail).context("invalid mail settings")?;
    let app_state = AppState::new(db_pool, Arc::new(mailer), config.mail.business_name.as_str());

    let app = build_app(app_state, config.cors_origins.clone());

    // Try port..port+20 to avoid crash when address is in use
    let listener = {
        let mut bound = None;
        for offset in 0u16..=20 {
            let port = config.port.saturating_add(offset);
            let addr = SocketAddr::from((config.host, port));
            match TcpListener::bind(addr).await {
                Ok(l) => {
                    bound = Some((l, addr));
                    break;
                }
                Err(e) => {
                    if offset == 0 {
                        tracing::warn!(%addr, error = %e, "Port in use, trying next");
                    }
                }
            }
        }
        match bound {
            Some((l, addr)) => {
                tracing::info!("Server running on {}", addr);
                l
            }
            None => anyhow::bail!(
                "failed to bind to any port starting at {} on {}",
                config.port,
                config.host
            ),
        }
    };

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
