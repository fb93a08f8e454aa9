use dotenvy::dotenv;
use renewal_calendar::{
    api::{AgreementApi, HttpAgreementApi},
    bot::{self, BotData},
    config,
    core::orchestrator::Orchestrator,
    errors::{Error, Result},
};
use std::{env, sync::Arc};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;

    // 4. Build the backend client and load the first snapshot
    let api = HttpAgreementApi::new(&app_config.backend)
        .inspect_err(|e| error!("Failed to build backend client: {}", e))?;
    info!(backend = %api.base_url(), "Backend client ready.");
    let orchestrator = Orchestrator::new(Arc::new(api) as Arc<dyn AgreementApi>);
    match orchestrator.reload().await {
        Ok(snapshot) => info!(
            agreements = snapshot.agreements.len(),
            events = snapshot.events.len(),
            "Initial data loaded."
        ),
        // The bot still starts; /refresh retries once the backend is reachable
        Err(e) => warn!("Initial load failed: {}", e),
    }

    // 5. Run the bot; the token is read right before use, never stored in AppConfig
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, BotData::new(orchestrator, app_config.dashboard)).await?;

    Ok(())
}
