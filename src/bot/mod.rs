//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the renewal calendar,
//! including all slash commands, autocomplete handlers, and bot context management.

/// Discord command implementations (dashboard, agreement, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    config::{DashboardConfig, discord},
    core::{orchestrator::Orchestrator, snapshot::Snapshot},
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
/// Holds the orchestrator (and through it the current snapshot) plus display settings.
pub struct BotData {
    /// Owner of the snapshot and entry point for every mutation
    pub orchestrator: Orchestrator,
    /// Dashboard horizon and list length
    pub settings: DashboardConfig,
}

impl BotData {
    /// Creates a new `BotData` instance.
    #[must_use]
    pub const fn new(orchestrator: Orchestrator, settings: DashboardConfig) -> Self {
        Self {
            orchestrator,
            settings,
        }
    }
}

/// Reply for commands that read data before the first successful load.
pub const NOT_LOADED: &str =
    "⚠️ No data loaded yet. The backend may be unreachable; try `/refresh`.";

/// Passes a loaded snapshot through; the startup snapshot yields [`NOT_LOADED`].
pub fn require_loaded(snapshot: Arc<Snapshot>) -> std::result::Result<Arc<Snapshot>, &'static str> {
    if snapshot.is_initial() {
        Err(NOT_LOADED)
    } else {
        Ok(snapshot)
    }
}

/// The current snapshot for a read command. Before the first successful load this
/// replies with [`NOT_LOADED`] and returns `None`.
pub async fn loaded_snapshot(
    ctx: poise::Context<'_, BotData, Error>,
) -> Result<Option<Arc<Snapshot>>> {
    match require_loaded(ctx.data().orchestrator.snapshot().await) {
        Ok(snapshot) => Ok(Some(snapshot)),
        Err(message) => {
            ctx.say(message).await?;
            Ok(None)
        }
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("❌ An error occurred: {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Registers all commands and runs the Discord client until it stops.
///
/// Commands are registered in `DEV_GUILD_ID` when set, globally otherwise.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::health(),
                commands::dashboard(),
                commands::upcoming(),
                commands::all_events(),
                commands::calendar(),
                commands::day(),
                commands::refresh(),
                commands::list_agreements(),
                commands::show_agreement(),
                commands::upload(),
                commands::edit_agreement(),
                commands::delete_agreement(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                let commands = &framework.options().commands;
                if let Some(guild_id) = discord::get_dev_guild_id() {
                    let guild_id = serenity::GuildId::new(guild_id);
                    poise::builtins::register_in_guild(ctx, commands, guild_id).await?;
                    info!("Registered commands in guild {}", guild_id);
                } else {
                    poise::builtins::register_globally(ctx, commands).await?;
                    info!("Registered commands globally");
                }
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    Ok(())
}

pub use commands::*;
pub use handlers::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{api::AgreementApi, test_utils::sample_api};

    #[tokio::test]
    async fn test_require_loaded_after_failed_first_load() -> Result<()> {
        let api = Arc::new(sample_api());
        let orchestrator = Orchestrator::new(Arc::clone(&api) as Arc<dyn AgreementApi>);

        api.fail_lists(true);
        assert!(orchestrator.reload().await.is_err());
        assert_eq!(
            require_loaded(orchestrator.snapshot().await).err(),
            Some(NOT_LOADED)
        );

        api.fail_lists(false);
        orchestrator.reload().await?;
        let snapshot = require_loaded(orchestrator.snapshot().await);
        assert_eq!(snapshot.map(|s| s.agreements.len()), Ok(2));
        Ok(())
    }
}
