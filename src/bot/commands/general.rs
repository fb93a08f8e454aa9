//! General Discord commands - ping, help and the backend health check.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };
    use tracing::warn;

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**Renewal Calendar Help**\n\
        Track vendor agreements and never miss a notice deadline.\n\n\
        **Overview**\n\
        • `/dashboard` - Active agreements, total value, upcoming and urgent counts.\n\
        • `/upcoming` - Events in the next few months, urgent ones flagged.\n\
        • `/events` - Every event from today on.\n\
        • `/calendar [year] [month]` - Month view with that month's events.\n\
        • `/day <date>` - Events on one date (`YYYY-MM-DD`).\n\n\
        **Agreements**\n\
        • `/agreements` - All agreements, active first.\n\
        • `/agreement <agreement>` - Details and events of one agreement.\n\
        • `/upload <file>` - Upload a contract PDF for extraction.\n\
        • `/edit_agreement <agreement> [fields]` - Correct extracted fields.\n\
        • `/delete_agreement <agreement>` - Remove an agreement and its events.\n\n\
        **Utility Commands**\n\
        • `/refresh` - Reloads data from the backend.\n\
        • `/health` - Checks that the backend is reachable.\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Checks that the extraction backend is up.
    #[poise::command(slash_command, prefix_command)]
    pub async fn health(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.defer().await?;
        let api = ctx.data().orchestrator.api();

        let status = match api.health().await {
            Ok(status) => status,
            Err(e) => {
                warn!("Health check failed: {}", e);
                ctx.say(format!("🔴 Backend unreachable: {e}")).await?;
                return Ok(());
            }
        };

        let icon = if status.is_healthy() { "🟢" } else { "🟡" };
        let mut message = format!("{icon} Backend status: **{}**", status.status);
        if let Some(timestamp) = status.timestamp.as_deref() {
            message.push_str(&format!(" (as of {timestamp})"));
        }
        match api.upcoming_events().await {
            Ok(upcoming) => message.push_str(&format!(
                "\nBackend reports {} upcoming event{}.",
                upcoming.len(),
                if upcoming.len() == 1 { "" } else { "s" }
            )),
            Err(e) => warn!("Upcoming events check failed: {}", e),
        }

        ctx.say(message).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
