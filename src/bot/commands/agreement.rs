//! Agreement Discord commands - listing, details, upload, edit and delete.
//!
//! Mutations go through the orchestrator, which validates, sends one request and
//! reloads. The outcome is reported as a [`Notification`](crate::core::notification::Notification).

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete, loaded_snapshot},
        core::{
            agreements, dates,
            notification::{Action, Notification},
            report,
            validation::{AgreementForm, check_pdf_upload},
        },
        entities::Currency,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use tracing::{info, warn};

    const EMBED_DESCRIPTION_LIMIT: usize = 4096;
    const EMBED_COLOR: u32 = 0x0034_98DB;

    /// Currency options offered by `/edit_agreement`
    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum CurrencyChoice {
        #[name = "USD"]
        Usd,
        #[name = "EUR"]
        Eur,
        #[name = "GBP"]
        Gbp,
        #[name = "CAD"]
        Cad,
    }

    impl From<CurrencyChoice> for Currency {
        fn from(choice: CurrencyChoice) -> Self {
            match choice {
                CurrencyChoice::Usd => Self::Usd,
                CurrencyChoice::Eur => Self::Eur,
                CurrencyChoice::Gbp => Self::Gbp,
                CurrencyChoice::Cad => Self::Cad,
            }
        }
    }

    async fn say_notification(
        ctx: poise::Context<'_, BotData, Error>,
        notification: &Notification,
    ) -> Result<()> {
        ctx.say(notification.to_string()).await?;
        Ok(())
    }

    /// Lists all agreements, active ones first.
    #[poise::command(slash_command, prefix_command, rename = "agreements")]
    pub async fn list_agreements(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(snapshot) = loaded_snapshot(ctx).await? else {
            return Ok(());
        };
        if snapshot.agreements.is_empty() {
            ctx.say("📄 No agreements yet. Upload a contract PDF with `/upload` to get started!")
                .await?;
            return Ok(());
        }

        let today = dates::today();
        let split = agreements::partition(&snapshot.agreements, today);
        let lines: Vec<String> = split
            .display_order()
            .into_iter()
            .map(|a| report::format_agreement_line(a, today))
            .collect();

        let embed = serenity::CreateEmbed::default()
            .title("📄 Agreements")
            .description(report::clip(&lines.join("\n"), EMBED_DESCRIPTION_LIMIT))
            .color(EMBED_COLOR)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "{} active · {} expired",
                split.active_count(),
                split.expired_count()
            )));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows the details and calendar events of one agreement.
    #[poise::command(slash_command, prefix_command, rename = "agreement")]
    pub async fn show_agreement(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Agreement (search by vendor)"]
        #[autocomplete = "autocomplete::autocomplete_agreement"]
        agreement: String,
    ) -> Result<()> {
        let Some(snapshot) = loaded_snapshot(ctx).await? else {
            return Ok(());
        };
        let Some(found) = agreements::resolve(&snapshot.agreements, &agreement) else {
            ctx.say(format!("❌ No agreement matches '{agreement}'."))
                .await?;
            return Ok(());
        };

        let events = snapshot.events_for(&found.id);
        let embed = serenity::CreateEmbed::default()
            .description(report::clip(
                &report::format_agreement_details(found, &events, dates::today()),
                EMBED_DESCRIPTION_LIMIT,
            ))
            .color(EMBED_COLOR);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Uploads a contract PDF; the backend extracts the agreement and its events.
    #[poise::command(slash_command)]
    pub async fn upload(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Contract PDF"] file: serenity::Attachment,
    ) -> Result<()> {
        if let Err(message) = check_pdf_upload(&file.filename, file.content_type.as_deref()) {
            return say_notification(ctx, &Notification::error(message)).await;
        }

        // Extraction can take a while
        ctx.defer().await?;
        let bytes = file.download().await?;
        info!(filename = %file.filename, size = bytes.len(), "Uploading agreement PDF");

        let orchestrator = &ctx.data().orchestrator;
        let outcome = match orchestrator
            .upload(&file.filename, file.content_type.as_deref(), bytes)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Upload failed: {}", e);
                return say_notification(ctx, &Notification::failed(Action::Upload, &e)).await;
            }
        };
        let created = &outcome.value;
        let mut notification = Notification::uploaded(created);
        if let Some(e) = &outcome.reload_error {
            notification = notification.with_reload_failure(e);
        }

        let snapshot = orchestrator.snapshot().await;
        let events = snapshot.events_for(&created.id);
        let embed = serenity::CreateEmbed::default()
            .description(report::clip(
                &report::format_agreement_details(created, &events, dates::today()),
                EMBED_DESCRIPTION_LIMIT,
            ))
            .color(EMBED_COLOR);

        ctx.send(
            poise::CreateReply::default()
                .content(notification.to_string())
                .embed(embed),
        )
        .await?;
        Ok(())
    }

    /// Corrects extracted fields of an agreement. Omitted fields keep their current value.
    #[allow(clippy::too_many_arguments)] // One parameter per editable field
    #[poise::command(slash_command, prefix_command)]
    pub async fn edit_agreement(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Agreement (search by vendor)"]
        #[autocomplete = "autocomplete::autocomplete_agreement"]
        agreement: String,
        #[description = "Vendor name"] vendor: Option<String>,
        #[description = "Effective date (YYYY-MM-DD)"] effective_date: Option<String>,
        #[description = "End date (YYYY-MM-DD)"] end_date: Option<String>,
        #[description = "Term length in months"] term_length_months: Option<i64>,
        #[description = "Total contract value"] total_value: Option<f64>,
        #[description = "Currency"] currency: Option<CurrencyChoice>,
    ) -> Result<()> {
        let orchestrator = &ctx.data().orchestrator;
        let Some(snapshot) = loaded_snapshot(ctx).await? else {
            return Ok(());
        };
        let Some(existing) = agreements::resolve(&snapshot.agreements, &agreement) else {
            let missing = Error::AgreementNotFound { id: agreement };
            return say_notification(ctx, &Notification::failed(Action::Update, &missing)).await;
        };

        let mut form = AgreementForm::from_agreement(existing);
        if let Some(vendor) = vendor {
            form.vendor = vendor;
        }
        if let Some(effective_date) = effective_date {
            form.effective_date = effective_date;
        }
        if let Some(end_date) = end_date {
            form.end_date = end_date;
        }
        if term_length_months.is_some() {
            form.term_length_months = term_length_months;
        }
        if total_value.is_some() {
            form.total_value = total_value;
        }
        if let Some(currency) = currency {
            form.currency = currency.into();
        }

        ctx.defer().await?;
        let notification = match orchestrator.update(&existing.id, &form).await {
            Ok(outcome) => {
                let notification = Notification::updated(
                    outcome.value.agreement.vendor_name(),
                    outcome.value.calendar_updated,
                );
                match &outcome.reload_error {
                    Some(e) => notification.with_reload_failure(e),
                    None => notification,
                }
            }
            Err(e) => {
                if !e.is_client_side() {
                    warn!("Update failed: {}", e);
                }
                Notification::failed(Action::Update, &e)
            }
        };
        say_notification(ctx, &notification).await
    }

    /// Deletes an agreement and all of its calendar events.
    #[poise::command(slash_command, prefix_command)]
    pub async fn delete_agreement(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Agreement (search by vendor)"]
        #[autocomplete = "autocomplete::autocomplete_agreement"]
        agreement: String,
        #[description = "Set to True to confirm the deletion"] confirm: Option<bool>,
    ) -> Result<()> {
        let orchestrator = &ctx.data().orchestrator;
        let Some(snapshot) = loaded_snapshot(ctx).await? else {
            return Ok(());
        };
        let Some(target) = agreements::resolve(&snapshot.agreements, &agreement) else {
            let missing = Error::AgreementNotFound { id: agreement };
            return say_notification(ctx, &Notification::failed(Action::Delete, &missing)).await;
        };

        if !confirm.unwrap_or(false) {
            let event_count = snapshot.events_for(&target.id).len();
            ctx.say(format!(
                "⚠️ This permanently deletes **{}** and its {event_count} calendar event{}. \
                 Run the command again with `confirm: True` to proceed.",
                target.vendor_name(),
                if event_count == 1 { "" } else { "s" }
            ))
            .await?;
            return Ok(());
        }

        ctx.defer().await?;
        let notification = match orchestrator.delete(&target.id).await {
            Ok(outcome) => {
                let notification = Notification::deleted(outcome.value.as_ref());
                match &outcome.reload_error {
                    Some(e) => notification.with_reload_failure(e),
                    None => notification,
                }
            }
            Err(e) => {
                warn!("Delete failed: {}", e);
                Notification::failed(Action::Delete, &e)
            }
        };
        say_notification(ctx, &notification).await
    }
}

// Re-export all commands
pub use inner::*;
