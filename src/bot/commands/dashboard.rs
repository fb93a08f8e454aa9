//! Dashboard Discord commands - stats, event lists, the month calendar and reload.
//!
//! Every command here reads the current snapshot only; none of them sends a request to
//! the backend except `/refresh`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, loaded_snapshot},
        core::{
            dates, events,
            notification::{Action, Notification},
            report,
        },
        entities::CalendarEvent,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Discord limit on embed descriptions
    const EMBED_DESCRIPTION_LIMIT: usize = 4096;
    /// Discord limit on embed field values
    const EMBED_FIELD_LIMIT: usize = 1024;
    const EMBED_COLOR: u32 = 0x0034_98DB;

    async fn send_event_list(
        ctx: poise::Context<'_, BotData, Error>,
        title: String,
        events: &[&CalendarEvent],
        today: chrono::NaiveDate,
        empty: &str,
    ) -> Result<()> {
        let limit = ctx.data().settings.max_listed_events;
        let body = report::format_event_list(events, today, limit, empty);
        let embed = serenity::CreateEmbed::default()
            .title(title)
            .description(report::clip(&body, EMBED_DESCRIPTION_LIMIT))
            .color(EMBED_COLOR);
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows active agreements, their value, and upcoming and urgent event counts.
    #[poise::command(slash_command, prefix_command)]
    pub async fn dashboard(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(snapshot) = loaded_snapshot(ctx).await? else {
            return Ok(());
        };
        let data = ctx.data();

        let today = dates::today();
        let horizon = data.settings.upcoming_horizon_days;
        let stats = snapshot.stats(today, horizon);
        let urgent = events::urgent(&snapshot.events, today);

        let embed = serenity::CreateEmbed::default()
            .title("📊 Agreement Dashboard")
            .description(format!("As of {}", dates::format_date(today)))
            .color(EMBED_COLOR)
            .fields(
                report::dashboard_fields(&stats, horizon)
                    .into_iter()
                    .map(|(name, value)| (name, value, true)),
            )
            .field(
                "🚨 Needs Attention",
                report::clip(
                    &report::format_event_list(
                        &urgent,
                        today,
                        data.settings.max_listed_events,
                        "_Nothing due in the next 30 days_",
                    ),
                    EMBED_FIELD_LIMIT,
                ),
                false,
            )
            .footer(serenity::CreateEmbedFooter::new(format!(
                "Data loaded at {}",
                snapshot.loaded_at.format("%Y-%m-%d %H:%M")
            )));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Lists events in the upcoming window, earliest first.
    #[poise::command(slash_command, prefix_command)]
    pub async fn upcoming(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(snapshot) = loaded_snapshot(ctx).await? else {
            return Ok(());
        };
        let today = dates::today();
        let horizon = ctx.data().settings.upcoming_horizon_days;
        let upcoming = events::upcoming(&snapshot.events, today, horizon);
        send_event_list(
            ctx,
            format!("⏳ Upcoming Events (next {horizon} days)"),
            &upcoming,
            today,
            "_No upcoming events_",
        )
        .await
    }

    /// Lists every event from today on, earliest first.
    #[poise::command(slash_command, prefix_command, rename = "events")]
    pub async fn all_events(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(snapshot) = loaded_snapshot(ctx).await? else {
            return Ok(());
        };
        let today = dates::today();
        let future = events::future(&snapshot.events, today);
        send_event_list(
            ctx,
            "📅 All Future Events".to_string(),
            &future,
            today,
            "_No future events_",
        )
        .await
    }

    /// Shows a month calendar with that month's events.
    #[poise::command(slash_command, prefix_command)]
    pub async fn calendar(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Year (defaults to this year)"] year: Option<i32>,
        #[description = "Month 1-12 (defaults to this month)"]
        #[min = 1]
        #[max = 12]
        month: Option<u32>,
    ) -> Result<()> {
        let Some(snapshot) = loaded_snapshot(ctx).await? else {
            return Ok(());
        };
        let today = dates::today();
        let (current_year, current_month) = dates::month_of(today);
        let year = year.unwrap_or(current_year);
        let month = month.unwrap_or(current_month);

        let Some(grid) = events::month_grid(&snapshot.events, year, month, today) else {
            ctx.say(format!("❌ {year}-{month} is not a valid month."))
                .await?;
            return Ok(());
        };

        let month_events: Vec<&CalendarEvent> = grid
            .cells
            .iter()
            .filter(|cell| cell.in_current_month)
            .flat_map(|cell| cell.events.iter().copied())
            .collect();
        let list = report::format_event_list(
            &month_events,
            today,
            ctx.data().settings.max_listed_events,
            "_No events this month_",
        );

        let (prev_year, prev_month) = dates::previous_month(year, month);
        let (next_year, next_month) = dates::next_month(year, month);
        let embed = serenity::CreateEmbed::default()
            .title(format!("🗓️ {} {year}", report::month_name(month)))
            .description(report::clip(
                &format!("```\n{}```\n{list}", report::format_month_grid(&grid)),
                EMBED_DESCRIPTION_LIMIT,
            ))
            .color(EMBED_COLOR)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "{} event{} · ◀ /calendar {prev_year} {prev_month} · /calendar {next_year} {next_month} ▶",
                grid.events_in_month(),
                if grid.events_in_month() == 1 { "" } else { "s" }
            )));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Lists the events on one date.
    #[poise::command(slash_command, prefix_command)]
    pub async fn day(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Date as YYYY-MM-DD"] date: String,
    ) -> Result<()> {
        let Some(date) = dates::parse_iso_date(&date) else {
            ctx.say("❌ Please enter the date as YYYY-MM-DD.").await?;
            return Ok(());
        };

        let Some(snapshot) = loaded_snapshot(ctx).await? else {
            return Ok(());
        };
        let on_day = events::events_on(&snapshot.events, date);
        send_event_list(
            ctx,
            format!("📅 {}", dates::format_date(date)),
            &on_day,
            dates::today(),
            "_No events on this day_",
        )
        .await
    }

    /// Reloads agreements and events from the backend.
    #[poise::command(slash_command, prefix_command)]
    pub async fn refresh(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.defer().await?;
        let notification = match ctx.data().orchestrator.reload().await {
            Ok(snapshot) => Notification::success(format!(
                "Loaded {} agreements and {} calendar events",
                snapshot.agreements.len(),
                snapshot.events.len()
            )),
            Err(e) => Notification::failed(Action::Load, &e),
        };
        ctx.say(notification.to_string()).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
