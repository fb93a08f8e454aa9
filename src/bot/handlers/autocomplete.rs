//! Autocomplete handlers for Discord slash command parameters.
//!
//! Agreement parameters are typed as a vendor name but submitted as the agreement ID,
//! so two agreements with the same vendor stay distinguishable.

use crate::{bot::BotData, core::agreements, entities::Agreement, errors::Error};
use poise::serenity_prelude as serenity;

/// Discord autocomplete limit
const MAX_CHOICES: usize = 25;

/// Discord limit on the length of a choice name
const MAX_CHOICE_NAME_CHARS: usize = 100;

fn choice_name(agreement: &Agreement) -> String {
    format!("{} ({})", agreement.vendor_name(), agreement.filename)
        .chars()
        .take(MAX_CHOICE_NAME_CHARS)
        .collect()
}

/// `(name, id)` pairs for agreements whose vendor matches `partial`, sorted by name.
#[must_use]
pub fn agreement_choices(agreements: &[Agreement], partial: &str) -> Vec<(String, String)> {
    let mut matching: Vec<(String, String)> = agreements::search_by_vendor(agreements, partial)
        .into_iter()
        .map(|a| (choice_name(a), a.id.clone()))
        .collect();

    // Sort alphabetically for consistent UX
    matching.sort();
    matching.truncate(MAX_CHOICES);
    matching
}

/// Provides autocomplete suggestions for agreement parameters.
///
/// Searches the current snapshot, so suggestions never cost a backend request.
pub async fn autocomplete_agreement(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<serenity::AutocompleteChoice> {
    let snapshot = ctx.data().orchestrator.snapshot().await;
    agreement_choices(&snapshot.agreements, partial)
        .into_iter()
        .map(|(name, id)| serenity::AutocompleteChoice::new(name, id))
        .collect()
}
