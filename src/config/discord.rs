//! Discord settings read from environment variables.
//!
//! The bot token is not stored in any config struct; `main` reads it right before the
//! client starts.

/// Guild to register commands in during development, from `DEV_GUILD_ID`.
///
/// Guild registration takes effect immediately, global registration can take an hour.
/// Returns `None` when unset or not a valid snowflake.
#[must_use]
pub fn get_dev_guild_id() -> Option<u64> {
    parse_guild_id(std::env::var("DEV_GUILD_ID").ok().as_deref())
}

fn parse_guild_id(raw: Option<&str>) -> Option<u64> {
    raw.map(str::trim)
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|id| *id != 0)
}
