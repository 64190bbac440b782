//! Live guild aggregates for the dashboard. Nothing here is cached; every call
//! walks the connection's gateway cache again.

use tracing::debug;

use dashbot_common::models::{GuildRecord, GuildStats};

use crate::platforms::DiscordApi;

/// Per-guild gaps (unknown member count, no presence data) count as zero
/// rather than failing the whole aggregate.
pub fn collect_stats(api: &dyn DiscordApi) -> GuildStats {
    let mut stats = GuildStats::default();
    for guild in api.guilds() {
        stats.guilds += 1;
        stats.channels += guild.channel_count;
        stats.members += guild.member_count.unwrap_or(0);
        match api.online_member_count(guild.id) {
            Ok(online) => stats.online += online,
            Err(e) => debug!("online count unavailable for guild {}: {e}", guild.id),
        }
    }
    stats
}

pub fn guild_records(api: &dyn DiscordApi) -> Vec<GuildRecord> {
    api.guilds()
        .into_iter()
        .map(|guild| GuildRecord {
            id: guild.id.to_string(),
            name: guild.name,
        })
        .collect()
}
