use serde::{Deserialize, Serialize};

/// Aggregate counters over every guild the primary connection can see.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildStats {
    pub guilds: u64,
    pub channels: u64,
    pub members: u64,
    pub online: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildRecord {
    /// Snowflake rendered as a string so JavaScript clients keep full precision.
    pub id: String,
    pub name: String,
}
