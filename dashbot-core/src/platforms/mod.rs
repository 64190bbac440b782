// File: src/platforms/mod.rs

use std::sync::Arc;

use async_trait::async_trait;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, GuildMarker, UserMarker};
use twilight_model::util::Timestamp;

use crate::Error;

/// Point-in-time view of one guild as seen by a connection's cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildSummary {
    pub id: Id<GuildMarker>,
    pub name: String,
    pub channel_count: u64,
    /// `None` until the platform has reported it.
    pub member_count: Option<u64>,
}

/// What the control API and the slash commands need from one live Discord connection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiscordApi: Send + Sync {
    fn guilds(&self) -> Vec<GuildSummary>;
    fn guild(&self, guild_id: Id<GuildMarker>) -> Option<GuildSummary>;
    /// Members whose presence is anything but offline. Errors when presences
    /// for the guild are not cached (presence intent disabled, guild unavailable).
    fn online_member_count(&self, guild_id: Id<GuildMarker>) -> Result<u64, Error>;
    fn channel_visible(&self, channel_id: Id<ChannelMarker>) -> bool;

    async fn send_message(&self, channel_id: Id<ChannelMarker>, content: &str) -> Result<(), Error>;
    async fn send_direct_message(&self, user_id: Id<UserMarker>, content: &str) -> Result<(), Error>;
    /// `None` clears an existing timeout.
    async fn set_member_timeout(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        until: Option<Timestamp>,
    ) -> Result<(), Error>;
}

/// One gateway session that can be driven to completion and closed from elsewhere.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BotConnection: Send + Sync {
    /// Connects and processes events until closed or the platform ends the session.
    async fn run(&self) -> Result<(), Error>;

    /// Requests shutdown. Calling it more than once is a no-op, and calling it
    /// before `run` makes `run` return without connecting.
    fn close(&self);
}

/// Builds secondary connections for the bot instance manager.
#[cfg_attr(test, mockall::automock)]
pub trait BotConnector: Send + Sync {
    fn build(&self, label: &str, token: &str, prefix: &str) -> Result<Arc<dyn BotConnection>, Error>;
}

pub mod discord;
pub mod manager;
