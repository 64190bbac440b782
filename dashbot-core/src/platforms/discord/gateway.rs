use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use twilight_cache_inmemory::{DefaultInMemoryCache, ResourceType};
use twilight_http::Client as HttpClient;
use twilight_http::client::ClientBuilder;
use twilight_model::gateway::presence::Status;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, GuildMarker, UserMarker};
use twilight_model::util::Timestamp;

use crate::Error;
use crate::platforms::{DiscordApi, GuildSummary};

/// Outbound calls give up after this long instead of stalling a request forever.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client plus the in-memory cache the shard runners keep up to date.
pub struct DiscordGateway {
    http: Arc<HttpClient>,
    cache: Arc<DefaultInMemoryCache>,
}

impl DiscordGateway {
    pub fn new(token: &str) -> Self {
        let http = Arc::new(
            ClientBuilder::new()
                .token(token.to_string())
                .timeout(HTTP_TIMEOUT)
                .build(),
        );
        let cache = Arc::new(
            DefaultInMemoryCache::builder()
                .resource_types(ResourceType::GUILD | ResourceType::CHANNEL | ResourceType::PRESENCE)
                .build(),
        );
        Self { http, cache }
    }

    pub fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }

    pub fn cache(&self) -> &Arc<DefaultInMemoryCache> {
        &self.cache
    }

    fn summarize(&self, guild_id: Id<GuildMarker>, name: &str, member_count: Option<u64>) -> GuildSummary {
        let channel_count = self
            .cache
            .guild_channels(guild_id)
            .map(|channels| channels.len() as u64)
            .unwrap_or(0);
        GuildSummary {
            id: guild_id,
            name: name.to_string(),
            channel_count,
            member_count,
        }
    }
}

#[async_trait]
impl DiscordApi for DiscordGateway {
    fn guilds(&self) -> Vec<GuildSummary> {
        self.cache
            .iter()
            .guilds()
            .map(|entry| {
                let guild = entry.value();
                self.summarize(guild.id(), guild.name(), guild.member_count())
            })
            .collect()
    }

    fn guild(&self, guild_id: Id<GuildMarker>) -> Option<GuildSummary> {
        let guild = self.cache.guild(guild_id)?;
        Some(self.summarize(guild.id(), guild.name(), guild.member_count()))
    }

    fn online_member_count(&self, guild_id: Id<GuildMarker>) -> Result<u64, Error> {
        let user_ids = self
            .cache
            .guild_presences(guild_id)
            .ok_or_else(|| Error::NotFound(format!("no cached presences for guild {guild_id}")))?;
        let online = user_ids
            .iter()
            .filter_map(|user_id| self.cache.presence(guild_id, *user_id))
            .filter(|presence| presence.status() != Status::Offline)
            .count();
        Ok(online as u64)
    }

    fn channel_visible(&self, channel_id: Id<ChannelMarker>) -> bool {
        self.cache.channel(channel_id).is_some()
    }

    async fn send_message(&self, channel_id: Id<ChannelMarker>, content: &str) -> Result<(), Error> {
        self.http
            .create_message(channel_id)
            .content(content)
            .await
            .map_err(|e| Error::Platform(format!("Error sending Discord message: {e}")))?;
        Ok(())
    }

    async fn send_direct_message(&self, user_id: Id<UserMarker>, content: &str) -> Result<(), Error> {
        let channel = self
            .http
            .create_private_channel(user_id)
            .await
            .map_err(|e| Error::Platform(format!("Error opening DM channel: {e}")))?
            .model()
            .await
            .map_err(|e| Error::Platform(format!("Error parsing DM channel: {e}")))?;
        self.send_message(channel.id, content).await
    }

    async fn set_member_timeout(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        until: Option<Timestamp>,
    ) -> Result<(), Error> {
        self.http
            .update_guild_member(guild_id, user_id)
            .communication_disabled_until(until)
            .await
            .map_err(|e| Error::Platform(format!("Error updating member timeout: {e}")))?;
        Ok(())
    }
}
