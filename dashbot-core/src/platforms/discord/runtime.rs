use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use twilight_gateway::{
    self as gateway,
    CloseFrame,
    Config,
    Event,
    EventTypeFlags,
    Intents,
    Shard,
    StreamExt,
};
use twilight_http::Client as HttpClient;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::Error;
use crate::platforms::discord::gateway::DiscordGateway;
use crate::platforms::{BotConnection, BotConnector};
use crate::services::LanguageSetting;
use crate::services::discord::prefix::{parse_prefix_command, prefix_reply};
use crate::services::discord::slashcommands::{
    CommandContext,
    CommandProfile,
    CommandRegistry,
    handle_interaction_create,
    register_global_slash_commands,
};

/// Intents every connection asks for. The privileged ones must be enabled in the
/// developer portal, otherwise the gateway refuses the session.
pub fn gateway_intents(privileged: bool) -> Intents {
    let mut intents = Intents::GUILDS | Intents::GUILD_MESSAGES;
    if privileged {
        intents |= Intents::MESSAGE_CONTENT | Intents::GUILD_MEMBERS | Intents::GUILD_PRESENCES;
    }
    intents
}

/// Settings shared by the primary connection and every dashboard-started bot.
#[derive(Clone)]
pub struct DiscordSettings {
    pub privileged_intents: bool,
    pub dashboard_url: String,
    pub language: Arc<LanguageSetting>,
}

/// Everything one shard runner needs; cheap to clone per shard.
#[derive(Clone)]
struct ShardContext {
    label: Arc<str>,
    prefix: Arc<str>,
    http: Arc<HttpClient>,
    gateway: Arc<DiscordGateway>,
    registry: Arc<CommandRegistry>,
    commands: Arc<CommandContext>,
}

/// The shard runner:
///   - calls `shard.next_event(...)`
///   - updates the in-memory cache
///   - syncs slash commands on READY and answers interactions and prefix commands.
async fn shard_runner(mut shard: Shard, ctx: ShardContext, shutdown: CancellationToken) {
    let shard_id = shard.id().number();
    let label = ctx.label.clone();
    info!("(ShardRunner) [{label}] Shard {shard_id} started. Listening for events.");

    let sender = shard.sender();
    let mut closing = false;

    loop {
        let item = tokio::select! {
            _ = shutdown.cancelled(), if !closing => {
                closing = true;
                if let Err(e) = sender.close(CloseFrame::NORMAL) {
                    debug!("[{label}] Shard {shard_id} close request failed: {e:?}");
                    break;
                }
                continue;
            }
            item = shard.next_event(EventTypeFlags::all()) => item,
        };

        let Some(item) = item else {
            break;
        };

        match item {
            Ok(Event::GatewayClose(frame)) if closing => {
                debug!("[{label}] Shard {shard_id} closed: {frame:?}");
                break;
            }
            Ok(event) => {
                ctx.gateway.cache().update(&event);
                handle_event(&ctx, shard_id, event);
            }
            Err(err) => {
                warn!("[{label}] Shard {shard_id} => error receiving event: {err:?}");
            }
        }
    }

    warn!("(ShardRunner) [{label}] Shard {shard_id} event loop ended.");
}

/// Work that talks to the HTTP API is spawned so the gateway loop keeps draining events.
fn handle_event(ctx: &ShardContext, shard_id: u32, event: Event) {
    match event {
        Event::Ready(ready) => {
            info!(
                "[{}] Shard {shard_id} => READY as {} (ID={})",
                ctx.label, ready.user.name, ready.user.id
            );
            // Global commands are per application, one sync is enough.
            if shard_id != 0 {
                return;
            }
            let application_id = ready.application.id;
            let ctx = ctx.clone();
            tokio::spawn(async move {
                if let Err(e) = register_global_slash_commands(&ctx.http, application_id, &ctx.registry).await {
                    warn!("[{}] slash command sync failed: {e}", ctx.label);
                }
            });
        }
        Event::InteractionCreate(interaction) => {
            let ctx = ctx.clone();
            tokio::spawn(async move {
                if let Err(e) = handle_interaction_create(&ctx.http, &ctx.registry, &ctx.commands, &interaction.0).await {
                    error!("[{}] interaction failed: {e}", ctx.label);
                }
            });
        }
        Event::MessageCreate(msg) => {
            let msg: MessageCreate = *msg;
            if msg.author.bot || msg.guild_id.is_none() {
                return;
            }
            let Some(command) = parse_prefix_command(&msg.content, &ctx.prefix) else {
                return;
            };
            let reply = prefix_reply(command, &ctx.commands);
            let ctx = ctx.clone();
            tokio::spawn(async move {
                if let Err(e) = ctx
                    .http
                    .create_message(msg.channel_id)
                    .reply(msg.id)
                    .content(&reply)
                    .await
                {
                    warn!("[{}] prefix command reply failed: {e}", ctx.label);
                }
            });
        }
        other => {
            trace!("[{}] Shard {shard_id} => unhandled event: {:?}", ctx.label, other.kind());
        }
    }
}

/// One Discord bot session (primary or dashboard-started).
pub struct DiscordPlatform {
    label: Arc<str>,
    token: String,
    prefix: Arc<str>,
    intents: Intents,
    gateway: Arc<DiscordGateway>,
    registry: Arc<CommandRegistry>,
    commands: Arc<CommandContext>,
    shutdown: CancellationToken,
}

impl DiscordPlatform {
    pub fn new(
        label: &str,
        token: &str,
        prefix: &str,
        profile: CommandProfile,
        settings: &DiscordSettings,
    ) -> Result<Self, Error> {
        let token = token.trim();
        if token.is_empty() {
            return Err(Error::InvalidArgument("Discord token is empty".into()));
        }

        let gateway = Arc::new(DiscordGateway::new(token));
        let commands = Arc::new(CommandContext {
            api: gateway.clone(),
            language: Arc::clone(&settings.language),
            dashboard_url: settings.dashboard_url.clone(),
        });

        Ok(Self {
            label: Arc::from(label),
            token: token.to_string(),
            prefix: Arc::from(prefix),
            intents: gateway_intents(settings.privileged_intents),
            gateway,
            registry: Arc::new(CommandRegistry::for_profile(profile)),
            commands,
            shutdown: CancellationToken::new(),
        })
    }

    /// Usable before `run`; the cache simply starts out empty.
    pub fn gateway(&self) -> Arc<DiscordGateway> {
        Arc::clone(&self.gateway)
    }
}

#[async_trait]
impl BotConnection for DiscordPlatform {
    async fn run(&self) -> Result<(), Error> {
        if self.shutdown.is_cancelled() {
            debug!("[{}] closed before connecting", self.label);
            return Ok(());
        }

        let config = Config::new(self.token.clone(), self.intents);
        let shards = tokio::select! {
            _ = self.shutdown.cancelled() => return Ok(()),
            shards = gateway::create_recommended(self.gateway.http(), config, |_, b| b.build()) => {
                shards.map_err(|e| Error::Platform(format!("create_recommended error: {e}")))?
            }
        };

        let ctx = ShardContext {
            label: self.label.clone(),
            prefix: self.prefix.clone(),
            http: Arc::clone(self.gateway.http()),
            gateway: Arc::clone(&self.gateway),
            registry: Arc::clone(&self.registry),
            commands: Arc::clone(&self.commands),
        };

        let mut runners = JoinSet::new();
        for shard in shards {
            runners.spawn(shard_runner(shard, ctx.clone(), self.shutdown.clone()));
        }
        info!("[{}] Connected with {} shard(s).", self.label, runners.len());

        while let Some(joined) = runners.join_next().await {
            if let Err(e) = joined {
                error!("[{}] shard runner panicked: {e}", self.label);
            }
        }
        Ok(())
    }

    fn close(&self) {
        self.shutdown.cancel();
    }
}

/// Builds dashboard-started bots: universal commands only, own token and prefix.
pub struct DiscordConnector {
    settings: DiscordSettings,
}

impl DiscordConnector {
    pub fn new(settings: DiscordSettings) -> Self {
        Self { settings }
    }
}

impl BotConnector for DiscordConnector {
    fn build(&self, label: &str, token: &str, prefix: &str) -> Result<Arc<dyn BotConnection>, Error> {
        let platform = DiscordPlatform::new(label, token, prefix, CommandProfile::Secondary, &self.settings)?;
        Ok(Arc::new(platform))
    }
}
