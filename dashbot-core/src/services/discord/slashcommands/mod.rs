// File: dashbot-core/src/services/discord/slashcommands/mod.rs

pub mod announce;
pub mod dashboard;
pub mod moderation;
pub mod ping;
pub mod server_info;
pub mod user_info;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use twilight_http::Client as HttpClient;
use twilight_model::{
    application::{
        command::Command,
        interaction::{Interaction, InteractionData, application_command::CommandOptionValue},
    },
    channel::message::MessageFlags,
    guild::Permissions,
    http::interaction::{InteractionResponse, InteractionResponseType},
    id::Id,
    id::marker::{ApplicationMarker, ChannelMarker, GuildMarker, UserMarker},
    user::User,
};
use twilight_util::builder::InteractionResponseDataBuilder;

use dashbot_common::i18n::{self, Phrase};
use dashbot_common::models::Language;

use crate::Error;
use crate::platforms::DiscordApi;
use crate::services::LanguageSetting;

/// Everything a command handler may touch. Each connection owns its own context,
/// so a secondary bot's commands act through that bot's client.
pub struct CommandContext {
    pub api: Arc<dyn DiscordApi>,
    pub language: Arc<LanguageSetting>,
    pub dashboard_url: String,
}

impl CommandContext {
    pub fn lang(&self) -> Language {
        self.language.get()
    }

    pub fn text(&self, phrase: Phrase) -> &'static str {
        i18n::text(self.lang(), phrase)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: Id<UserMarker>,
    pub display_name: String,
}

/// A slash command invocation flattened out of the raw interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandInvocation {
    pub name: String,
    pub guild_id: Option<Id<GuildMarker>>,
    pub invoker: Participant,
    /// Resolved permissions of the invoker; `None` outside guilds.
    pub permissions: Option<Permissions>,
    pub options: HashMap<String, CommandOptionValue>,
    /// Display names of users referenced by options.
    pub resolved_names: HashMap<Id<UserMarker>, String>,
}

impl CommandInvocation {
    pub fn from_interaction(interaction: &Interaction) -> Option<Self> {
        let Some(InteractionData::ApplicationCommand(data)) = &interaction.data else {
            return None;
        };
        let author = interaction.author()?;
        let member_nick = interaction.member.as_ref().and_then(|m| m.nick.as_deref());

        let mut resolved_names = HashMap::new();
        if let Some(resolved) = &data.resolved {
            for (user_id, user) in &resolved.users {
                let nick = resolved.members.get(user_id).and_then(|m| m.nick.as_deref());
                resolved_names.insert(*user_id, display_name(nick, user));
            }
        }

        Some(Self {
            name: data.name.clone(),
            guild_id: interaction.guild_id,
            invoker: Participant {
                id: author.id,
                display_name: display_name(member_nick, author),
            },
            permissions: interaction.member.as_ref().and_then(|m| m.permissions),
            options: data
                .options
                .iter()
                .map(|opt| (opt.name.clone(), opt.value.clone()))
                .collect(),
            resolved_names,
        })
    }

    /// Administrators pass every check.
    pub fn has_permission(&self, required: Permissions) -> bool {
        self.permissions
            .is_some_and(|p| p.contains(Permissions::ADMINISTRATOR) || p.contains(required))
    }

    pub fn string_option(&self, name: &str) -> Option<&str> {
        match self.options.get(name)? {
            CommandOptionValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn integer_option(&self, name: &str) -> Option<i64> {
        match self.options.get(name)? {
            CommandOptionValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn channel_option(&self, name: &str) -> Option<Id<ChannelMarker>> {
        match self.options.get(name)? {
            CommandOptionValue::Channel(id) => Some(*id),
            _ => None,
        }
    }

    pub fn user_option(&self, name: &str) -> Option<Participant> {
        match self.options.get(name)? {
            CommandOptionValue::User(id) => Some(Participant {
                id: *id,
                display_name: self
                    .resolved_names
                    .get(id)
                    .cloned()
                    .unwrap_or_else(|| id.to_string()),
            }),
            _ => None,
        }
    }
}

/// Guild nickname, then global display name, then username.
fn display_name(nick: Option<&str>, user: &User) -> String {
    nick.or(user.global_name.as_deref())
        .unwrap_or(user.name.as_str())
        .to_string()
}

#[async_trait]
pub trait SlashCommand: Send + Sync {
    fn name(&self) -> &'static str;
    fn definition(&self) -> Command;
    /// Returns the ephemeral reply. Platform failures are turned into reply text here.
    async fn execute(&self, ctx: &CommandContext, invocation: &CommandInvocation) -> String;
}

/// Which command table a connection gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandProfile {
    /// The main bot: universal commands plus guild info and moderation.
    Primary,
    /// Bots started from the dashboard: ping and dashboard link only.
    Secondary,
}

pub struct CommandRegistry {
    commands: Vec<Box<dyn SlashCommand>>,
}

impl CommandRegistry {
    pub fn for_profile(profile: CommandProfile) -> Self {
        let mut commands: Vec<Box<dyn SlashCommand>> = vec![
            Box::new(ping::PingCommand),
            Box::new(dashboard::DashboardCommand),
        ];
        if profile == CommandProfile::Primary {
            commands.push(Box::new(announce::AnnounceCommand));
            commands.push(Box::new(server_info::ServerInfoCommand));
            commands.push(Box::new(user_info::UserInfoCommand));
            commands.push(Box::new(moderation::WarnCommand));
            commands.push(Box::new(moderation::MuteCommand));
            commands.push(Box::new(moderation::UnmuteCommand));
        }
        Self { commands }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    pub fn definitions(&self) -> Vec<Command> {
        self.commands.iter().map(|c| c.definition()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&dyn SlashCommand> {
        self.commands
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }

    /// `None` when no command by that name is registered.
    pub async fn dispatch(&self, ctx: &CommandContext, invocation: &CommandInvocation) -> Option<String> {
        let command = self.get(&invocation.name)?;
        debug!("Dispatching /{} for user {}", invocation.name, invocation.invoker.id);
        Some(command.execute(ctx, invocation).await)
    }
}

pub async fn register_global_slash_commands(
    http: &HttpClient,
    application_id: Id<ApplicationMarker>,
    registry: &CommandRegistry,
) -> Result<(), Error> {
    let commands = registry.definitions();
    http.interaction(application_id)
        .set_global_commands(&commands)
        .await
        .map_err(|e| Error::Platform(format!("Failed to register global slash commands: {e}")))?;
    info!("Synced {} global slash commands", commands.len());
    Ok(())
}

/// Reply text for an invocation, including commands this connection does not know.
pub async fn reply_for(registry: &CommandRegistry, ctx: &CommandContext, invocation: &CommandInvocation) -> String {
    match registry.dispatch(ctx, invocation).await {
        Some(reply) => reply,
        None => i18n::unknown_command(ctx.lang(), &invocation.name),
    }
}

/// Dispatch slash commands from an `InteractionCreate` and answer ephemerally.
pub async fn handle_interaction_create(
    http: &HttpClient,
    registry: &CommandRegistry,
    ctx: &CommandContext,
    interaction: &Interaction,
) -> Result<(), Error> {
    // Only handle ApplicationCommand interactions:
    let Some(invocation) = CommandInvocation::from_interaction(interaction) else {
        return Ok(());
    };

    let reply = reply_for(registry, ctx, &invocation).await;

    http.interaction(interaction.application_id)
        .create_response(
            interaction.id,
            &interaction.token,
            &InteractionResponse {
                kind: InteractionResponseType::ChannelMessageWithSource,
                data: Some(
                    InteractionResponseDataBuilder::new()
                        .content(reply)
                        .flags(MessageFlags::EPHEMERAL)
                        .build(),
                ),
            },
        )
        .await
        .map_err(|e| Error::Platform(format!("Error responding to /{}: {e}", invocation.name)))?;

    Ok(())
}
