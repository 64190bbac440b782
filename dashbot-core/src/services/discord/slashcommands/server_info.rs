use async_trait::async_trait;
use twilight_model::application::command::{Command, CommandType};
use twilight_util::builder::command::CommandBuilder;

use dashbot_common::i18n::{self, Phrase};

use super::{CommandContext, CommandInvocation, SlashCommand};

/// `/서버정보`: guild name and member count, guild-only.
pub struct ServerInfoCommand;

#[async_trait]
impl SlashCommand for ServerInfoCommand {
    fn name(&self) -> &'static str {
        "서버정보"
    }

    fn definition(&self) -> Command {
        CommandBuilder::new(self.name(), "서버 정보", CommandType::ChatInput).build()
    }

    async fn execute(&self, ctx: &CommandContext, invocation: &CommandInvocation) -> String {
        let Some(guild_id) = invocation.guild_id else {
            return ctx.text(Phrase::GuildOnly).to_string();
        };
        match ctx.api.guild(guild_id) {
            Some(guild) => i18n::guild_info(ctx.lang(), &guild.name, guild.member_count),
            // Not in the cache yet (e.g. right after joining).
            None => ctx.text(Phrase::GenericError).to_string(),
        }
    }
}
