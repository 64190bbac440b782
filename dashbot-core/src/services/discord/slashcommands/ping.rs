// File: dashbot-core/src/services/discord/slashcommands/ping.rs

use async_trait::async_trait;
use twilight_model::application::command::{Command, CommandType};
use twilight_util::builder::command::CommandBuilder;

use dashbot_common::i18n::Phrase;

use super::{CommandContext, CommandInvocation, SlashCommand};

/// `/핑`: liveness check, answered on every connection.
pub struct PingCommand;

#[async_trait]
impl SlashCommand for PingCommand {
    fn name(&self) -> &'static str {
        "핑"
    }

    fn definition(&self) -> Command {
        CommandBuilder::new(self.name(), "봇 응답 확인", CommandType::ChatInput).build()
    }

    async fn execute(&self, ctx: &CommandContext, _invocation: &CommandInvocation) -> String {
        ctx.text(Phrase::Pong).to_string()
    }
}
