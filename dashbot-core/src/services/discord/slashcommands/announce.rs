use async_trait::async_trait;
use tracing::warn;
use twilight_model::application::command::{Command, CommandType};
use twilight_model::channel::ChannelType;
use twilight_util::builder::command::{ChannelBuilder, CommandBuilder, StringBuilder};

use dashbot_common::i18n::Phrase;

use super::{CommandContext, CommandInvocation, SlashCommand};

const CHANNEL_OPTION: &str = "채널";
const MESSAGE_OPTION: &str = "내용";

/// `/공지 채널 내용`: posts a message in another channel.
pub struct AnnounceCommand;

#[async_trait]
impl SlashCommand for AnnounceCommand {
    fn name(&self) -> &'static str {
        "공지"
    }

    fn definition(&self) -> Command {
        CommandBuilder::new(self.name(), "공지 전송", CommandType::ChatInput)
            .option(
                ChannelBuilder::new(CHANNEL_OPTION, "보낼 채널")
                    .channel_types([ChannelType::GuildText, ChannelType::GuildAnnouncement])
                    .required(true),
            )
            .option(StringBuilder::new(MESSAGE_OPTION, "메시지").required(true))
            .build()
    }

    async fn execute(&self, ctx: &CommandContext, invocation: &CommandInvocation) -> String {
        let (Some(channel_id), Some(message)) = (
            invocation.channel_option(CHANNEL_OPTION),
            invocation.string_option(MESSAGE_OPTION),
        ) else {
            return ctx.text(Phrase::GenericError).to_string();
        };

        match ctx.api.send_message(channel_id, message).await {
            Ok(()) => ctx.text(Phrase::AnnounceSent).to_string(),
            Err(e) => {
                // The caller only sees the generic error.
                warn!("Announcement to channel {channel_id} failed: {e}");
                ctx.text(Phrase::GenericError).to_string()
            }
        }
    }
}
