use async_trait::async_trait;
use twilight_model::application::command::{Command, CommandType};
use twilight_util::builder::command::{CommandBuilder, UserBuilder};

use dashbot_common::i18n;

use super::{CommandContext, CommandInvocation, SlashCommand};

pub(crate) const TARGET_OPTION: &str = "사용자";

/// `/유저정보 [사용자]`: display name and id, defaulting to the caller.
pub struct UserInfoCommand;

#[async_trait]
impl SlashCommand for UserInfoCommand {
    fn name(&self) -> &'static str {
        "유저정보"
    }

    fn definition(&self) -> Command {
        CommandBuilder::new(self.name(), "유저 정보", CommandType::ChatInput)
            .option(UserBuilder::new(TARGET_OPTION, "대상 유저"))
            .build()
    }

    async fn execute(&self, ctx: &CommandContext, invocation: &CommandInvocation) -> String {
        let target = invocation
            .user_option(TARGET_OPTION)
            .unwrap_or_else(|| invocation.invoker.clone());
        i18n::user_info(ctx.lang(), &target.display_name, target.id.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platforms::MockDiscordApi;
    use crate::services::discord::slashcommands::test_support::{context, invocation};
    use dashbot_common::models::Language;
    use twilight_model::application::interaction::application_command::CommandOptionValue;
    use twilight_model::id::Id;

    #[tokio::test]
    async fn defaults_to_invoker() {
        let ctx = context(MockDiscordApi::new(), Language::Ko);
        assert_eq!(
            UserInfoCommand.execute(&ctx, &invocation("유저정보")).await,
            "유저: invoker • ID: 20"
        );
    }

    #[tokio::test]
    async fn uses_resolved_target_name() {
        let ctx = context(MockDiscordApi::new(), Language::En);
        let mut inv = invocation("유저정보");
        inv.options
            .insert(TARGET_OPTION.to_string(), CommandOptionValue::User(Id::new(77)));
        inv.resolved_names.insert(Id::new(77), "Mina".to_string());

        assert_eq!(
            UserInfoCommand.execute(&ctx, &inv).await,
            "User: Mina • ID: 77"
        );
    }
}
