use async_trait::async_trait;
use twilight_model::application::command::{Command, CommandType};
use twilight_util::builder::command::CommandBuilder;

use super::{CommandContext, CommandInvocation, SlashCommand};

/// `/대시보드`: links the web dashboard.
pub struct DashboardCommand;

#[async_trait]
impl SlashCommand for DashboardCommand {
    fn name(&self) -> &'static str {
        "대시보드"
    }

    fn definition(&self) -> Command {
        CommandBuilder::new(self.name(), "대시보드 링크", CommandType::ChatInput).build()
    }

    async fn execute(&self, ctx: &CommandContext, _invocation: &CommandInvocation) -> String {
        ctx.dashboard_url.clone()
    }
}
