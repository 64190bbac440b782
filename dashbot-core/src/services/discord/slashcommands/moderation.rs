//! Moderation commands. Each one checks the caller's resolved permissions
//! before touching the target.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, warn};
use twilight_model::application::command::{Command, CommandType};
use twilight_model::guild::Permissions;
use twilight_model::util::Timestamp;
use twilight_util::builder::command::{CommandBuilder, IntegerBuilder, StringBuilder, UserBuilder};

use dashbot_common::i18n::{self, Phrase};

use crate::Error;
use super::user_info::TARGET_OPTION;
use super::{CommandContext, CommandInvocation, SlashCommand};

const REASON_OPTION: &str = "사유";
const MINUTES_OPTION: &str = "분";

/// `/경고 사용자 사유`: DMs the target; the caller is acknowledged either way.
pub struct WarnCommand;

#[async_trait]
impl SlashCommand for WarnCommand {
    fn name(&self) -> &'static str {
        "경고"
    }

    fn definition(&self) -> Command {
        CommandBuilder::new(self.name(), "유저 경고", CommandType::ChatInput)
            .option(UserBuilder::new(TARGET_OPTION, "대상 유저").required(true))
            .option(StringBuilder::new(REASON_OPTION, "사유").required(true))
            .build()
    }

    async fn execute(&self, ctx: &CommandContext, invocation: &CommandInvocation) -> String {
        if !invocation.has_permission(Permissions::MANAGE_MESSAGES) {
            return ctx.text(Phrase::NoPermission).to_string();
        }
        let Some(target) = invocation.user_option(TARGET_OPTION) else {
            return ctx.text(Phrase::TargetRequired).to_string();
        };
        let reason = invocation.string_option(REASON_OPTION).unwrap_or("-");

        let dm = i18n::warning_dm(ctx.lang(), reason);
        if let Err(e) = ctx.api.send_direct_message(target.id, &dm).await {
            // Closed DMs are common; the warning still counts.
            debug!("Could not DM warning to {}: {e}", target.id);
        }
        ctx.text(Phrase::WarnIssued).to_string()
    }
}

/// `/뮤트 사용자 분`: communication timeout of at least one minute.
pub struct MuteCommand;

/// Timeout end `minutes` from now, never less than one minute.
fn timeout_until(minutes: i64) -> Result<Timestamp, Error> {
    let seconds = minutes.max(1).saturating_mul(60);
    let until = Utc::now().timestamp().saturating_add(seconds);
    Timestamp::from_secs(until).map_err(|e| Error::InvalidArgument(format!("timeout out of range: {e}")))
}

#[async_trait]
impl SlashCommand for MuteCommand {
    fn name(&self) -> &'static str {
        "뮤트"
    }

    fn definition(&self) -> Command {
        CommandBuilder::new(self.name(), "유저 뮤트", CommandType::ChatInput)
            .option(UserBuilder::new(TARGET_OPTION, "대상 유저").required(true))
            .option(IntegerBuilder::new(MINUTES_OPTION, "분").required(true))
            .build()
    }

    async fn execute(&self, ctx: &CommandContext, invocation: &CommandInvocation) -> String {
        if !invocation.has_permission(Permissions::MODERATE_MEMBERS) {
            return ctx.text(Phrase::NoPermission).to_string();
        }
        let (Some(guild_id), Some(target)) = (invocation.guild_id, invocation.user_option(TARGET_OPTION)) else {
            return ctx.text(Phrase::TargetRequired).to_string();
        };
        let minutes = invocation.integer_option(MINUTES_OPTION).unwrap_or(1);

        let result = match timeout_until(minutes) {
            Ok(until) => ctx.api.set_member_timeout(guild_id, target.id, Some(until)).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => ctx.text(Phrase::MuteApplied).to_string(),
            Err(e) => {
                warn!("Mute of {} in guild {guild_id} failed: {e}", target.id);
                ctx.text(Phrase::GenericError).to_string()
            }
        }
    }
}

/// `/언뮤트 사용자`: clears any timeout.
pub struct UnmuteCommand;

#[async_trait]
impl SlashCommand for UnmuteCommand {
    fn name(&self) -> &'static str {
        "언뮤트"
    }

    fn definition(&self) -> Command {
        CommandBuilder::new(self.name(), "유저 언뮤트", CommandType::ChatInput)
            .option(UserBuilder::new(TARGET_OPTION, "대상 유저").required(true))
            .build()
    }

    async fn execute(&self, ctx: &CommandContext, invocation: &CommandInvocation) -> String {
        if !invocation.has_permission(Permissions::MODERATE_MEMBERS) {
            return ctx.text(Phrase::NoPermission).to_string();
        }
        let (Some(guild_id), Some(target)) = (invocation.guild_id, invocation.user_option(TARGET_OPTION)) else {
            return ctx.text(Phrase::TargetRequired).to_string();
        };

        match ctx.api.set_member_timeout(guild_id, target.id, None).await {
            Ok(()) => ctx.text(Phrase::UnmuteApplied).to_string(),
            Err(e) => {
                warn!("Unmute of {} in guild {guild_id} failed: {e}", target.id);
                ctx.text(Phrase::GenericError).to_string()
            }
        }
    }
}
