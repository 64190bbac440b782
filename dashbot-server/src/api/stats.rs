use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use dashbot_common::models::CommandInfo;
use dashbot_core::services::stats::{collect_stats, guild_records};

use super::AppState;

/// Listed on the dashboard regardless of which commands a connection registered.
const DASHBOARD_COMMANDS: [&str; 5] = ["핑", "대시보드", "공지", "서버정보", "유저정보"];

pub(super) async fn get_stats(State(ctx): State<AppState>) -> Json<Value> {
    let stats = collect_stats(ctx.api.as_ref());
    Json(json!(stats))
}

pub(super) async fn get_guilds(State(ctx): State<AppState>) -> Json<Value> {
    Json(json!({ "guilds": guild_records(ctx.api.as_ref()) }))
}

pub(super) async fn get_commands() -> Json<Value> {
    let commands: Vec<CommandInfo> = DASHBOARD_COMMANDS.iter().map(|name| CommandInfo::slash(name)).collect();
    Json(json!({ "commands": commands }))
}

pub(super) async fn get_base(State(ctx): State<AppState>) -> Json<Value> {
    Json(json!({ "base": ctx.base_url }))
}
