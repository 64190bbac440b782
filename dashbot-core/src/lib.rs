// src/lib.rs

pub mod platforms;
pub mod services;

pub use dashbot_common::error::Error;
pub use platforms::manager::BotInstanceManager;
pub use platforms::{BotConnection, BotConnector, DiscordApi, GuildSummary};
