// File: dashbot-common/src/models/mod.rs
pub mod bot;
pub mod command;
pub mod guild;
pub mod language;

pub use bot::BotInstanceInfo;
pub use command::CommandInfo;
pub use guild::{GuildRecord, GuildStats};
pub use language::Language;
