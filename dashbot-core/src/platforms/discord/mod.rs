pub mod gateway;
pub mod runtime;

pub use gateway::DiscordGateway;
pub use runtime::{DiscordConnector, DiscordPlatform, DiscordSettings, gateway_intents};
