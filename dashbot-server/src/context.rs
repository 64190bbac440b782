//! dashbot-server/src/context.rs
//!
//! Shared state handed to every Control API handler through axum `State`.

use std::path::PathBuf;
use std::sync::Arc;

use dashbot_core::services::LanguageSetting;
use dashbot_core::{BotInstanceManager, DiscordApi};

pub struct ServerContext {
    /// The primary connection's view of the platform.
    pub api: Arc<dyn DiscordApi>,
    pub bots: Arc<BotInstanceManager>,
    pub language: Arc<LanguageSetting>,
    /// Public URL of the dashboard, echoed by `/api/base` and the dashboard command.
    pub base_url: String,
    pub static_dir: PathBuf,
}

impl ServerContext {
    pub fn new(
        api: Arc<dyn DiscordApi>,
        bots: Arc<BotInstanceManager>,
        language: Arc<LanguageSetting>,
        base_url: String,
        static_dir: PathBuf,
    ) -> Self {
        Self {
            api,
            bots,
            language,
            base_url,
            static_dir,
        }
    }
}
