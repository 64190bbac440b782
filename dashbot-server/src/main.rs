use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use clap::builder::BoolishValueParser;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use dashbot_core::platforms::discord::{DiscordConnector, DiscordPlatform, DiscordSettings};
use dashbot_core::services::LanguageSetting;
use dashbot_core::services::discord::slashcommands::CommandProfile;
use dashbot_core::{BotConnection, BotInstanceManager, Error};

mod api;
mod context;

use context::ServerContext;

/// How long the primary connection gets to close its shards on shutdown.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[derive(Parser, Debug, Clone)]
#[command(name = "dashbot")]
#[command(author, version, about = "Discord bot with a web control dashboard")]
struct Args {
    /// Port the dashboard listens on (all interfaces).
    #[arg(long, env = "DASHBOARD_PORT", default_value_t = 8000)]
    port: u16,

    /// Skip the MESSAGE_CONTENT, GUILD_MEMBERS and GUILD_PRESENCES intents.
    #[arg(long, env = "DISABLE_PRIVILEGED_INTENTS", value_parser = BoolishValueParser::new())]
    disable_privileged_intents: bool,

    /// Public dashboard URL; defaults to http://localhost:<port>/
    #[arg(long, env = "DASHBOARD_BASE")]
    dashboard_base: Option<String>,

    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    discord_token: Option<String>,

    /// Directory holding index.html and the dashboard assets.
    #[arg(long, env = "DASHBOARD_STATIC_DIR", default_value = "static")]
    static_dir: PathBuf,
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("dashbot=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub)
        .expect("Failed to set global subscriber");
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::parse();
    info!(
        "dashbot starting. port={}, privileged_intents={}",
        args.port, !args.disable_privileged_intents
    );

    match run_server(args).await {
        Ok(()) => {
            info!("Main finished. Goodbye!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Server error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run_server(args: Args) -> Result<(), Error> {
    let token = args
        .discord_token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::Configuration("DISCORD_TOKEN is not set".into()))?;

    let base_url = args
        .dashboard_base
        .clone()
        .unwrap_or_else(|| format!("http://localhost:{}/", args.port));

    let language = Arc::new(LanguageSetting::default());
    let settings = DiscordSettings {
        privileged_intents: !args.disable_privileged_intents,
        dashboard_url: base_url.clone(),
        language: Arc::clone(&language),
    };

    let primary = Arc::new(DiscordPlatform::new(
        "Discord",
        token,
        "!",
        CommandProfile::Primary,
        &settings,
    )?);
    let bots = Arc::new(BotInstanceManager::new(Arc::new(DiscordConnector::new(settings))));

    let ctx = Arc::new(ServerContext::new(
        primary.gateway(),
        Arc::clone(&bots),
        language,
        base_url.clone(),
        args.static_dir.clone(),
    ));

    let addr: SocketAddr = format!("0.0.0.0:{}", args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Ctrl-C received, shutting down."),
                Err(e) => error!("Failed to listen for Ctrl-C: {e}"),
            }
            shutdown.cancel();
        });
    }

    let primary_task = {
        let primary = Arc::clone(&primary);
        tokio::spawn(async move {
            if let Err(e) = primary.run().await {
                error!("[Discord] primary connection failed: {e}");
            }
        })
    };

    info!("Dashboard listening on http://{addr} (base {base_url})");
    let serve_shutdown = shutdown.clone();
    axum::serve(listener, api::router(ctx))
        .with_graceful_shutdown(async move { serve_shutdown.cancelled().await })
        .await?;

    primary.close();
    bots.shutdown_all();
    if tokio::time::timeout(SHUTDOWN_GRACE, primary_task).await.is_err() {
        warn!("[Discord] primary connection did not close within {SHUTDOWN_GRACE:?}");
    }
    Ok(())
}
