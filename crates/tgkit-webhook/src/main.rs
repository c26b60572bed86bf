//! tgkit webhook server binary.
//!
//! Start the demo bot with:
//! ```bash
//! TGKIT_BOT_TOKEN=xxx cargo run -p tgkit-webhook -- --port 8443
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tgkit_api::{Args as CallArgs, Bot, BotConfig, HttpTransport, Transport};
use tgkit_webhook::{serve, AppState, DemoBot, WebhookConfig};
use tracing_subscriber::EnvFilter;

/// tgkit webhook server - hosts a Telegram bot behind a webhook
#[derive(Parser, Debug)]
#[command(name = "tgkit-webhook")]
#[command(about = "Webhook server for Telegram bots built with tgkit")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "TGKIT_WEBHOOK_PORT", default_value = "8443")]
    port: u16,

    /// Host to bind to
    #[arg(long, env = "TGKIT_WEBHOOK_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Route receiving updates
    #[arg(long, env = "TGKIT_WEBHOOK_PATH", default_value = "/webhook")]
    path: String,

    /// Directory for duplicate-delivery markers
    #[arg(long, env = "TGKIT_MARKER_DIR", default_value = "~/.tgkit/markers")]
    marker_dir: String,

    /// Handle redelivered updates again instead of dropping them
    #[arg(long)]
    no_guard: bool,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env.local or .env before parsing, so env-backed flags see them
    let _ = dotenvy::from_filename(".env.local").or_else(|_| dotenvy::dotenv());

    let args = Args::parse();

    // Initialize logging based on verbosity
    let filter = match args.verbose {
        0 => "tgkit_webhook=info,tgkit_api=info,tgkit_persistence=info,tower_http=warn",
        1 => "tgkit_webhook=debug,tgkit_api=debug,tgkit_persistence=debug,tower_http=info",
        2 => "tgkit_webhook=trace,tgkit_api=trace,tgkit_persistence=trace,tower_http=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let bot_config = BotConfig::from_env()?;
    tracing::info!(token = %bot_config.masked_token(), api_url = %bot_config.api_url, "Loaded bot config");

    let mut config = WebhookConfig::new(args.host, args.port).with_path(args.path);
    if !args.no_guard {
        let marker_dir = PathBuf::from(shellexpand::tilde(&args.marker_dir).into_owned());
        std::fs::create_dir_all(&marker_dir)?;
        config = config.with_marker_dir(marker_dir);
    }

    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(bot_config.timeout)?);

    // Get bot info
    let info_bot = Bot::with_transport(bot_config.clone(), transport.clone());
    let me = tokio::task::spawn_blocking(move || info_bot.get_me(CallArgs::new())).await?;
    if !me.ok() {
        let description = me.description().unwrap_or("unknown error").to_string();
        tracing::error!(error = %description, "Failed to get bot info");
        return Err(description.into());
    }
    let username = me.get_str("username").unwrap_or_default().to_string();
    tracing::info!(username = %username, "Bot initialized successfully");

    println!("\n[robot] tgkit webhook server");
    println!("   Bot: @{}", username);
    println!("   Listening: http://{}{}", config.bind_address(), config.path);
    match &config.marker_dir {
        Some(dir) => println!("   Delivery guard: {}", dir.display()),
        None => println!("   Delivery guard: off"),
    }
    println!("   Press Ctrl+C to stop\n");

    let state = AppState::new(config, bot_config, transport, DemoBot);
    serve(state).await?;

    Ok(())
}
