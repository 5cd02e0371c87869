//! Command-line parsing and dispatch.
//!
//! No subcommand starts an interactive chat session; `status` checks the
//! gateway and exits non-zero when it cannot be reached.

pub mod status;

use std::error::Error;
use std::io;

use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;

use crate::auth::resolve_auth_token;
use crate::cli::status::check_status;
use crate::core::client::GatewayClient;
use crate::core::config::{Config, ResolvedConfig};
use crate::logging::init_debug_logging;
use crate::ui::chat_loop::run_chat;

#[derive(Parser, Debug)]
#[command(name = "terryann")]
#[command(about = "Terminal client for TerryAnn Medicare Journey Intelligence")]
#[command(
    long_about = "TerryAnn is an interactive terminal client for the TerryAnn journey \
intelligence gateway. Run it without arguments to start a chat session.\n\n\
Configuration:\n\
  config.toml in the platform config directory (gateway_url, backend_url, user_id)\n\n\
Environment Variables:\n\
  TERRYANN_GATEWAY_URL   Gateway base URL\n\
  TERRYANN_BACKEND_URL   Backend base URL for direct journey creation\n\
  TERRYANN_USER_ID       User id attached to created journeys\n\
  TERRYANN_TOKEN         Bearer token (falls back to the system keyring)\n\n\
Chat commands:\n\
  /journey          Build a journey step by step\n\
  ?, /help          Show help\n\
  exit, quit        End the session"
)]
#[command(disable_version_flag = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print version information and exit
    #[arg(short = 'v', long = "version", global = true, action = ArgAction::SetTrue)]
    pub version: bool,

    /// Enable debug logging to stderr
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Start an interactive chat session (default)
    Chat,
    /// Check gateway health
    Status,
}

pub fn version_string() -> String {
    format!(
        "terryann {} ({})",
        env!("CARGO_PKG_VERSION"),
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
    )
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if args.version {
        println!("{}", version_string());
        return Ok(());
    }
    if args.debug {
        init_debug_logging();
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let exit_code = runtime.block_on(async_main(args))?;
    drop(runtime);

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

async fn async_main(args: Args) -> Result<i32, Box<dyn Error>> {
    let config = load_config()?;

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            run_chat(&config).await?;
            Ok(0)
        }
        Commands::Status => {
            let client = GatewayClient::from_config(&config);
            let healthy = check_status(&client, client.gateway_url(), &mut io::stdout()).await?;
            Ok(if healthy { 0 } else { 1 })
        }
    }
}

fn load_config() -> Result<ResolvedConfig, Box<dyn Error>> {
    let config = Config::load()?;
    let resolved = config.resolve(resolve_auth_token());
    debug!(
        gateway = %resolved.gateway_url,
        backend = %resolved.backend_url,
        authenticated = resolved.auth_token.is_some(),
        "configuration resolved"
    );
    Ok(resolved)
}
