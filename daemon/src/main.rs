//! HBAR wallet daemon: runs one wallet engine against a ledger gateway.

mod config;
mod host;
mod logging;
mod shutdown;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use hbar_types::HBAR_CURRENCY_INFO;
use hbar_wallet_core::{
    make_engine, GatewayClient, HbarEngine, SpendInfo, WalletInfo, WalletKeys,
};

use crate::config::{DaemonConfig, Overrides};
use crate::host::{LoggingHost, StateFile};
use crate::logging::LogFormat;
use crate::shutdown::ShutdownController;

#[derive(Parser)]
#[command(name = "hbar-daemon", about = "HBAR wallet engine daemon")]
struct Cli {
    /// Path to a TOML configuration file. CLI flags and env vars override it.
    #[arg(long, env = "HBAR_CONFIG")]
    config: Option<PathBuf>,

    /// Ledger gateway URL.
    #[arg(long, env = "HBAR_GATEWAY_URL")]
    gateway_url: Option<String>,

    /// Log filter: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "HBAR_LOG_LEVEL")]
    log_level: Option<String>,

    #[arg(long, value_enum, env = "HBAR_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// JSON file holding wallet-local data between runs.
    #[arg(long, env = "HBAR_STATE_FILE")]
    state_file: Option<PathBuf>,

    /// Balance poll period in milliseconds.
    #[arg(long, env = "HBAR_POLL_INTERVAL_MS")]
    poll_interval_ms: Option<u64>,

    /// Funding account, "0.0.N" or "N".
    #[arg(long, env = "HBAR_ACCOUNT")]
    account: String,

    /// Ed25519 private key, raw or DER-prefixed hex.
    #[arg(long, env = "HBAR_PRIVATE_KEY", hide_env_values = true)]
    private_key: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Start the engine and keep polling until SIGINT/SIGTERM.
    Run,
    /// Fetch and print the current balance in tinybars.
    Balance,
    /// Build, sign and broadcast a single transfer.
    Send {
        /// Recipient account.
        #[arg(long)]
        to: String,
        /// Amount in tinybars.
        #[arg(long)]
        amount: String,
        /// Fee in tinybars, instead of the configured default.
        #[arg(long)]
        fee: Option<String>,
    },
    /// Print the wallet's address and public key.
    Address,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = DaemonConfig::load(cli.config.as_deref())?;
    config.apply(Overrides {
        gateway_url: cli.gateway_url,
        log_format: cli.log_format,
        log_level: cli.log_level,
        state_file: cli.state_file,
        poll_interval_ms: cli.poll_interval_ms,
    });
    logging::init_logging(config.log_format, &config.log_level)?;
    if let Some(path) = &cli.config {
        tracing::info!(path = %path.display(), "loaded config");
    }

    let info = WalletInfo {
        wallet_type: HBAR_CURRENCY_INFO.wallet_type.to_string(),
        keys: WalletKeys {
            hedera_account: cli.account,
            hedera_private_key: cli.private_key,
        },
    };
    let state = StateFile::new(config.state_file.clone());
    let ledger = Arc::new(GatewayClient::new(config.gateway_url.clone())?);
    let engine = make_engine(
        &info,
        state.load()?,
        config.engine.clone(),
        ledger,
        Arc::new(LoggingHost),
    )?;

    match cli.command {
        Command::Run => run(&engine, &state, &config).await,
        Command::Balance => {
            let balance = engine.update_balance().await?;
            println!("{balance} {}", engine.currency_code());
            state.save(&engine.local_data().await)
        }
        Command::Send { to, amount, fee } => {
            let mut spend = SpendInfo::single(to, amount);
            spend.network_fee_override = fee;
            let record = engine.make_spend(&spend)?;
            let signed = engine.sign_tx(&record)?;
            let sent = engine.broadcast_tx(&signed).await?;
            println!("{}", sent.txid);
            Ok(())
        }
        Command::Address => {
            println!("{}", engine.account());
            println!("{}", engine.display_public_seed());
            Ok(())
        }
    }
}

async fn run(engine: &HbarEngine, state: &StateFile, config: &DaemonConfig) -> anyhow::Result<()> {
    tracing::info!(
        account = %engine.account(),
        gateway = %config.gateway_url,
        poll_interval_ms = config.engine.poll_interval_ms,
        "starting wallet daemon"
    );

    let shutdown = Arc::new(ShutdownController::new());
    let mut stop = shutdown.subscribe();
    let signals = {
        let shutdown = Arc::clone(&shutdown);
        tokio::spawn(async move {
            if let Err(e) = shutdown.wait_for_signal().await {
                tracing::error!(error = %e, "signal handler failed");
                shutdown.shutdown();
            }
        })
    };

    let started = engine.start_engine().await;
    if started.is_ok() {
        let _ = stop.recv().await;
    }

    engine.kill_engine().await;
    signals.abort();
    state.save(&engine.local_data().await)?;
    started?;
    tracing::info!("wallet daemon stopped");
    Ok(())
}
