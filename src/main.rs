use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, info};

use promptpay::config::AppConfig;
use promptpay::{crc16_xmodem, generate_payload, generate_payload_with_amount, AccountKind};

#[derive(Parser)]
#[command(name = "promptpay", about = "Generate PromptPay EMV QR payloads")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the QR payload for an account
    Generate {
        /// Account kind: "phone" or "id"
        #[arg(short, long)]
        kind: Option<String>,
        /// Phone number or 13-digit national ID
        account: Option<String>,
        /// Amount to embed; omit for a static payload
        #[arg(short, long)]
        amount: Option<Decimal>,
    },
    /// Print the CRC-16 checksum of DATA
    Crc { data: String },
    /// Store default account settings
    Config {
        #[arg(short, long)]
        kind: Option<String>,
        #[arg(short, long)]
        account: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the payload
    let level = if cli.verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("promptpay={}", level).parse()?);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Generate {
            kind,
            account,
            amount,
        } => run_generate(kind, account, amount),
        Command::Crc { data } => {
            println!("{}", crc16_xmodem(&data));
            Ok(())
        }
        Command::Config { kind, account } => run_config(kind, account),
    }
}

fn run_generate(
    kind: Option<String>,
    account: Option<String>,
    amount: Option<Decimal>,
) -> Result<()> {
    let config = AppConfig::load();

    let kind = match kind {
        Some(text) => text.parse::<AccountKind>()?,
        None => config
            .account_kind
            .context("No account kind given and none configured")?,
    };
    let account = account
        .or(config.account)
        .context("No account given and none configured")?;
    debug!("Generating {} payload for {}", kind, account);

    let payload = match amount {
        Some(amount) => generate_payload_with_amount(kind, &account, amount),
        None => generate_payload(kind, &account),
    }
    .with_context(|| format!("Failed to generate payload for {} account", kind))?;

    println!("{}", payload);
    Ok(())
}

fn run_config(kind: Option<String>, account: Option<String>) -> Result<()> {
    let mut config = AppConfig::load();
    if let Some(text) = kind {
        config.account_kind = Some(text.parse()?);
    }
    if let Some(account) = account {
        config.account = Some(account);
    }
    config.save()?;
    info!(
        "Defaults: kind={}, account={}",
        config
            .account_kind
            .map(|k| k.to_string())
            .unwrap_or_else(|| "-".into()),
        config.account.as_deref().unwrap_or("-")
    );
    Ok(())
}
