//! IPN command line
//!
//! Balance reads and transfers on EVM chains and Tron, plus management of
//! the IPN watched-address list. Endpoints and limits come from the
//! environment (`.env` supported); see `ClientConfig::from_env`.

use alloy::primitives::U256;
use bigdecimal::BigDecimal;
use clap::{Args, Parser, Subcommand};
use eyre::{eyre, Result};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

use ipn_rs::{endpoints, ClientConfig, EvmClient, IpnRegistry, TronClient};

#[derive(Parser)]
#[command(name = "ipn")]
#[command(about = "EVM / Tron transfers and IPN address registry", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// EVM chain operations
    Evm {
        /// RPC URL or endpoint name (ethereum, binance, polygon, ...); overrides EVM_RPC_URL
        #[arg(long, global = true)]
        rpc: Option<String>,

        #[command(subcommand)]
        command: ChainCommand,
    },

    /// Tron operations
    Tron {
        /// TronGrid URL; overrides TRON_API_URL
        #[arg(long, global = true)]
        api: Option<String>,

        #[command(subcommand)]
        command: ChainCommand,
    },

    /// IPN watched-address registry
    Notify {
        #[command(subcommand)]
        command: NotifyCommand,
    },
}

/// Operations shared by both chain families
#[derive(Subcommand)]
enum ChainCommand {
    /// Native currency balance
    Balance {
        address: String,
        /// Print base units instead of the scaled amount
        #[arg(long)]
        raw: bool,
    },

    /// Token balance
    TokenBalance {
        address: String,
        contract: String,
        #[arg(long)]
        raw: bool,
    },

    /// Send native currency (ether units on EVM chains, SUN on Tron)
    Send {
        #[command(flatten)]
        transfer: Transfer,
        amount: String,
    },

    /// Send tokens (amount in raw token units)
    SendToken {
        #[command(flatten)]
        transfer: Transfer,
        amount: String,
        contract: String,
    },
}

#[derive(Args)]
struct Transfer {
    /// Hex private key of the sender
    #[arg(long, env = "IPN_PRIVATE_KEY", hide_env_values = true)]
    private_key: String,
    from: String,
    to: String,
}

#[derive(Subcommand)]
enum NotifyCommand {
    /// Add an address to the watched list
    Add { address: String },
    /// Remove an address from the watched list
    Delete { address: String },
    /// Replace the watched list
    Replace {
        #[arg(required = true)]
        addresses: Vec<String>,
    },
}

fn parse_token_amount(amount: &str) -> Result<U256> {
    U256::from_str_radix(amount, 10).map_err(|e| eyre!("Invalid token amount {}: {}", amount, e))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = ClientConfig::from_env()?;

    match cli.command {
        Commands::Evm { rpc, command } => {
            if let Some(rpc) = rpc {
                config.evm.rpc_url = Some(endpoints::resolve_evm(&rpc)?);
            }
            let client = EvmClient::from_config(&config.evm).await?;

            match command {
                ChainCommand::Balance { address, raw } => {
                    println!("{}", client.get_native_balance(&address, raw).await?);
                }
                ChainCommand::TokenBalance {
                    address,
                    contract,
                    raw,
                } => {
                    println!(
                        "{}",
                        client.get_token_balance(&address, &contract, raw).await?
                    );
                }
                ChainCommand::Send { transfer, amount } => {
                    let amount = BigDecimal::from_str(&amount)
                        .map_err(|e| eyre!("Invalid amount {}: {}", amount, e))?;
                    let receipt = client
                        .send_native(&transfer.private_key, &transfer.from, &transfer.to, &amount)
                        .await?;
                    println!("{}", receipt);
                }
                ChainCommand::SendToken {
                    transfer,
                    amount,
                    contract,
                } => {
                    let receipt = client
                        .send_token(
                            &transfer.private_key,
                            &transfer.from,
                            &transfer.to,
                            parse_token_amount(&amount)?,
                            &contract,
                        )
                        .await?;
                    println!("{}", receipt);
                }
            }
        }

        Commands::Tron { api, command } => {
            if let Some(api) = api {
                config.tron.api_url = endpoints::resolve(&api);
            }
            let client = TronClient::from_config(&config.tron).await?;

            match command {
                ChainCommand::Balance { address, raw } => {
                    println!("{}", client.get_native_balance(&address, raw).await?);
                }
                ChainCommand::TokenBalance {
                    address,
                    contract,
                    raw,
                } => {
                    println!(
                        "{}",
                        client.get_token_balance(&address, &contract, raw).await?
                    );
                }
                ChainCommand::Send { transfer, amount } => {
                    let amount: u64 = amount
                        .parse()
                        .map_err(|e| eyre!("Invalid amount {}: {}", amount, e))?;
                    let receipt = client
                        .send_native(&transfer.private_key, &transfer.from, &transfer.to, amount)
                        .await?;
                    println!("{}", receipt);
                }
                ChainCommand::SendToken {
                    transfer,
                    amount,
                    contract,
                } => {
                    let receipt = client
                        .send_token(
                            &transfer.private_key,
                            &transfer.from,
                            &transfer.to,
                            parse_token_amount(&amount)?,
                            &contract,
                        )
                        .await?;
                    println!("{}", receipt);
                }
            }
        }

        Commands::Notify { command } => {
            let registry = IpnRegistry::from_config(&config.notifier)
                .map_err(|e| eyre!("IPN registry unavailable: {}", e))?;

            let list = match command {
                NotifyCommand::Add { address } => registry.add_address(&address).await?,
                NotifyCommand::Delete { address } => registry.delete_address(&address).await?,
                NotifyCommand::Replace { addresses } => {
                    registry.replace_addresses(&addresses).await?
                }
            };

            println!("{}", serde_json::to_string_pretty(&list)?);
        }
    }

    Ok(())
}
