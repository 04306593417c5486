use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tokio::io::{AsyncBufReadExt, BufReader};

use std::path::PathBuf;

use super::config::*;
use discount::{currency::*, *};

#[derive(Parser)]
#[clap(version, long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[clap(
        short,
        long,
        env = "KASSA_CONFIG",
        default_value = "kassa.yml",
        value_name = "FILE"
    )]
    config: PathBuf,

    /// Bearer token for the pricing endpoint
    #[clap(long, env = "KASSA_AUTH_TOKEN", hide_env_values = true)]
    auth_token: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Converts an amount locally without contacting the pricing endpoint
    Convert {
        #[clap(flatten)]
        booking: BookingArgs,
        amount: String,
    },
    /// Prints the reconciled discount for a single amount
    Quote {
        #[clap(flatten)]
        booking: BookingArgs,
        amount: String,
    },
    /// Reads amounts from stdin, one per line, and prints every published result
    Watch {
        #[clap(flatten)]
        booking: BookingArgs,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Mode {
    Buy,
    Sell,
}

impl From<Mode> for TransactionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Buy => TransactionMode::Buy,
            Mode::Sell => TransactionMode::Sell,
        }
    }
}

#[derive(Args)]
struct BookingArgs {
    #[clap(short, long, value_enum, default_value_t = Mode::Buy)]
    mode: Mode,
    /// Base units paid per foreign unit when the customer sells
    #[clap(long)]
    buy_rate: Decimal,
    /// Base units charged per foreign unit when the customer buys
    #[clap(long)]
    sell_rate: Decimal,
    #[clap(long)]
    branch_id: Option<u64>,
    #[clap(long)]
    exchange_rate_id: Option<u64>,
    #[clap(long)]
    rate_locked: bool,
    #[clap(long)]
    guest: bool,
    /// The client still has a first booking discount available
    #[clap(long)]
    client_discount: bool,
    /// Amounts are given in the base currency
    #[clap(long)]
    base: bool,
}

impl BookingArgs {
    fn input(&self, amount: &str) -> BookingInput {
        let amount = if self.base {
            AmountInput::Base(BaseAmount::parse_input(amount))
        } else {
            AmountInput::Foreign(ForeignAmount::parse_input(amount))
        };
        BookingInput {
            amount,
            mode: self.mode.into(),
            rate: ExchangeRatePair::new(self.buy_rate, self.sell_rate),
            branch_id: self.branch_id.map(BranchId::from),
            exchange_rate_id: self.exchange_rate_id.map(ExchangeRateId::from),
            is_rate_locked: self.rate_locked,
            client: ClientContext {
                is_guest: self.guest,
                client_discount_available: self.client_discount,
            },
        }
    }
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_path(
        cli.config,
        EnvOverride {
            auth_token: cli.auth_token,
        },
    )?;
    crate::tracing::init_tracer(&config.tracing)?;

    match cli.command {
        Command::Convert { booking, amount } => convert_cmd(booking, amount, &config),
        Command::Quote { booking, amount } => quote_cmd(booking, amount, config).await,
        Command::Watch { booking } => watch_cmd(booking, config).await,
    }
}

fn convert_cmd(booking: BookingArgs, amount: String, config: &Config) -> anyhow::Result<()> {
    let (foreign, base) = booking.input(&amount).amounts();
    let decimal_places = config.discount.decimal_places;
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "foreign_amount": foreign.round(decimal_places),
            "base_amount": base.round(decimal_places),
        }))?
    );
    Ok(())
}

async fn quote_cmd(booking: BookingArgs, amount: String, config: Config) -> anyhow::Result<()> {
    let session = init_session(config)?;
    session.update(booking.input(&amount)).await;
    let result = session.settled().await;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn watch_cmd(booking: BookingArgs, config: Config) -> anyhow::Result<()> {
    let session = init_session(config)?;
    let mut results = session.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_printed = None;

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => {
                    session.update(booking.input(line.trim())).await;
                }
                None => break,
            },
            changed = results.changed() => {
                if changed.is_err() {
                    break;
                }
                let result = results.borrow_and_update().clone();
                println!("{}", serde_json::to_string(&result)?);
                last_printed = Some(result);
            }
        }
    }

    // stdin closed while a reconciliation may still be in flight
    let result = session.settled().await;
    if last_printed.as_ref() != Some(&result) {
        println!("{}", serde_json::to_string(&result)?);
    }
    Ok(())
}

fn init_session(config: Config) -> anyhow::Result<DiscountSession<PricingClient>> {
    let client = PricingClient::new(config.pricing_client)?;
    tracing::info!(endpoint = %client.endpoint(), "pricing client ready");
    Ok(DiscountSession::new(config.discount, client))
}
