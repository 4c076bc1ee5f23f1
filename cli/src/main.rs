//! RateBridge CLI
//!
//! Currency converter and scripted chat over the RateBridge FX engine.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use ratebridge_fx::{ConversionEngine, ConversionRequest, EngineConfig};

mod chat;
mod render;

/// RateBridge converter CLI
#[derive(Parser, Debug)]
#[command(name = "ratebridge")]
#[command(about = "Convert between fiat currencies and cryptocurrencies")]
struct Args {
    /// Rate table JSON file (defaults to the built-in demo rates)
    #[arg(long, global = true)]
    rates_file: Option<PathBuf>,

    /// Pause before showing a result, in milliseconds (default 0)
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    /// Pause like the web widgets did: 800ms for conversions, 1500ms for chat
    #[arg(long, global = true)]
    simulate_latency: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert an amount from one currency to another
    Convert {
        /// Amount to convert
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Source currency code
        from: String,
        /// Target currency code
        to: String,
        /// Exchange source and target before converting
        #[arg(long)]
        swap: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List supported currencies and their rates
    Rates,
    /// Ask the chat assistant a question
    Ask {
        /// Message text
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        message: Vec<String>,
    },
}

impl Args {
    /// Command-line flags take precedence over the environment.
    fn apply(&self, config: &mut EngineConfig) {
        if let Some(path) = &self.rates_file {
            config.rates_file = Some(path.clone());
        }
        if let Some(delay) = self.delay_ms {
            config.delay_ms = delay;
        }
        if self.log_json {
            config.log_json = true;
        }
    }
}

fn init_logging(json: bool) {
    let fmt = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(fmt)
        .init();
}

/// Converter pause used by `--simulate-latency`.
const CONVERTER_DELAY_MS: u64 = 800;

/// Chat pause used by `--simulate-latency`.
const CHAT_DELAY_MS: u64 = 1500;

/// An explicit delay wins; otherwise the widget delay when simulating.
fn presentation_delay(config: &EngineConfig, simulate: bool, widget_ms: u64) -> Duration {
    match config.delay_ms {
        0 if simulate => Duration::from_millis(widget_ms),
        ms => Duration::from_millis(ms),
    }
}

/// Presentation pause before showing a result.
async fn pause(delay: Duration) {
    if !delay.is_zero() {
        debug!(delay_ms = delay.as_millis() as u64, "Simulating latency");
        tokio::time::sleep(delay).await;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = EngineConfig::from_env();
    args.apply(&mut config);

    init_logging(config.log_json);

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(anyhow::anyhow!("Configuration error: {}", e));
    }

    let engine = ConversionEngine::from_config(&config)?;

    match args.command {
        Command::Convert {
            amount,
            from,
            to,
            swap,
            json,
        } => {
            let request = ConversionRequest::parse(&amount, &from, &to)
                .map(|request| if swap { request.swapped() } else { request });

            pause(presentation_delay(&config, args.simulate_latency, CONVERTER_DELAY_MS)).await;

            let result = request.and_then(|request| engine.convert(&request));
            match result {
                Ok(result) => {
                    info!(from = %result.from, to = %result.to, "Conversion completed");
                    if json {
                        println!("{}", render::conversion_json(&result)?);
                    } else {
                        println!("{}", render::conversion(&result));
                    }
                }
                Err(e) => {
                    info!(code = e.error_code(), error = %e, "Conversion rejected");
                    let msg = e.user_message();
                    anyhow::bail!("{}: {}", msg.title, msg.description);
                }
            }
        }
        Command::Rates => {
            print!("{}", render::rates(&engine));
        }
        Command::Ask { message } => {
            let message = message.join(" ");
            println!("{}", chat::WELCOME);
            println!("> {message}");

            pause(presentation_delay(&config, args.simulate_latency, CHAT_DELAY_MS)).await;

            println!("{}", chat::respond(&engine, &message));
        }
    }

    Ok(())
}
