use clap::Parser;
use merchant_console::application::session::SessionStore;
use merchant_console::config::{DEFAULT_GATEWAY_URL, DEFAULT_TIMEOUT_SECS, GatewayConfig};
use merchant_console::domain::ports::SubmissionLedgerRef;
use merchant_console::infrastructure::http::HttpGateway;
use merchant_console::infrastructure::in_memory::InMemoryLedger;
use merchant_console::interfaces::console::Console;
use miette::{IntoDiagnostic, Result};
use std::io;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the payment gateway
    #[arg(long, env = "PAYMENT_GATEWAY_URL", default_value = DEFAULT_GATEWAY_URL)]
    gateway_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "PAYMENT_GATEWAY_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .into_diagnostic()?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = GatewayConfig::new(cli.gateway_url, cli.timeout_secs);
    tracing::debug!(gateway = %config.base_url, "starting console");

    let gateway = Arc::new(HttpGateway::new(config).into_diagnostic()?);
    let ledger: SubmissionLedgerRef = Arc::new(InMemoryLedger::new());
    let session = SessionStore::new(gateway.clone());
    let console = Console::new(session, gateway, ledger);

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = io::stdout();
    console.run(stdin, &mut stdout.lock()).await.into_diagnostic()?;

    Ok(())
}
