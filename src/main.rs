use clap::Parser;
use ledgermain::application::render::render;
use ledgermain::application::session::{Session, SubmitOutcome};
use ledgermain::domain::ports::PayrollClientBox;
use ledgermain::infrastructure::http::HttpPayrollClient;
use ledgermain::infrastructure::stub::{Network, StubPayrollClient};
use ledgermain::logging;
use miette::{IntoDiagnostic, Result};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File of command lines to run instead of reading stdin
    script: Option<PathBuf>,

    /// Payroll API base URL. When absent, an in-process stub computes and settles.
    #[arg(long, env = "LEDGER_API_BASE")]
    api_base: Option<String>,

    /// Network the stub links transactions to
    #[arg(long, value_enum, default_value_t = Network::BaseSepolia)]
    network: Network,

    /// Simulated stub latency per call, in milliseconds
    #[arg(long, default_value_t = 0)]
    latency_ms: u64,

    /// Start without the banner
    #[arg(long)]
    no_banner: bool,

    /// Print transcript lines without styling
    #[arg(long)]
    plain: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let client: PayrollClientBox = match &cli.api_base {
        Some(base_url) => {
            let client = HttpPayrollClient::new(base_url.as_str()).into_diagnostic()?;
            match client.health().await {
                Ok(health) => info!(base_url = client.base_url(), %health, "payroll API reachable"),
                Err(e) => warn!(base_url = client.base_url(), error = %e, "payroll API health check failed"),
            }
            Box::new(client)
        }
        None => Box::new(
            StubPayrollClient::new()
                .with_network(cli.network)
                .with_latency(Duration::from_millis(cli.latency_ms)),
        ),
    };

    let session = if cli.no_banner {
        Session::new(client)
    } else {
        Session::with_banner(client)
    };

    let interactive = cli.script.is_none() && console::Term::stdout().is_term();
    let reader: Box<dyn AsyncBufRead + Unpin> = match &cli.script {
        Some(path) => Box::new(BufReader::new(
            tokio::fs::File::open(path).await.into_diagnostic()?,
        )),
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };

    let mut rendered = flush(&session, 0, cli.plain, interactive).await?;
    let mut lines = reader.lines();
    loop {
        if interactive {
            print!("> ");
            io::stdout().flush().into_diagnostic()?;
        }
        let Some(line) = lines.next_line().await.into_diagnostic()? else {
            break;
        };
        if session.submit(&line).await == SubmitOutcome::Empty {
            continue;
        }
        rendered = flush(&session, rendered, cli.plain, interactive).await?;
    }

    Ok(())
}

/// Writes transcript entries added since `rendered` and returns the new length.
async fn flush(session: &Session, rendered: usize, plain: bool, interactive: bool) -> Result<usize> {
    let snapshot = session.snapshot().await;
    let len = snapshot.transcript.len();
    let start = if len < rendered {
        if interactive {
            console::Term::stdout().clear_screen().into_diagnostic()?;
        }
        0
    } else {
        rendered
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in render(&snapshot.transcript[start..]) {
        writeln!(out, "{}", line.paint(plain)).into_diagnostic()?;
    }
    out.flush().into_diagnostic()?;
    Ok(len)
}
