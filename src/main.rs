use anyhow::Result;
use clap::Parser;
use proxy_verify::{
    progress, CancelFlag, CheckerConfig, ProbeContext, ProxyChecker, ProxyParser, ProxyType,
    ResultWriter, TRIAL_ORDER,
};
use std::path::PathBuf;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Probe candidate proxies as SOCKS5, SOCKS4 and HTTP
#[derive(Parser)]
#[command(name = "proxy-verify")]
#[command(about = "Probe candidate proxies as SOCKS5, SOCKS4 and HTTP and keep the ones that work")]
struct Cli {
    /// File with one host:port candidate per line
    #[arg(short, long, default_value = "proxies.txt")]
    input: PathBuf,
    /// Directory for http_proxies.txt, socks4_proxies.txt and socks5_proxies.txt
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
    /// Number of concurrent probes
    #[arg(short = 'n', long, default_value = "25")]
    threads: usize,
    /// Timeout in seconds for each attempt
    #[arg(long, default_value = "15")]
    timeout: u64,
    /// URL that answers with a JSON body holding an `ip` field
    #[arg(long, default_value = "https://api.ipify.org?format=json")]
    test_url: String,
    /// Also log why each attempt failed
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "proxy_verify=debug"
    } else {
        "proxy_verify=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .without_time()
        .init();

    let candidates = match ProxyParser::load_file(&cli.input) {
        Ok(candidates) => candidates,
        Err(e) if e.is_warning() => {
            warn!("{}", e);
            return Ok(());
        }
        Err(e) => {
            error!("Error: {}", e);
            error!(
                "Create '{}' with one host:port proxy per line.",
                cli.input.display()
            );
            return Ok(());
        }
    };

    let config = CheckerConfig::new()
        .with_concurrency(cli.threads)
        .with_timeout(Duration::from_secs(cli.timeout))
        .with_test_url(cli.test_url)
        .with_output_dir(cli.output_dir);

    info!(
        "Checking {} proxies with {} workers, timeout {}s (press Ctrl+C to stop)",
        candidates.len(),
        config.concurrency,
        cli.timeout
    );

    let bar = progress::checking_bar(candidates.len());
    let ctx = ProbeContext::new(
        CancelFlag::new(),
        ResultWriter::new(&config.output_dir, bar),
    );
    let checker = ProxyChecker::new(config);

    let run = checker.check_all(candidates, &ctx);
    tokio::pin!(run);

    let finished = tokio::select! {
        _ = &mut run => true,
        res = signal::ctrl_c() => {
            match res {
                Ok(()) => {
                    ctx.writer.notice("🛑 Check stopped by user. Finishing in-flight attempts...");
                    ctx.cancel.cancel();
                }
                Err(e) => ctx.writer.warn(&format!("Failed to listen for Ctrl+C: {}", e)),
            }
            false
        }
    };

    // In-flight attempts run to completion, unstarted candidates are dropped.
    if !finished {
        run.await;
    }
    ctx.writer.finish();

    let files: Vec<String> = TRIAL_ORDER
        .iter()
        .rev()
        .map(ProxyType::file_name)
        .collect();
    info!("✅ Check finished.");
    info!("Working proxies saved to: {}", files.join(", "));

    Ok(())
}
