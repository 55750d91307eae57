use anyhow::{Context, Result};
use clap::Parser;
use img_shrink::cli::Args;
use img_shrink::constants::ERROR_PREFIX;
use img_shrink::{
    log_run_configuration, select_files, validate_concurrency, BatchRunner, ClientOptions,
    Configuration, ConsoleSink, FileSink, IdentityMode, Reporter, ShrinkClient,
};
use indicatif::ProgressBar;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    // Recursion is always on from the command line
    let config = Configuration::new(&args.path, true);

    let identity = if args.rotate_identity {
        IdentityMode::Rotating
    } else {
        IdentityMode::Fixed
    };
    let client_options = ClientOptions::new(
        args.endpoint.as_deref(),
        args.timeout,
        identity,
        args.insecure,
    )
    .context("Invalid client options")?;
    let concurrency = validate_concurrency(args.concurrency).context("Invalid concurrency")?;

    let progress = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(0)
    };

    let file_sink = FileSink::open(&args.log_dir)
        .with_context(|| format!("Failed to open log files in {}", args.log_dir.display()))?;
    let mut reporter = Reporter::new().with_sink(file_sink);
    if !args.quiet {
        reporter = reporter.with_sink(ConsoleSink::with_progress(progress.clone()));
    }

    let files = match select_files(&config) {
        Ok(files) => files,
        Err(e) => {
            reporter.error(format!(
                "{} Failed to scan {}: {}",
                ERROR_PREFIX,
                config.root().display(),
                e
            ));
            return Err(e).context("File selection failed");
        }
    };
    log_run_configuration(&reporter, &config, files.len());

    let client = ShrinkClient::new(client_options).context("Failed to build HTTP client")?;
    let summary = BatchRunner::new(client, reporter)
        .with_concurrency(concurrency)
        .with_progress(progress)
        .run(&files)
        .await;

    tracing::info!(
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "batch finished"
    );

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("img_shrink={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
