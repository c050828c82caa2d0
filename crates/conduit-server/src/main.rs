use anyhow::Context;
use clap::Parser;
use conduit_config::ConduitConfig;

mod cli;
mod commands;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("conduit error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    match cli.command {
        cli::Commands::Serve { bind } => {
            let config = ConduitConfig::load_with_dotenv().context("failed to load configuration")?;
            commands::serve::handle(config, bind.as_deref()).await
        }
        cli::Commands::Validate {
            shape,
            file,
            revision,
        } => commands::validate::handle(&shape, &file, revision.as_deref()),
        cli::Commands::Schema { shape } => commands::schema::handle(shape.as_deref()),
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CONDUIT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
