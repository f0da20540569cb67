use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod output;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("vgl error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    // Schema dumps are pure type introspection; no configuration needed.
    if let cli::Commands::Schema(args) = &cli.command {
        return commands::schema::handle(args, &flags);
    }

    let config = bootstrap::load_config()?;

    match &cli.command {
        cli::Commands::Auth { action } => commands::auth::handle(action, &flags, &config).await,
        cli::Commands::Stats(args) => commands::crimes::stats(args, &flags, &config).await,
        cli::Commands::Trends(args) => commands::crimes::trends(args, &flags, &config).await,
        cli::Commands::Dashboard(args) => commands::crimes::dashboard(args, &flags, &config).await,
        cli::Commands::Theme { action } => commands::theme::handle(action, &flags, &config),
        cli::Commands::Schema(_) => unreachable!("schema is pre-dispatched before config load"),
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("VIGIL_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
