use std::sync::Arc;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hookline::app::AppContext;
use hookline::cli::{commands, Cli, Commands};
use hookline::config::Config;
use hookline::feed::{FeedQuery, SourceFilter, Tab};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    // The TUI owns the terminal, so its logs go to a file
    let _guard = if matches!(command, Commands::Tui) {
        Some(init_file_tracing()?)
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
        None
    };

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new(&config.integrations);

    match command {
        Commands::Tui => {
            hookline::tui::run(Arc::new(ctx), Arc::new(config)).await?;
        }
        Commands::List {
            saved,
            search,
            source,
            json,
        } => {
            let dashboard = commands::seed_dashboard(&ctx);
            let query = FeedQuery {
                tab: if saved { Tab::Saved } else { Tab::Feed },
                search: search.unwrap_or_default(),
                filter: source.map_or(SourceFilter::All, |s| SourceFilter::Only(s.into())),
            };
            commands::list_items(&dashboard, &query, json)?;
        }
        Commands::Stats => {
            let dashboard = commands::seed_dashboard(&ctx);
            commands::show_stats(&dashboard);
        }
        Commands::Scrape { from } => {
            let mut dashboard = commands::seed_dashboard(&ctx);
            commands::scrape(&ctx, &mut dashboard, from.as_deref()).await?;
        }
        Commands::Hooks { ids } => {
            let mut dashboard = commands::seed_dashboard(&ctx);
            commands::generate_hooks(&ctx, &mut dashboard, &ids).await?;
        }
    }

    Ok(())
}

fn init_file_tracing() -> anyhow::Result<WorkerGuard> {
    let log_dir = AppContext::log_dir()?;
    let appender = tracing_appender::rolling::never(log_dir, "hookline.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(EnvFilter::from_default_env())
        .init();

    Ok(guard)
}
