//! Grateful CLI entry point.
//!
//! Binary name: `grateful`
//!
//! Parses CLI arguments, loads configuration, opens storage, then dispatches
//! to the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use grateful_core::storage::memory::InMemoryDocumentStore;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions need neither logging nor app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "grateful", &mut std::io::stdout());
        return Ok(());
    }

    grateful_observe::tracing_setup::init_tracing(
        cli::log_directives(cli.verbose, cli.quiet),
        cli.otel,
    )
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    grateful_observe::tracing_setup::shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = state::load_config(cli.data_dir.clone()).await?;
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        storage = %config.storage_path.display(),
        "Configuration loaded"
    );

    match cli.command {
        Commands::Chat {
            user,
            name,
            ephemeral: true,
        } => {
            cli::chat::loop_runner::run_chat_loop(
                &config,
                InMemoryDocumentStore::new(),
                user,
                name,
                cli.quiet,
            )
            .await?;
        }

        Commands::Chat {
            user,
            name,
            ephemeral: false,
        } => {
            let state = AppState::init(config).await?;
            cli::chat::loop_runner::run_chat_loop(
                &state.config,
                state.store.clone(),
                user,
                name,
                cli.quiet,
            )
            .await?;
            state.db_pool.close().await;
        }

        Commands::History { user, limit } => {
            let state = AppState::init(config).await?;
            cli::history::history(&state, &user, limit, cli.json).await?;
        }

        Commands::Status => {
            let state = AppState::init(config).await?;
            cli::status::status(&state, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled in main"),
    }

    Ok(())
}
