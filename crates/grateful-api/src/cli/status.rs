//! `grateful status`: configuration and storage overview.

use anyhow::Result;
use console::style;
use grateful_core::repository::document::{GRATITUDE_COLLECTION, USER_COLLECTION};
use grateful_core::storage::document_store::DocumentStore;

use crate::state::AppState;

pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let entries = state.store.count(GRATITUDE_COLLECTION).await?;
    let users = state.store.count(USER_COLLECTION).await?;
    let config = &state.config;
    let token_configured = config.transport_token.is_some();

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": config.data_dir.display().to_string(),
            "storage_path": config.storage_path.display().to_string(),
            "storage_timeout_secs": config.settings.storage.timeout().as_secs(),
            "transport_token_configured": token_configured,
            "entries": entries,
            "users": users,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Grateful v{}",
        style("🌟").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Storage ──").dim());
    println!("  Entries: {}", style(entries).bold());
    println!("  Users:   {}", style(users).bold());
    println!(
        "  Timeout: {}s",
        config.settings.storage.timeout().as_secs()
    );
    println!();

    println!("  {}", style("── Transport ──").dim());
    if token_configured {
        println!("  Token:   {}", style("configured").green());
    } else {
        println!(
            "  Token:   {} (set {})",
            style("not set").yellow(),
            style(grateful_infra::config::BOT_TOKEN_ENV).dim()
        );
    }
    println!();

    println!("  {}", style("── System ──").dim());
    println!("  Data dir: {}", style(config.data_dir.display()).dim());
    println!("  Database: {}", style(config.storage_path.display()).dim());
    println!();

    Ok(())
}
