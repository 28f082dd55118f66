//! `grateful history`: list a user's stored entries.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use grateful_types::gratitude::{GratitudeRecord, UserId};

use crate::state::AppState;

pub async fn history(state: &AppState, user: &str, limit: u32, json: bool) -> Result<()> {
    let user_id = UserId::from(user);
    let records = state
        .gratitude_service
        .recent_entries(&user_id, Some(limit.max(1)))
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!();
        println!(
            "  {} No entries for user {}. Start one with: {}",
            style("i").blue().bold(),
            style(user_id.as_str()).cyan(),
            style(format!("grateful chat --user {user_id}")).yellow()
        );
        println!();
        return Ok(());
    }

    println!("{}", build_table(&records));
    Ok(())
}

fn build_table(records: &[GratitudeRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("When").fg(Color::White),
        Cell::new("Grateful for").fg(Color::White),
        Cell::new("Id").fg(Color::White),
    ]);

    for record in records {
        let when = record
            .created_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string();
        table.add_row(vec![
            Cell::new(when),
            Cell::new(&record.text).fg(Color::Green),
            Cell::new(record.id.as_str()).fg(Color::DarkGrey),
        ]);
    }

    table
}
