//! Chat loop: read lines, feed the conversation handler, print replies.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use console::style;
use grateful_core::conversation::reminder::{DailySchedule, spawn_reminder_task};
use grateful_core::conversation::state::{ConversationStore, spawn_eviction_task};
use grateful_core::conversation::transport::ChannelSink;
use grateful_core::storage::document_store::DocumentStore;
use grateful_infra::config::RuntimeConfig;
use grateful_types::conversation::{EventKind, InboundEvent};
use grateful_types::gratitude::UserId;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::input::{ChatInput, InputEvent};
use crate::state::build_handler;

/// Commands handled by the console itself rather than the bot.
#[derive(Debug, PartialEq, Eq)]
enum LocalCommand {
    Quit,
    Help,
}

fn local_command(line: &str) -> Option<LocalCommand> {
    match line.trim().to_lowercase().as_str() {
        "/quit" | "/exit" => Some(LocalCommand::Quit),
        "/help" => Some(LocalCommand::Help),
        _ => None,
    }
}

fn print_help(out: &mut impl Write) {
    let _ = writeln!(out);
    let _ = writeln!(out, "  {}", style("Commands").bold());
    let _ = writeln!(out, "  {}    ask the gratitude question", style("/start").cyan());
    let _ = writeln!(out, "  {}   leave the question unanswered", style("/cancel").cyan());
    let _ = writeln!(out, "  {}  show your recent entries", style("/history").cyan());
    let _ = writeln!(out, "  {}   turn the daily reminder on or off (/remind on|off)", style("/remind").cyan());
    let _ = writeln!(out, "  {}     leave the chat (or Ctrl+D)", style("/quit").cyan());
    let _ = writeln!(out);
}

/// Run an interactive chat against `store` until EOF or `/quit`.
pub async fn run_chat_loop<D>(
    config: &RuntimeConfig,
    store: D,
    user: String,
    display_name: Option<String>,
    quiet: bool,
) -> Result<()>
where
    D: DocumentStore + Clone + 'static,
{
    let user_id = UserId::new(user);
    let conversations = ConversationStore::new();
    let (sink, mut replies) = ChannelSink::channel();
    let handler = Arc::new(build_handler(
        store,
        &config.settings,
        sink,
        conversations.clone(),
    ));

    let cancel = CancellationToken::new();
    let sweeper = spawn_eviction_task(
        conversations,
        config.settings.conversation.idle_eviction(),
        config.settings.conversation.eviction_interval(),
        cancel.clone(),
    );

    let reminders = &config.settings.reminders;
    let reminder_task = if reminders.enabled {
        match DailySchedule::new(reminders.hour_utc, reminders.minute) {
            Some(schedule) => Some(spawn_reminder_task(
                handler.clone(),
                schedule,
                cancel.clone(),
            )),
            None => {
                warn!(
                    hour_utc = reminders.hour_utc,
                    minute = reminders.minute,
                    "Invalid reminder time, reminders disabled"
                );
                None
            }
        }
    } else {
        None
    };

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, mut writer) =
        ChatInput::new(prompt).map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    if !quiet {
        let _ = writeln!(writer);
        let _ = writeln!(
            writer,
            "  {} Chatting as {}. Type {} to begin, {} for commands.",
            style("🌟").bold(),
            style(user_id.as_str()).cyan(),
            style("/start").yellow(),
            style("/help").yellow()
        );
        let _ = writeln!(writer);
    }

    let mut reply_writer = writer.clone();
    let console_user = user_id.clone();
    let printer = tokio::spawn(async move {
        while let Some(reply) = replies.recv().await {
            // Reminders for other subscribers have no console to go to.
            if reply.user_id != console_user {
                continue;
            }
            let text = reply.text.replace('\n', "\n        ");
            let _ = writeln!(reply_writer, "  {} {}", style("Bot >").cyan().bold(), text);
            let _ = writeln!(reply_writer);
        }
    });

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => break,
            InputEvent::Interrupted => {
                let _ = writeln!(writer, "  {}", style("Press Ctrl+D or type /quit to exit.").dim());
                continue;
            }
            InputEvent::Line(line) => {
                match local_command(&line) {
                    Some(LocalCommand::Quit) => break,
                    Some(LocalCommand::Help) => {
                        print_help(&mut writer);
                        continue;
                    }
                    None => {}
                }

                let mut event = InboundEvent::new(user_id.clone(), EventKind::parse(&line));
                event.display_name = display_name.clone();
                handler.handle(event).await;
            }
        }
    }

    cancel.cancel();
    let _ = sweeper.await;
    if let Some(task) = reminder_task {
        let _ = task.await;
    }

    // Dropping the last handler closes the reply channel and ends the printer.
    drop(handler);
    let _ = printer.await;

    if !quiet {
        let _ = writeln!(writer, "\n  {}", style("Chat ended.").dim());
    }
    chat_input.flush();
    Ok(())
}
