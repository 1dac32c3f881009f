use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{error, info};

use crate::application::queries::{get_streak_stats, get_win_history};
use crate::application::services::FeedbackState;
use crate::presentation::cli::Commands;
use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;
use littlewins_domain::shared::{UserId, WinId};

const SESSION_HELP: &str =
    "Type a win and press enter. Commands: /list /streak /delete <id> /refresh /signin <user> /signout /quit";

/// Run a one-shot command. Failures are reported on `out` and returned.
pub async fn execute(
    command: Commands,
    state: &mut AppState,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let (title, result) = match command {
        Commands::Add { text } => ("Error adding win", add_win(state, &text.join(" "), out).await),
        Commands::List => ("Error loading wins", list_wins(state, out)),
        Commands::Delete { id } => ("Error deleting win", delete_win(state, &id, out).await),
        Commands::Streak => ("Error loading streak", show_streak(state, out)),
        Commands::Session => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            ("Session failed", run_session(state, stdin, out).await)
        }
    };

    if let Err(e) = &result {
        report(out, title, e);
    }
    result
}

pub async fn add_win(
    state: &mut AppState,
    text: &str,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let outcome = state.session.submit(&mut state.store, text).await?;

    writeln!(out, "✅ {}", outcome.message)?;
    writeln!(out, "🔥 {}", streak_line(outcome.streak))?;
    Ok(())
}

pub fn list_wins(state: &AppState, out: &mut dyn Write) -> Result<(), CommandError> {
    let history = get_win_history(&state.store);
    if history.is_empty() {
        writeln!(out, "No wins yet. Add your first one!")?;
        return Ok(());
    }

    for win in &history {
        writeln!(out, "{:<13} {}  ({})", win.display_date, win.text, win.id)?;
    }
    Ok(())
}

pub async fn delete_win(
    state: &mut AppState,
    id: &str,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(CommandError::validation("Win id cannot be empty"));
    }

    state.store.delete_win(&WinId::from_string(id)).await?;
    writeln!(out, "🗑️  Win deleted")?;
    Ok(())
}

pub fn show_streak(state: &mut AppState, out: &mut dyn Write) -> Result<(), CommandError> {
    let stats = get_streak_stats(&mut state.store);

    writeln!(out, "🔥 Current streak: {}", days(stats.current_streak))?;
    writeln!(out, "🏆 Longest streak: {}", days(stats.longest_streak))?;
    writeln!(out, "📅 Days with a win: {}", stats.total_win_days)?;
    match stats.last_win_date {
        Some(date) if stats.has_entry_today => writeln!(out, "Last win: {} (today ✓)", date)?,
        Some(date) => writeln!(out, "Last win: {} (nothing yet today)", date)?,
        None => writeln!(out, "No wins yet")?,
    }
    Ok(())
}

/// Interactive loop: each line from `input` is submitted as a win unless it
/// is one of the slash commands. Ends on `/quit` or end of input.
pub async fn run_session<R>(
    state: &mut AppState,
    input: R,
    out: &mut dyn Write,
) -> Result<(), CommandError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut feedback = state.session.subscribe();
    info!("Interactive session started");

    writeln!(out, "{}", SESSION_HELP)?;
    writeln!(out, "🔥 {}", streak_line(state.store.current_streak()))?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_line(state, line.trim(), out).await? {
                    break;
                }
            }
            changed = feedback.changed() => {
                if changed.is_err() {
                    break;
                }
                let hidden = *feedback.borrow_and_update() == FeedbackState::Idle;
                if hidden {
                    writeln!(out, "✨ Ready for the next win")?;
                    out.flush()?;
                }
            }
        }
    }

    state.session.dismiss();
    info!("Interactive session ended");
    writeln!(out, "👋 {}", streak_line(state.store.current_streak()))?;
    Ok(())
}

/// Returns `false` when the session should end. Command failures are
/// reported and the session goes on.
async fn handle_line(
    state: &mut AppState,
    line: &str,
    out: &mut dyn Write,
) -> Result<bool, CommandError> {
    let (title, result) = match line {
        "" => return Ok(true),
        "/quit" | "/exit" => return Ok(false),
        "/help" => {
            writeln!(out, "{}", SESSION_HELP)?;
            return Ok(true);
        }
        "/list" => ("Error loading wins", list_wins(state, out)),
        "/streak" => ("Error loading streak", show_streak(state, out)),
        "/refresh" => ("Error loading wins", refresh(state, out).await),
        "/signout" => ("Error signing out", sign_out(state, out).await),
        _ if command_name(line) == "/delete" => {
            let id = &line["/delete".len()..];
            ("Error deleting win", delete_win(state, id, out).await)
        }
        _ if command_name(line) == "/signin" => {
            let user = &line["/signin".len()..];
            ("Error signing in", sign_in(state, user, out).await)
        }
        _ if line.starts_with('/') => {
            writeln!(out, "Unknown command {}. {}", line, SESSION_HELP)?;
            return Ok(true);
        }
        _ => ("Error adding win", add_win(state, line, out).await),
    };

    if let Err(e) = result {
        report(out, title, &e);
    }
    Ok(true)
}

async fn refresh(state: &mut AppState, out: &mut dyn Write) -> Result<(), CommandError> {
    state.store.refresh().await?;
    writeln!(out, "🔄 {} wins loaded", state.store.wins().len())?;
    Ok(())
}

async fn sign_in(
    state: &mut AppState,
    user: &str,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let user = user.trim();
    if user.is_empty() {
        return Err(CommandError::validation("User id cannot be empty"));
    }

    state.identity.sign_in(UserId::from_string(user));
    state.store.load().await?;
    writeln!(out, "🔓 Signed in as {} ({} wins)", user, state.store.wins().len())?;
    Ok(())
}

/// Forget the user; reloading with nobody signed in empties the view
async fn sign_out(state: &mut AppState, out: &mut dyn Write) -> Result<(), CommandError> {
    state.session.dismiss();
    state.identity.sign_out();
    state.store.load().await?;
    writeln!(out, "🔒 Signed out")?;
    Ok(())
}

/// First word of a slash command, so `/deletefoo` is not `/delete`
fn command_name(line: &str) -> &str {
    line.split_whitespace().next().unwrap_or_default()
}

fn report(out: &mut dyn Write, title: &str, err: &CommandError) {
    error!("{}: {}", title, err);
    let _ = writeln!(out, "❌ {}: {}", title, err.user_message());
}

fn days(n: u32) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", n)
    }
}

fn streak_line(streak: u32) -> String {
    match streak {
        0 => "No streak yet, today is a good day to start".to_string(),
        n => format!("{}-day streak", n),
    }
}
