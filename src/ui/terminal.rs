use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{info, warn};

use crate::models::{RiskTolerance, DEBT_LEVELS, INCOME_RANGES, SAVINGS_BUCKETS};
use crate::services::conversation_service::{IgnoreReason, SendOutcome};
use crate::state::AppState;
use crate::ui::render;

const HELP: &str = "Type a question and press Enter to ask the advisor.\n\
Commands:\n  \
/profile  edit and save your financial profile\n  \
/history  show the conversation the advisor has stored for you\n  \
/status   show what the advisor holds for your profile\n  \
/health   check the advisor service\n  \
/help     show this help\n  \
/quit     exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Chat(String),
    Profile,
    History,
    Status,
    Health,
    Help,
    Quit,
    Unknown(String),
    Empty,
}

/// Interpret one line of input. Suggested prompts are selectable by number
/// only while the conversation is still fresh.
pub fn parse_command(line: &str, offer_suggestions: bool) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }

    if let Some(cmd) = trimmed.strip_prefix('/') {
        return match cmd.to_ascii_lowercase().as_str() {
            "profile" => Command::Profile,
            "history" => Command::History,
            "status" => Command::Status,
            "health" => Command::Health,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => Command::Unknown(trimmed.to_string()),
        };
    }

    if offer_suggestions {
        if let Some(prompt) = render::pick_suggested_prompt(trimmed) {
            return Command::Chat(prompt.to_string());
        }
    }

    Command::Chat(line.to_string())
}

type InputLines = Lines<BufReader<Stdin>>;

/// Gate for output produced by background chat turns. While a form owns the
/// terminal, finished turns are queued and printed once it closes.
#[derive(Default)]
pub struct Console {
    state: Mutex<ConsoleState>,
}

#[derive(Default)]
struct ConsoleState {
    held: bool,
    pending: Vec<String>,
}

impl Console {
    /// Queue background output until the returned guard is dropped.
    pub fn hold(&self) -> ConsoleHold<'_> {
        self.state.lock().held = true;
        ConsoleHold(self)
    }

    pub fn is_held(&self) -> bool {
        self.state.lock().held
    }

    /// Print `block` now, or queue it if a form is open. Printing happens
    /// under the lock so a form cannot open halfway through a block.
    pub fn emit(&self, block: String, print: impl FnOnce(&str)) {
        let mut state = self.state.lock();
        if state.held {
            state.pending.push(block);
        } else {
            print(&block);
        }
    }

    fn release(&self) -> Vec<String> {
        let mut state = self.state.lock();
        state.held = false;
        std::mem::take(&mut state.pending)
    }
}

/// Releases the console and flushes queued output, on every exit path of the
/// form that took it.
pub struct ConsoleHold<'a>(&'a Console);

impl Drop for ConsoleHold<'_> {
    fn drop(&mut self) {
        for block in self.0.release() {
            println!("{}", block);
        }
    }
}

/// Interactive loop over stdin/stdout. Chat turns run in the background so
/// the prompt stays responsive; input sent while a turn is pending is dropped.
pub async fn run(state: AppState) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let console = Arc::new(Console::default());

    for message in state.session.messages() {
        println!("{}", render::render_message(&message));
    }
    println!("\n{}\n\n{}", render::render_suggested_prompts(), HELP);

    loop {
        prompt("> ")?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let fresh = state.session.messages().len() == 1;
        match parse_command(&line, fresh) {
            Command::Empty => {}
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::Unknown(cmd) => println!("Unknown command {}. Type /help for the list.", cmd),
            Command::Chat(text) => start_chat_turn(&state, &console, text),
            Command::Profile => edit_profile(&state, &console, &mut lines).await?,
            Command::History => match state.session.load_history(state.config.history_limit).await {
                Ok(items) => println!("{}", render::render_history(&items)),
                Err(e) => {
                    warn!("History request failed: {}", e);
                    println!("Could not load your conversation history right now.");
                }
            },
            Command::Status => match state.profile_editor.status().await {
                Ok(status) => println!("{}", status.message),
                Err(e) => {
                    warn!("Profile status request failed: {}", e);
                    println!("Could not reach the advisor for your profile status.");
                }
            },
            Command::Health => match tokio::time::timeout(state.config.request_timeout, state.backend.health()).await {
                Ok(Ok(health)) => println!("{}", render::render_health(&health)),
                Ok(Err(e)) => {
                    warn!("Health check failed: {}", e);
                    println!("The advisor service is not reachable.");
                }
                Err(_) => println!("The advisor service did not answer in time."),
            },
        }
    }

    info!("Terminal session ended");
    Ok(())
}

fn prompt(text: &str) -> std::io::Result<()> {
    let mut out = std::io::stdout();
    write!(out, "{}", text)?;
    out.flush()
}

const STILL_WAITING: &str = "Still waiting on the previous answer; message not sent.";

fn start_chat_turn(state: &AppState, console: &Arc<Console>, text: String) {
    if state.session.is_loading() {
        println!("{}", STILL_WAITING);
        return;
    }

    let session = state.session.clone();
    let console = console.clone();
    println!("{}", render::LOADING_INDICATOR);

    tokio::spawn(async move {
        let before = session.messages().len();
        let block = match session.send_message(&text).await {
            SendOutcome::Ignored(IgnoreReason::RequestInFlight) => STILL_WAITING.to_string(),
            SendOutcome::Ignored(IgnoreReason::EmptyInput) => return,
            SendOutcome::Answered | SendOutcome::Failed => {
                let snapshot = session.snapshot();
                // Skip the user's own line, it is already on screen.
                let mut parts: Vec<String> = snapshot
                    .messages
                    .iter()
                    .skip(before + 1)
                    .map(|m| format!("\n{}", render::render_message(m)))
                    .collect();
                if let Some(tools) = render::render_tool_calls(&snapshot.tool_calls) {
                    parts.push(format!("\n{}", tools));
                }
                parts.join("\n")
            }
        };

        console.emit(block, |block| {
            println!("{}", block);
            let _ = prompt("> ");
        });
    });
}

async fn edit_profile(
    state: &AppState,
    console: &Console,
    lines: &mut InputLines,
) -> std::io::Result<()> {
    let _hold = console.hold();
    let editor = &state.profile_editor;
    println!("Edit your profile. Press Enter to keep the current value.\n");
    println!("{}\n", render::render_profile(&editor.draft()));

    if let Some(choice) = choose(lines, "Income range", INCOME_RANGES).await? {
        editor.edit_draft(|p| p.income_range = choice);
    }
    if let Some(choice) = choose(lines, "Debt level", DEBT_LEVELS).await? {
        editor.edit_draft(|p| p.debt_level = choice);
    }
    if let Some(choice) = choose(lines, "Savings runway", SAVINGS_BUCKETS).await? {
        editor.edit_draft(|p| p.savings = choice);
    }

    let levels: Vec<String> = RiskTolerance::ALL.iter().map(|r| r.to_string()).collect();
    let level_refs: Vec<&str> = levels.iter().map(String::as_str).collect();
    if let Some(choice) = choose(lines, "Risk tolerance", &level_refs).await? {
        if let Ok(level) = choice.parse::<RiskTolerance>() {
            editor.edit_draft(|p| p.risk_tolerance = level);
        }
    }

    prompt("Financial goals: ")?;
    if let Some(goals) = lines.next_line().await? {
        let goals = goals.trim();
        if !goals.is_empty() {
            editor.edit_draft(|p| p.financial_goals = goals.to_string());
        }
    }

    println!("\n{}\n", render::render_profile(&editor.draft()));
    prompt("Save profile? [y/N] ")?;
    let confirmed = lines
        .next_line()
        .await?
        .map(|answer| answer.trim().eq_ignore_ascii_case("y"))
        .unwrap_or(false);

    if !confirmed {
        editor.discard_draft();
        println!("Profile changes discarded.");
        return Ok(());
    }

    match editor.submit().await {
        Ok(notice) => println!("{}", notice),
        Err(e) => println!("{}", e.notice()),
    }
    Ok(())
}

/// Offer a numbered list; returns the picked option, or `None` to keep the
/// current value.
async fn choose(
    lines: &mut InputLines,
    label: &str,
    options: &[&str],
) -> std::io::Result<Option<String>> {
    println!("{}:", label);
    for (idx, option) in options.iter().enumerate() {
        println!("  {}. {}", idx + 1, option);
    }
    prompt("Choice: ")?;

    let Some(line) = lines.next_line().await? else {
        return Ok(None);
    };
    Ok(pick_option(&line, options))
}

fn pick_option(input: &str, options: &[&str]) -> Option<String> {
    let idx: usize = input.trim().parse().ok()?;
    idx.checked_sub(1)
        .and_then(|i| options.get(i))
        .map(|s| s.to_string())
}
