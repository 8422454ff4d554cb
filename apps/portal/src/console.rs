//! Line-oriented front-end: one command per line, one action per command.

use crate::error::PortalAppError;
use crate::state::PortalState;

use portal_core::portal::{Action, ActionOutcome};
use portal_core::router::Navigation;
use portal_core::views::Page;

use std::io::Write;

use log::{debug, info};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub const PROMPT: &str = "portal> ";

pub const HELP: &str = "\
Commands:
  go <path>          open a page (/, /register, /protected, /admin, /contact)
  user <name>        type into the username field
  pass <password>    type into the password field
  register           press Register
  login              press Login
  hello              press Say Hello
  background         press Change Background
  admin              press Admin Dashboard
  select <name>      pick a user in the admin selector
  authorize          press Authorize User
  back               press Go Back
  logout             follow the Logout link
  reload             reload the page
  show               print the current page
  help               print this text
  quit               exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Action(Action),
    Show,
    Help,
    Quit,
}

/// Parse one input line. Blank lines are `Ok(None)`.
///
/// Arguments keep their inner spaces, so `pass two words` types
/// `two words`. `select` without a name picks the placeholder.
pub fn parse_line(line: &str) -> Result<Option<ConsoleCommand>, PortalAppError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, argument) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "go" | "open" => ConsoleCommand::Action(Action::Navigate(required(verb, argument)?)),
        "user" => ConsoleCommand::Action(Action::SetUsername(argument.to_string())),
        "pass" => ConsoleCommand::Action(Action::SetPassword(argument.to_string())),
        "register" => ConsoleCommand::Action(Action::Register),
        "login" => ConsoleCommand::Action(Action::Login),
        "hello" => ConsoleCommand::Action(Action::SayHello),
        "background" => ConsoleCommand::Action(Action::ChangeBackground),
        "admin" => ConsoleCommand::Action(Action::OpenAdminDashboard),
        "select" => ConsoleCommand::Action(Action::SelectUser(argument.to_string())),
        "authorize" => ConsoleCommand::Action(Action::AuthorizeUser),
        "back" => ConsoleCommand::Action(Action::GoBack),
        "logout" => ConsoleCommand::Action(Action::Logout),
        "reload" => ConsoleCommand::Action(Action::Reload),
        "show" => ConsoleCommand::Show,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        other => {
            return Err(PortalAppError::command(format!(
                "Unknown command '{other}', type 'help' for a list"
            )));
        }
    };

    Ok(Some(command))
}

fn required(verb: &str, argument: &str) -> Result<String, PortalAppError> {
    if argument.is_empty() {
        Err(PortalAppError::command(format!("'{verb}' needs an argument")))
    } else {
        Ok(argument.to_string())
    }
}

/// Alerts first, then navigation and reload notes, one per line.
pub fn describe_outcome(outcome: &ActionOutcome) -> Vec<String> {
    let mut lines: Vec<String> = outcome
        .alerts
        .iter()
        .map(|alert| format!("[alert] {alert}"))
        .collect();

    if let Some(navigation) = outcome.navigation.filter(Navigation::redirected) {
        lines.push(format!(
            "[redirect] {} -> {}",
            navigation.requested, navigation.landed
        ));
    }

    if outcome.reloaded {
        lines.push("[reloaded]".to_string());
    }

    lines
}

/// Read commands from `input` until it ends or `quit`, printing each outcome
/// and the resulting page to `output`.
///
/// Bad commands are reported and skipped; only a dead state actor or a
/// broken input/output stream ends the loop with an error.
pub async fn run<R, W>(state: &PortalState, input: R, output: &mut W) -> Result<(), PortalAppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    write_page(output, &state.page().await)?;
    prompt(output)?;

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| PortalAppError::portal(format!("Failed to read input: {e}")))?
    {
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(ConsoleCommand::Quit)) => break,
            Ok(Some(ConsoleCommand::Help)) => write_line(output, HELP)?,
            Ok(Some(ConsoleCommand::Show)) => write_page(output, &state.page().await)?,
            Ok(Some(ConsoleCommand::Action(action))) => {
                let outcome = state.dispatch(action).await?;
                for line in describe_outcome(&outcome) {
                    write_line(output, &line)?;
                }
                write_page(output, &state.page().await)?;
            }
            Err(e) => {
                debug!("Rejected console input: {}", e);
                if let PortalAppError::Command { message, .. } = &e {
                    write_line(output, message)?;
                }
            }
        }
        prompt(output)?;
    }

    info!("Console input finished");
    Ok(())
}

fn write_page<W: Write>(output: &mut W, page: &Page) -> Result<(), PortalAppError> {
    write!(output, "{page}").map_err(output_error)
}

fn write_line<W: Write>(output: &mut W, line: &str) -> Result<(), PortalAppError> {
    writeln!(output, "{line}").map_err(output_error)
}

fn prompt<W: Write>(output: &mut W) -> Result<(), PortalAppError> {
    write!(output, "{PROMPT}").map_err(output_error)?;
    output.flush().map_err(output_error)
}

#[track_caller]
fn output_error(error: std::io::Error) -> PortalAppError {
    PortalAppError::portal(format!("Failed to write output: {error}"))
}
