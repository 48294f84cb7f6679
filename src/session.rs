use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::warn;

use crate::config::LeaderboardConfig;
use crate::error::LeaderboardError;
use crate::report;
use crate::view::ViewController;

const HELP: &str = "commands: view <rankings|profiles|achievements>, next, prev, \
select <id>, open <id>, clear, show, help, quit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    View(String),
    Next,
    Prev,
    Select(u32),
    Open(u32),
    Clear,
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, LeaderboardError> {
    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or_default().to_ascii_lowercase();
    let arg = parts.next();

    let id = |arg: Option<&str>| -> Result<u32, LeaderboardError> {
        let raw = arg.ok_or_else(|| {
            LeaderboardError::InvalidArgument(format!("`{verb}` needs a student id"))
        })?;
        raw.parse::<u32>()
            .map_err(|_| LeaderboardError::InvalidArgument(format!("`{raw}` is not a student id")))
    };

    match verb.as_str() {
        "view" => arg
            .map(|name| Command::View(name.to_string()))
            .ok_or_else(|| LeaderboardError::InvalidArgument("`view` needs a view name".into())),
        "next" => Ok(Command::Next),
        "prev" => Ok(Command::Prev),
        "select" => id(arg).map(Command::Select),
        "open" => id(arg).map(Command::Open),
        "clear" => Ok(Command::Clear),
        "show" => Ok(Command::Show),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(LeaderboardError::InvalidArgument(format!(
            "unknown command `{other}`"
        ))),
    }
}

fn report_error<W: Write>(err: LeaderboardError, output: &mut W) -> Result<bool> {
    if !err.is_recoverable() {
        return Err(err.into());
    }
    writeln!(output, "error: {err}")?;
    Ok(true)
}

/// Apply one command. Returns `false` once the session should end.
fn apply<W: Write>(
    controller: &mut ViewController<'_>,
    config: &LeaderboardConfig,
    command: Command,
    output: &mut W,
) -> Result<bool> {
    match command {
        Command::View(name) => {
            if let Err(err) = controller.set_active_view_named(&name) {
                return report_error(err, output);
            }
        }
        Command::Next => controller.set_active_view(controller.active_view().next()),
        Command::Prev => controller.set_active_view(controller.active_view().prev()),
        Command::Select(id) => {
            if let Err(err) = controller.select_student(id) {
                return report_error(err, output);
            }
        }
        Command::Open(id) => {
            if let Err(err) = controller.open_profile(id) {
                return report_error(err, output);
            }
        }
        Command::Clear => controller.clear_selection(),
        Command::Show => {}
        Command::Help => {
            writeln!(output, "{HELP}")?;
            return Ok(true);
        }
        Command::Quit => return Ok(false),
    }

    write!(output, "{}", report::render_view(controller, config))?;
    Ok(true)
}

pub fn run<R: BufRead, W: Write>(
    controller: &mut ViewController<'_>,
    config: &LeaderboardConfig,
    input: R,
    mut output: W,
) -> Result<()> {
    let span = tracing::info_span!("session", session_id = %controller.session_id());
    let _guard = span.enter();

    write!(output, "{}", report::render_view(controller, config))?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                warn!(%err, "rejected session command");
                report_error(err, &mut output)?;
                continue;
            }
        };

        if !apply(controller, config, command, &mut output)? {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::tests::sample_roster;
    use crate::view::ActiveView;

    fn drive(script: &str) -> (String, ActiveView, Option<u32>) {
        let roster = sample_roster();
        let config = LeaderboardConfig::default();
        let mut controller = ViewController::new(&roster);
        let mut output = Vec::new();
        run(&mut controller, &config, script.as_bytes(), &mut output).unwrap();
        (
            String::from_utf8(output).unwrap(),
            controller.active_view(),
            controller.selected_student_id(),
        )
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("select 3"), Ok(Command::Select(3)));
        assert_eq!(parse_command("VIEW profiles"), Ok(Command::View("profiles".into())));
        assert_eq!(parse_command("exit"), Ok(Command::Quit));
        assert!(parse_command("select").is_err());
        assert!(parse_command("select -1").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn open_selects_and_shows_profile() {
        let (output, view, selected) = drive("open 2\n");
        assert_eq!(view, ActiveView::Profiles);
        assert_eq!(selected, Some(2));
        assert!(output.contains("Rank #2"));
    }

    #[test]
    fn errors_do_not_end_the_session() {
        let (output, view, selected) = drive("select 1\nselect 99\nview settings\nnext\n");
        assert!(output.contains("error: student 99 not found"));
        assert!(output.contains("error: invalid argument: unknown view `settings`"));
        assert_eq!(view, ActiveView::Profiles);
        assert_eq!(selected, Some(1));
    }

    #[test]
    fn quit_stops_processing() {
        let (_, view, selected) = drive("select 1\nquit\nclear\nview achievements\n");
        assert_eq!(view, ActiveView::Rankings);
        assert_eq!(selected, Some(1));
    }

    #[test]
    fn clear_returns_profile_to_placeholder() {
        let (output, _, selected) = drive("open 1\nclear\n");
        assert!(selected.is_none());
        assert!(output.trim_end().ends_with(report::PROFILE_PLACEHOLDER));
    }
}
