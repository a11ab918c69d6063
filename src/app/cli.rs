use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, terminal,
};

use crate::manager::worker_manager::WorkerManager;

const HELP: &[&str] = &[
    "run [N]          run N workers (default from --workers)",
    "process <text>   hand <text> to the processing worker",
    "status           show the processing worker status",
    "activate         mark the processing worker active",
    "deactivate       mark the processing worker inactive",
    "lookup <id>      fetch the payload for <id>",
    "cancel           trigger the session cancel token",
    "reset            replace the cancel token with a fresh one",
    "exit             quit",
];

/// What a single command produced.
#[derive(Debug, Default, PartialEq)]
pub struct Outcome {
    pub lines: Vec<String>,
    pub exit: bool,
}

impl Outcome {
    fn line(line: impl Into<String>) -> Self {
        Outcome {
            lines: vec![line.into()],
            exit: false,
        }
    }
}

pub fn handle_command(manager: &WorkerManager, input: &str) -> Outcome {
    let mut args = input.split_whitespace();
    let command = match args.next() {
        Some(command) => command,
        None => return Outcome::default(),
    };

    match command {
        "run" => {
            let count = match args.next() {
                Some(raw) => match raw.parse::<usize>() {
                    Ok(count) => count,
                    Err(_) => return Outcome::line("Invalid worker count."),
                },
                None => manager.config().workers,
            };
            match manager.run(count) {
                Ok(mut lines) => {
                    lines.push(format!("{} of {} workers reported", lines.len(), count));
                    Outcome { lines, exit: false }
                }
                Err(e) => Outcome::line(format!("Error: {}", e)),
            }
        }
        "process" => {
            let text = args.collect::<Vec<_>>().join(" ");
            match manager.process(&text) {
                Ok(()) => Outcome::line(format!("Processed {} bytes", text.len())),
                Err(e) => Outcome::line(format!("Error: {}", e)),
            }
        }
        "status" => Outcome::line(format!("Worker status: {}", manager.status())),
        "activate" => {
            manager.set_active(true);
            Outcome::line("Worker activated")
        }
        "deactivate" => {
            manager.set_active(false);
            Outcome::line("Worker deactivated")
        }
        "lookup" => match manager.lookup(args.next().unwrap_or("")) {
            Ok(data) => Outcome::line(String::from_utf8_lossy(&data).into_owned()),
            Err(e) => Outcome::line(format!("Error: {}", e)),
        },
        "cancel" => {
            manager.cancel();
            Outcome::line("Cancellation signal sent")
        }
        "reset" => {
            manager.reset();
            Outcome::line("Cancellation signal reset")
        }
        "help" => Outcome {
            lines: HELP.iter().map(|line| line.to_string()).collect(),
            exit: false,
        },
        "exit" => Outcome {
            lines: vec!["Exiting the program...".to_string()],
            exit: true,
        },
        other => Outcome::line(format!("Unknown command: {}. Type 'help' for a list.", other)),
    }
}

/// Non-interactive mode: one run, messages to stdout.
pub fn run_once(manager: &WorkerManager, count: usize) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    for line in handle_command(manager, &format!("run {}", count)).lines {
        writeln!(stdout, "{}", line)?;
    }
    Ok(())
}

pub fn run_cli(manager: &WorkerManager) -> io::Result<()> {
    println!("Worker demo started. Enter a command, 'help' for a list or 'exit' to quit.");

    terminal::enable_raw_mode()?;
    let result = prompt_loop(manager);
    terminal::disable_raw_mode()?;
    result
}

fn prompt_loop(manager: &WorkerManager) -> io::Result<()> {
    let mut history: Vec<String> = Vec::new();

    loop {
        let input = match read_line(&history)? {
            Some(input) => input,
            None => break,
        };
        if input.trim().is_empty() {
            continue;
        }
        history.push(input.clone());

        let outcome = handle_command(manager, input.trim());
        for line in &outcome.lines {
            print!("\r{}\r\n", line);
        }
        io::stdout().flush()?;
        if outcome.exit {
            break;
        }
    }
    Ok(())
}

/// Reads one line with up/down history. `None` on Ctrl-C / Ctrl-D.
fn read_line(history: &[String]) -> io::Result<Option<String>> {
    let mut input = String::new();
    let mut index = history.len();
    redraw(&input)?;

    loop {
        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue,
        };

        match key.code {
            KeyCode::Char('c') | KeyCode::Char('d')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                print!("\r\n");
                return Ok(None);
            }
            KeyCode::Enter => {
                print!("\r\n");
                return Ok(Some(input));
            }
            KeyCode::Up => {
                if index > 0 {
                    index -= 1;
                    input = history[index].clone();
                    redraw(&input)?;
                }
            }
            KeyCode::Down => {
                if index < history.len() {
                    index += 1;
                    input = history.get(index).cloned().unwrap_or_default();
                    redraw(&input)?;
                }
            }
            KeyCode::Char(c) => {
                input.push(c);
                print!("{}", c);
                io::stdout().flush()?;
            }
            KeyCode::Backspace => {
                input.pop();
                redraw(&input)?;
            }
            _ => {}
        }
    }
}

fn redraw(input: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(
        stdout,
        cursor::MoveToColumn(0),
        terminal::Clear(terminal::ClearType::CurrentLine)
    )?;
    write!(stdout, ">>> {}", input)?;
    stdout.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn manager() -> WorkerManager {
        let mut config = Config::new("cli");
        config.delay_ms = 1;
        config.workers = 2;
        config.max_workers = 4;
        WorkerManager::new(config)
    }

    #[test]
    fn empty_input_does_nothing() {
        assert_eq!(handle_command(&manager(), "   "), Outcome::default());
    }

    #[test]
    fn run_uses_default_count() {
        let outcome = handle_command(&manager(), "run");
        assert_eq!(outcome.lines.len(), 3);
        assert_eq!(outcome.lines[2], "2 of 2 workers reported");
    }

    #[test]
    fn run_rejects_bad_counts() {
        let manager = manager();
        assert_eq!(handle_command(&manager, "run many").lines, vec!["Invalid worker count."]);
        assert_eq!(
            handle_command(&manager, "run 5").lines,
            vec!["Error: too many workers: 5 > 4"]
        );
    }

    #[test]
    fn deactivate_then_process() {
        let manager = manager();
        handle_command(&manager, "deactivate");
        assert_eq!(handle_command(&manager, "status").lines, vec!["Worker status: inactive"]);
        assert_eq!(
            handle_command(&manager, "process hi").lines,
            vec!["Error: worker 0 is inactive"]
        );
        handle_command(&manager, "activate");
        assert_eq!(handle_command(&manager, "process hi there").lines, vec!["Processed 8 bytes"]);
    }

    #[test]
    fn lookup_reports_payload_or_error() {
        let manager = manager();
        assert_eq!(handle_command(&manager, "lookup abc").lines, vec!["data for abc"]);
        assert_eq!(handle_command(&manager, "lookup").lines, vec!["Error: resource not found"]);
    }

    #[test]
    fn exit_and_unknown() {
        let manager = manager();
        assert!(handle_command(&manager, "exit").exit);
        let outcome = handle_command(&manager, "jump");
        assert!(!outcome.exit);
        assert!(outcome.lines[0].starts_with("Unknown command: jump"));
    }
}
