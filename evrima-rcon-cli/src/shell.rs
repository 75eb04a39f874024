//! Reads RCON commands typed at a terminal, or piped in one per line.

use crate::Command;
use clap::Parser;
use crossterm::tty::IsTty;
use rustyline_async::{Readline, ReadlineError, SharedWriter};
use std::io::{BufRead, Lines, StdinLock, Write};

/// A line entered into the shell.
#[derive(Parser, Debug)]
#[clap(no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, PartialEq)]
pub(crate) enum Line {
    Empty,
    Exit,
    Command(Command),
    /// Usage text or a parse error, including the output of `help`.
    Invalid(String),
}

pub(crate) fn parse_line(line: &str) -> Line {
    match line.trim() {
        "" => Line::Empty,
        "exit" | "quit" => Line::Exit,
        line => match ShellLine::try_parse_from(line.split_whitespace()) {
            Ok(shell_line) => Line::Command(shell_line.command),
            Err(err) => Line::Invalid(err.to_string()),
        },
    }
}

enum Input {
    Terminal(Readline, SharedWriter),
    Piped(Lines<StdinLock<'static>>),
}

pub(crate) struct Shell {
    prompt: String,
    input: Input,
}

impl Shell {
    /// Uses line editing when stdout is a terminal, unless `piped` forces plain stdin lines.
    pub(crate) fn open(prompt: String, piped: bool) -> Self {
        let input = if !piped && std::io::stdout().is_tty() {
            match Readline::new(prompt.clone()) {
                Ok((readline, writer)) => Input::Terminal(readline, writer),
                Err(err) => {
                    log::debug!("Falling back to piped input: {:?}", err);
                    Input::Piped(std::io::stdin().lock().lines())
                }
            }
        } else {
            Input::Piped(std::io::stdin().lock().lines())
        };

        Shell { prompt, input }
    }

    /// Waits for the next valid command. Returns `None` once input ends or `exit` is entered.
    pub(crate) async fn next_command(&mut self) -> Option<Command> {
        loop {
            let line = self.read_line().await?;
            match parse_line(&line) {
                Line::Empty => continue,
                Line::Exit => return None,
                Line::Command(command) => return Some(command),
                Line::Invalid(usage) => self.print(usage.trim_end()),
            }
        }
    }

    async fn read_line(&mut self) -> Option<String> {
        match &mut self.input {
            Input::Terminal(readline, writer) => match readline.readline().await {
                Ok(line) => {
                    readline.add_history_entry(line.clone());
                    let _ = writeln!(writer, "{}{}", self.prompt, line);
                    Some(line)
                }
                Err(ReadlineError::Interrupted) => proc_exit::Code::SIGINT.process_exit(),
                Err(ReadlineError::Eof | ReadlineError::Closed) => None,
                Err(ReadlineError::IO(err)) => {
                    log::error!("Could not read input: {}", err);
                    None
                }
            },
            Input::Piped(lines) => match lines.next()? {
                Ok(line) => Some(line),
                Err(err) => {
                    log::error!("Could not read input: {}", err);
                    None
                }
            },
        }
    }

    pub(crate) fn print(&mut self, text: &str) {
        let _ = match &mut self.input {
            Input::Terminal(_, writer) => writeln!(writer, "{}", text),
            Input::Piped(_) => writeln!(std::io::stdout(), "{}", text),
        };
    }

    pub(crate) fn print_error(&mut self, text: &str) {
        let _ = match &mut self.input {
            Input::Terminal(_, writer) => writeln!(writer, "{}", text),
            Input::Piped(_) => writeln!(std::io::stderr(), "{}", text),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_with_arguments() {
        assert_eq!(
            parse_line("announce Restart in 5"),
            Line::Command(Command::Announce {
                message: vec!["Restart".into(), "in".into(), "5".into()]
            })
        );
        assert_eq!(
            parse_line("  playables Rex Stego "),
            Line::Command(Command::Playables {
                classes: vec!["Rex".into(), "Stego".into()]
            })
        );
        assert_eq!(parse_line("toggle-humans"), Line::Command(Command::ToggleHumans));
    }

    #[test]
    fn blank_and_exit_lines() {
        assert_eq!(parse_line("   "), Line::Empty);
        assert_eq!(parse_line("exit"), Line::Exit);
        assert_eq!(parse_line(" quit "), Line::Exit);
    }

    #[test]
    fn bad_lines_report_usage() {
        assert!(matches!(parse_line("playables"), Line::Invalid(_)));
        assert!(matches!(parse_line("teleport"), Line::Invalid(_)));
        match parse_line("help") {
            Line::Invalid(usage) => assert!(usage.contains("wipe-corpses")),
            other => panic!("unexpected line: {:?}", other),
        }
    }
}
