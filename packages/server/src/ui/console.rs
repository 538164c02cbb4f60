//! Operator console on the server's stdin.

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    sync::Arc,
};

use crate::{
    domain::{Desk, format_listing},
    infrastructure::snapshot::write_snapshot,
};

pub const USAGE: &str = "commands: LIST | LIST_CHAT | WRITE | EXIT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Print every flight
    List,
    /// Print the chat participants
    ListChat,
    /// Save the inventory to the output file
    Write,
    /// Stop the server
    Exit,
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "LIST" => Some(Self::List),
            "LIST_CHAT" => Some(Self::ListChat),
            "WRITE" => Some(Self::Write),
            "EXIT" => Some(Self::Exit),
            _ => None,
        }
    }
}

pub struct Console {
    desk: Arc<Desk>,
    output_file: PathBuf,
}

impl Console {
    pub fn new(desk: Arc<Desk>, output_file: PathBuf) -> Self {
        Self { desk, output_file }
    }

    /// Read commands until `EXIT` or end of input
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> io::Result<()> {
        writeln!(output, "{}", USAGE)?;

        for line in input.lines() {
            let line = line?;
            match ConsoleCommand::parse(&line) {
                Some(ConsoleCommand::Exit) => {
                    tracing::info!("EXIT received on console");
                    return Ok(());
                }
                Some(command) => self.execute(command, &mut output)?,
                None if line.trim().is_empty() => {}
                None => writeln!(output, "unknown command '{}', {}", line.trim(), USAGE)?,
            }
        }

        tracing::info!("Console input closed");
        Ok(())
    }

    fn execute<W: Write>(&self, command: ConsoleCommand, output: &mut W) -> io::Result<()> {
        match command {
            ConsoleCommand::List => writeln!(output, "{}", self.listing()),
            ConsoleCommand::ListChat => {
                let users = self.desk.lock().sessions.list_chat_users();
                writeln!(output, "{}", users)
            }
            ConsoleCommand::Write => match write_snapshot(&self.output_file, &self.listing()) {
                Ok(()) => writeln!(output, "wrote {}", self.output_file.display()),
                Err(e) => {
                    tracing::error!("Cannot write {}: {}", self.output_file.display(), e);
                    writeln!(output, "cannot write {}: {}", self.output_file.display(), e)
                }
            },
            ConsoleCommand::Exit => Ok(()),
        }
    }

    fn listing(&self) -> String {
        let state = self.desk.lock();
        format_listing(state.inventory.entries(None))
    }
}
