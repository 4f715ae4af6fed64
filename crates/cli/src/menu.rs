// LedWire - UART LED Control Console
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use std::io::{BufRead, Write};

use anyhow::Result;
use ledwire_core::{Command, Session};

/// Outcome of one line of menu input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Command(Command),
    Quit,
    Invalid,
}

fn parse_choice(line: &str) -> Choice {
    match line.trim() {
        "1" => Choice::Command(Command::On),
        "2" => Choice::Command(Command::Off),
        "3" => Choice::Command(Command::Toggle),
        "4" => Choice::Quit,
        _ => Choice::Invalid,
    }
}

fn print_menu<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "Available commands:")?;
    for (index, cmd) in Command::ALL.iter().enumerate() {
        writeln!(
            out,
            "{}. {} - {}",
            index + 1,
            cmd.wire_token(),
            cmd.describe()
        )?;
    }
    writeln!(out, "4. Quit")?;
    write!(out, "Enter command (1-4): ")?;
    out.flush()?;
    Ok(())
}

/// Drive the interactive loop until Quit or end of input.
///
/// An unrecognized selection reprints the menu without touching the link. A
/// send or read failure on the link is fatal and propagates to the caller.
pub fn run_menu<R: BufRead, W: Write>(input: R, mut out: W, session: &mut Session) -> Result<()> {
    let mut lines = input.lines();
    loop {
        print_menu(&mut out)?;
        let Some(line) = lines.next() else {
            // End of input behaves like Quit.
            writeln!(out)?;
            break;
        };
        match parse_choice(&line?) {
            Choice::Command(command) => {
                let reply = session.send_command(command)?;
                writeln!(out, "Sent: {}", command)?;
                match reply {
                    Some(reply) => writeln!(out, "Received: {}", reply)?,
                    None => writeln!(out, "No response received")?,
                }
            }
            Choice::Quit => {
                writeln!(out, "Exiting...")?;
                break;
            }
            Choice::Invalid => {
                writeln!(out, "Invalid command! Please enter 1-4.")?;
            }
        }
    }
    Ok(())
}
