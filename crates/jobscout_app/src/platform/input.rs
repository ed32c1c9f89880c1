use std::io::BufRead;
use std::thread;

use jobscout_engine::ControllerHandle;
use scout_logging::{scout_debug, scout_info, scout_warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Toggle,
    DismissAlert,
    Quit,
    Help,
}

/// Maps one stdin line to a command; an empty line is the toggle.
pub fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "s" | "start" | "stop" | "t" | "toggle" => Some(Command::Toggle),
        "c" | "close" | "dismiss" => Some(Command::DismissAlert),
        "q" | "quit" | "exit" => Some(Command::Quit),
        "h" | "help" | "?" => Some(Command::Help),
        _ => None,
    }
}

pub fn print_help() {
    println!("Commands:");
    println!("  <enter> or s   start or stop the job search");
    println!("  c              close the alert");
    println!("  q              quit");
    println!("  h              show this help");
}

/// Reads commands on a plain thread; stdin EOF counts as quit.
pub fn spawn_stdin_reader(handle: ControllerHandle) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    scout_warn!("Failed to read stdin: {}", err);
                    break;
                }
            };

            let delivered = match parse_command(&line) {
                Some(Command::Toggle) => handle.toggle(),
                Some(Command::DismissAlert) => handle.dismiss_alert(),
                Some(Command::Quit) => {
                    handle.shutdown();
                    return;
                }
                Some(Command::Help) => {
                    print_help();
                    true
                }
                None => {
                    println!("Unknown command '{}', type h for help", line.trim());
                    true
                }
            };

            if !delivered {
                scout_debug!("Controller gone; stopping stdin reader");
                return;
            }
        }
        scout_info!("Stdin closed; shutting down");
        handle.shutdown();
    });
}
