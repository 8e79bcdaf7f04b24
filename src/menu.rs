//! Line-mode interactive menu.
//!
//! Eight numbered options; invalid input re-prompts instead of exiting. The
//! choice line is parsed into a tagged command consumed by a single dispatch
//! function.

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Confirm, Input};

use crate::commands;
use crate::journal::Journal;
use crate::process::{SignalTerminator, TerminateMode, Terminator};

/// One menu option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    KillByPid,
    KillByName,
    ListAll,
    MemoryByPid,
    MemoryByName,
    Resources,
    Shutdown,
    Exit,
}

impl MenuCommand {
    /// Parse a menu choice line; `None` means re-prompt.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::KillByPid),
            "2" => Some(Self::KillByName),
            "3" => Some(Self::ListAll),
            "4" => Some(Self::MemoryByPid),
            "5" => Some(Self::MemoryByName),
            "6" => Some(Self::Resources),
            "7" => Some(Self::Shutdown),
            "8" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Run the menu loop until the user exits or a confirmed shutdown was
/// issued.
pub fn run(journal: &dyn Journal) -> Result<()> {
    let terminator = SignalTerminator::default();

    loop {
        print_menu();
        let choice: String = Input::new()
            .with_prompt("Enter your choice (1-8)")
            .interact_text()?;

        let Some(command) = MenuCommand::parse(&choice) else {
            println!(
                "{}",
                "Invalid choice. Please choose a valid option.".yellow()
            );
            continue;
        };

        if !dispatch(command, &terminator, journal)? {
            return Ok(());
        }
    }
}

fn print_menu() {
    println!();
    println!("Choose an option:");
    println!("1. Kill process by PID");
    println!("2. Kill process by name");
    println!("3. List all processes");
    println!("4. Check memory usage by PID");
    println!("5. Check memory usage by name");
    println!("6. View system resources usage");
    println!("7. Shutdown system");
    println!("8. Exit");
}

/// Dispatch one command. Returns `false` when the session should end.
fn dispatch(
    command: MenuCommand,
    terminator: &dyn Terminator,
    journal: &dyn Journal,
) -> Result<bool> {
    match command {
        MenuCommand::KillByPid => {
            let pid: u32 = Input::new().with_prompt("Enter PID to kill").interact_text()?;
            let force = Confirm::new()
                .with_prompt("Force kill?")
                .default(false)
                .interact()?;
            commands::kill_by_pid(
                pid,
                TerminateMode::from_force_flag(force),
                terminator,
                journal,
            );
        }
        MenuCommand::KillByName => {
            let name: String = Input::new()
                .with_prompt("Enter process name to kill")
                .interact_text()?;
            let force = Confirm::new()
                .with_prompt("Force kill?")
                .default(false)
                .interact()?;
            commands::kill_by_name(
                &name,
                TerminateMode::from_force_flag(force),
                terminator,
                journal,
            );
        }
        MenuCommand::ListAll => commands::list_all(journal),
        MenuCommand::MemoryByPid => {
            let pid: u32 = Input::new()
                .with_prompt("Enter PID to check memory usage")
                .interact_text()?;
            commands::memory_by_pid(pid, journal);
        }
        MenuCommand::MemoryByName => {
            let name: String = Input::new()
                .with_prompt("Enter process name to check memory usage")
                .interact_text()?;
            commands::memory_by_name(&name, journal);
        }
        MenuCommand::Resources => commands::report_resources(journal),
        MenuCommand::Shutdown => {
            // Irreversible and externally observable; always confirm.
            let confirmed = Confirm::new()
                .with_prompt("Shut down the system now? This cannot be undone")
                .default(false)
                .interact()?;
            if confirmed {
                commands::shutdown_system(journal);
                println!("Exiting interactive mode.");
                return Ok(false);
            }
            println!("Shutdown cancelled.");
        }
        MenuCommand::Exit => {
            println!("Exiting interactive mode.");
            return Ok(false);
        }
    }

    Ok(true)
}
