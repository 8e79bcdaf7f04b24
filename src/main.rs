use std::process::ExitCode;

use clap::error::ErrorKind;

use reap::commands::{self, Cli, KillTarget};
use reap::journal::{FileJournal, Journal, NullJournal};
use reap::menu;
use reap::platform;
use reap::process::{SignalTerminator, TerminateMode};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Version flag, checked before clap gets involved
    if args.len() == 2 && (args[1] == "--version" || args[1] == "-V") {
        println!("reap {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    // No arguments launches the interactive menu
    if args.len() == 1 {
        return run_menu();
    }

    run_once(&args)
}

fn run_menu() -> ExitCode {
    println!("{}", platform::privilege_notice());

    let journal = NullJournal;
    match menu::run(&journal) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::from(1)
        }
    }
}

fn run_once(args: &[String]) -> ExitCode {
    let cli = match Cli::try_parse_command_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                let _ = err.print();
                return ExitCode::SUCCESS;
            }
            // Missing or malformed arguments: usage plus exit 1
            let _ = err.print();
            return ExitCode::from(1);
        }
    };

    let target = match cli.kill_target() {
        Ok(target) => target,
        Err(err) => {
            eprintln!("{}", err.user_message());
            eprintln!("Usage: reap <name_or_pid> <kill_type>   (kill_type: pid | name)");
            return ExitCode::from(1);
        }
    };

    let journal: Box<dyn Journal> = match &cli.log_file {
        Some(path) => Box::new(FileJournal::new(path)),
        None => Box::new(NullJournal),
    };
    let terminator = SignalTerminator::new(cli.wait_timeout());
    let mode = TerminateMode::from_force_flag(cli.force);

    match target {
        KillTarget::Pid(pid) => commands::kill_by_pid(pid, mode, &terminator, journal.as_ref()),
        KillTarget::Name(name) => {
            commands::kill_by_name(&name, mode, &terminator, journal.as_ref())
        }
    }

    // Runtime process failures were reported above; only user-input errors
    // carry a non-zero exit.
    ExitCode::SUCCESS
}
