use std::process::Command;

use sysinfo::{Pid, ProcessesToUpdate, System};

/// Check if a process is alive by asking the system process table.
pub fn process_alive(pid: u32) -> bool {
    let sys_pid = Pid::from_u32(pid);
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::Some(&[sys_pid]), true);
    system.process(sys_pid).is_some()
}

/// The host shutdown invocation: `shutdown /s /t 1`.
pub fn shutdown_command() -> Command {
    let mut cmd = Command::new("shutdown");
    cmd.args(["/s", "/t", "1"]);
    cmd
}

/// One-line privilege warning shown when the interactive menu starts.
pub fn privilege_notice() -> &'static str {
    "Running on Windows. Ensure you have Administrator privileges to kill certain processes."
}
