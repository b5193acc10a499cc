//! Runs the `timeslot-solver` binary on the requests in `tests/requests/`.
#![allow(
    dead_code,
    reason = "is used in integration tests but unable to find a way to silence these warnings"
)]

use std::io::Read;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;
use std::time::Duration;

use wait_timeout::ChildExt;

const TEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug)]
pub(crate) struct SolverOutput {
    pub(crate) status: ExitStatus,
    pub(crate) stdout: String,
    pub(crate) stderr: String,
}

impl SolverOutput {
    /// Parses standard output as the JSON schedule.
    pub(crate) fn schedule(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).expect("solver output should be JSON")
    }
}

pub(crate) fn request_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("requests")
        .join(format!("{name}.json"))
}

/// Runs the solver on the request `name` with the given extra arguments.
pub(crate) fn run_solver(name: &str, args: &[&str]) -> SolverOutput {
    let mut command = solver_command();
    let _ = command.arg(request_path(name)).args(args).stdin(Stdio::null());
    wait_for(command, None)
}

/// Runs the solver on `input` given on standard input.
pub(crate) fn run_solver_on_stdin(input: &str, args: &[&str]) -> SolverOutput {
    let mut command = solver_command();
    let _ = command.args(args).stdin(Stdio::piped());
    wait_for(command, Some(input))
}

fn solver_command() -> Command {
    let solver = PathBuf::from(env!("CARGO_BIN_EXE_timeslot-solver"));
    let mut command = Command::new(solver);
    let _ = command.stdout(Stdio::piped()).stderr(Stdio::piped());
    command
}

fn wait_for(mut command: Command, input: Option<&str>) -> SolverOutput {
    let mut child = command.spawn().expect("Failed to run solver.");

    if let Some(input) = input {
        let mut stdin = child.stdin.take().expect("stdin is piped");
        stdin
            .write_all(input.as_bytes())
            .expect("Failed to write the request.");
    }

    let status = match child.wait_timeout(TEST_TIMEOUT) {
        Ok(None) => {
            let _ = child.kill();
            panic!("solver took more than {} seconds", TEST_TIMEOUT.as_secs())
        }
        Ok(Some(status)) => status,
        Err(e) => panic!("error starting solver: {e}"),
    };

    let mut stdout = String::new();
    let _ = child
        .stdout
        .take()
        .expect("stdout is piped")
        .read_to_string(&mut stdout)
        .expect("Failed to read stdout.");
    let mut stderr = String::new();
    let _ = child
        .stderr
        .take()
        .expect("stderr is piped")
        .read_to_string(&mut stderr)
        .expect("Failed to read stderr.");

    SolverOutput {
        status,
        stdout,
        stderr,
    }
}
