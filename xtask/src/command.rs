use std::{
    fs,
    path::Path,
    process::{Command, ExitStatus},
};

use crate::{cargo_command::CargoCommand, TestRunError};

const TARGET: &str = "xtask::command";

#[derive(Debug, Clone)]
pub struct RunResult {
    pub exit_status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

pub fn run_command(command: &CargoCommand) -> anyhow::Result<RunResult> {
    log::info!(target: TARGET, "👟 {command}");
    log::debug!(target: TARGET, "{}", command.as_cmd_string());

    let output = Command::new(command.executable())
        .current_dir(command.chdir())
        .args(command.args())
        .output()?;

    let result = RunResult {
        exit_status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    log::trace!(target: TARGET, "Result: {result:?}");

    Ok(result)
}

/// Check if `run` was successful.
/// returns Ok in case the run went as expected,
/// Err otherwise
pub fn run_successful(
    run: &RunResult,
    expected_output_file: &Path,
    overwrite: bool,
) -> Result<(), TestRunError> {
    if !run.exit_status.success() {
        return Err(TestRunError::CommandError(run.clone()));
    }

    let file = expected_output_file.display().to_string();

    let expected_output = match fs::read_to_string(expected_output_file) {
        Ok(expected) => Some(expected),
        Err(_) if overwrite => None,
        Err(_) => return Err(TestRunError::FileError { file }),
    };

    if expected_output.as_deref() == Some(run.stdout.as_str()) {
        return Ok(());
    }

    if overwrite {
        log::info!(target: TARGET, "Flag --overwrite-expected enabled, writing {file}");
        return fs::write(expected_output_file, &run.stdout)
            .map_err(|_| TestRunError::FileError { file });
    }

    Err(TestRunError::FileCmpError {
        expected: expected_output.unwrap_or_default(),
        got: run.stdout.clone(),
    })
}
