//! Subprocess execution
//!
//! Every external tool runs through here so the command line and wall-clock
//! duration are logged the same way for all of them.

use std::io::Write;
use std::process::{Command, Output, Stdio};
use std::time::Instant;

use tracing::{debug, error, info};

use crate::error::{KubeDeployError, KubeDeployResult};

/// Program name and arguments joined for logging
pub fn command_line(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

fn program(cmd: &Command) -> String {
    cmd.get_program().to_string_lossy().into_owned()
}

fn timed<T>(
    cmd: &mut Command,
    run: impl FnOnce(&mut Command) -> KubeDeployResult<T>,
) -> KubeDeployResult<T> {
    let name = program(cmd);
    info!("{}", command_line(cmd));

    let start = Instant::now();
    let result = run(cmd);
    let secs = start.elapsed().as_secs_f64();

    if let Err(err) = &result {
        error!("error running {}: {}", name, err);
    }
    info!("{} took {:.3}s", name, secs);

    result
}

fn check_status(cmd: &Command, status: std::process::ExitStatus) -> KubeDeployResult<()> {
    if status.success() {
        Ok(())
    } else {
        Err(KubeDeployError::CommandFailed {
            command: program(cmd),
            code: status.code(),
        })
    }
}

fn io_error(cmd: &Command, source: std::io::Error) -> KubeDeployError {
    KubeDeployError::CommandIo {
        command: program(cmd),
        source,
    }
}

/// Run with inherited stdio, optionally feeding `stdin`
pub fn run(cmd: &mut Command, stdin: Option<&[u8]>) -> KubeDeployResult<()> {
    cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    let Some(input) = stdin else {
        cmd.stdin(Stdio::null());
        return timed(cmd, |cmd| {
            let status = cmd.status().map_err(|e| io_error(cmd, e))?;
            check_status(cmd, status)
        });
    };

    cmd.stdin(Stdio::piped());
    timed(cmd, |cmd| {
        let mut child = cmd.spawn().map_err(|e| io_error(cmd, e))?;
        if let Some(mut pipe) = child.stdin.take() {
            pipe.write_all(input).map_err(|e| io_error(cmd, e))?;
        }
        let status = child.wait().map_err(|e| io_error(cmd, e))?;
        check_status(cmd, status)
    })
}

/// Run and capture stdout; stderr is captured and logged on failure
pub fn capture(cmd: &mut Command, stdin: Option<&[u8]>) -> KubeDeployResult<Output> {
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    cmd.stdin(if stdin.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });

    timed(cmd, |cmd| {
        let mut child = cmd.spawn().map_err(|e| io_error(cmd, e))?;
        if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
            pipe.write_all(input).map_err(|e| io_error(cmd, e))?;
        }
        let output = child.wait_with_output().map_err(|e| io_error(cmd, e))?;
        if !output.status.success() {
            debug!(
                "{} stderr: {}",
                program(cmd),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(output)
    })
}

/// Like [`capture`] but a non-zero exit is an error
pub fn capture_success(cmd: &mut Command, stdin: Option<&[u8]>) -> KubeDeployResult<Output> {
    let output = capture(cmd, stdin)?;
    check_status(cmd, output.status)?;
    Ok(output)
}
