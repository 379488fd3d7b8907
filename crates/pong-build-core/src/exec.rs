//! Running the composed command.
//!
//! Process spawning sits behind [`CommandExecutor`] so the dispatcher can be
//! driven without launching real processes.

use std::io::Write;
use std::process::{Command, ExitStatus};

use crate::error::DispatchError;
use crate::invocation::Invocation;

/// Runs an argv to completion and reports its exit code.
///
/// Implementations inherit the caller's stdio, environment and working
/// directory, and block until the child exits.
pub trait CommandExecutor {
    fn run(&mut self, argv: &[String]) -> Result<i32, DispatchError>;
}

impl<E: CommandExecutor + ?Sized> CommandExecutor for &mut E {
    fn run(&mut self, argv: &[String]) -> Result<i32, DispatchError> {
        (**self).run(argv)
    }
}

/// Spawns real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl CommandExecutor for SystemExecutor {
    fn run(&mut self, argv: &[String]) -> Result<i32, DispatchError> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| DispatchError::Io("empty command line".to_string()))?;

        let resolved = which::which(program).map_err(|e| DispatchError::ToolNotFound {
            tool: program.clone(),
            reason: e.to_string(),
        })?;
        log::debug!("{} resolved to {}", program, resolved.display());

        let status = Command::new(&resolved)
            .args(args)
            .status()
            .map_err(|e| DispatchError::Io(format!("failed to run {}: {}", program, e)))?;

        Ok(exit_code_of(status))
    }
}

#[cfg(unix)]
fn exit_code_of(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signal)) => 128 + signal,
        (None, None) => 1,
    }
}

#[cfg(not(unix))]
fn exit_code_of(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

/// Echo (optionally) and run an invocation.
///
/// When `echo` is given the space-joined command line is written to it
/// before the child starts. A non-zero exit is returned as
/// [`DispatchError::CommandFailed`].
pub fn execute<E: CommandExecutor + ?Sized>(
    invocation: &Invocation,
    echo: Option<&mut dyn Write>,
    executor: &mut E,
) -> Result<(), DispatchError> {
    if let Some(out) = echo {
        write_echo(out, invocation)?;
    }

    log::info!("running {}", invocation.program());
    let code = executor.run(invocation.tokens())?;
    if code != 0 {
        log::debug!("{} exited with code {}", invocation.program(), code);
        return Err(DispatchError::CommandFailed {
            code,
            command: invocation.command_line(),
        });
    }

    log::info!("{} finished successfully", invocation.program());
    Ok(())
}

pub(crate) fn write_echo(out: &mut dyn Write, invocation: &Invocation) -> Result<(), DispatchError> {
    writeln!(out, "{}", invocation.command_line())
        .and_then(|_| out.flush())
        .map_err(|e| DispatchError::Io(format!("failed to echo command: {}", e)))
}
