//! Errors raised while resolving or running a build invocation.

/// Process exit code reported when the platform identifier is not known
/// (`EX_USAGE` from sysexits.h; clap itself exits with 2).
pub const EXIT_UNKNOWN_PLATFORM: i32 = 64;
/// Process exit code reported when the package manager cannot be found.
pub const EXIT_TOOL_NOT_FOUND: i32 = 127;
/// Process exit code for every other failure.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Platform identifier outside the known set; raised before anything is spawned
    UnknownPlatform { id: String },
    /// The external command ran and exited non-zero
    CommandFailed { code: i32, command: String },
    /// The external command could not be located
    ToolNotFound { tool: String, reason: String },
    /// Spawning, waiting on, or echoing the command failed
    Io(String),
    /// Settings file could not be read or parsed
    Config { path: String, msg: String },
}

impl DispatchError {
    /// Exit code the calling process should terminate with.
    ///
    /// A failed child propagates its own code unchanged. A child that
    /// somehow reports failure with code 0 still maps to a non-zero code.
    pub fn exit_code(&self) -> i32 {
        match self {
            DispatchError::UnknownPlatform { .. } => EXIT_UNKNOWN_PLATFORM,
            DispatchError::CommandFailed { code, .. } if *code != 0 => *code,
            DispatchError::ToolNotFound { .. } => EXIT_TOOL_NOT_FOUND,
            DispatchError::CommandFailed { .. }
            | DispatchError::Io(_)
            | DispatchError::Config { .. } => EXIT_FAILURE,
        }
    }
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchError::UnknownPlatform { id } => {
                write!(f, "Unknown OS '{}' (expected one of: linux, darwin)", id)
            }
            DispatchError::CommandFailed { code, command } => {
                write!(f, "command exited with code {}: {}", code, command)
            }
            DispatchError::ToolNotFound { tool, reason } => {
                write!(f, "cannot find '{}': {}", tool, reason)
            }
            DispatchError::Io(msg) => write!(f, "I/O error: {}", msg),
            DispatchError::Config { path, msg } => {
                write!(f, "invalid settings in {}: {}", path, msg)
            }
        }
    }
}

impl std::error::Error for DispatchError {}
