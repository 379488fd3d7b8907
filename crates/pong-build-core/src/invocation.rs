//! Assembly of the package manager command line.
//!
//! The token order is fixed:
//!
//! ```text
//! <tool> <action> . --profile <profile> -s build_type=<variant> --build missing
//! ```
//!
//! Every flag is immediately followed by its value.

use std::fmt;

use crate::profile::ProfileRef;

/// Package manager subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Build,
    Install,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Build => "build",
            Action::Install => "install",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `-s build_type=<variant>` setting pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTypeFlags {
    pub flag: &'static str,
    pub value: String,
}

/// Build the settings pair for a build variant.
///
/// The variant is not validated: empty strings and strings with spaces are
/// passed through unchanged.
pub fn resolve_build_type_flags(build_type: &str) -> BuildTypeFlags {
    BuildTypeFlags {
        flag: "-s",
        value: format!("build_type={}", build_type),
    }
}

/// An argv ready to be spawned. Immutable once composed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    tokens: Vec<String>,
}

impl Invocation {
    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Tokens joined by single spaces, the form echoed before running.
    pub fn command_line(&self) -> String {
        self.tokens.join(" ")
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

pub fn compose_invocation(
    tool: &str,
    action: Action,
    profile: &ProfileRef,
    build_type: &BuildTypeFlags,
) -> Invocation {
    let tokens = vec![
        tool.to_string(),
        action.as_str().to_string(),
        ".".to_string(),
        "--profile".to_string(),
        profile.as_str().to_string(),
        build_type.flag.to_string(),
        build_type.value.clone(),
        "--build".to_string(),
        "missing".to_string(),
    ];
    Invocation { tokens }
}
