//! Target platforms and host platform detection.
//!
//! The detected platform is a capability handed to the dispatcher when it
//! is built, so nothing below the entry point reads process state.

use std::fmt;

use crate::error::DispatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    /// macOS; also accepted under Rust's own name `macos`.
    Darwin,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Linux, Platform::Darwin];

    /// Canonical identifier, used as the profile directory name.
    pub fn id(self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Darwin => "darwin",
        }
    }

    /// Matches `id` exactly against the known identifiers.
    pub fn parse(id: &str) -> Result<Platform, DispatchError> {
        match id {
            "linux" => Ok(Platform::Linux),
            "darwin" | "macos" => Ok(Platform::Darwin),
            other => Err(DispatchError::UnknownPlatform {
                id: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Source of the default platform identifier.
pub trait PlatformDetector {
    /// Raw identifier of the platform, lower-cased. Not validated.
    fn detect(&self) -> String;
}

/// Reports the OS this binary was compiled for.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPlatform;

impl PlatformDetector for HostPlatform {
    fn detect(&self) -> String {
        std::env::consts::OS.to_lowercase()
    }
}

/// Always reports the same identifier.
#[derive(Debug, Clone)]
pub struct FixedPlatform(pub String);

impl FixedPlatform {
    pub fn new(id: impl Into<String>) -> Self {
        FixedPlatform(id.into())
    }
}

impl PlatformDetector for FixedPlatform {
    fn detect(&self) -> String {
        self.0.to_lowercase()
    }
}
