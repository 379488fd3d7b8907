//! Build dispatch for the pong project.
//!
//! Turns a platform identifier and a build variant into one invocation of
//! the package manager (`conan` by default) and runs it:
//!
//! ```text
//! conan build . --profile conan/linux/llvm-20 -s build_type=Release --build missing
//! ```
//!
//! Dependency resolution, caching and the native build itself all happen in
//! the package manager; this crate only picks the profile and assembles the
//! command line.

#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]
#![forbid(unsafe_code)]

pub mod config;
mod dispatch;
pub mod error;
pub mod exec;
pub mod invocation;
pub mod platform;
pub mod profile;

pub use config::Settings;
pub use dispatch::{Dispatcher, DEFAULT_BUILD_TYPE};
pub use error::DispatchError;
pub use exec::{execute, CommandExecutor, SystemExecutor};
pub use invocation::{compose_invocation, resolve_build_type_flags, Action, BuildTypeFlags, Invocation};
pub use platform::{FixedPlatform, HostPlatform, Platform, PlatformDetector};
pub use profile::{known_profiles, resolve_profile, ProfileEntry, ProfileRef};
