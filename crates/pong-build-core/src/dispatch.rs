// crates/pong-build-core/src/dispatch.rs
// Top-level build/install operations

use std::io::Write;

use crate::config::Settings;
use crate::error::DispatchError;
use crate::exec::{execute, write_echo, CommandExecutor};
use crate::invocation::{compose_invocation, resolve_build_type_flags, Action, Invocation};
use crate::platform::PlatformDetector;
use crate::profile::resolve_profile;

/// Build variant used when none is requested.
pub const DEFAULT_BUILD_TYPE: &str = "Release";

/// Where an operation stands. Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Preparing,
    Invoking,
    Succeeded,
    Failed,
}

/// Resolves inputs into one package manager invocation and runs it.
///
/// The default platform is taken from the detector once, when the
/// dispatcher is created. Every operation echoes its command line to
/// `echo` before running it.
pub struct Dispatcher<E, W> {
    settings: Settings,
    default_platform: String,
    executor: E,
    echo: W,
    dry_run: bool,
}

impl<E: CommandExecutor, W: Write> Dispatcher<E, W> {
    pub fn new(settings: Settings, detector: &dyn PlatformDetector, executor: E, echo: W) -> Self {
        let default_platform = detector.detect();
        log::debug!("detected platform '{}'", default_platform);
        Dispatcher {
            settings,
            default_platform,
            executor,
            echo,
            dry_run: false,
        }
    }

    /// Echo commands without running them.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn default_platform(&self) -> &str {
        &self.default_platform
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn into_parts(self) -> (E, W) {
        (self.executor, self.echo)
    }

    pub fn build(&mut self, platform: Option<&str>, build_type: &str) -> Result<Invocation, DispatchError> {
        self.dispatch(Action::Build, platform, build_type)
    }

    pub fn install(&mut self, platform: Option<&str>, build_type: &str) -> Result<Invocation, DispatchError> {
        self.dispatch(Action::Install, platform, build_type)
    }

    /// Compose the invocation for `action` without echoing or running it.
    pub fn prepare(
        &self,
        action: Action,
        platform: Option<&str>,
        build_type: &str,
    ) -> Result<Invocation, DispatchError> {
        let platform_id = platform.unwrap_or(self.default_platform.as_str());
        let profile = resolve_profile(platform_id, &self.settings)?;
        let flags = resolve_build_type_flags(build_type);
        Ok(compose_invocation(&self.settings.tool, action, &profile, &flags))
    }

    pub fn dispatch(
        &mut self,
        action: Action,
        platform: Option<&str>,
        build_type: &str,
    ) -> Result<Invocation, DispatchError> {
        log::debug!("{}: {:?}", action, Stage::Preparing);
        let invocation = match self.prepare(action, platform, build_type) {
            Ok(inv) => inv,
            Err(e) => {
                log::debug!("{}: {:?}", action, Stage::Failed);
                return Err(e);
            }
        };

        if self.dry_run {
            write_echo(&mut self.echo, &invocation)?;
            log::info!("dry run, not starting {}", invocation.program());
            return Ok(invocation);
        }

        log::debug!("{}: {:?}", action, Stage::Invoking);
        match execute(&invocation, Some(&mut self.echo), &mut self.executor) {
            Ok(()) => {
                log::debug!("{}: {:?}", action, Stage::Succeeded);
                Ok(invocation)
            }
            Err(e) => {
                log::debug!("{}: {:?}", action, Stage::Failed);
                Err(e)
            }
        }
    }
}
