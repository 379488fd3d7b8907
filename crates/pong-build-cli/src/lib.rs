//! `pong-build` command line.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};
use log::LevelFilter;

use pong_build_core::config::CONFIG_ENV_VAR;
use pong_build_core::{
    known_profiles, Action, DispatchError, Dispatcher, HostPlatform, PlatformDetector, Settings,
    SystemExecutor, DEFAULT_BUILD_TYPE,
};

#[derive(Debug, Parser)]
#[command(name = "pong-build")]
#[command(about = "Build or install pong through conan with the right profile")]
pub struct Cli {
    /// Settings file (JSON); defaults to $PONG_BUILD_CONFIG or ./pong-build.json
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Print the command without running it
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    dry_run: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run `conan build` for the project in the current directory
    Build(TargetArgs),
    /// Run `conan install` for the project in the current directory
    Install(TargetArgs),
    /// List known platforms and their profiles
    Profiles {
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },
}

#[derive(Debug, Args)]
struct TargetArgs {
    /// Target OS (linux, darwin); defaults to the host OS
    os: Option<String>,

    /// Build variant, passed to conan as `-s build_type=<TYPE>`
    #[arg(long, default_value = DEFAULT_BUILD_TYPE)]
    build_type: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Pretty,
    Json,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

/// Set up `env_logger` at the level asked for on the command line.
/// `RUST_LOG` still takes precedence when set.
pub fn init_logging(level: LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    // Ignore a second initialisation (tests).
    let _ = builder.try_init();
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level());
    run_with(cli)
}

pub fn run_with(cli: Cli) -> Result<()> {
    let settings = load_settings(&cli)?;

    match cli.command {
        Command::Build(args) => run_action(Action::Build, args, settings, cli.dry_run),
        Command::Install(args) => run_action(Action::Install, args, settings, cli.dry_run),
        Command::Profiles { format } => run_profiles(&settings, format),
    }
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let env_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let (settings, source) = Settings::discover(cli.config.as_deref(), env_path.as_deref(), &cwd)?;
    match source {
        Some(path) => log::info!("settings loaded from {}", path.display()),
        None => log::debug!("no settings file, using defaults"),
    }
    Ok(settings)
}

fn run_action(action: Action, args: TargetArgs, settings: Settings, dry_run: bool) -> Result<()> {
    let mut dispatcher =
        Dispatcher::new(settings, &HostPlatform, SystemExecutor, io::stdout()).with_dry_run(dry_run);
    dispatcher.dispatch(action, args.os.as_deref(), &args.build_type)?;
    Ok(())
}

fn run_profiles(settings: &Settings, format: Format) -> Result<()> {
    let entries = known_profiles(settings, &HostPlatform.detect());
    match format {
        Format::Pretty => {
            for entry in &entries {
                let marker = if entry.host { " (host)" } else { "" };
                println!("{:<8} {}{}", entry.platform.id(), entry.profile, marker);
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
    }
    Ok(())
}

/// Process exit code for an error returned by [`run`].
///
/// Dispatch errors carry their own code (a failed child's code is passed
/// through); anything else exits with 1.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<DispatchError>()
        .map(DispatchError::exit_code)
        .unwrap_or(pong_build_core::error::EXIT_FAILURE)
}
