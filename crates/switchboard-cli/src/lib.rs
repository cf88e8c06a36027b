//! # switchboard-cli
//!
//! Override tooling for Switchboard flags. `main.rs` only parses arguments
//! and maps errors to exit codes; everything else lives here so it can be
//! driven from tests with an in-memory registry.

pub mod commands;
pub mod output;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use switchboard_core::config::{AppFlavor, BuildConfiguration, SwitchboardConfig, BUILD_ENV_VAR};
use switchboard_core::flags::{FeatureFlag, FlagRegistry};

#[derive(Debug, Parser)]
#[command(name = "switchboard")]
#[command(about = "Inspect and override feature flags", long_about = None)]
pub struct Cli {
    /// Project root holding switchboard.toml and the override store
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Explicit config file (defaults to <root>/switchboard.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Build configuration to evaluate default rules against
    #[arg(long, value_name = "CHANNEL")]
    pub build: Option<BuildConfiguration>,

    /// App flavor to evaluate default rules against
    #[arg(long, value_name = "FLAVOR")]
    pub app: Option<AppFlavor>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every flag with its effective value
    List {
        /// Only flags with a local override
        #[arg(long, action = ArgAction::SetTrue)]
        overridden: bool,
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
    },
    /// Show one flag and where its value comes from
    Get {
        flag: FeatureFlag,
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
    },
    /// Set a local override (rejected for pinned flags)
    Set {
        flag: FeatureFlag,
        #[arg(action = ArgAction::Set, value_parser = clap::builder::BoolishValueParser::new())]
        value: bool,
    },
    /// Remove a local override
    Clear { flag: FeatureFlag },
    /// Remove every local override
    Reset,
    /// Print the remote key of every flag that has one
    RemoteKeys,
    /// Match a remote payload file against the catalog and show the result
    RemotePreview {
        payload: PathBuf,
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
    },
    /// Delete stored overrides for unknown or pinned flags
    Prune,
}

/// Load config, open the registry and run the selected command.
pub fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let root = match cli.root.clone() {
        Some(root) => root,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };

    let env_build = std::env::var(BUILD_ENV_VAR).ok();
    let config = load_config(&cli, &root, env_build.as_deref())?;

    switchboard_core::tracing::init_tracing(&config.logging);
    let context = config.build_context();
    tracing::debug!(
        build = %context.configuration,
        app = context.app.as_str(),
        stats_revamp_v2 = context.stats_revamp_v2,
        "Resolved build context"
    );

    let registry = FlagRegistry::from_config(&config, &root)?;
    commands::execute(&registry, &cli.command, out)
}

/// Config for this invocation. `--build` wins over `env_build`
/// (the `SWITCHBOARD_BUILD` value), which is not parsed when `--build` is given.
pub fn load_config(
    cli: &Cli,
    root: &Path,
    env_build: Option<&str>,
) -> anyhow::Result<SwitchboardConfig> {
    let mut config = SwitchboardConfig::load_file(root, cli.config.as_deref())
        .context("failed to load switchboard config")?;
    match cli.build {
        Some(build) => config.build.configuration = Some(build),
        None => config
            .apply_build_override(env_build)
            .with_context(|| format!("invalid {BUILD_ENV_VAR}"))?,
    }
    if let Some(app) = cli.app {
        config.build.app = Some(app);
    }
    Ok(config)
}
