//! CLI for jarpack.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use jarpack_core::config::{self, JarpackConfig, PackPolicy};
use std::path::PathBuf;

use commands::{run_pipeline, run_resolve};

/// Top-level CLI: download pom/jar pairs for a list of Maven coordinates and
/// pack them into one zip for a Nexus upload.
#[derive(Debug, Parser)]
#[command(name = "jarpack")]
#[command(about = "Fetch Maven artifacts listed in a file and pack them for Nexus", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub overrides: ConfigOverrides,

    /// Defaults to `run`.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

/// Flags that take precedence over the config file.
#[derive(Debug, Default, Args)]
pub struct ConfigOverrides {
    /// Read configuration from FILE instead of ~/.config/jarpack/config.toml.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Coordinate list (one group:artifact:version per line). Deleted after a run.
    #[arg(long, global = true, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Archive to write.
    #[arg(long, global = true, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Transient staging directory.
    #[arg(long, global = true, value_name = "DIR")]
    pub staging_dir: Option<PathBuf>,

    /// Repository endpoint; paths are sent as `?filepath=`.
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Pack whatever was staged even if a download failed.
    #[arg(long, global = true)]
    pub pack_on_failure: bool,
}

impl ConfigOverrides {
    pub fn apply(&self, cfg: &mut JarpackConfig) {
        if let Some(input) = &self.input {
            cfg.input_path = input.clone();
        }
        if let Some(output) = &self.output {
            cfg.output_path = output.clone();
        }
        if let Some(staging_dir) = &self.staging_dir {
            cfg.staging_dir = staging_dir.clone();
        }
        if let Some(base_url) = &self.base_url {
            cfg.base_url = base_url.clone();
        }
        if self.pack_on_failure {
            cfg.pack_policy = PackPolicy::Always;
        }
    }

    fn load_config(&self) -> Result<JarpackConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        self.apply(&mut cfg);
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum CliCommand {
    /// Download, stage and pack every coordinate in the input file.
    Run,

    /// Print the descriptor and artifact URLs for each coordinate. Downloads
    /// nothing and leaves the input file in place.
    Resolve,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = cli.overrides.load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command.unwrap_or(CliCommand::Run) {
            CliCommand::Run => run_pipeline(&cfg)?,
            CliCommand::Resolve => run_resolve(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
