use crate::fetch::FetchOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What to do with a partially filled staging tree when a fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackPolicy {
    /// Only write the archive when every coordinate was fetched.
    #[default]
    OnSuccess,
    /// Also pack whatever was staged before the failure.
    Always,
}

/// Global configuration loaded from `~/.config/jarpack/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JarpackConfig {
    /// Repository endpoint; the resolved path is sent as `?filepath=`.
    pub base_url: String,
    /// Coordinate list, one `group:artifact:version` per line. Deleted after each run.
    pub input_path: PathBuf,
    /// Archive to produce.
    pub output_path: PathBuf,
    /// Transient directory the pom/jar pairs are staged in.
    pub staging_dir: PathBuf,
    pub connect_timeout_secs: u64,
    /// Per-request limit in seconds.
    pub timeout_secs: u64,
    pub pack_policy: PackPolicy,
}

impl Default for JarpackConfig {
    fn default() -> Self {
        Self {
            base_url: "https://search.maven.org/remotecontent".to_string(),
            input_path: PathBuf::from("jars.txt"),
            output_path: PathBuf::from("toNexus.zip"),
            staging_dir: PathBuf::from("temp"),
            connect_timeout_secs: 30,
            timeout_secs: 600,
            pack_policy: PackPolicy::OnSuccess,
        }
    }
}

impl JarpackConfig {
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("jarpack")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<JarpackConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = JarpackConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit file. The file must exist.
pub fn load_from(path: &Path) -> Result<JarpackConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: JarpackConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
