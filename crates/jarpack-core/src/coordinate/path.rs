//! Repository layout: where a coordinate lives remotely and locally.

use super::Coordinate;
use anyhow::{Context, Result};

/// Local file name of every staged descriptor.
pub const DESCRIPTOR_FILE_NAME: &str = "pom.xml";

const DESCRIPTOR_SUFFIX: &str = ".pom";
const ARTIFACT_SUFFIX: &str = ".jar";

/// Resolved paths for one coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPaths {
    /// `g1/g2/artifact/version/artifact-version`, no suffix.
    pub base: String,
    /// Remote path of the `.pom`.
    pub descriptor: String,
    /// Remote path of the `.jar`.
    pub artifact: String,
    /// Staging subdirectory. Only the artifact name, so two versions of one
    /// artifact share (and overwrite) a directory.
    pub staging_dir_name: String,
    /// Local file name of the staged jar.
    pub jar_file_name: String,
}

impl RepoPaths {
    pub(super) fn for_coordinate(c: &Coordinate) -> Self {
        let mut base = String::new();
        for segment in &c.group_segments {
            base.push_str(segment);
            base.push('/');
        }
        let file_stem = format!("{}-{}", c.artifact, c.version);
        base.push_str(&c.artifact);
        base.push('/');
        base.push_str(&c.version);
        base.push('/');
        base.push_str(&file_stem);

        RepoPaths {
            descriptor: format!("{}{}", base, DESCRIPTOR_SUFFIX),
            artifact: format!("{}{}", base, ARTIFACT_SUFFIX),
            base,
            staging_dir_name: c.artifact.clone(),
            jar_file_name: format!("{}{}", file_stem, ARTIFACT_SUFFIX),
        }
    }
}

/// Builds `<base_url>?filepath=<path>`.
///
/// The base URL must be http or https. The path goes into the query as-is so
/// the slashes stay readable in logs and server access lines.
pub fn remote_url(base_url: &str, path: &str) -> Result<String> {
    let mut url = url::Url::parse(base_url)
        .with_context(|| format!("invalid base URL: {}", base_url))?;
    match url.scheme() {
        "http" | "https" => {}
        other => anyhow::bail!("unsupported URL scheme {:?} in {}", other, base_url),
    }
    url.set_query(Some(&format!("filepath={}", path)));
    Ok(url.into())
}
