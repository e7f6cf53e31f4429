//! The whole run: load coordinates, fetch each pom/jar pair into the staging
//! tree, pack the tree, clean up.
//!
//! Strictly sequential. The first failing coordinate stops the run; staging
//! directory and input file are removed on every exit path.

use crate::config::{JarpackConfig, PackPolicy};
use crate::coordinate::{remote_url, Coordinate, DESCRIPTOR_FILE_NAME};
use crate::error::PipelineError;
use crate::fetch::Fetcher;
use crate::input::load_coordinates;
use crate::pack::pack_dir;
use crate::stage::{ensure_subdir, remove_file_if_present, CleanupGuard};
use anyhow::Context;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Everything a run needs, passed in explicitly.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub base_url: String,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub staging_dir: PathBuf,
    pub pack_policy: PackPolicy,
}

impl From<&JarpackConfig> for RunPlan {
    fn from(cfg: &JarpackConfig) -> Self {
        RunPlan {
            base_url: cfg.base_url.clone(),
            input_path: cfg.input_path.clone(),
            output_path: cfg.output_path.clone(),
            staging_dir: cfg.staging_dir.clone(),
            pack_policy: cfg.pack_policy,
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub coordinates: usize,
    pub bytes: u64,
    pub archived_files: usize,
}

/// Human progress lines: `Artifact downloading: <line>...  SUCCESS`.
struct Progress<'a> {
    out: &'a mut dyn Write,
}

impl Progress<'_> {
    fn begin(&mut self, msg: &str) {
        let _ = write!(self.out, "{}...", msg);
        let _ = self.out.flush();
    }

    fn end(&mut self, ok: bool) {
        let _ = writeln!(self.out, "  {}", if ok { "SUCCESS" } else { "FAIL" });
    }

    fn line(&mut self, msg: &str) {
        let _ = writeln!(self.out, "{}", msg);
    }
}

/// Runs the pipeline described by `plan`, writing progress lines to `out`.
///
/// A pre-existing archive at `plan.output_path` is removed first. A missing
/// input file returns [`PipelineError::InputNotFound`] without touching
/// anything else. An input that is not a regular file, or a staging
/// directory that already exists, is rejected before anything is deleted.
pub fn run(
    plan: &RunPlan,
    fetcher: &mut dyn Fetcher,
    out: &mut dyn Write,
) -> Result<RunSummary, PipelineError> {
    let mut progress = Progress { out };

    remove_file_if_present(&plan.output_path)
        .map_err(|e| PipelineError::io(&plan.output_path, e))?;

    match fs::metadata(&plan.input_path) {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => {
            return Err(PipelineError::io(
                &plan.input_path,
                io::Error::new(io::ErrorKind::InvalidInput, "input is not a regular file"),
            ));
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            progress.line("Input file not found");
            return Err(PipelineError::InputNotFound {
                path: plan.input_path.clone(),
            });
        }
        Err(e) => return Err(PipelineError::io(&plan.input_path, e)),
    }

    if fs::symlink_metadata(&plan.staging_dir).is_ok() {
        return Err(PipelineError::io(
            &plan.staging_dir,
            io::Error::new(
                io::ErrorKind::AlreadyExists,
                "staging directory already exists; remove it or pick another staging dir",
            ),
        ));
    }

    let mut guard = CleanupGuard::create(&plan.staging_dir, &plan.input_path)?;
    let result = stage_and_pack(plan, guard.staging_dir(), fetcher, &mut progress);

    for failure in guard.cleanup() {
        tracing::warn!("{:#}", anyhow::Error::from(failure));
        progress.line("Fail to delete temp files");
    }

    match &result {
        Ok(summary) => tracing::info!(
            coordinates = summary.coordinates,
            bytes = summary.bytes,
            "run complete"
        ),
        Err(e) => tracing::error!("run failed: {}", e),
    }
    result
}

fn stage_and_pack(
    plan: &RunPlan,
    staging: &Path,
    fetcher: &mut dyn Fetcher,
    progress: &mut Progress<'_>,
) -> Result<RunSummary, PipelineError> {
    let coordinates = load_coordinates(&plan.input_path)?;

    let mut bytes = 0u64;
    let mut fetch_error = None;
    for coordinate in &coordinates {
        progress.begin(&format!("Artifact downloading: {}", coordinate.raw_line));
        match fetch_coordinate(&plan.base_url, staging, coordinate, fetcher) {
            Ok(n) => {
                progress.end(true);
                bytes += n;
            }
            Err(source) => {
                progress.end(false);
                fetch_error = Some(PipelineError::FetchFailed {
                    line: coordinate.raw_line.clone(),
                    source,
                });
                break;
            }
        }
    }

    let fetch_error = match fetch_error {
        Some(e) if plan.pack_policy == PackPolicy::OnSuccess => return Err(e),
        other => other,
    };

    progress.begin(if fetch_error.is_none() {
        "Artifacts downloaded, packing to zip"
    } else {
        "Packing partially staged artifacts to zip"
    });
    let packed = pack_dir(staging, &plan.output_path);
    progress.end(packed.is_ok());

    let archived_files = match packed {
        Ok(n) => n,
        Err(source) => {
            if let Err(e) = remove_file_if_present(&plan.output_path) {
                tracing::warn!("failed to remove incomplete archive: {}", e);
            }
            let pack_error = PipelineError::PackFailed {
                path: plan.output_path.clone(),
                source,
            };
            return Err(match fetch_error {
                Some(fetch_error) => {
                    tracing::warn!("{:#}", anyhow::Error::from(pack_error));
                    fetch_error
                }
                None => pack_error,
            });
        }
    };

    match fetch_error {
        Some(e) => Err(e),
        None => Ok(RunSummary {
            coordinates: coordinates.len(),
            bytes,
            archived_files,
        }),
    }
}

/// Fetches the pom and jar of one coordinate into `<staging>/<artifact>/`.
fn fetch_coordinate(
    base_url: &str,
    staging: &Path,
    coordinate: &Coordinate,
    fetcher: &mut dyn Fetcher,
) -> anyhow::Result<u64> {
    let paths = coordinate.repo_paths();
    let dir = ensure_subdir(staging, &paths.staging_dir_name)
        .with_context(|| format!("create staging dir for {}", paths.staging_dir_name))?;

    let pom_url = remote_url(base_url, &paths.descriptor)?;
    let mut bytes = fetcher.fetch(&pom_url, &dir.join(DESCRIPTOR_FILE_NAME))?;

    let jar_url = remote_url(base_url, &paths.artifact)?;
    bytes += fetcher.fetch(&jar_url, &dir.join(&paths.jar_file_name))?;

    tracing::debug!(coordinate = %coordinate, bytes, "staged");
    Ok(bytes)
}

/// Remote locations of one coordinate, as printed by `jarpack resolve`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCoordinate {
    pub coordinate: Coordinate,
    pub descriptor_url: String,
    pub artifact_url: String,
}

/// Resolves every coordinate in the input file to its descriptor and
/// artifact URL without downloading or deleting anything.
pub fn resolve_urls(plan: &RunPlan) -> Result<Vec<ResolvedCoordinate>, PipelineError> {
    load_coordinates(&plan.input_path)?
        .into_iter()
        .map(|coordinate| {
            let paths = coordinate.repo_paths();
            let urls = remote_url(&plan.base_url, &paths.descriptor).and_then(|pom| {
                remote_url(&plan.base_url, &paths.artifact).map(|jar| (pom, jar))
            });
            match urls {
                Ok((descriptor_url, artifact_url)) => Ok(ResolvedCoordinate {
                    coordinate,
                    descriptor_url,
                    artifact_url,
                }),
                Err(source) => Err(PipelineError::FetchFailed {
                    line: coordinate.raw_line,
                    source,
                }),
            }
        })
        .collect()
}
