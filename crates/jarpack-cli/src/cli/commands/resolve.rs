//! `jarpack resolve` – show where each coordinate would be fetched from.

use anyhow::Result;
use jarpack_core::config::JarpackConfig;
use jarpack_core::pipeline::{self, RunPlan};

/// Like `run`, a missing input file prints a message and is not an error.
pub fn run_resolve(cfg: &JarpackConfig) -> Result<()> {
    let resolved = match pipeline::resolve_urls(&RunPlan::from(cfg)) {
        Ok(resolved) => resolved,
        Err(err) if err.is_input_not_found() => {
            println!("Input file not found");
            tracing::info!("{}", err);
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };
    if resolved.is_empty() {
        println!("No coordinates in {}.", cfg.input_path.display());
        return Ok(());
    }
    for r in resolved {
        let paths = r.coordinate.repo_paths();
        println!("{}", r.coordinate.raw_line);
        println!("  {} -> {}/pom.xml", r.descriptor_url, paths.staging_dir_name);
        println!(
            "  {} -> {}/{}",
            r.artifact_url, paths.staging_dir_name, paths.jar_file_name
        );
    }
    Ok(())
}
