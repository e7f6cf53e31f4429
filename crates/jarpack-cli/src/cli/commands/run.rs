//! `jarpack run` – fetch, stage, pack, clean up.

use anyhow::Result;
use jarpack_core::config::JarpackConfig;
use jarpack_core::fetch::CurlFetcher;
use jarpack_core::pipeline::{self, RunPlan};

/// Runs the pipeline with progress on stdout. A missing input file is not an
/// error: the message is printed and the process exits 0.
pub fn run_pipeline(cfg: &JarpackConfig) -> Result<()> {
    let plan = RunPlan::from(cfg);
    let mut fetcher = CurlFetcher::new(cfg.fetch_options())?;
    let mut stdout = std::io::stdout();

    match pipeline::run(&plan, &mut fetcher, &mut stdout) {
        Ok(summary) => {
            tracing::info!(
                coordinates = summary.coordinates,
                files = summary.archived_files,
                "wrote {}",
                plan.output_path.display()
            );
            Ok(())
        }
        Err(err) if err.is_input_not_found() => {
            tracing::info!("{}", err);
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
