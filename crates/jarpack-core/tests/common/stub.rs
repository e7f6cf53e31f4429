//! In-memory fetcher for pipeline tests.

use jarpack_core::fetch::Fetcher;
use std::path::Path;

/// Writes `body of <url>` to every destination and records each call.
/// Fails on the first URL containing `fail_on`, if set.
#[derive(Debug, Default)]
pub struct StubFetcher {
    pub calls: Vec<String>,
    pub fail_on: Option<String>,
    /// Files present in the staging tree at the moment of the failure.
    pub staged_at_failure: Vec<String>,
    pub staging_root: Option<std::path::PathBuf>,
}

impl StubFetcher {
    pub fn failing_on(pattern: &str, staging_root: &Path) -> Self {
        StubFetcher {
            fail_on: Some(pattern.to_string()),
            staging_root: Some(staging_root.to_path_buf()),
            ..StubFetcher::default()
        }
    }
}

impl Fetcher for StubFetcher {
    fn fetch(&mut self, url: &str, dest: &Path) -> anyhow::Result<u64> {
        self.calls.push(url.to_string());
        if let Some(pattern) = &self.fail_on {
            if url.contains(pattern.as_str()) {
                if let Some(root) = &self.staging_root {
                    self.staged_at_failure = list_files(root);
                }
                anyhow::bail!("GET {} returned HTTP 404", url);
            }
        }
        let body = format!("body of {}", url);
        std::fs::write(dest, &body)?;
        Ok(body.len() as u64)
    }
}

/// Relative paths (with `/`) of all files under `root`, sorted.
pub fn list_files(root: &Path) -> Vec<String> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else {
                let rel = path.strip_prefix(root).unwrap();
                let parts: Vec<_> = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                out.push(parts.join("/"));
            }
        }
    }
    out.sort();
    out
}
