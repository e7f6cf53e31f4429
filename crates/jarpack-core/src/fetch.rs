//! Single-stream HTTP GET into a local file.
//!
//! The pipeline talks to the network through [`Fetcher`] so tests can run it
//! against a stub; [`CurlFetcher`] is the libcurl-backed implementation.

use anyhow::{Context, Result};
use std::cell::Cell;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Downloads `url` into `dest`, replacing any existing file. Returns the
/// number of body bytes written.
pub trait Fetcher {
    fn fetch(&mut self, url: &str, dest: &Path) -> Result<u64>;
}

/// Timeouts applied to every request.
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    /// Whole-request limit; a stalled repository otherwise blocks forever.
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            timeout: Duration::from_secs(600),
        }
    }
}

/// One curl easy handle reused for every request of a run, so connections to
/// the repository are kept alive between the pom and jar downloads.
pub struct CurlFetcher {
    easy: curl::easy::Easy,
}

impl CurlFetcher {
    pub fn new(opts: FetchOptions) -> Result<Self> {
        let mut easy = curl::easy::Easy::new();
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(opts.connect_timeout)?;
        easy.timeout(opts.timeout)?;
        Ok(Self { easy })
    }
}

impl CurlFetcher {
    /// Streams the body of a 2xx response into `file`. Bodies of other
    /// responses are read and dropped so an error page never reaches disk.
    fn transfer_into(&mut self, url: &str, file: &mut File) -> Result<u64> {
        let status: Cell<Option<u32>> = Cell::new(None);
        let mut written = 0u64;
        let mut write_err: Option<std::io::Error> = None;

        self.easy.url(url).context("invalid URL")?;
        let performed = {
            let mut transfer = self.easy.transfer();
            // With redirects there is one status line per hop; the last one wins.
            transfer.header_function(|line| {
                if let Some(code) = status_code(line) {
                    status.set(Some(code));
                }
                true
            })?;
            transfer.write_function(|data| {
                if !status.get().is_some_and(is_success) {
                    return Ok(data.len());
                }
                match file.write_all(data) {
                    Ok(()) => {
                        written += data.len() as u64;
                        Ok(data.len())
                    }
                    Err(e) => {
                        write_err = Some(e);
                        Ok(0) // abort transfer
                    }
                }
            })?;
            transfer.perform()
        };

        if let Some(e) = write_err {
            return Err(e).context("write failed");
        }
        performed.with_context(|| format!("GET {} failed", url))?;

        let code = self.easy.response_code().context("no response code")?;
        if !is_success(code) {
            anyhow::bail!("GET {} returned HTTP {}", url, code);
        }
        file.flush().context("flush failed")?;
        Ok(written)
    }
}

impl Fetcher for CurlFetcher {
    fn fetch(&mut self, url: &str, dest: &Path) -> Result<u64> {
        let mut file =
            File::create(dest).with_context(|| format!("failed to create {}", dest.display()))?;

        match self.transfer_into(url, &mut file) {
            Ok(written) => {
                tracing::debug!(url, bytes = written, dest = %dest.display(), "fetched");
                Ok(written)
            }
            Err(e) => {
                drop(file);
                if let Err(rm) = std::fs::remove_file(dest) {
                    tracing::warn!("failed to remove {}: {}", dest.display(), rm);
                }
                Err(e.context(format!("fetch into {}", dest.display())))
            }
        }
    }
}

fn is_success(code: u32) -> bool {
    (200..300).contains(&code)
}

/// Status code of an `HTTP/x.y NNN reason` header line, `None` for other headers.
fn status_code(line: &[u8]) -> Option<u32> {
    let line = std::str::from_utf8(line).ok()?;
    if !line.starts_with("HTTP/") {
        return None;
    }
    line.split_whitespace().nth(1)?.parse().ok()
}
