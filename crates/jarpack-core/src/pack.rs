//! Zip packing of the staging tree.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Packs everything under `src` into a new zip at `dest`. Entry names are
/// relative to `src` and use `/`. Returns the number of files written.
pub fn pack_dir(src: &Path, dest: &Path) -> Result<usize> {
    if !src.is_dir() {
        anyhow::bail!("{} is not a directory", src.display());
    }
    let file = File::create(dest).with_context(|| format!("create {}", dest.display()))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut files = 0usize;
    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walk {}", src.display()))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .context("walkdir entry outside source tree")?;
        let name = entry_name(rel)?;

        if entry.file_type().is_dir() {
            zip.add_directory(format!("{}/", name), options)?;
        } else if entry.file_type().is_file() {
            zip.start_file(name, options)?;
            let mut f = File::open(entry.path())
                .with_context(|| format!("open {}", entry.path().display()))?;
            std::io::copy(&mut f, &mut zip)
                .with_context(|| format!("compress {}", entry.path().display()))?;
            files += 1;
        }
    }

    let mut out = zip.finish().context("finish zip")?;
    out.flush().with_context(|| format!("write {}", dest.display()))?;
    tracing::info!(dest = %dest.display(), files, "packed staging tree");
    Ok(files)
}

fn entry_name(rel: &Path) -> Result<String> {
    let parts = rel
        .components()
        .map(|c| {
            c.as_os_str()
                .to_str()
                .with_context(|| format!("non UTF-8 path: {}", rel.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join("/"))
}
