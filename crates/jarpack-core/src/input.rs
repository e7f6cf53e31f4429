//! Input loader: the newline-delimited coordinate file.

use crate::coordinate::Coordinate;
use crate::error::PipelineError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads every coordinate from `path`, in file order.
///
/// Blank lines are skipped. The first malformed line aborts the load; no
/// partial list is returned.
pub fn load_coordinates(path: &Path) -> Result<Vec<Coordinate>, PipelineError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(PipelineError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(PipelineError::io(path, e)),
    };

    let mut coordinates = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| PipelineError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let coordinate =
            Coordinate::parse(&line).map_err(|source| PipelineError::MalformedInput {
                line_number: index + 1,
                line: line.trim().to_string(),
                source,
            })?;
        coordinates.push(coordinate);
    }

    tracing::debug!(
        path = %path.display(),
        count = coordinates.len(),
        "loaded coordinates"
    );
    Ok(coordinates)
}
