//! Parsing of `group:artifact:version` lines.

use super::Coordinate;
use std::str::FromStr;
use thiserror::Error;

/// Why a line is not a valid coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateError {
    #[error("expected group:artifact:version, found {found} field(s)")]
    FieldCount { found: usize },
    #[error("group contains an empty segment")]
    EmptyGroupSegment,
    #[error("artifact name is empty")]
    EmptyArtifact,
    #[error("version is empty")]
    EmptyVersion,
}

impl Coordinate {
    /// Parses one input line. Surrounding whitespace (including a `\r` left
    /// over from CRLF files) is ignored; the raw line is kept as trimmed.
    pub fn parse(line: &str) -> Result<Self, CoordinateError> {
        let line = line.trim();
        let fields: Vec<&str> = line.split(':').collect();
        let [group, artifact, version] = fields[..] else {
            return Err(CoordinateError::FieldCount {
                found: fields.len(),
            });
        };

        let group_segments: Vec<String> = group.split('.').map(str::to_string).collect();
        if group_segments.iter().any(|s| s.is_empty()) {
            return Err(CoordinateError::EmptyGroupSegment);
        }
        if artifact.is_empty() {
            return Err(CoordinateError::EmptyArtifact);
        }
        if version.is_empty() {
            return Err(CoordinateError::EmptyVersion);
        }

        Ok(Coordinate {
            group_segments,
            artifact: artifact.to_string(),
            version: version.to_string(),
            raw_line: line.to_string(),
        })
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Coordinate::parse(s)
    }
}
