//! Maven coordinates and their repository layout.
//!
//! A coordinate line looks like `org.example:artifact:1.0`. The group is
//! split on `.` and becomes the leading directories of the repository path.

mod parse;
mod path;

pub use parse::CoordinateError;
pub use path::{remote_url, RepoPaths, DESCRIPTOR_FILE_NAME};

/// One requested artifact, parsed from a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinate {
    /// Group id split on `.`; never empty, no empty segments.
    pub group_segments: Vec<String>,
    pub artifact: String,
    pub version: String,
    /// The line as it appeared in the input file, for status messages.
    pub raw_line: String,
}

impl Coordinate {
    /// Resolves the repository paths and local names for this coordinate.
    pub fn repo_paths(&self) -> RepoPaths {
        RepoPaths::for_coordinate(self)
    }

    /// Group id in its dotted form.
    pub fn group(&self) -> String {
        self.group_segments.join(".")
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group(), self.artifact, self.version)
    }
}
