//! Input loader for candidate lists

use crate::proxy::models::Candidate;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Reasons the candidate list could not be used
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("input file '{}' not found", .0.display())]
    NotFound(PathBuf),

    /// Not a failure as such: there is simply nothing to check
    #[error("input file '{}' is empty, nothing to check", .0.display())]
    Empty(PathBuf),

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LoadError {
    /// Whether this is advisory rather than an error
    pub fn is_warning(&self) -> bool {
        matches!(self, LoadError::Empty(_))
    }
}

/// Parser for newline-delimited candidate lists
pub struct ProxyParser;

impl ProxyParser {
    /// Trim every line and drop the blank ones, keeping file order
    pub fn parse_string(content: &str) -> Vec<Candidate> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(Candidate::new)
            .collect()
    }

    /// Load candidates from a file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Vec<Candidate>, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
            _ => LoadError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let candidates = Self::parse_string(&content);
        if candidates.is_empty() {
            return Err(LoadError::Empty(path.to_path_buf()));
        }

        Ok(candidates)
    }
}
