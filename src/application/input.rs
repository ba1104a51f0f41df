use crate::application::command::ValidationCommand;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures while reading a validation request from disk.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("error reading file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("error parsing validation request: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse a validation request from its JSON text.
pub fn parse_command(content: &str) -> Result<ValidationCommand, InputError> {
    Ok(serde_json::from_str(content)?)
}

/// Read and parse a validation request file.
pub fn load_command(path: impl AsRef<Path>) -> Result<ValidationCommand, InputError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_command(&content)
}
