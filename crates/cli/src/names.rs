// JSON file I/O for name lists and mapping output.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

#[derive(Debug)]
pub enum NamesError {
    /// File missing or unreadable.
    Read { path: PathBuf, message: String },
    /// Not JSON, or not an array of strings.
    Parse { path: PathBuf, message: String },
    /// Write failure.
    Write { path: PathBuf, message: String },
}

impl fmt::Display for NamesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => write!(f, "cannot read {}: {message}", path.display()),
            Self::Parse { path, message } => {
                write!(f, "{}: expected a JSON array of strings: {message}", path.display())
            }
            Self::Write { path, message } => write!(f, "cannot write {}: {message}", path.display()),
        }
    }
}

impl std::error::Error for NamesError {}

/// Parse a JSON array of strings. Order and duplicates are preserved.
pub fn parse_name_list(data: &str) -> Result<Vec<String>, serde_json::Error> {
    serde_json::from_str(data)
}

pub fn load_name_list(path: &Path) -> Result<Vec<String>, NamesError> {
    let data = std::fs::read_to_string(path).map_err(|e| NamesError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let names = parse_name_list(&data).map_err(|e| NamesError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    log::debug!("loaded {} names from {}", names.len(), path.display());
    Ok(names)
}

/// Pretty JSON with a trailing newline.
pub fn to_json_string<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

/// Write every `(path, contents)` pair in order. If any write fails, files
/// written by this call are removed so no partial output is left behind.
pub fn write_outputs(files: &[(&Path, &str)]) -> Result<(), NamesError> {
    for (done, (path, contents)) in files.iter().enumerate() {
        if let Err(e) = std::fs::write(path, contents) {
            for (written, _) in &files[..done] {
                if let Err(rm) = std::fs::remove_file(written) {
                    log::warn!("cannot remove {}: {rm}", written.display());
                }
            }
            return Err(NamesError::Write {
                path: path.to_path_buf(),
                message: e.to_string(),
            });
        }
        log::debug!("wrote {}", path.display());
    }
    Ok(())
}
