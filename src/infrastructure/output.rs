use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::domain::errors::AppError;

/// `dir/name.ext` -> `dir/name<suffix>.ext`
fn with_suffix(input: &Path, suffix: &str, extension: Option<&str>) -> PathBuf {
    let mut name: OsString = input.file_stem().unwrap_or(input.as_os_str()).to_owned();
    name.push(suffix);
    let extension = extension.map(OsString::from).or_else(|| input.extension().map(OsString::from));
    if let Some(extension) = extension {
        name.push(".");
        name.push(extension);
    }
    input.with_file_name(name)
}

/// Where the amplified copy of `input` is written; never `input` itself.
pub fn amplified_path(input: &Path) -> PathBuf {
    with_suffix(input, "_Amplified", None)
}

pub fn debug_report_path(input: &Path) -> PathBuf {
    with_suffix(input, "_debug", Some("json"))
}

/// Writes `bytes` to a temporary file beside `path` and renames it into place
/// once complete, so a failed run never leaves a truncated output.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| AppError::Io(e.error))?;
    Ok(())
}
