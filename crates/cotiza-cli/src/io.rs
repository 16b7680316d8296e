/// Filesystem helpers shared by all subcommands.
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::CliError;

/// Opens an input file, mapping the common error kinds to CLI errors.
pub fn open_input(path: &Path) -> Result<File, CliError> {
    File::open(path).map_err(|e| classify_io_error(path, &e))
}

/// Creates an output file inside `dir`, creating the directory if needed.
pub fn create_output(dir: &Path, file_name: &str) -> Result<(PathBuf, File), CliError> {
    std::fs::create_dir_all(dir).map_err(|e| classify_io_error(dir, &e))?;
    let path = dir.join(file_name);
    let file = File::create(&path).map_err(|e| classify_io_error(&path, &e))?;
    Ok((path, file))
}

fn classify_io_error(path: &Path, e: &std::io::Error) -> CliError {
    if e.kind() == ErrorKind::NotFound {
        CliError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else if e.kind() == ErrorKind::PermissionDenied {
        CliError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else {
        CliError::IoError {
            path: path.to_path_buf(),
            detail: e.to_string(),
        }
    }
}

/// Derives the supplier identifier from a price-list path: the file's base
/// name without extension.
pub fn supplier_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Builds a `{prefix}_{YYYYMMDD_HHMMSS}.xlsx` file name in local time, so
/// repeated exports never collide and the external housekeeping routine can
/// recognize the current day's artifacts.
pub fn timestamped_name(prefix: &str) -> String {
    format!("{prefix}_{}.xlsx", Local::now().format("%Y%m%d_%H%M%S"))
}
