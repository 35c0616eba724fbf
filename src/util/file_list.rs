//! Expansion of directory arguments for recursive mode.
//!
//! Directories are walked with [`walkdir`] without following symlinks: a
//! symlink found inside a directory is neither descended into nor returned.
//! Non-directory arguments are kept as given, whatever their name.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Flattens `inputs` into a list of files.
///
/// Files found while walking a directory are kept only if their name ends
/// with `suffix` (when one is given); files named directly are always kept.
pub fn create_file_list(inputs: &[&Path], suffix: Option<&str>) -> io::Result<Vec<PathBuf>> {
    let mut result = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            result.push(input.to_path_buf());
            continue;
        }
        for entry in WalkDir::new(input).sort_by_file_name() {
            let entry = entry.map_err(walk_error)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let wanted = match suffix {
                Some(sfx) => entry.file_name().to_string_lossy().ends_with(sfx),
                None => true,
            };
            if wanted {
                result.push(entry.into_path());
            }
        }
    }
    Ok(result)
}

fn walk_error(e: walkdir::Error) -> io::Error {
    let msg = e.to_string();
    match e.into_io_error() {
        Some(io) => io::Error::new(io.kind(), msg),
        None => io::Error::other(msg),
    }
}
