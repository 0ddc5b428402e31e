//! File names derived from sheet names
//!
//! Sheet names may be path-like ("bgm/track1"). A single export only keeps the
//! last segment; a batch export mirrors the segments as directories.

use std::path::{Path, PathBuf};

/// The part of a sheet name after the last `/`, or the whole name
pub fn fix_name(original: &str) -> &str {
    match original.rfind('/') {
        Some(idx) => &original[idx + 1..],
        None => original,
    }
}

/// Default file name for exporting a single sheet
pub fn default_file_name(sheet_name: &str) -> String {
    format!("{}.csv", fix_name(sheet_name))
}

/// Output path for a sheet inside a batch export directory.
///
/// Empty, `.` and `..` segments are dropped so the result stays under `output_dir`.
pub fn sheet_output_path(output_dir: &Path, sheet_name: &str) -> PathBuf {
    let segments: Vec<&str> = sheet_name
        .split('/')
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .collect();

    let mut path = output_dir.to_path_buf();
    match segments.split_last() {
        Some((file, dirs)) => {
            for dir in dirs {
                path.push(dir);
            }
            path.push(format!("{}.csv", file));
        }
        None => path.push("unnamed.csv"),
    }
    path
}
