/*!
 * Utility functions for folder-export
 */

use std::fs;
use std::io;
use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::notebook::NOTEBOOK_EXTENSION;

/// Read a file as text, replacing invalid UTF-8 sequences with U+FFFD
pub fn read_text_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

/// Whether `path` names a Jupyter notebook
pub fn is_notebook(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == NOTEBOOK_EXTENSION)
}

/// Display `path` relative to `root`, falling back to the full path
pub fn relative_display(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

/// Name of the final path component as display text
pub fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}

/// Format a number with human-readable units
pub fn format_number(num: usize) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}

/// List the immediate children of `dir`, sorted by file name
pub fn list_dir_sorted(dir: &Path) -> io::Result<Vec<DirEntry>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .collect::<Result<Vec<_>, walkdir::Error>>()
        .map_err(io::Error::from)
}

/// Whether an entry is a directory, following symlinks
pub fn is_dir_entry(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir())
}

/// Whether an entry is a directory that the walk should descend into
pub fn is_walkable_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && !entry.path_is_symlink()
}
