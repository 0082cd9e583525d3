// ============================================================================
// drapto-core/src/discovery.rs
// ============================================================================
//
// FILE DISCOVERY: Finding Media Files for Processing
//
// This module handles the discovery of media files eligible for processing
// (spec 4.8, WorkerPool's enumeration step). It recursively scans a
// directory, filters by extension allow-list, and optionally shuffles the
// result before dispatch.
//
// KEY COMPONENTS:
// - find_processable_files: Recursive, extension-filtered directory scan
//
// DESIGN NOTES:
// - Recursion follows real directories only (no symlink traversal)
// - Extension matching is case-insensitive
// - Returns a CoreError::NoFilesFound if no matching files are found
//
// AI-ASSISTANT-INFO: File discovery module for finding media files to process

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- External crate imports ----
use rand::seq::SliceRandom;

// ---- Standard library imports ----
use std::path::{Path, PathBuf};

/// Recursively finds media files eligible for processing under `input_dir`.
///
/// `extension_allowlist` entries are matched case-insensitively and without
/// a leading dot (e.g. `"mkv"`). When `shuffle` is true the result order is
/// randomized before being handed to the worker pool, otherwise it is in
/// directory-walk order.
///
/// # Errors
///
/// Returns [`CoreError::NoFilesFound`] if no matching files are found, or
/// propagates any I/O error encountered while walking the tree.
pub fn find_processable_files(
    input_dir: &Path,
    extension_allowlist: &[String],
    shuffle: bool,
) -> CoreResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    walk_dir(input_dir, extension_allowlist, &mut files)?;

    if shuffle {
        files.shuffle(&mut rand::thread_rng());
    } else {
        files.sort();
    }

    if files.is_empty() {
        Err(CoreError::NoFilesFound)
    } else {
        Ok(files)
    }
}

fn walk_dir(dir: &Path, extension_allowlist: &[String], out: &mut Vec<PathBuf>) -> CoreResult<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            walk_dir(&path, extension_allowlist, out)?;
            continue;
        }

        if !file_type.is_file() {
            continue;
        }

        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext_str| {
                extension_allowlist.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext_str))
            });

        if matches {
            out.push(path);
        }
    }
    Ok(())
}
