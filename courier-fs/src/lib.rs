//! Capability-based filesystem helpers shared by the loaders and the CLI.
//!
//! Every helper takes a UTF-8 path and resolves it through `cap-std` with
//! ambient authority, so callers never touch `std::fs` directly.
#![forbid(unsafe_code)]

use std::io;
use std::path::{Component, MAIN_SEPARATOR};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open an existing file for reading.
///
/// # Errors
/// Propagates the I/O error when the file cannot be opened.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Create (or truncate) `path` for writing, creating missing parent
/// directories first.
///
/// # Errors
/// Propagates the I/O error when a directory or the file cannot be created.
pub fn create_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_parent_dir(path)?;
    dir.create(name.as_str())
}

/// Open the directory containing `path` and return it with the file name.
///
/// A bare file name resolves against the current directory.
///
/// # Errors
/// Fails when `path` has no file name or its parent cannot be opened.
pub fn open_parent_dir(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Create every missing directory above `path`.
///
/// # Errors
/// Propagates the I/O error when a directory cannot be created.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() {
        return Ok(());
    }
    ensure_dir(parent)
}

/// Create `dir` and any missing ancestors.
///
/// # Errors
/// Propagates the I/O error when a directory cannot be created.
pub fn ensure_dir(dir: &Utf8Path) -> io::Result<()> {
    let (anchor, relative) = split_anchor(dir)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    anchor.create_dir_all(&relative)
}

/// Whether `path` exists and is a regular file.
///
/// Returns `Ok(false)` for directories and other non-file entries.
///
/// # Errors
/// Fails when the entry cannot be inspected, including when it is missing.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_parent_dir(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Split `path` into an ambient anchor directory (the root, a Windows
/// prefix, or `.`) and the relative remainder beneath it.
fn split_anchor(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_path = path.as_std_path();
    let anchor = match std_path.components().next() {
        Some(Component::Prefix(prefix)) => {
            let prefix = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            Utf8PathBuf::from(format!("{prefix}{MAIN_SEPARATOR}"))
        }
        Some(Component::RootDir) => Utf8PathBuf::from(MAIN_SEPARATOR.to_string()),
        _ => Utf8PathBuf::from("."),
    };
    let relative = if anchor.as_str() == "." {
        path.to_path_buf()
    } else {
        path.strip_prefix(&anchor)
            .map_err(|_| io::Error::other(format!("cannot split {path} below {anchor}")))?
            .to_path_buf()
    };
    let dir = fs_utf8::Dir::open_ambient_dir(&anchor, ambient_authority())?;
    Ok((dir, relative))
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};

    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn scratch() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path");
        (dir, root)
    }

    #[rstest]
    fn created_file_can_be_read_back(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        let path = root.join("nested/deeper/out.json");

        let mut file = create_utf8_file(&path).expect("create file");
        file.write_all(b"{}").expect("write file");
        drop(file);

        let mut contents = String::new();
        open_utf8_file(&path)
            .expect("open file")
            .read_to_string(&mut contents)
            .expect("read file");
        assert_eq!(contents, "{}");
    }

    #[rstest]
    fn file_is_file_distinguishes_directories(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        let file = root.join("nodes.csv");
        create_utf8_file(&file).expect("create file");

        assert!(file_is_file(&file).expect("inspect file"));
        assert!(!file_is_file(&root).expect("inspect directory"));
    }

    #[rstest]
    fn missing_entries_are_errors(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        let err = file_is_file(&root.join("absent.csv")).expect_err("missing file");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    fn ensure_dir_is_idempotent(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        let out = root.join("outputs");
        ensure_dir(&out).expect("first create");
        ensure_dir(&out).expect("second create");
        assert!(out.is_dir());
    }

    #[rstest]
    fn bare_file_names_have_no_parent_to_create() {
        ensure_parent_dir(Utf8Path::new("plan.json")).expect("nothing to create");
    }
}
