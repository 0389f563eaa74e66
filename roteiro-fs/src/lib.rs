//! Output-file helpers built on `cap-std` and `camino`.
//!
//! The CLI writes query results either to stdout or to a user-supplied path;
//! these helpers create missing parent directories and write the file
//! through a capability handle on its directory.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io;
use std::path::Component;

/// Write `contents` to `path`, creating parent directories as needed.
///
/// An existing file is truncated.
pub fn write_output_file(path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, file_name) = parent_dir_and_name(path)?;
    dir.write(file_name.as_str(), contents)
}

/// Open the directory containing `path` and return it with the file name.
fn parent_dir_and_name(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("output path should include a file name"))?
        .to_owned();
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Ensure the parent directory for `path` exists, handling absolute paths safely for cap-std.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }

    let (base_dir, relative) = split_ambient_base(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base_dir.create_dir_all(&relative)
}

/// Split a parent path into an ambient base directory and a relative suffix.
fn split_ambient_base(parent: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_parent = parent.as_std_path();

    let (base, relative) = match std_parent.components().next() {
        // Windows drive or UNC prefix.
        Some(Component::Prefix(prefix)) => {
            let prefix_str = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            let base = Utf8PathBuf::from(prefix_str).join(std::path::MAIN_SEPARATOR.to_string());
            let stripped = std_parent
                .strip_prefix(base.as_std_path())
                .or_else(|_| std_parent.strip_prefix(prefix.as_os_str()))
                .map_err(|_| io::Error::other("failed to strip prefix from parent path"))?
                .to_path_buf();
            (base, stripped)
        }
        Some(Component::RootDir) => {
            let base = Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string());
            let stripped = std_parent
                .strip_prefix(base.as_std_path())
                .map_err(|_| io::Error::other("failed to strip root from absolute path"))?
                .to_path_buf();
            (base, stripped)
        }
        _ => (Utf8PathBuf::from("."), std_parent.to_path_buf()),
    };

    let dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    let relative = Utf8PathBuf::from_path_buf(relative)
        .map_err(|_| io::Error::other("non-UTF-8 parent path"))?;
    Ok((dir, relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn workdir() -> (TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
        (dir, root)
    }

    #[rstest]
    fn writes_into_nested_missing_directories(workdir: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = workdir;
        let target = root.join("out/2024/casinos.json");

        write_output_file(&target, b"[]").expect("write");

        let written = std::fs::read_to_string(target.as_std_path()).expect("read back");
        assert_eq!(written, "[]");
    }

    #[rstest]
    fn overwrites_existing_files(workdir: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = workdir;
        let target = root.join("page.json");

        write_output_file(&target, b"{\"records\":[1,2,3]}").expect("first write");
        write_output_file(&target, b"{}").expect("second write");

        let written = std::fs::read_to_string(target.as_std_path()).expect("read back");
        assert_eq!(written, "{}");
    }

    #[rstest]
    fn parentless_paths_need_no_directories() {
        ensure_parent_dir(Utf8Path::new("result.json")).expect("nothing to create");
        ensure_parent_dir(Utf8Path::new("/")).expect("root has no parent");
    }

    #[rstest]
    fn rejects_paths_without_a_file_name(workdir: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = workdir;
        let err = write_output_file(&root.join(".."), b"x").expect_err("no file name");
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }
}
