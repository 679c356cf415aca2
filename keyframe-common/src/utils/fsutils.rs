use std::{
    ffi::OsStr,
    fs, io,
    path::{Component, Path, PathBuf},
};

/// Checks whether the path is simply a filename, i.e., a normal part of a path.
pub fn is_basename(path: impl AsRef<Path>) -> bool {
    let mut components = path.as_ref().components();
    let Some(Component::Normal(_)) = components.next() else {
        return false;
    };
    components.next().is_none()
}

/// Creates the directory and all of its parents, if they don't already exist.
pub fn ensure_dir(dir: impl AsRef<Path>) -> io::Result<()> {
    let dir = dir.as_ref();
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir)
}

/// Collects all files directly in `dir` whose extension is `ext`, does not walk
/// recursively. The result is sorted to make the processing order stable.
pub fn files_with_extension(
    dir: impl AsRef<Path>,
    ext: impl AsRef<OsStr>,
) -> io::Result<Vec<PathBuf>> {
    let ext = ext.as_ref();
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension() == Some(ext) && entry.file_type()?.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Try to read the file, return None if it doesn't exist
pub fn read_optional_file(path: impl AsRef<Path>) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
        Ok(s) => Ok(Some(s)),
    }
}

/// Renames `from` to `to`, but refuses if something already exists at `to`.
// NOTE: not atomic, there is a window between the check and the rename
pub fn rename_no_clobber(from: impl AsRef<Path>, to: impl AsRef<Path>) -> io::Result<()> {
    let to = to.as_ref();
    match fs::symlink_metadata(to) {
        Ok(_) => Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("refusing to overwrite: {}", to.display()),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => fs::rename(from, to),
        Err(e) => Err(e),
    }
}
