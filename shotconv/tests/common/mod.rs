// NOTE: every test will complain about the functions it doesn't use
#![allow(unused)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

/// Returns cargo's tmpdir
pub fn cargo_tmpdir() -> PathBuf {
    PathBuf::from(option_env!("CARGO_TARGET_TMPDIR").expect("no cargo tmpdir???"))
}

/// A fresh directory inside cargo's tmpdir, removed when dropped
pub fn scratch_dir() -> TempDir {
    tempfile::tempdir_in(cargo_tmpdir()).expect("could not create temporary dir")
}

/// Writes `content` to `root/relative`, creating parents as needed
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    let parent = path.parent().expect("has a parent");
    fs::create_dir_all(parent).expect("could not create dirs");
    fs::write(&path, content).expect("could not write file");
    path
}

/// Names of the files directly in `dir`, sorted
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("could not read dir")
        .map(|entry| entry.expect("bad entry"))
        .filter(|entry| entry.file_type().expect("no file type").is_file())
        .map(|entry| entry.file_name().into_string().expect("not unicode"))
        .collect();
    names.sort();
    names
}
