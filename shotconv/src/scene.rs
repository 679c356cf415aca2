//! Renames converted keyframes to `<prefix>_Scene-<n>.jpg`, numbered by the timestamp
//! embedded in their names. This throws the timestamp away, there is no going back.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use keyframe_common::utils::fsutils;
use walkdir::WalkDir;

use crate::{
    error::{ErrContext, Error, ErrorKind, Result},
    keyframes::{EXTENSION, START_MARKER},
    timestamp::{self, ParseTimeError},
};

const PREFIX_CHARS: usize = 5;

/// The seconds embedded after the last marker, or None if there is no marker. This is
/// the same marker a keyframe name is converted at.
pub fn embedded_seconds(name: &str) -> Option<std::result::Result<f64, ParseTimeError>> {
    let (_, encoded) = name.rsplit_once(START_MARKER)?;
    Some(timestamp::time_to_seconds(&encoded.replace(EXTENSION, "")))
}

pub fn scene_name(original: &str, ordinal: usize) -> String {
    let prefix: String = original.chars().take(PREFIX_CHARS).collect();
    format!("{prefix}_Scene-{ordinal}{EXTENSION}")
}

/// Pairs of (old name, new name), in scene order. Names without the marker are left out,
/// as are names whose timestamp can't be parsed. Equal timestamps are ordered by name.
pub fn plan<S: AsRef<str>>(names: &[S]) -> Vec<(String, String)> {
    let mut timed: Vec<(f64, &str)> = names
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter_map(|name| match embedded_seconds(name)? {
            Ok(secs) => Some((secs, name)),
            Err(e) => {
                log::warn!("Not numbering {name:?}: {e}");
                None
            }
        })
        .collect();

    timed.sort_by(|(a_secs, a_name), (b_secs, b_name)| {
        a_secs.total_cmp(b_secs).then_with(|| a_name.cmp(b_name))
    });

    timed
        .into_iter()
        .enumerate()
        .map(|(i, (_, name))| (name.to_string(), scene_name(name, i + 1)))
        .collect()
}

/// Renumbers the keyframes directly inside `dir`. Nothing is renamed if any of the new
/// names is already taken.
pub fn renumber_dir(dir: &Path) -> Result<usize> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).context(|| dir.display())? {
        let entry = entry.context(|| dir.display())?;
        let file_type = entry
            .file_type()
            .context(|| entry.path().display().to_string())?;
        if !file_type.is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => log::debug!("Not numbering non-unicode name: {name:?}"),
        }
    }

    let renames: Vec<(PathBuf, PathBuf)> = plan(&names)
        .into_iter()
        .map(|(old, new)| {
            assert!(fsutils::is_basename(&new), "scene names are plain filenames");
            (dir.join(old), dir.join(new))
        })
        .collect();

    if let Some((_, taken)) = renames.iter().find(|(_, to)| to.exists()) {
        return Err(Error::new(
            dir.display(),
            ErrorKind::Collision(taken.display().to_string()),
        ));
    }

    for (from, to) in &renames {
        log::debug!("Renaming {} to {}", from.display(), to.display());
        fsutils::rename_no_clobber(from, to).map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => Error::new(
                from.display(),
                ErrorKind::Collision(to.display().to_string()),
            ),
            _ => Error::new(from.display(), e),
        })?;
    }

    if !renames.is_empty() {
        log::info!("Numbered {} scenes in {}", renames.len(), dir.display());
    }
    Ok(renames.len())
}

/// Renumbers every directory under `root`, including `root` itself.
pub fn renumber_tree(root: &Path) -> Result<usize> {
    if !root.is_dir() {
        log::debug!("Nothing to renumber, {} is not a directory", root.display());
        return Ok(0);
    }

    let mut dirs = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.context(|| root.display())?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }

    let mut total = 0;
    for dir in dirs {
        total += renumber_dir(&dir)?;
    }
    Ok(total)
}
