//! Decides what to convert given a path, and where the results go.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::{
    error::Result,
    keyframes::{self, KeyframeStats},
    sanitize, scene,
    shots::{self, ShotStats},
    Options,
};

pub const CONVERTED_SUFFIX: &str = "_converted";
pub const SHOTS_DIR: &str = "shot_boundaries";
pub const KEYFRAMES_DIR: &str = "keyframes";
pub const KEYFRAMES_OUTPUT_DIR: &str = "keyframes_converted";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Shots,
    Keyframes,
    Both,
}

impl Mode {
    /// Shots win if both flags are set, and neither means both.
    pub fn from_flags(shots: bool, keyframes: bool) -> Self {
        match (shots, keyframes) {
            (true, _) => Mode::Shots,
            (false, true) => Mode::Keyframes,
            (false, false) => Mode::Both,
        }
    }

    pub fn shots(self) -> bool {
        matches!(self, Mode::Shots | Mode::Both)
    }

    pub fn keyframes(self) -> bool {
        matches!(self, Mode::Keyframes | Mode::Both)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub shots: ShotStats,
    pub keyframes: KeyframeStats,
    pub sanitized: usize,
    pub scenes: usize,
    pub invalid_paths: usize,
}

impl std::ops::AddAssign for Summary {
    fn add_assign(&mut self, rhs: Self) {
        self.shots += rhs.shots;
        self.keyframes += rhs.keyframes;
        self.sanitized += rhs.sanitized;
        self.scenes += rhs.scenes;
        self.invalid_paths += rhs.invalid_paths;
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} shot files ({} lines, {} unrecognized, {} malformed), \
             {} keyframes copied ({} renamed), {} sanitized, {} scenes numbered",
            self.shots.files,
            self.shots.lines,
            self.shots.unrecognized,
            self.shots.malformed,
            self.keyframes.copied,
            self.keyframes.renamed,
            self.sanitized,
            self.scenes,
        )?;
        if self.invalid_paths > 0 {
            write!(f, ", {} invalid paths", self.invalid_paths)?;
        }
        Ok(())
    }
}

/// What `process_input` did, and where keyframes ended up if any were processed.
#[derive(Debug, Default)]
pub struct Processed {
    pub summary: Summary,
    pub keyframes_output: Option<PathBuf>,
}

/// `dir` with the suffix appended to its last component. Trailing slashes are ignored.
pub fn converted_dir(dir: &Path) -> PathBuf {
    let mut name = dir.components().collect::<PathBuf>().into_os_string();
    name.push(CONVERTED_SUFFIX);
    name.into()
}

/// Where the output of a single file goes: next to its parent directory.
pub fn file_output_dir(file: &Path) -> PathBuf {
    converted_dir(file.parent().unwrap_or(Path::new("")))
}

/// Where a keyframe tree goes: `keyframes_converted` next to it.
pub fn keyframes_output_dir(dir: &Path) -> PathBuf {
    let dir: PathBuf = dir.components().collect();
    dir.parent()
        .unwrap_or(Path::new(""))
        .join(KEYFRAMES_OUTPUT_DIR)
}

/// Converts a single file or a directory. A file is only ever treated as a keyframe if
/// the mode is exactly `Keyframes`. A path that is neither is logged and counted, but
/// is not an error.
pub fn process_input(path: &Path, mode: Mode, opts: &Options) -> Result<Processed> {
    let mut processed = Processed::default();

    if path.is_file() {
        let output_dir = file_output_dir(path);
        if mode.shots() {
            processed.summary.shots += shots::convert_file(path, &output_dir, opts)?;
        } else {
            processed.summary.keyframes +=
                keyframes::copy_keyframe(path, &output_dir, opts.frame_rate)?;
            processed.keyframes_output = Some(output_dir);
        }
    } else if path.is_dir() {
        if mode.shots() {
            let output_dir = converted_dir(path);
            processed.summary.shots += shots::convert_dir(path, &output_dir, opts)?;
        }
        if mode.keyframes() {
            let output_dir = keyframes_output_dir(path);
            processed.summary.keyframes +=
                keyframes::mirror_tree(path, &output_dir, opts.frame_rate)?;
            processed.keyframes_output = Some(output_dir);
        }
    } else {
        log::error!("{} is not a valid file or directory", path.display());
        processed.summary.invalid_paths += 1;
    }

    Ok(processed)
}

/// The passes that run over converted keyframes: slash sanitization and, optionally,
/// scene renumbering.
pub fn finish_keyframes(output: &Path, rename: bool) -> Result<Summary> {
    let mut summary = Summary {
        sanitized: sanitize::sanitize_tree(output)?,
        ..Summary::default()
    };
    if rename {
        summary.scenes = scene::renumber_tree(output)?;
    }
    Ok(summary)
}

/// Processes `shot_boundaries/` and `keyframes/` inside `root`.
pub fn process_layout(root: &Path, rename: bool, opts: &Options) -> Result<Summary> {
    let shots = process_input(&root.join(SHOTS_DIR), Mode::Shots, opts)?;
    let frames = process_input(&root.join(KEYFRAMES_DIR), Mode::Keyframes, opts)?;

    let mut summary = shots.summary;
    summary += frames.summary;

    let output = frames
        .keyframes_output
        .unwrap_or_else(|| root.join(KEYFRAMES_OUTPUT_DIR));
    summary += finish_keyframes(&output, rename)?;
    Ok(summary)
}

/// Like `process_layout`, but complains if `folder` isn't a directory.
pub fn process_folder(folder: &Path, rename: bool, opts: &Options) -> Result<Summary> {
    if !folder.is_dir() {
        log::error!("{} is not a valid directory", folder.display());
        return Ok(Summary {
            invalid_paths: 1,
            ..Summary::default()
        });
    }
    process_layout(folder, rename, opts)
}

/// Converts `path` in `mode`, then finishes whatever keyframes it produced.
pub fn process_path(
    path: &Path,
    mode: Mode,
    rename: bool,
    opts: &Options,
) -> Result<Summary> {
    let processed = process_input(path, mode, opts)?;
    let mut summary = processed.summary;
    if let Some(output) = processed.keyframes_output {
        summary += finish_keyframes(&output, rename)?;
    }
    Ok(summary)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn modes() {
        assert_eq!(Mode::Both, Mode::from_flags(false, false));
        assert_eq!(Mode::Shots, Mode::from_flags(true, false));
        assert_eq!(Mode::Shots, Mode::from_flags(true, true));
        assert_eq!(Mode::Keyframes, Mode::from_flags(false, true));
        assert!(Mode::Both.shots() && Mode::Both.keyframes());
        assert!(!Mode::Shots.keyframes());
        assert!(!Mode::Keyframes.shots());
    }

    #[test]
    fn output_dirs() {
        assert_eq!(
            PathBuf::from("data/shots_converted"),
            converted_dir(Path::new("data/shots"))
        );
        assert_eq!(
            PathBuf::from("data/shots_converted"),
            converted_dir(Path::new("data/shots/"))
        );
        assert_eq!(
            PathBuf::from("data/shots_converted"),
            file_output_dir(Path::new("data/shots/L01.txt"))
        );
        assert_eq!(
            PathBuf::from("_converted"),
            file_output_dir(Path::new("L01.txt"))
        );
        assert_eq!(
            PathBuf::from("data/keyframes_converted"),
            keyframes_output_dir(Path::new("data/keyframes/"))
        );
        assert_eq!(
            PathBuf::from("keyframes_converted"),
            keyframes_output_dir(Path::new("keyframes"))
        );
    }

    #[test]
    fn summary_display() {
        let summary = Summary {
            invalid_paths: 2,
            ..Summary::default()
        };
        assert!(summary.to_string().ends_with(", 2 invalid paths"));
        assert!(!Summary::default().to_string().contains("invalid"));
    }
}
