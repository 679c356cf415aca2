//! Keyframe images named `<video>_start_<frame or time>.jpg`, copied into a mirrored
//! tree with the frame or time rewritten as a canonical timestamp.

use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use keyframe_common::utils::fsutils;
use walkdir::WalkDir;

use crate::{
    error::{ErrContext, Result},
    timestamp::{self, FrameRate},
};

pub const START_MARKER: &str = "_start_";
pub const EXTENSION: &str = ".jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyframeName<'a> {
    /// `<video>_start_<frames>.jpg`
    FrameEncoded { video: &'a str, frame: u64 },
    /// `<video>_start_<HH:MM:SS.mmm>.jpg`
    TimeEncoded { video: &'a str, time: &'a str },
    Unrecognized,
}

impl<'a> KeyframeName<'a> {
    /// The whole name must match, and the video part is everything up to the last
    /// marker.
    pub fn parse(name: &'a str) -> Self {
        let Some((video, encoded)) = name
            .strip_suffix(EXTENSION)
            .and_then(|stem| stem.rsplit_once(START_MARKER))
        else {
            return Self::Unrecognized;
        };

        if video.is_empty() {
            return Self::Unrecognized;
        }

        if !encoded.is_empty() && encoded.bytes().all(|b| b.is_ascii_digit()) {
            match encoded.parse() {
                Ok(frame) => Self::FrameEncoded { video, frame },
                Err(_) => Self::Unrecognized,
            }
        } else if timestamp::is_clock_time(encoded) {
            Self::TimeEncoded {
                video,
                time: encoded,
            }
        } else {
            Self::Unrecognized
        }
    }
}

/// The name `name` should have after conversion, or None if it stays the same.
pub fn converted_name(name: &str, rate: FrameRate) -> Option<String> {
    match KeyframeName::parse(name) {
        KeyframeName::FrameEncoded { video, frame } => {
            let ts = timestamp::format_seconds(timestamp::frame_to_seconds(frame, rate));
            Some(format!("{video}{START_MARKER}{ts}{EXTENSION}"))
        }
        // NOTE: colons in the video part are replaced as well
        KeyframeName::TimeEncoded { .. } => Some(name.replace(':', "_")),
        KeyframeName::Unrecognized => None,
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KeyframeStats {
    pub copied: usize,
    pub renamed: usize,
}

impl std::ops::AddAssign for KeyframeStats {
    fn add_assign(&mut self, rhs: Self) {
        self.copied += rhs.copied;
        self.renamed += rhs.renamed;
    }
}

/// Copies `file` into `output_dir`, under its converted name if it has one. The
/// original is left alone.
pub fn copy_keyframe(
    file: &Path,
    output_dir: &Path,
    rate: FrameRate,
) -> Result<KeyframeStats> {
    let ctx = || file.display();
    let name = file.file_name().ok_or_else(|| {
        crate::Error::new(
            file.display(),
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a file"),
        )
    })?;

    let new_name: Option<OsString> = match name.to_str() {
        Some(name) => converted_name(name, rate).map(Into::into),
        None => {
            log::debug!("Not valid unicode, keeping the name: {}", file.display());
            None
        }
    };

    fsutils::ensure_dir(output_dir).context(|| output_dir.display())?;
    let renamed = new_name.is_some();
    let target = output_dir.join(new_name.as_deref().unwrap_or(name));
    fs::copy(file, &target).context(ctx)?;

    if renamed {
        log::debug!("Copied {} to {}", file.display(), target.display());
    } else {
        log::debug!("Copied {} unchanged to {}", file.display(), target.display());
    }

    Ok(KeyframeStats {
        copied: 1,
        renamed: usize::from(renamed),
    })
}

/// Copies every file under `input_root` into the same relative place under
/// `output_root`, converting names along the way. Directories are only created when
/// something is copied into them. An existing `output_root` inside `input_root` is not
/// walked.
pub fn mirror_tree(
    input_root: &Path,
    output_root: &Path,
    rate: FrameRate,
) -> Result<KeyframeStats> {
    // NOTE: compared canonically, walkdir yields `./x` for an output root spelled `x`
    let skip = fs::canonicalize(output_root).ok();
    let walker = WalkDir::new(input_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !(entry.file_type().is_dir()
                && skip.is_some()
                && fs::canonicalize(entry.path()).ok() == skip)
        });

    let mut files: Vec<(PathBuf, PathBuf)> = Vec::new();
    for entry in walker {
        let entry = entry.context(|| input_root.display())?;
        if entry.file_type().is_dir() || !entry.path().is_file() {
            continue;
        }
        let parent = entry.path().parent().unwrap_or(input_root);
        let relative = parent
            .strip_prefix(input_root)
            .expect("walkdir only yields paths under its root");
        files.push((entry.path().to_owned(), output_root.join(relative)));
    }

    log::info!(
        "Copying {} keyframes from {} into {}",
        files.len(),
        input_root.display(),
        output_root.display()
    );

    let mut stats = KeyframeStats::default();
    for (file, target_dir) in files {
        stats += copy_keyframe(&file, &target_dir, rate)?;
    }
    Ok(stats)
}
