//! Shot boundary files: one `start, end` range per line, either as clock times or as
//! frame numbers.

use std::{fs, path::Path};

use keyframe_common::utils::fsutils;

use crate::{
    error::{ErrContext, Result},
    timestamp::{self, format_seconds, FrameRate},
    Options,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {number} is malformed: {reason}")]
pub struct MalformedLine {
    /// 1-based
    pub number: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Endpoint {
    /// Already in seconds
    Clock(f64),
    Frame(u64),
}

impl Endpoint {
    pub fn seconds(self, rate: FrameRate) -> f64 {
        match self {
            Endpoint::Clock(secs) => secs,
            Endpoint::Frame(frame) => timestamp::frame_to_seconds(frame, rate),
        }
    }
}

/// A start and an end. Nothing checks that start <= end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    pub start: Endpoint,
    pub end: Endpoint,
}

impl TimeRange {
    pub fn is_reversed(&self, rate: FrameRate) -> bool {
        self.start.seconds(rate) > self.end.seconds(rate)
    }

    /// The output line, without the newline.
    pub fn to_line(&self, rate: FrameRate) -> String {
        format!(
            "{}, {}",
            format_seconds(self.start.seconds(rate)),
            format_seconds(self.end.seconds(rate))
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LineClass {
    Range(TimeRange),
    /// Started like a range but could not be parsed as one.
    Malformed(String),
    Unrecognized,
}

fn parse_clock(field: &str) -> std::result::Result<Endpoint, String> {
    timestamp::time_to_seconds(field)
        .map(Endpoint::Clock)
        .map_err(|e| e.to_string())
}

fn parse_frame(field: &str) -> std::result::Result<Endpoint, String> {
    field
        .parse()
        .map(Endpoint::Frame)
        .map_err(|_| format!("not a frame number: {field:?}"))
}

/// Decides what a line is by how it begins. Anything after the second comma is ignored.
pub fn classify_line(line: &str) -> LineClass {
    let parse: fn(&str) -> std::result::Result<Endpoint, String> =
        if timestamp::starts_with_clock_time(line) {
            parse_clock
        } else if line.starts_with(|c: char| c.is_ascii_digit()) {
            parse_frame
        } else {
            return LineClass::Unrecognized;
        };

    let mut fields = line.split(',').map(str::trim);
    let (Some(start), Some(end)) = (fields.next(), fields.next()) else {
        return LineClass::Malformed("expected two comma separated fields".to_string());
    };

    match (parse(start), parse(end)) {
        (Ok(start), Ok(end)) => LineClass::Range(TimeRange { start, end }),
        (Err(reason), _) | (_, Err(reason)) => LineClass::Malformed(reason),
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ShotStats {
    pub files: usize,
    pub lines: usize,
    pub unrecognized: usize,
    pub malformed: usize,
}

impl std::ops::AddAssign for ShotStats {
    fn add_assign(&mut self, rhs: Self) {
        self.files += rhs.files;
        self.lines += rhs.lines;
        self.unrecognized += rhs.unrecognized;
        self.malformed += rhs.malformed;
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub lines: Vec<String>,
    pub stats: ShotStats,
}

impl Conversion {
    /// Every converted line, each terminated by a newline.
    pub fn to_output(&self) -> String {
        self.lines.iter().map(|line| format!("{line}\n")).collect()
    }
}

/// Converts the whole content of a shot boundary file.
pub fn convert_content(
    content: &str,
    opts: &Options,
) -> std::result::Result<Conversion, MalformedLine> {
    let mut conv = Conversion::default();

    for (i, line) in content.trim().lines().enumerate() {
        let number = i + 1;
        match classify_line(line) {
            LineClass::Range(range) => {
                if range.is_reversed(opts.frame_rate) {
                    log::warn!("Line {number} ends before it starts: {line:?}");
                }
                conv.lines.push(range.to_line(opts.frame_rate));
                conv.stats.lines += 1;
            }
            LineClass::Malformed(reason) if opts.strict => {
                return Err(MalformedLine { number, reason });
            }
            LineClass::Malformed(reason) => {
                log::warn!("Skipping malformed line {number}: {reason}");
                conv.stats.malformed += 1;
            }
            LineClass::Unrecognized => {
                log::debug!("Skipping unrecognized line {number}: {line:?}");
                conv.stats.unrecognized += 1;
            }
        }
    }

    Ok(conv)
}

/// Converts `file` and writes the result with the same name into `output_dir`, which is
/// created if needed.
pub fn convert_file(file: &Path, output_dir: &Path, opts: &Options) -> Result<ShotStats> {
    let ctx = || file.display();
    let content = fs::read_to_string(file).context(ctx)?;
    let mut conv = convert_content(&content, opts).context(ctx)?;

    let name = file.file_name().ok_or_else(|| {
        crate::Error::new(
            file.display(),
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a file"),
        )
    })?;

    fsutils::ensure_dir(output_dir).context(|| output_dir.display())?;
    let output = output_dir.join(name);
    fs::write(&output, conv.to_output()).context(|| output.display())?;

    log::info!(
        "Converted {} lines from {} into {}",
        conv.stats.lines,
        file.display(),
        output.display()
    );
    conv.stats.files = 1;
    Ok(conv.stats)
}

/// Converts every `.txt` file directly inside `dir`.
pub fn convert_dir(dir: &Path, output_dir: &Path, opts: &Options) -> Result<ShotStats> {
    let files = fsutils::files_with_extension(dir, "txt").context(|| dir.display())?;
    log::info!("Found {} shot boundary files in {}", files.len(), dir.display());

    let mut stats = ShotStats::default();
    for file in files {
        stats += convert_file(&file, output_dir, opts)?;
    }
    Ok(stats)
}
