//! Conversions between clock times, frame numbers and the canonical `HH_MM_SS.sss`
//! timestamp used in filenames.

use std::{fmt, str::FromStr};

/// `d` is any ascii digit, everything else must match exactly.
const CLOCK_PATTERN: &[u8] = b"dd:dd:dd.ddd";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a valid clock time: {0:?}")]
pub struct ParseTimeError(String);

#[derive(Debug, thiserror::Error)]
#[error("not a valid frame rate, must be a positive number")]
pub struct FrameRateError;

/// Frames per second. Never auto-detected, the caller has to know it.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct FrameRate(f64);

impl FrameRate {
    pub const DEFAULT: Self = FrameRate(24.0);

    pub fn new(fps: f64) -> Result<Self, FrameRateError> {
        if fps.is_finite() && fps > 0.0 {
            Ok(FrameRate(fps))
        } else {
            Err(FrameRateError)
        }
    }

    pub fn as_f64(self) -> f64 {
        self.0
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for FrameRate {
    type Err = FrameRateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fps: f64 = s.trim().parse().map_err(|_| FrameRateError)?;
        Self::new(fps)
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses `H:M:S` or `H_M_S` into a total amount of seconds. Every component may have
/// decimals, but must be a non-negative number.
pub fn time_to_seconds(text: &str) -> Result<f64, ParseTimeError> {
    let err = || ParseTimeError(text.to_string());

    let normalized = text.replace('_', ":");
    let mut parts = normalized.split(':');
    let (Some(h), Some(m), Some(s), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(err());
    };

    let component = |part: &str| -> Result<f64, ParseTimeError> {
        match part.trim().parse::<f64>() {
            Ok(num) if num.is_finite() && num >= 0.0 => Ok(num),
            _ => Err(err()),
        }
    };

    Ok(component(h)? * 3600.0 + component(m)? * 60.0 + component(s)?)
}

pub fn frame_to_seconds(frame: u64, rate: FrameRate) -> f64 {
    frame as f64 / rate.as_f64()
}

/// Formats seconds as the canonical `HH_MM_SS.sss`. The value is rounded to whole
/// milliseconds before it is split, so `59.9996` carries over into the next minute. The
/// hour field is only padded to two digits, so anything from 100 hours and up gets a
/// wider field.
pub fn format_seconds(seconds: f64) -> String {
    let millis = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = millis / 3_600_000;
    let minutes = millis % 3_600_000 / 60_000;
    let secs = millis % 60_000 / 1000;
    let subsec = millis % 1000;
    format!("{hours:02}_{minutes:02}_{secs:02}.{subsec:03}")
}

/// Whether `text` begins with something shaped like `00:00:00.000`.
pub fn starts_with_clock_time(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() >= CLOCK_PATTERN.len()
        && matches_clock_pattern(&bytes[..CLOCK_PATTERN.len()])
}

/// Whether `text` is exactly something shaped like `00:00:00.000`.
pub fn is_clock_time(text: &str) -> bool {
    text.len() == CLOCK_PATTERN.len() && matches_clock_pattern(text.as_bytes())
}

fn matches_clock_pattern(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .zip(CLOCK_PATTERN)
        .all(|(&b, &p)| match p {
            b'd' => b.is_ascii_digit(),
            p => b == p,
        })
}
