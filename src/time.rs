/*!
 * Millisecond timestamps shared by the SRT and WebVTT codecs.
 *
 * A `Timestamp` is a non-negative offset from the start of the media. The two
 * formats only differ in the millisecond separator (`,` for SRT, `.` for
 * WebVTT) and in WebVTT allowing the hour field to be omitted.
 */

use std::fmt;
use std::ops::{Add, Sub};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SubtitleError};

static SRT_TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+):([0-9]{1,2}):([0-9]{1,2}),([0-9]+)$").unwrap()
});

// Hours are optional in WebVTT ("00:00.933")
static WEBVTT_TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:([0-9]+):)?([0-9]{1,2}):([0-9]{1,2})\.([0-9]+)$").unwrap()
});

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_HOUR: u64 = 3_600_000;

/// Textual rendering style of a timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFormat {
    /// `HH:MM:SS,mmm`
    Srt,
    /// `HH:MM:SS.mmm` (hours optional on input)
    WebVtt,
}

impl TimeFormat {
    /// Character placed between seconds and milliseconds
    pub fn millis_separator(self) -> char {
        match self {
            Self::Srt => ',',
            Self::WebVtt => '.',
        }
    }
}

/// Millisecond-precision, non-negative timestamp
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The start of the media
    pub const ZERO: Timestamp = Timestamp(0);

    /// Create a timestamp from a millisecond count
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Create a timestamp from clock components.
    ///
    /// Components are not range checked; `from_hms(0, 0, 90, 0)` is 90 seconds.
    pub fn from_hms(hours: u64, minutes: u64, seconds: u64, millis: u64) -> Self {
        Self(
            hours
                .saturating_mul(MS_PER_HOUR)
                .saturating_add(minutes.saturating_mul(MS_PER_MINUTE))
                .saturating_add(seconds.saturating_mul(MS_PER_SECOND))
                .saturating_add(millis),
        )
    }

    /// Total milliseconds
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Parse timestamp text in the given style.
    ///
    /// Minutes and seconds must be below 60. The millisecond field is read as a
    /// decimal fraction, so `,5` is 500ms and digits past the third are dropped.
    pub fn parse(text: &str, format: TimeFormat) -> Result<Self> {
        let text = text.trim();
        let regex = match format {
            TimeFormat::Srt => &SRT_TIMESTAMP_REGEX,
            TimeFormat::WebVtt => &WEBVTT_TIMESTAMP_REGEX,
        };
        let invalid = || SubtitleError::InvalidTimestamp(text.to_string());

        let caps = regex.captures(text).ok_or_else(invalid)?;

        let hours: u64 = match caps.get(1) {
            Some(m) => m.as_str().parse().map_err(|_| invalid())?,
            None => 0,
        };
        let minutes: u64 = caps[2].parse().map_err(|_| invalid())?;
        let seconds: u64 = caps[3].parse().map_err(|_| invalid())?;
        let millis = parse_fraction(&caps[4]);

        if minutes >= 60 || seconds >= 60 {
            return Err(invalid());
        }

        hours
            .checked_mul(MS_PER_HOUR)
            .and_then(|ms| ms.checked_add(minutes * MS_PER_MINUTE + seconds * MS_PER_SECOND + millis))
            .map(Self)
            .ok_or_else(invalid)
    }

    /// Render in the given style, always with at least two hour digits
    pub fn format(self, format: TimeFormat) -> String {
        let hours = self.0 / MS_PER_HOUR;
        let minutes = (self.0 % MS_PER_HOUR) / MS_PER_MINUTE;
        let seconds = (self.0 % MS_PER_MINUTE) / MS_PER_SECOND;
        let millis = self.0 % MS_PER_SECOND;

        format!(
            "{:02}:{:02}:{:02}{}{:03}",
            hours,
            minutes,
            seconds,
            format.millis_separator(),
            millis
        )
    }

    /// Subtract, returning `None` when the result would be negative
    pub fn checked_sub(self, other: Timestamp) -> Option<Timestamp> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Move by a signed millisecond offset, clamping at zero
    pub fn shifted(self, delta_ms: i64) -> Self {
        if delta_ms >= 0 {
            Self(self.0.saturating_add(delta_ms.unsigned_abs()))
        } else {
            Self(self.0.saturating_sub(delta_ms.unsigned_abs()))
        }
    }
}

/// Read up to three fraction digits as milliseconds, truncating the rest
fn parse_fraction(digits: &str) -> u64 {
    digits
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(3)
        .fold(0, |acc, b| acc * 10 + u64::from(b - b'0'))
}

impl Add for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Timestamp) -> Timestamp {
        Timestamp(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Timestamp {
    type Output = Timestamp;

    /// Saturates at zero; use `checked_sub` to detect underflow
    fn sub(self, rhs: Timestamp) -> Timestamp {
        Timestamp(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.format(TimeFormat::WebVtt))
    }
}
