use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Codec configuration module
/// Parse tolerance, writer output choices and the log level an embedding
/// application should install. Every field has a default, so `{}` is a
/// valid configuration document.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// Parser behaviour
    #[serde(default)]
    pub parse: ParseConfig,

    /// Writer behaviour
    #[serde(default)]
    pub write: WriteConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Parser tolerance settings
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ParseConfig {
    /// Fail on malformed blocks and unknown region references instead of
    /// skipping them with a warning
    #[serde(default)]
    pub strict: bool,
}

/// How voice spans are written back to WebVTT
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VoiceSpanMode {
    /// One `<v NAME>` per line taken from the first voice span, no `</v>`,
    /// later voice spans contribute only their text
    #[default]
    Merged,
    /// Every span is written with its classes and closing tag
    Strict,
}

/// Writer output settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WriteConfig {
    /// Voice span rendering for WebVTT
    #[serde(default)]
    pub voice_spans: VoiceSpanMode,

    /// Keep `<b>`, `<i>` and `<u>` when writing structured lines to SRT
    #[serde(default = "default_true")]
    pub srt_formatting_tags: bool,
}

impl Default for WriteConfig {
    fn default() -> Self {
        Self {
            voice_spans: VoiceSpanMode::default(),
            srt_formatting_tags: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching filter for the `log` facade
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Off => log::LevelFilter::Off,
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(anyhow!("Invalid log level: {}", s)),
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse codec configuration JSON")
    }
}
