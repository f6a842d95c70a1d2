//! Logger initialization
//!
//! - One subscriber per process, installed by the CLI
//! - `RUST_LOG` overrides the configured level
//! - JSON lines by default, human-readable with `pretty`

use std::fmt;
use std::io;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt as layer_fmt, EnvFilter};

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Json => "json",
            LogFormat::Pretty => "pretty",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(LoggingError::InvalidFormat(other.to_string())),
        }
    }
}

/// Logging setup failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log level '{0}'")]
    InvalidLevel(String),
    #[error("invalid log format '{0}', expected 'json' or 'pretty'")]
    InvalidFormat(String),
}

/// Parse a level name (`trace` through `error`, or `off`)
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggingError> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| LoggingError::InvalidLevel(level.to_string()))
}

/// Install the global subscriber.
///
/// Returns `Ok(false)` when a subscriber was already installed; the
/// existing one is kept.
pub fn init_logging(level: &str, format: LogFormat) -> Result<bool, LoggingError> {
    let default_level = parse_level(level)?;
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let installed = match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(
                layer_fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(io::stderr)
                    .with_filter(filter),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(
                layer_fmt::layer()
                    .with_ansi(false)
                    .with_writer(io::stderr)
                    .with_filter(filter),
            )
            .try_init(),
    };

    Ok(installed.is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::DEBUG);
        assert_eq!(parse_level(" WARN ").unwrap(), LevelFilter::WARN);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::OFF);
        assert!(matches!(
            parse_level("chatty"),
            Err(LoggingError::InvalidLevel(_))
        ));
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_init_twice_keeps_first() {
        init_logging("info", LogFormat::Pretty).unwrap();
        let second = init_logging("info", LogFormat::Json).unwrap();
        assert!(!second);
    }

    #[test]
    fn test_bad_level_rejected_before_install() {
        assert!(init_logging("loud", LogFormat::Json).is_err());
    }
}
