use crate::error::LoggerError;
use std::str::FromStr;
use strum::{Display, EnumIter, FromRepr, IntoEnumIterator, IntoStaticStr};
use tracing::level_filters::LevelFilter;

/// Severity threshold of a logger, ordered from most verbose to most restrictive.
///
/// The canonical text form is the upper-case variant name (`"INFO"`, `"NONE"`, ...).
/// Parsing ignores case and surrounding whitespace but otherwise only accepts the
/// exact names.
///
/// # Example
/// ```rust
/// use chanlog::Level;
///
/// let level: Level = " debug ".parse().unwrap();
/// assert_eq!(level, Level::Debug);
/// assert_eq!(level.to_string(), "DEBUG");
/// assert!(Level::All < Level::Info && Level::Info < Level::None);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    FromRepr,
    IntoStaticStr,
)]
#[strum(serialize_all = "UPPERCASE")]
#[repr(u8)]
pub enum Level {
    All,
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    /// Nothing passes.
    None,
}

impl Level {
    /// Parses a level name.
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidLevel`] if `text` is not a level name.
    pub fn parse(text: &str) -> Result<Self, LoggerError> {
        let name = text.trim();
        Self::iter().find(|level| level.as_str().eq_ignore_ascii_case(name)).ok_or_else(|| {
            LoggerError::InvalidLevel { value: text.to_owned().into(), key: None, context: None }
        })
    }

    /// Canonical upper-case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// All levels in ascending order.
    pub fn iter() -> impl Iterator<Item = Self> {
        <Self as IntoEnumIterator>::iter()
    }

    pub(crate) const fn to_repr(self) -> u8 {
        self as u8
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Level> for LevelFilter {
    fn from(level: Level) -> Self {
        match level {
            Level::All | Level::Trace => Self::TRACE,
            Level::Debug => Self::DEBUG,
            Level::Info => Self::INFO,
            Level::Warn => Self::WARN,
            Level::Error | Level::Fatal => Self::ERROR,
            Level::None => Self::OFF,
        }
    }
}
