use crate::factory::DEFAULT_LEVEL;
use crate::level::Level;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// A named log channel.
///
/// Obtained from [`LoggerFactory::create`](crate::LoggerFactory::create) and shared as
/// `Arc<Logger>`. The level is owned by the factory: it changes whenever a new
/// configuration is committed and is read without locking.
pub struct Logger {
    name: Box<str>,
    level: AtomicU8,
}

impl Logger {
    pub(crate) fn new(name: &str, level: Level) -> Self {
        Self { name: name.into(), level: AtomicU8::new(level.to_repr()) }
    }

    /// Module name this logger was created for.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current threshold.
    #[must_use]
    pub fn level(&self) -> Level {
        Level::from_repr(self.level.load(Ordering::Acquire)).unwrap_or(DEFAULT_LEVEL)
    }

    /// Whether a message of severity `level` passes this logger's threshold.
    ///
    /// Nothing passes a logger set to [`Level::None`].
    #[must_use]
    pub fn is_enabled(&self, level: Level) -> bool {
        let threshold = self.level();
        threshold != Level::None && level >= threshold
    }

    pub(crate) fn set_level(&self, level: Level) {
        self.level.store(level.to_repr(), Ordering::Release);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").field("name", &self.name).field("level", &self.level()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_filters_lower_severities() {
        let logger = Logger::new("Forwarder", Level::Warn);

        assert!(!logger.is_enabled(Level::Info));
        assert!(logger.is_enabled(Level::Warn));
        assert!(logger.is_enabled(Level::Fatal));
    }

    #[test]
    fn none_silences_everything() {
        let logger = Logger::new("Forwarder", Level::None);

        assert!(Level::iter().all(|level| !logger.is_enabled(level)));
    }

    #[test]
    fn all_lets_everything_through() {
        let logger = Logger::new("Forwarder", Level::All);

        assert!(logger.is_enabled(Level::Trace));
        assert!(logger.is_enabled(Level::Fatal));
    }

    #[test]
    fn set_level_is_visible_to_readers() {
        let logger = Logger::new("Forwarder", Level::Info);
        logger.set_level(Level::Error);

        assert_eq!(logger.level(), Level::Error);
        assert_eq!(logger.name(), "Forwarder");
    }
}
