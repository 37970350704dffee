use crate::error::{LoggerError, LoggerErrorExt};
use crate::level::Level;
use crate::logger::Logger;
use chanlog_config::{ConfigFile, ConfigSection, ConfigValue};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, trace, warn};

/// Level of every module before any configuration is committed.
pub const DEFAULT_LEVEL: Level = Level::Info;
/// Name of the configuration section handled by [`LoggerFactory::set_config_file`].
pub const CONFIG_SECTION: &str = "log";
/// Key that must open the configuration section.
pub const DEFAULT_LEVEL_KEY: &str = "default_level";

static INSTANCE: LazyLock<LoggerFactory> = LazyLock::new(LoggerFactory::new);

/// A validated level assignment that has not been committed yet.
///
/// Built from a `log` section by [`LevelConfig::from_section`]; committing it is the
/// only way [`LoggerFactory::on_config`] changes state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelConfig {
    default_level: Level,
    overrides: FxHashMap<String, Level>,
}

impl LevelConfig {
    /// Validates a `log` section.
    ///
    /// The first entry must be `default_level`; every other entry maps a module name
    /// to a level. Nested sections are not accepted as values.
    ///
    /// # Errors
    /// * [`LoggerError::MissingDefaultLevel`] if the section is empty or does not start
    ///   with `default_level`.
    /// * [`LoggerError::InvalidLevel`] if a value is not a level name.
    /// * [`LoggerError::DuplicateModule`] if a module (or `default_level`) repeats.
    pub fn from_section(section: &ConfigSection) -> Result<Self, LoggerError> {
        let mut entries = section.iter();

        let Some((key, value)) = entries.next() else {
            return Err(LoggerError::MissingDefaultLevel {
                message: "section is empty".into(),
                context: None,
            });
        };
        if key != DEFAULT_LEVEL_KEY {
            return Err(LoggerError::MissingDefaultLevel {
                message: format!("first entry is '{key}', expected '{DEFAULT_LEVEL_KEY}'").into(),
                context: None,
            });
        }
        let default_level = level_entry(key, value)?;

        let mut overrides = FxHashMap::default();
        for (module, value) in entries {
            let level = level_entry(module, value)?;
            if module == DEFAULT_LEVEL_KEY || overrides.insert(module.to_owned(), level).is_some() {
                return Err(LoggerError::DuplicateModule {
                    module: module.to_owned().into(),
                    context: None,
                });
            }
        }

        Ok(Self { default_level, overrides })
    }

    #[must_use]
    pub const fn default_level(&self) -> Level {
        self.default_level
    }

    /// Level configured for `module`, if it has an override.
    #[must_use]
    pub fn override_for(&self, module: &str) -> Option<Level> {
        self.overrides.get(module).copied()
    }

    /// Effective level for `module` under this assignment.
    #[must_use]
    pub fn level_for(&self, module: &str) -> Level {
        self.override_for(module).unwrap_or(self.default_level)
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self { default_level: DEFAULT_LEVEL, overrides: FxHashMap::default() }
    }
}

fn level_entry(key: &str, value: &ConfigValue) -> Result<Level, LoggerError> {
    let Some(text) = value.as_leaf() else {
        return Err(LoggerError::InvalidLevel {
            value: "<section>".into(),
            key: Some(key.to_owned().into()),
            context: None,
        });
    };
    Level::parse(text).map_err(|_| LoggerError::InvalidLevel {
        value: text.to_owned().into(),
        key: Some(key.to_owned().into()),
        context: None,
    })
}

#[derive(Debug, Default)]
struct FactoryState {
    loggers: BTreeMap<String, Arc<Logger>>,
    committed: LevelConfig,
}

impl FactoryState {
    fn reapply(&self) {
        for (name, logger) in &self.loggers {
            logger.set_level(self.committed.level_for(name));
        }
    }
}

/// Owner of every [`Logger`] in the process and of the level configuration.
///
/// `LoggerFactory` is a cheap handle: clones share the same registry. Use
/// [`LoggerFactory::instance`] for the process-wide registry, or
/// [`LoggerFactory::new`] for an isolated one (tests, embedding).
///
/// Configuration is applied in two phases. [`LoggerFactory::on_config`] first builds
/// and validates a complete [`LevelConfig`]; only if that succeeds and the call is not
/// a dry run is it swapped in, and every existing logger is updated under the same
/// write lock.
///
/// # Example
///
/// ```rust
/// use chanlog::{Level, LoggerFactory};
/// use chanlog_config::ConfigSection;
///
/// let factory = LoggerFactory::new();
/// let forwarder = factory.create("Forwarder");
/// assert_eq!(forwarder.level(), Level::Info);
///
/// let log = ConfigSection::new()
///     .with_leaf("default_level", "WARN")
///     .with_leaf("Forwarder", "TRACE");
///
/// factory.on_config(&log, true, "inline").unwrap();
/// assert_eq!(forwarder.level(), Level::Info);
///
/// factory.on_config(&log, false, "inline").unwrap();
/// assert_eq!(forwarder.level(), Level::Trace);
/// assert_eq!(factory.create("Strategy").level(), Level::Warn);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoggerFactory {
    state: Arc<RwLock<FactoryState>>,
}

impl LoggerFactory {
    /// Creates an empty registry with the default level set to [`DEFAULT_LEVEL`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry, created on first access and never torn down.
    #[must_use]
    pub fn instance() -> &'static Self {
        &INSTANCE
    }

    /// Registers this factory as the handler of the `log` section of `config`.
    pub fn set_config_file(&self, config: &mut ConfigFile) {
        let factory = self.clone();
        config.add_section_handler(CONFIG_SECTION, move |section, dry_run, source| {
            factory.on_config(section, dry_run, source)?;
            Ok(())
        });
    }

    /// Validates `section` and, unless `dry_run` is set, commits it.
    ///
    /// On commit the default level and the overrides are replaced together and every
    /// logger created so far is moved to its new level. Loggers created later pick up
    /// the committed values in [`LoggerFactory::create`].
    ///
    /// # Errors
    /// Any error of [`LevelConfig::from_section`], with `source` as context. Nothing
    /// is changed when an error is returned.
    pub fn on_config(
        &self,
        section: &ConfigSection,
        dry_run: bool,
        source: &str,
    ) -> Result<(), LoggerError> {
        let candidate = LevelConfig::from_section(section).context(source.to_owned()).inspect_err(
            |err| warn!(source, dry_run, error = %err, "Rejected log configuration"),
        )?;

        if dry_run {
            trace!(source, overrides = candidate.overrides.len(), "Log configuration validated");
            return Ok(());
        }

        let default_level = candidate.default_level;
        let overrides = candidate.overrides.len();
        self.commit(candidate);
        info!(source, %default_level, overrides, "Log configuration committed");
        Ok(())
    }

    /// Names of all registered modules in lexicographic order.
    #[must_use]
    pub fn modules(&self) -> Vec<String> {
        self.state.read().loggers.keys().cloned().collect()
    }

    /// Registered modules with their current levels, in lexicographic order.
    #[must_use]
    pub fn module_levels(&self) -> Vec<(String, Level)> {
        self.state
            .read()
            .loggers
            .iter()
            .map(|(name, logger)| (name.clone(), logger.level()))
            .collect()
    }

    /// Returns the logger for `module`, creating it on first use.
    ///
    /// Every call with the same name returns the same `Arc`, also when callers race.
    /// Names are case-sensitive and taken verbatim.
    pub fn create(&self, module: &str) -> Arc<Logger> {
        if let Some(logger) = self.state.read().loggers.get(module) {
            return Arc::clone(logger);
        }

        let mut state = self.state.write();
        let level = state.committed.level_for(module);
        let logger = state.loggers.entry(module.to_owned()).or_insert_with(|| {
            debug!(module, %level, "Registering logger");
            Arc::new(Logger::new(module, level))
        });
        Arc::clone(logger)
    }

    /// Committed default level.
    #[must_use]
    pub fn default_level(&self) -> Level {
        self.state.read().committed.default_level
    }

    /// Replaces the default level outside the configuration protocol.
    ///
    /// Overrides are kept and existing loggers are updated. Meant for tests and tools.
    pub fn set_default_level(&self, level: Level) {
        let mut state = self.state.write();
        state.committed.default_level = level;
        state.reapply();
    }

    fn commit(&self, candidate: LevelConfig) {
        let mut state = self.state.write();
        state.committed = candidate;
        state.reapply();
    }
}

/// Returns the logger for `module` from the process-wide registry.
pub fn create(module: &str) -> Arc<Logger> {
    LoggerFactory::instance().create(module)
}
