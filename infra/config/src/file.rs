use crate::error::{BoxError, ConfigError, ConfigErrorExt};
use crate::section::{ConfigSection, ConfigValue};
use fxhash::FxHashMap;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// Callback invoked with `(section, dry_run, source)` for one top-level section.
pub type SectionHandler =
    Box<dyn Fn(&ConfigSection, bool, &str) -> Result<(), BoxError> + Send + Sync + 'static>;

/// What to do with a top-level section that has no registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownSectionPolicy {
    /// Fail the whole load.
    #[default]
    Reject,
    /// Log and skip the section.
    Ignore,
}

/// Loads a configuration document and dispatches each top-level section to the
/// handler registered under its name.
///
/// Every load runs with a `dry_run` flag that is forwarded unchanged to the handlers;
/// a handler must not change any state while `dry_run` is `true`.
/// [`ConfigFile::apply_str`] and [`ConfigFile::apply_file`] run a full dry-run pass
/// first and only commit when every section validated.
///
/// # Example
/// ```rust
/// use chanlog_config::ConfigFile;
///
/// let mut config = ConfigFile::new();
/// config.add_section_handler("log", |section, _dry_run, _source| {
///     assert!(!section.is_empty());
///     Ok(())
/// });
///
/// config.parse_str("[log]\ndefault_level = \"INFO\"\n", true, "inline").unwrap();
/// ```
#[derive(Default)]
pub struct ConfigFile {
    handlers: FxHashMap<String, SectionHandler>,
    unknown: UnknownSectionPolicy,
}

impl ConfigFile {
    /// Creates a loader that rejects unknown sections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loader that skips unknown sections with a warning.
    #[must_use]
    pub fn ignore_unknown() -> Self {
        Self { unknown: UnknownSectionPolicy::Ignore, ..Self::default() }
    }

    #[must_use]
    pub const fn unknown_section_policy(&self) -> UnknownSectionPolicy {
        self.unknown
    }

    /// Registers `handler` for the top-level section `name`, replacing any earlier one.
    pub fn add_section_handler<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&ConfigSection, bool, &str) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.handlers.insert(name.clone(), Box::new(handler)).is_some() {
            warn!(section = %name, "Replacing existing config section handler");
        }
    }

    #[must_use]
    pub fn has_section_handler(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Dispatches every top-level section of `root` in document order.
    ///
    /// # Errors
    /// * [`ConfigError::InvalidDocument`] if a top-level entry is not a section.
    /// * [`ConfigError::UnknownSection`] if no handler exists and the policy rejects it.
    /// * [`ConfigError::Handler`] with the section name as context if a handler fails.
    ///   Handlers for earlier sections have already run at that point.
    pub fn parse_section_tree(
        &self,
        root: &ConfigSection,
        dry_run: bool,
        source: &str,
    ) -> Result<(), ConfigError> {
        for (name, value) in root {
            let ConfigValue::Section(section) = value else {
                return Err(ConfigError::InvalidDocument {
                    message: format!("top-level entry '{name}' is not a section").into(),
                    context: Some(source.to_owned().into()),
                });
            };

            let Some(handler) = self.handlers.get(name) else {
                match self.unknown {
                    UnknownSectionPolicy::Reject => {
                        return Err(ConfigError::UnknownSection {
                            section: name.to_owned().into(),
                            context: Some(source.to_owned().into()),
                        });
                    },
                    UnknownSectionPolicy::Ignore => {
                        warn!(section = name, source, "Ignoring unknown config section");
                        continue;
                    },
                }
            };

            debug!(section = name, dry_run, source, "Dispatching config section");
            handler(section, dry_run, source).context(format!("section '{name}' in {source}"))?;
        }

        Ok(())
    }

    /// Parses a TOML document and dispatches its sections.
    ///
    /// # Errors
    /// [`ConfigError::Parse`] for malformed documents, otherwise as
    /// [`ConfigFile::parse_section_tree`].
    pub fn parse_str(&self, text: &str, dry_run: bool, source: &str) -> Result<(), ConfigError> {
        let root = ConfigSection::from_toml_str(text).context(source.to_owned())?;
        self.parse_section_tree(&root, dry_run, source)
    }

    /// Reads `path` and dispatches its sections, using the path as the source name.
    ///
    /// # Errors
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`ConfigFile::parse_str`].
    pub fn parse_file(&self, path: impl AsRef<Path>, dry_run: bool) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .context(format!("Failed to read config file {}", path.display()))?;
        self.parse_str(&text, dry_run, &path.display().to_string())
    }

    /// Validates the whole document with a dry run, then commits it.
    ///
    /// No handler sees `dry_run == false` unless every section passed validation.
    ///
    /// # Errors
    /// The first error of the validation pass, or of the commit pass.
    pub fn apply_str(&self, text: &str, source: &str) -> Result<(), ConfigError> {
        let root = ConfigSection::from_toml_str(text).context(source.to_owned())?;
        self.parse_section_tree(&root, true, source)?;
        self.parse_section_tree(&root, false, source)?;
        info!(source, "Configuration applied");
        Ok(())
    }

    /// File-backed variant of [`ConfigFile::apply_str`].
    ///
    /// # Errors
    /// As [`ConfigFile::parse_file`].
    pub fn apply_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .context(format!("Failed to read config file {}", path.display()))?;
        self.apply_str(&text, &path.display().to_string())
    }
}

impl fmt::Debug for ConfigFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sections: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        sections.sort_unstable();
        f.debug_struct("ConfigFile")
            .field("sections", &sections)
            .field("unknown", &self.unknown)
            .finish()
    }
}
