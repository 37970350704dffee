use crate::error::LoggerError;
use crate::level::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Builder for the process-wide console subscriber that prints `tracing` events to
/// stderr, including everything the `log_*!` macros let through.
///
/// # Example
/// ```rust,no_run
/// use chanlog::{Console, Level};
///
/// Console::builder().level(Level::Debug).env_filter("chanlog=trace").init().unwrap();
/// ```
#[derive(Debug)]
#[must_use = "The builder must be configured before it can be used to initialize the console."]
pub struct ConsoleBuilder {
    level: Level,
    env_filter: Option<String>,
    ansi: bool,
}

/// Entry point for [`ConsoleBuilder`].
#[derive(Debug)]
pub struct Console;

impl Console {
    pub const fn builder() -> ConsoleBuilder {
        ConsoleBuilder { level: Level::Info, env_filter: None, ansi: true }
    }
}

impl ConsoleBuilder {
    /// Default threshold for events without a more specific directive.
    pub const fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Adds filter directives (e.g., `chanlog=debug,my_app=info`).
    ///
    /// `RUST_LOG` still applies when no directives are given here.
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Enables or disables ANSI colors.
    pub const fn ansi(mut self, enabled: bool) -> Self {
        self.ansi = enabled;
        self
    }

    /// Installs the console subscriber as the global default.
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidFilter`] for malformed directives and
    /// [`LoggerError::Subscriber`] if a global subscriber is already installed.
    pub fn init(self) -> Result<(), LoggerError> {
        let filter = self.build_filter()?;
        let console = layer().compact().with_ansi(self.ansi).with_writer(std::io::stderr);

        tracing_subscriber::registry().with(filter).with(console).try_init()?;
        Ok(())
    }

    fn build_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(LevelFilter::from(self.level).into());
        self.env_filter.as_ref().map_or_else(
            || Ok(builder.from_env_lossy()),
            |filter| {
                builder.parse(filter).map_err(|e| LoggerError::InvalidFilter {
                    message: format!("'{filter}': {e}").into(),
                    context: None,
                })
            },
        )
    }
}
