use std::borrow::Cow;

/// Error type section handlers hand back to the loader.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while loading and dispatching configuration.
#[chanlog_derive::chanlog_error]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Config IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// The document is not valid TOML.
    #[error("Config parse error{}: {source}", format_context(.context))]
    Parse { source: toml::de::Error, context: Option<Cow<'static, str>> },

    /// The document parsed, but its shape cannot be expressed as sections.
    #[error("Invalid config document{}: {message}", format_context(.context))]
    InvalidDocument { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// No handler is registered for a top-level section.
    #[error("Unknown config section{}: '{section}'", format_context(.context))]
    UnknownSection { section: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A registered section handler rejected its section.
    #[error("Config section rejected{}: {source}", format_context(.context))]
    Handler { source: BoxError, context: Option<Cow<'static, str>> },
}
