use std::borrow::Cow;

/// Errors raised by level parsing, the configuration protocol and console setup.
///
/// The configuration variants carry the configuration source description as context.
#[chanlog_derive::chanlog_error]
pub enum LoggerError {
    /// The section is empty or does not start with a `default_level` entry.
    #[error("Missing default level{}: {message}", format_context(.context))]
    MissingDefaultLevel { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A value is not one of the recognized level names.
    #[error("Invalid log level{}: '{value}'{}", format_context(.context), format_key(.key))]
    InvalidLevel {
        value: Cow<'static, str>,
        key: Option<Cow<'static, str>>,
        context: Option<Cow<'static, str>>,
    },

    /// The same module is configured twice in one section.
    #[error("Duplicate module{}: '{module}'", format_context(.context))]
    DuplicateModule { module: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A console filter directive could not be parsed.
    #[error("Invalid console filter{}: {message}", format_context(.context))]
    InvalidFilter { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A global tracing subscriber is already installed.
    #[error("Tracing subscriber error{}: {source}", format_context(.context))]
    Subscriber {
        source: tracing_subscriber::util::TryInitError,
        context: Option<Cow<'static, str>>,
    },
}

fn format_key(key: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    key.as_ref().map_or(Cow::Borrowed(""), |k| Cow::Owned(format!(" for key '{k}'")))
}
