//! # Chanlog
//!
//! A process-wide registry of named log channels ("modules") whose severity
//! thresholds are driven by a reloadable `log` configuration section.
//!
//! * Each subsystem obtains its [`Logger`] once via [`create`] (or
//!   [`LoggerFactory::create`] on an injected factory) and then checks
//!   [`Logger::level`] / [`Logger::is_enabled`], or emits through the `log_*!` macros.
//! * A configuration loader calls [`LoggerFactory::on_config`] with the parsed section
//!   and a dry-run flag. The whole section is validated before anything changes; a
//!   committed configuration is applied to every logger created so far.
//! * [`LoggerFactory::set_config_file`] wires the factory into a
//!   [`chanlog_config::ConfigFile`] as the handler of the `log` section.
//!
//! The expected section shape:
//!
//! ```toml
//! [log]
//! default_level = "INFO"   # must come first
//! Forwarder = "DEBUG"
//! Strategy = "NONE"
//! ```
//!
//! ## Example
//!
//! ```rust
//! use chanlog::{Level, LoggerFactory, log_debug};
//! use chanlog_config::ConfigFile;
//!
//! let factory = LoggerFactory::new();
//! let forwarder = factory.create("Forwarder");
//!
//! let mut config = ConfigFile::new();
//! factory.set_config_file(&mut config);
//! config
//!     .apply_str("[log]\ndefault_level = \"WARN\"\nForwarder = \"DEBUG\"\n", "inline")
//!     .unwrap();
//!
//! assert_eq!(forwarder.level(), Level::Debug);
//! log_debug!(forwarder, "pit entries = {}", 42);
//! ```

mod console;
mod error;
mod factory;
mod level;
mod logger;
mod macros;

pub use crate::console::{Console, ConsoleBuilder};
pub use crate::error::{LoggerError, LoggerErrorExt};
pub use crate::factory::{
    CONFIG_SECTION, DEFAULT_LEVEL, DEFAULT_LEVEL_KEY, LevelConfig, LoggerFactory, create,
};
pub use crate::level::Level;
pub use crate::logger::Logger;

#[doc(hidden)]
pub mod __private {
    pub use tracing;
}
