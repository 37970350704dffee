//! # Config
//!
//! Configuration plumbing for chanlog-based applications.
//!
//! A configuration document is a tree of ordered [`ConfigSection`]s. Each top-level
//! section is owned by one subsystem, which registers a handler for it on a
//! [`ConfigFile`]. Loading a document calls every handler with the section and a
//! `dry_run` flag, so a reload can be validated in full before anything changes.
//!
//! Documents are read as TOML with key order preserved; position inside a section is
//! meaningful to some handlers.
//!
//! ## Example
//!
//! ```rust
//! use chanlog_config::ConfigFile;
//!
//! let mut config = ConfigFile::new();
//! config.add_section_handler("log", |section, dry_run, source| {
//!     let first = section.first().map(|(key, _)| key);
//!     if first != Some("default_level") {
//!         return Err(format!("{source}: default_level must come first").into());
//!     }
//!     if !dry_run {
//!         // commit here
//!     }
//!     Ok(())
//! });
//!
//! config.apply_str("[log]\ndefault_level = \"INFO\"\nFace = \"DEBUG\"\n", "inline").unwrap();
//! ```

mod error;
mod file;
mod section;

pub use crate::error::{BoxError, ConfigError, ConfigErrorExt};
pub use crate::file::{ConfigFile, SectionHandler, UnknownSectionPolicy};
pub use crate::section::{ConfigSection, ConfigValue, Iter};
