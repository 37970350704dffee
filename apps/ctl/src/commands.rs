//! # Command Handlers
//!
//! Each handler works on its own [`LoggerFactory`] and returns the lines to print.

use anyhow::{Context, Result};
use chanlog::LoggerFactory;
use chanlog_config::ConfigFile;
use std::path::Path;

fn loader(factory: &LoggerFactory, strict: bool) -> ConfigFile {
    let mut config = if strict { ConfigFile::new() } else { ConfigFile::ignore_unknown() };
    factory.set_config_file(&mut config);
    config
}

/// Validates `file` without committing anything.
pub fn check(file: &Path, strict: bool) -> Result<Vec<String>> {
    let factory = LoggerFactory::new();
    loader(&factory, strict)
        .parse_file(file, true)
        .with_context(|| format!("{} is not a valid configuration", file.display()))?;

    Ok(vec![format!("ok: {}", file.display())])
}

/// Registers `modules`, applies `file` and reports every module's level.
pub fn apply(file: &Path, modules: &[String], strict: bool) -> Result<Vec<String>> {
    let factory = LoggerFactory::new();
    for module in modules {
        factory.create(module);
    }

    loader(&factory, strict)
        .apply_file(file)
        .with_context(|| format!("Failed to apply {}", file.display()))?;

    let mut report = vec![format!("default_level {}", factory.default_level())];
    report.extend(factory.module_levels().into_iter().map(|(name, level)| format!("{name} {level}")));
    Ok(report)
}
