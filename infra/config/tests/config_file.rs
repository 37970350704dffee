use chanlog_config::{ConfigError, ConfigFile, ConfigValue};
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

#[test]
fn parse_file_forwards_path_as_source() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let path = tmp_dir.path().join("forwarder.toml");
    fs::write(&path, "[log]\ndefault_level = \"DEBUG\"\n")?;

    let seen = Arc::new(Mutex::new(None));
    let mut config = ConfigFile::new();
    {
        let seen = Arc::clone(&seen);
        config.add_section_handler("log", move |section, dry_run, source| {
            let level = section.get("default_level").and_then(ConfigValue::as_leaf);
            *seen.lock().map_err(|e| e.to_string())? =
                Some((level.map(str::to_owned), dry_run, source.to_owned()));
            Ok(())
        });
    }

    config.parse_file(&path, true)?;

    let seen = seen.lock().expect("lock").clone().expect("handler called");
    assert_eq!(seen.0.as_deref(), Some("DEBUG"));
    assert!(seen.1);
    assert_eq!(seen.2, path.display().to_string());
    Ok(())
}

#[test]
fn missing_file_is_io_error() {
    let config = ConfigFile::new();
    let err = config.parse_file("/definitely/not/here.toml", true).expect_err("no such file");

    assert!(matches!(err, ConfigError::Io { context: Some(_), .. }));
}

#[test]
fn apply_file_runs_dry_run_then_commit() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let path = tmp_dir.path().join("forwarder.toml");
    fs::write(&path, "[log]\ndefault_level = \"INFO\"\n")?;

    let passes = Arc::new(Mutex::new(Vec::new()));
    let mut config = ConfigFile::new();
    {
        let passes = Arc::clone(&passes);
        config.add_section_handler("log", move |_, dry_run, _| {
            passes.lock().map_err(|e| e.to_string())?.push(dry_run);
            Ok(())
        });
    }

    config.apply_file(&path)?;

    assert_eq!(*passes.lock().expect("lock"), [true, false]);
    Ok(())
}

#[test]
fn repeated_keys_reach_the_handler() -> Result<(), ConfigError> {
    let keys = Arc::new(Mutex::new(Vec::new()));
    let mut config = ConfigFile::new();
    {
        let keys = Arc::clone(&keys);
        config.add_section_handler("log", move |section, _, _| {
            let mut keys = keys.lock().map_err(|e| e.to_string())?;
            keys.extend(section.iter().map(|(key, value)| (key.to_owned(), value.clone())));
            Ok(())
        });
    }

    config.parse_str(
        "[log]\ndefault_level = \"INFO\"\nX = \"DEBUG\"\nX = \"WARN\"\n",
        true,
        "nfd.toml",
    )?;

    let keys = keys.lock().expect("lock");
    let names: Vec<&str> = keys.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(names, ["default_level", "X", "X"]);
    assert_eq!(keys[2].1.as_leaf(), Some("WARN"));
    Ok(())
}
