use crate::error::ConfigError;
use fxhash::FxHashMap;
use std::ops::Range;
use std::slice;

/// Stand-in for a repeated key while the document is re-parsed.
const DUPLICATE_KEY_TAG: &str = "chanlog-duplicate-key-";

/// A value stored under a key: either a plain string or a nested section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Leaf(String),
    Section(ConfigSection),
}

impl ConfigValue {
    /// Returns the string payload when the value is a leaf.
    #[must_use]
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(text) => Some(text),
            Self::Section(_) => None,
        }
    }

    /// Returns the nested section when the value is not a leaf.
    #[must_use]
    pub const fn as_section(&self) -> Option<&ConfigSection> {
        match self {
            Self::Section(section) => Some(section),
            Self::Leaf(_) => None,
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(text: &str) -> Self {
        Self::Leaf(text.to_owned())
    }
}

impl From<String> for ConfigValue {
    fn from(text: String) -> Self {
        Self::Leaf(text)
    }
}

impl From<ConfigSection> for ConfigValue {
    fn from(section: ConfigSection) -> Self {
        Self::Section(section)
    }
}

/// An ordered list of `(key, value)` entries.
///
/// Order and repeated keys are preserved exactly as supplied; consumers that give
/// position or uniqueness a meaning check it themselves.
///
/// # Example
/// ```rust
/// use chanlog_config::ConfigSection;
///
/// let log = ConfigSection::new()
///     .with_leaf("default_level", "INFO")
///     .with_leaf("Forwarder", "DEBUG");
///
/// assert_eq!(log.first().map(|(key, _)| key), Some("default_level"));
/// assert_eq!(log.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSection {
    entries: Vec<(String, ConfigValue)>,
}

impl ConfigSection {
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Appends a leaf entry.
    #[must_use]
    pub fn with_leaf(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, ConfigValue::Leaf(value.into()));
        self
    }

    /// Appends a nested section entry.
    #[must_use]
    pub fn with_section(mut self, key: impl Into<String>, section: Self) -> Self {
        self.push(key, ConfigValue::Section(section));
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter { inner: self.entries.iter() }
    }

    #[must_use]
    pub fn first(&self) -> Option<(&str, &ConfigValue)> {
        self.entries.first().map(|(key, value)| (key.as_str(), value))
    }

    /// Returns the first value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, value)| value)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds a section tree from a TOML document, keeping document order.
    ///
    /// Tables become sections and strings become leaves. Other scalars are kept as
    /// leaves holding their TOML rendering, so `level = 3` reaches the handler as `"3"`
    /// and is rejected there with a precise message.
    ///
    /// TOML forbids repeating a key within a table. Such a repeat is still kept as a
    /// second entry under the same key, so handlers see it and can reject it.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::InvalidDocument`] when the document contains arrays.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let (table, renamed) = parse_keeping_duplicates(text)?;
        let mut section = from_table(table)?;
        if !renamed.is_empty() {
            section.restore_keys(&renamed);
        }
        Ok(section)
    }

    fn restore_keys(&mut self, renamed: &FxHashMap<String, String>) {
        for (key, value) in &mut self.entries {
            if let Some(original) = renamed.get(key.as_str()) {
                key.clone_from(original);
            }
            if let ConfigValue::Section(inner) = value {
                inner.restore_keys(renamed);
            }
        }
    }
}

impl<K: Into<String>, V: Into<ConfigValue>> FromIterator<(K, V)> for ConfigSection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

impl<'a> IntoIterator for &'a ConfigSection {
    type Item = (&'a str, &'a ConfigValue);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over the entries of a [`ConfigSection`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: slice::Iter<'a, (String, ConfigValue)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a ConfigValue);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key.as_str(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// Parses `text`, renaming every repeated key to a unique stand-in until the
/// document is accepted. Returns the table and the stand-in to original key map.
fn parse_keeping_duplicates(
    text: &str,
) -> Result<(toml::Table, FxHashMap<String, String>), ConfigError> {
    let mut document = text.to_owned();
    let mut renamed = FxHashMap::default();

    loop {
        let err = match toml::from_str::<toml::Table>(&document) {
            Ok(table) => return Ok((table, renamed)),
            Err(err) => err,
        };
        let Some(span) = duplicate_key_span(&document, &err) else {
            return Err(ConfigError::Parse {
                source: err,
                context: Some("Failed to parse TOML document".into()),
            });
        };

        let original = key_name(&document[span.clone()]);
        let index = renamed.len();
        document.replace_range(span, &format!("\"\\u0001{DUPLICATE_KEY_TAG}{index}\""));
        renamed.insert(format!("\u{1}{DUPLICATE_KEY_TAG}{index}"), original);
    }
}

/// Byte range of the repeated key reported by `err`, quotes included.
fn duplicate_key_span(document: &str, err: &toml::de::Error) -> Option<Range<usize>> {
    if !err.message().starts_with("duplicate key") {
        return None;
    }
    let mut span = err.span()?;
    let bytes = document.as_bytes();
    if span.start > 0
        && span.end < bytes.len()
        && matches!(bytes[span.start - 1], b'"' | b'\'')
        && bytes[span.end] == bytes[span.start - 1]
    {
        span = span.start - 1..span.end + 1;
    }

    document.get(span.clone()).filter(|key| !key.is_empty() && !key.contains(DUPLICATE_KEY_TAG))?;
    Some(span)
}

/// Decodes a key as written in the document, so `"a.b"` yields `a.b`.
fn key_name(raw: &str) -> String {
    toml::from_str::<toml::Table>(&format!("{raw} = 0"))
        .ok()
        .and_then(|table| match table.into_iter().next() {
            Some((key, toml::Value::Integer(_))) => Some(key),
            _ => None,
        })
        .unwrap_or_else(|| raw.to_owned())
}

fn from_table(table: toml::Table) -> Result<ConfigSection, ConfigError> {
    let mut section = ConfigSection::new();
    for (key, value) in table {
        let value = from_value(&key, value)?;
        section.push(key, value);
    }
    Ok(section)
}

fn from_value(key: &str, value: toml::Value) -> Result<ConfigValue, ConfigError> {
    match value {
        toml::Value::String(text) => Ok(ConfigValue::Leaf(text)),
        toml::Value::Table(table) => from_table(table).map(ConfigValue::Section),
        toml::Value::Array(_) => Err(ConfigError::InvalidDocument {
            message: format!("arrays are not supported (key '{key}')").into(),
            context: None,
        }),
        scalar => Ok(ConfigValue::Leaf(scalar.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_order_and_duplicates() {
        let section = ConfigSection::new()
            .with_leaf("default_level", "INFO")
            .with_leaf("X", "DEBUG")
            .with_leaf("X", "WARN");

        let keys: Vec<&str> = section.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["default_level", "X", "X"]);
        assert_eq!(section.get("X").and_then(ConfigValue::as_leaf), Some("DEBUG"));
    }

    #[test]
    fn toml_document_keeps_key_order() -> Result<(), ConfigError> {
        let root = ConfigSection::from_toml_str(
            r#"
            [log]
            default_level = "WARN"
            Zebra = "DEBUG"
            Alpha = "TRACE"
            "#,
        )?;

        let log = root.get("log").and_then(ConfigValue::as_section).expect("log section");
        let keys: Vec<&str> = log.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["default_level", "Zebra", "Alpha"]);
        Ok(())
    }

    #[test]
    fn non_string_scalars_become_leaves() -> Result<(), ConfigError> {
        let root = ConfigSection::from_toml_str("[log]\ndefault_level = 3\n")?;
        let log = root.get("log").and_then(ConfigValue::as_section).expect("log section");

        assert_eq!(log.get("default_level").and_then(ConfigValue::as_leaf), Some("3"));
        Ok(())
    }

    #[test]
    fn repeated_keys_survive_as_separate_entries() -> Result<(), ConfigError> {
        let root = ConfigSection::from_toml_str(
            "[log]\ndefault_level = \"INFO\"\nX = \"DEBUG\"\n\"a.b\" = \"TRACE\"\nX = \"WARN\"\n'a.b' = \"NONE\"\n",
        )?;

        let log = root.get("log").and_then(ConfigValue::as_section).expect("log section");
        let entries: Vec<(&str, Option<&str>)> =
            log.iter().map(|(key, value)| (key, value.as_leaf())).collect();
        assert_eq!(
            entries,
            [
                ("default_level", Some("INFO")),
                ("X", Some("DEBUG")),
                ("a.b", Some("TRACE")),
                ("X", Some("WARN")),
                ("a.b", Some("NONE")),
            ]
        );
        Ok(())
    }

    #[test]
    fn arrays_are_rejected() {
        let err = ConfigSection::from_toml_str("[log]\nlevels = [\"INFO\"]\n")
            .expect_err("arrays are not representable");

        assert!(matches!(err, ConfigError::InvalidDocument { .. }));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = ConfigSection::from_toml_str("[log\n").expect_err("broken header");

        assert!(matches!(err, ConfigError::Parse { context: Some(_), .. }));
    }
}
