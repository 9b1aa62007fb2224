use crate::error::StackitError;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Flat string-to-string mapping produced by `load_config`.
pub type ConfigMap = HashMap<String, String>;

/// Load a line-oriented KEY=VALUE configuration file.
///
/// Lines without a `=` are skipped (covers blanks), as are `#` comments
/// whether or not they contain a `=`. The value is everything after the
/// first `=` with every double-quote character removed; keys and values
/// are not trimmed beyond the line terminator. A repeated key keeps the
/// last occurrence.
pub fn load_config(path: impl AsRef<Path>) -> Result<ConfigMap, StackitError> {
    let content = fs::read_to_string(path.as_ref())?;

    let mut config = ConfigMap::new();
    for raw in content.lines() {
        let line = raw.trim_end();
        if line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        config.insert(key.to_string(), value.replace('"', ""));
    }
    Ok(config)
}
