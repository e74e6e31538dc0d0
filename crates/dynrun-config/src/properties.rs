//! Legacy `.properties` files
//!
//! Only the subset the runner ever used: one `key=value` (or `key: value`)
//! per line, `#` and `!` comments, blank lines ignored. No line
//! continuations or escapes.

use crate::{ConfigError, ConfigResult};
use std::collections::HashMap;
use std::path::Path;

/// Library directory key
pub const EXEC_FILE_DIR: &str = "execFileDir";
/// Library base name key
pub const EXEC_FILE_NAME: &str = "execFileName";

/// Parse `content`; `file` is only used in error messages
pub fn parse_properties(content: &str, file: &Path) -> ConfigResult<HashMap<String, String>> {
    let mut properties = HashMap::new();

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let split = line.find(['=', ':']).ok_or_else(|| ConfigError::PropertiesParseError {
            file: file.to_path_buf(),
            line: index + 1,
        })?;

        let key = line[..split].trim();
        if key.is_empty() {
            return Err(ConfigError::PropertiesParseError {
                file: file.to_path_buf(),
                line: index + 1,
            });
        }
        let value = line[split + 1..].trim();
        properties.insert(key.to_string(), value.to_string());
    }

    Ok(properties)
}
