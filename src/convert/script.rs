//! Test script extraction from operation vendor extensions

use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

use crate::models::Script;

/// Default vendor extension carrying a test script
pub const DEFAULT_TEST_SCRIPT_EXTENSION: &str = "x-postman-test";

/// Extract the test script declared under `extension`.
///
/// The extension may hold a single string (split on newlines) or a list of
/// strings. Returns `None` when it is missing, has another shape, or holds no
/// non-blank line.
pub fn extract_test_script(
    extensions: &BTreeMap<String, JsonValue>,
    extension: &str,
) -> Option<Script> {
    let value = extensions.get(&extension.to_lowercase())?;

    let exec: Vec<String> = match value {
        JsonValue::String(text) => text.lines().map(|line| line.to_string()).collect(),
        JsonValue::Array(lines) => lines
            .iter()
            .map(|line| line.as_str().map(|s| s.to_string()))
            .collect::<Option<Vec<_>>>()?,
        _ => return None,
    };

    if exec.iter().all(|line| line.trim().is_empty()) {
        return None;
    }
    Some(Script::javascript(exec))
}
