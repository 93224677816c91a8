//! Shared test utilities for the tracereq workspace.
//!
//! Used by integration tests in more than one crate, so it cannot live behind
//! `#[cfg(test)]` inside any of them.

use serde_json::Value;

const REPORT_KEYS: [&str; 4] = ["schema", "tool", "verdict", "traces"];
const TIMESTAMP_KEYS: [&str; 2] = ["started_at", "finished_at"];

/// Replace the fields of a report that change from run to run.
///
/// Only a root object shaped like a report is touched: `tool.version` becomes
/// `"__VERSION__"` and the run timestamps become `"__TIMESTAMP__"`. Requirement
/// outcomes are left alone even if a requirement happens to be named like one of
/// those keys.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    let Some(obj) = value.as_object_mut() else {
        return value;
    };
    if !REPORT_KEYS.iter().all(|k| obj.contains_key(*k)) {
        return value;
    }

    if let Some(tool) = obj.get_mut("tool").and_then(Value::as_object_mut)
        && tool.contains_key("version")
    {
        tool.insert(
            "version".to_string(),
            Value::String("__VERSION__".to_string()),
        );
    }
    for key in TIMESTAMP_KEYS {
        if obj.contains_key(key) {
            obj.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
        }
    }
    value
}

/// Parse report bytes and normalize them, panicking with context on invalid JSON.
pub fn normalized_report(bytes: &[u8]) -> Value {
    let value: Value = serde_json::from_slice(bytes)
        .unwrap_or_else(|err| panic!("report is not valid JSON: {err}"));
    normalize_nondeterministic(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizes_report_root() {
        let input = json!({
            "schema": "tracereq.report.v1",
            "tool": { "name": "tracereq", "version": "0.1.0" },
            "started_at": "2026-01-01T00:00:00Z",
            "finished_at": "2026-01-01T00:00:01Z",
            "verdict": "pass",
            "traces": [
                { "trace": "t", "verdict": "pass", "outcome": { "name": "started_at" } }
            ]
        });

        let result = normalize_nondeterministic(input);

        assert_eq!(result["tool"]["version"], "__VERSION__");
        assert_eq!(result["tool"]["name"], "tracereq");
        assert_eq!(result["started_at"], "__TIMESTAMP__");
        assert_eq!(result["finished_at"], "__TIMESTAMP__");
        assert_eq!(result["traces"][0]["outcome"]["name"], "started_at");
    }

    #[test]
    fn leaves_other_values_untouched() {
        let input = json!({ "tool": { "version": "1" }, "started_at": "x" });
        assert_eq!(normalize_nondeterministic(input.clone()), input);
        assert_eq!(normalize_nondeterministic(json!([1, 2])), json!([1, 2]));
    }

    #[test]
    fn normalized_report_parses_bytes() {
        let value = normalized_report(
            br#"{"schema":"s","tool":{"version":"9"},"verdict":"fail","traces":[]}"#,
        );
        assert_eq!(value["tool"]["version"], "__VERSION__");
    }
}
