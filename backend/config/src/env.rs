//! Environment variable substitution for config values.
//!
//! Supports `${VAR_NAME}` syntax in string values, resolved at load time.
//! Only uppercase `[A-Z_][A-Z0-9_]*` variable names are matched.
//! `$${VAR}` escapes to a literal `${VAR}`.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

/// A reference, optionally preceded by the `$` escape.
static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$?\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

/// Error returned for missing env vars.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Strict substitution against a provided map.
///
/// Fails on the first referenced variable that is unset or empty.
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    let (resolved, missing) = resolve_env_vars_lenient_with(value, env);
    if let Some(first) = missing.into_iter().next() {
        bail!(first);
    }
    Ok(resolved)
}

/// Substitute what can be resolved; missing variables become empty strings
/// and are returned so the caller can warn about them.
pub fn resolve_env_vars_lenient_with(
    value: &Value,
    env: &HashMap<String, String>,
) -> (Value, Vec<MissingEnvVarError>) {
    let mut missing = Vec::new();
    let resolved = substitute_value(value, env, "", &mut missing);
    (resolved, missing)
}

fn substitute_value(
    value: &Value,
    env: &HashMap<String, String>,
    path: &str,
    missing: &mut Vec<MissingEnvVarError>,
) -> Value {
    match value {
        Value::String(s) => Value::String(substitute_string(s, env, path, missing)),
        Value::Array(arr) => Value::Array(
            arr.iter()
                .enumerate()
                .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]"), missing))
                .collect(),
        ),
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                let child_path = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                result.insert(k.clone(), substitute_value(v, env, &child_path, missing));
            }
            Value::Object(result)
        }
        // Primitives pass through unchanged.
        other => other.clone(),
    }
}

fn substitute_string(
    s: &str,
    env: &HashMap<String, String>,
    path: &str,
    missing: &mut Vec<MissingEnvVarError>,
) -> String {
    if !s.contains('$') {
        return s.to_string();
    }

    ENV_VAR_PATTERN
        .replace_all(s, |caps: &regex::Captures| {
            let var_name = &caps[1];
            if caps[0].starts_with("$$") {
                return format!("${{{var_name}}}");
            }
            match env.get(var_name) {
                Some(val) if !val.is_empty() => val.clone(),
                _ => {
                    missing.push(MissingEnvVarError {
                        var_name: var_name.to_string(),
                        config_path: path.to_string(),
                    });
                    String::new()
                }
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn substitutes_simple_var() {
        let v = json!({"apiKey": "${GROQ_API_KEY}"});
        let env = env(&[("GROQ_API_KEY", "gsk_abc123")]);
        let result = resolve_env_vars_with(&v, &env).unwrap();
        assert_eq!(result["apiKey"], "gsk_abc123");
    }

    #[test]
    fn error_on_missing_var() {
        let v = json!({"key": "${MISSING_VAR}"});
        let result = resolve_env_vars_with(&v, &HashMap::new());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("MISSING_VAR"));
    }

    #[test]
    fn lenient_reports_missing_with_path() {
        let v = json!({"provider": {"apiKey": "${NOPE}"}});
        let (resolved, missing) = resolve_env_vars_lenient_with(&v, &HashMap::new());
        assert_eq!(resolved["provider"]["apiKey"], "");
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].config_path, "provider.apiKey");
    }

    #[test]
    fn escaped_reference_is_literal() {
        let v = json!({"note": "cost $${DOLLARS} for ${WHO}"});
        let env = env(&[("WHO", "you")]);
        let result = resolve_env_vars_with(&v, &env).unwrap();
        assert_eq!(result["note"], "cost ${DOLLARS} for you");
    }

    #[test]
    fn substitutes_nested_and_arrays() {
        let v = json!({"a": {"b": ["${MY_VAR}", 3]}});
        let env = env(&[("MY_VAR", "hello")]);
        let result = resolve_env_vars_with(&v, &env).unwrap();
        assert_eq!(result["a"]["b"][0], "hello");
        assert_eq!(result["a"]["b"][1], 3);
    }
}
