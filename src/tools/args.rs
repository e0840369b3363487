//! Reading raw JSON arguments against a [`ParamSpec`].
//!
//! Absent keys and JSON `null` are treated the same way. Unknown keys are
//! never looked at.

use super::choice::Choice;
use super::registry::ParamSpec;
use crate::error::{Constraint, ValidationError};
use rmcp::model::JsonObject;
use serde_json::Value;

fn raw<'a>(args: &'a JsonObject, spec: &ParamSpec) -> Option<&'a Value> {
    args.get(spec.name).filter(|v| !v.is_null())
}

fn as_str<'a>(value: &'a Value, spec: &ParamSpec) -> Result<&'a str, ValidationError> {
    value
        .as_str()
        .ok_or_else(|| ValidationError::new(spec.name, Constraint::TypeMismatch { expected: "a string" }))
}

/// Trimmed string value; blank counts as absent.
pub fn optional_string(args: &JsonObject, spec: &ParamSpec) -> Result<Option<String>, ValidationError> {
    let Some(value) = raw(args, spec) else { return Ok(None) };
    let s = as_str(value, spec)?.trim();
    Ok((!s.is_empty()).then(|| s.to_string()))
}

pub fn required_string(args: &JsonObject, spec: &ParamSpec) -> Result<String, ValidationError> {
    let Some(value) = raw(args, spec) else {
        return Err(ValidationError::new(spec.name, Constraint::Missing));
    };
    let s = as_str(value, spec)?.trim();
    if s.is_empty() {
        return Err(ValidationError::new(spec.name, Constraint::Empty));
    }
    Ok(s.to_string())
}

pub fn string_or_default(args: &JsonObject, spec: &ParamSpec) -> Result<String, ValidationError> {
    Ok(optional_string(args, spec)?
        .or_else(|| spec.default_str_value().map(str::to_string))
        .unwrap_or_default())
}

/// Value checked against the spec's enumeration, then parsed into `T`.
pub fn optional_choice<T: Choice>(args: &JsonObject, spec: &ParamSpec) -> Result<Option<T>, ValidationError> {
    let Some(value) = optional_string(args, spec)? else { return Ok(None) };
    let not_allowed = || ValidationError::new(spec.name, Constraint::NotInEnum { allowed: spec.allowed });
    if !spec.allowed.contains(&value.as_str()) {
        return Err(not_allowed());
    }
    T::parse(&value).map(Some).ok_or_else(not_allowed)
}

pub fn choice_or_default<T: Choice>(args: &JsonObject, spec: &ParamSpec) -> Result<T, ValidationError> {
    if let Some(choice) = optional_choice(args, spec)? {
        return Ok(choice);
    }
    spec.default_str_value()
        .and_then(T::parse)
        .ok_or_else(|| ValidationError::new(spec.name, Constraint::Missing))
}

/// Integer within `[minimum, maximum]`. Out-of-range values are rejected, never clamped.
pub fn bounded_integer(args: &JsonObject, spec: &ParamSpec) -> Result<u32, ValidationError> {
    let min = spec.minimum.unwrap_or(0).max(0);
    let max = spec.maximum.unwrap_or(i64::from(u32::MAX)).min(i64::from(u32::MAX));
    let out_of_range = || ValidationError::new(spec.name, Constraint::OutOfRange { min, max });

    let n = match raw(args, spec) {
        None => spec
            .default_int_value()
            .ok_or_else(|| ValidationError::new(spec.name, Constraint::Missing))?,
        Some(value) => integer_value(value)
            .ok_or_else(|| ValidationError::new(spec.name, Constraint::TypeMismatch { expected: "an integer" }))?
            .ok_or_else(out_of_range)?,
    };
    if !(min..=max).contains(&n) {
        return Err(out_of_range());
    }
    u32::try_from(n).map_err(|_| out_of_range())
}

/// `None` for non-integers, `Some(None)` for integers too large to represent.
fn integer_value(value: &Value) -> Option<Option<i64>> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Some(i))
            } else if n.is_u64() {
                Some(None)
            } else {
                n.as_f64().filter(|f| f.fract() == 0.0).map(|f| {
                    (f >= i64::MIN as f64 && f <= i64::MAX as f64).then_some(f as i64)
                })
            }
        }
        _ => None,
    }
}

/// Blank or whitespace-only proxies are treated as absent.
pub fn proxy(args: &JsonObject, spec: &ParamSpec) -> Result<Option<String>, ValidationError> {
    optional_string(args, spec)
}

/// Resolves a backend selector to concrete, lowercase backend names.
///
/// Surrounding quotes are stripped, each comma-separated entry is trimmed,
/// `auto` maps to `auto_backend`, and duplicates keep their first position.
pub fn backend(args: &JsonObject, spec: &ParamSpec, auto_backend: &str) -> Result<String, ValidationError> {
    let raw = string_or_default(args, spec)?;
    Ok(resolve_backend(&raw, auto_backend))
}

pub fn resolve_backend(raw: &str, auto_backend: &str) -> String {
    let cleaned = raw.trim().trim_matches(|c| c == '\'' || c == '"');
    let mut resolved: Vec<String> = Vec::new();
    for entry in cleaned.split(',') {
        let entry = entry.trim().trim_matches(|c| c == '\'' || c == '"').trim().to_lowercase();
        let name = if entry.is_empty() || entry == "auto" { auto_backend.to_string() } else { entry };
        if !resolved.contains(&name) {
            resolved.push(name);
        }
    }
    resolved.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::choice::SafeSearch;
    use crate::tools::registry::{MAX_RESULTS, PROXY, QUERY, REGION, SAFESEARCH, TEXT_BACKEND};
    use rstest::rstest;
    use serde_json::json;

    fn obj(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn required_string_reports_missing_and_empty() {
        let err = required_string(&obj(json!({})), &QUERY).unwrap_err();
        assert_eq!(err, ValidationError::new("query", Constraint::Missing));

        let err = required_string(&obj(json!({"query": "   "})), &QUERY).unwrap_err();
        assert_eq!(err.constraint, Constraint::Empty);

        let err = required_string(&obj(json!({"query": 42})), &QUERY).unwrap_err();
        assert_eq!(err.constraint, Constraint::TypeMismatch { expected: "a string" });
    }

    #[test]
    fn null_counts_as_absent() {
        let args = obj(json!({"region": null, "max_results": null}));
        assert_eq!(string_or_default(&args, &REGION).unwrap(), "us-en");
        assert_eq!(bounded_integer(&args, &MAX_RESULTS).unwrap(), 10);
    }

    #[rstest]
    #[case(json!(1), 1)]
    #[case(json!(57), 57)]
    #[case(json!(100), 100)]
    #[case(json!(25.0), 25)]
    fn max_results_in_range_passes_unchanged(#[case] value: Value, #[case] expected: u32) {
        let args = obj(json!({ "max_results": value }));
        assert_eq!(bounded_integer(&args, &MAX_RESULTS).unwrap(), expected);
    }

    #[rstest]
    #[case(json!(0))]
    #[case(json!(101))]
    #[case(json!(-5))]
    #[case(json!(u64::MAX))]
    fn max_results_out_of_range_is_rejected(#[case] value: Value) {
        let args = obj(json!({ "max_results": value }));
        let err = bounded_integer(&args, &MAX_RESULTS).unwrap_err();
        assert_eq!(err, ValidationError::new("max_results", Constraint::OutOfRange { min: 1, max: 100 }));
    }

    #[rstest]
    #[case(json!("10"))]
    #[case(json!(2.5))]
    #[case(json!(true))]
    fn max_results_type_mismatch(#[case] value: Value) {
        let args = obj(json!({ "max_results": value }));
        let err = bounded_integer(&args, &MAX_RESULTS).unwrap_err();
        assert_eq!(err.constraint, Constraint::TypeMismatch { expected: "an integer" });
    }

    #[test]
    fn choice_rejects_values_outside_enum() {
        let args = obj(json!({"safesearch": "strict"}));
        let err = choice_or_default::<SafeSearch>(&args, &SAFESEARCH).unwrap_err();
        assert_eq!(err.param, "safesearch");
        assert!(matches!(err.constraint, Constraint::NotInEnum { .. }));

        let args = obj(json!({"safesearch": " off "}));
        assert_eq!(choice_or_default::<SafeSearch>(&args, &SAFESEARCH).unwrap(), SafeSearch::Off);
        assert_eq!(choice_or_default::<SafeSearch>(&obj(json!({})), &SAFESEARCH).unwrap(), SafeSearch::Moderate);
    }

    #[rstest]
    #[case(json!(""))]
    #[case(json!("   "))]
    #[case(json!(null))]
    fn blank_proxy_is_absent(#[case] value: Value) {
        let args = obj(json!({ "proxy": value }));
        assert_eq!(proxy(&args, &PROXY).unwrap(), None);
    }

    #[test]
    fn proxy_is_trimmed() {
        let args = obj(json!({"proxy": "  socks5://127.0.0.1:9050 "}));
        assert_eq!(proxy(&args, &PROXY).unwrap().as_deref(), Some("socks5://127.0.0.1:9050"));
    }

    #[rstest]
    #[case("auto", "duckduckgo")]
    #[case("", "duckduckgo")]
    #[case("  'auto' ", "duckduckgo")]
    #[case("\"wikipedia\"", "wikipedia")]
    #[case("Mojeek", "mojeek")]
    #[case("wikipedia, auto", "wikipedia,duckduckgo")]
    #[case("duckduckgo,auto", "duckduckgo")]
    fn backend_resolution(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(resolve_backend(raw, "duckduckgo"), expected);
    }

    #[test]
    fn backend_auto_is_deterministic() {
        let args = obj(json!({"backend": "auto"}));
        let first = backend(&args, &TEXT_BACKEND, "duckduckgo").unwrap();
        for _ in 0..50 {
            assert_eq!(backend(&args, &TEXT_BACKEND, "duckduckgo").unwrap(), first);
        }
        assert_eq!(backend(&obj(json!({})), &TEXT_BACKEND, "duckduckgo").unwrap(), first);
    }
}
