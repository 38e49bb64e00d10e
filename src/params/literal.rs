//! Command-line style `key:=value` overrides

use super::ParamError;
use grasp_bridge_macros::ParameterValue;
use regex::Regex;
use std::sync::LazyLock;

static KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*$").expect("parameter key pattern is valid")
});

/// Check that `key` is a usable parameter name (`finger_width`, `hand.depth`).
pub fn validate_key(key: &str) -> Result<(), ParamError> {
    if KEY_PATTERN.is_match(key) {
        Ok(())
    } else {
        Err(ParamError::InvalidKey {
            key: key.to_string(),
        })
    }
}

/// Parse a single `key:=value` override.
///
/// ```rust
/// use grasp_bridge::params::parse_override;
/// use grasp_bridge::params::ParameterValue;
///
/// let (key, value) = parse_override("workspace:=[-0.5, 0.5, -0.5, 0.5, 0, 1]").unwrap();
/// assert_eq!(key, "workspace");
/// assert_eq!(
///     value,
///     ParameterValue::DoubleArray(vec![-0.5, 0.5, -0.5, 0.5, 0.0, 1.0])
/// );
/// ```
pub fn parse_override(input: &str) -> Result<(String, ParameterValue), ParamError> {
    let (key, raw) = input
        .split_once(":=")
        .ok_or_else(|| ParamError::InvalidOverride {
            input: input.to_string(),
        })?;
    let key = key.trim();
    validate_key(key)?;
    let value = parse_literal(key, raw.trim())?;
    Ok((key.to_string(), value))
}

/// Type a raw value the way a parameter file would: booleans, integers,
/// doubles, quoted or bare strings, and `[a, b, ...]` arrays.
///
/// Array elements are split on commas, so strings inside an array cannot
/// contain one.
pub fn parse_literal(key: &str, raw: &str) -> Result<ParameterValue, ParamError> {
    if let Some(inner) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        let inner = inner.trim();
        if inner.is_empty() {
            return Ok(ParameterValue::DoubleArray(Vec::new()));
        }
        let items = inner.split(',').map(|item| parse_scalar(item.trim())).collect();
        return array_from_scalars(key, items);
    }
    Ok(parse_scalar(raw))
}

fn parse_scalar(raw: &str) -> ParameterValue {
    match raw {
        "true" | "True" | "TRUE" => return ParameterValue::Bool(true),
        "false" | "False" | "FALSE" => return ParameterValue::Bool(false),
        _ => {}
    }
    if let Some(unquoted) = unquote(raw) {
        return ParameterValue::String(unquoted.to_string());
    }
    if let Ok(i) = raw.parse::<i64>() {
        return ParameterValue::Integer(i);
    }
    if let Ok(d) = raw.parse::<f64>() {
        return ParameterValue::Double(d);
    }
    ParameterValue::String(raw.to_string())
}

fn unquote(raw: &str) -> Option<&str> {
    ['"', '\'']
        .into_iter()
        .find_map(|q| raw.strip_prefix(q).and_then(|r| r.strip_suffix(q)))
}

/// Collapse scalars into one homogeneous array value.
///
/// Mixed integers and doubles become a double array; any other mix is
/// rejected.
pub(crate) fn array_from_scalars(
    key: &str,
    items: Vec<ParameterValue>,
) -> Result<ParameterValue, ParamError> {
    if items.is_empty() {
        return Ok(ParameterValue::DoubleArray(Vec::new()));
    }

    if let Some(bools) = items
        .iter()
        .map(|v| match v {
            ParameterValue::Bool(b) => Some(*b),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()
    {
        return Ok(ParameterValue::BoolArray(bools));
    }

    if let Some(ints) = items
        .iter()
        .map(|v| match v {
            ParameterValue::Integer(i) => Some(*i),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()
    {
        return Ok(ParameterValue::IntegerArray(ints));
    }

    if let Some(doubles) = items
        .iter()
        .map(|v| match v {
            ParameterValue::Integer(i) => Some(*i as f64),
            ParameterValue::Double(d) => Some(*d),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()
    {
        return Ok(ParameterValue::DoubleArray(doubles));
    }

    if let Some(strings) = items
        .iter()
        .map(|v| match v {
            ParameterValue::String(s) => Some(s.clone()),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()
    {
        return Ok(ParameterValue::StringArray(strings));
    }

    Err(ParamError::UnsupportedValue {
        key: key.to_string(),
        reason: "array elements must all have the same type".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scalars() {
        assert_eq!(parse_literal("k", "true").unwrap(), ParameterValue::Bool(true));
        assert_eq!(parse_literal("k", "False").unwrap(), ParameterValue::Bool(false));
        assert_eq!(parse_literal("k", "8").unwrap(), ParameterValue::Integer(8));
        assert_eq!(parse_literal("k", "-3").unwrap(), ParameterValue::Integer(-3));
        assert_eq!(parse_literal("k", "0.154").unwrap(), ParameterValue::Double(0.154));
        assert_eq!(parse_literal("k", "1e-3").unwrap(), ParameterValue::Double(0.001));
        assert_eq!(
            parse_literal("k", "base_link").unwrap(),
            ParameterValue::String("base_link".to_string())
        );
    }

    #[test]
    fn quoted_values_stay_strings() {
        assert_eq!(
            parse_literal("k", "\"42\"").unwrap(),
            ParameterValue::String("42".to_string())
        );
        assert_eq!(
            parse_literal("k", "'true'").unwrap(),
            ParameterValue::String("true".to_string())
        );
        assert_eq!(
            parse_literal("k", "\"\"").unwrap(),
            ParameterValue::String(String::new())
        );
    }

    #[test]
    fn parses_arrays() {
        assert_eq!(
            parse_literal("k", "[0, 0, -1]").unwrap(),
            ParameterValue::IntegerArray(vec![0, 0, -1])
        );
        assert_eq!(
            parse_literal("k", "[-0.01, 0]").unwrap(),
            ParameterValue::DoubleArray(vec![-0.01, 0.0])
        );
        assert_eq!(
            parse_literal("k", "[true,false]").unwrap(),
            ParameterValue::BoolArray(vec![true, false])
        );
        assert_eq!(
            parse_literal("k", "[joint_a, 'joint_b']").unwrap(),
            ParameterValue::StringArray(vec!["joint_a".to_string(), "joint_b".to_string()])
        );
        assert_eq!(
            parse_literal("k", "[ ]").unwrap(),
            ParameterValue::DoubleArray(Vec::new())
        );
    }

    #[test]
    fn mixed_arrays_are_rejected() {
        let err = parse_literal("grasp_offset", "[1, yes_please]").unwrap_err();
        assert!(matches!(err, ParamError::UnsupportedValue { ref key, .. } if key == "grasp_offset"));
    }

    #[test]
    fn parses_overrides() {
        let (key, value) = parse_override("num_samples:=250").unwrap();
        assert_eq!(key, "num_samples");
        assert_eq!(value, ParameterValue::Integer(250));

        let (key, value) = parse_override(" grasp_frame_id := world ").unwrap();
        assert_eq!(key, "grasp_frame_id");
        assert_eq!(value, ParameterValue::String("world".to_string()));
    }

    #[test]
    fn override_without_separator_is_rejected() {
        let err = parse_override("num_samples=250").unwrap_err();
        assert!(matches!(err, ParamError::InvalidOverride { .. }));
    }

    #[test]
    fn override_with_bad_key_is_rejected() {
        let err = parse_override("9lives:=1").unwrap_err();
        assert!(matches!(err, ParamError::InvalidKey { ref key } if key == "9lives"));
        assert!(parse_override(":=1").is_err());
    }

    #[test]
    fn validates_keys() {
        assert!(validate_key("finger_width").is_ok());
        assert!(validate_key("hand.depth").is_ok());
        assert!(validate_key("_private").is_ok());
        assert!(validate_key("has space").is_err());
        assert!(validate_key("").is_err());
    }
}
