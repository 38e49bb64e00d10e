//! Parameter sources and the lookup-or-default routine

use crate::value::{Parameter, ParameterKind, ParameterValue};
use std::collections::{BTreeMap, HashMap};

/// Read access to a key-value parameter store
pub trait ParameterSource {
    fn get(&self, key: &str) -> Option<&ParameterValue>;
}

impl<S: ParameterSource + ?Sized> ParameterSource for &S {
    fn get(&self, key: &str) -> Option<&ParameterValue> {
        (**self).get(key)
    }
}

impl ParameterSource for HashMap<String, ParameterValue> {
    fn get(&self, key: &str) -> Option<&ParameterValue> {
        HashMap::get(self, key)
    }
}

impl ParameterSource for BTreeMap<String, ParameterValue> {
    fn get(&self, key: &str) -> Option<&ParameterValue> {
        BTreeMap::get(self, key)
    }
}

/// Read `key` from `source` as a `T`, or return `default`.
///
/// Never fails: a missing key and a value of the wrong type both yield the
/// default.
pub fn get_or<T, S>(source: &S, key: &str, default: T) -> T
where
    T: Parameter,
    S: ParameterSource + ?Sized,
{
    match source.get(key) {
        None => {
            tracing::debug!(key, "parameter not set, using default");
            default
        }
        Some(value) => match T::from_parameter(value) {
            Some(parsed) => parsed,
            None => {
                tracing::warn!(
                    key,
                    expected = %T::KIND,
                    found = %value.kind(),
                    "parameter has an incompatible value, using default"
                );
                default
            }
        },
    }
}

/// One row of a parameter table: the key, its type and default.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub key: &'static str,
    pub kind: ParameterKind,
    pub default: ParameterValue,
    pub description: &'static str,
    /// Compiled-in value that is never read from a source
    pub fixed: bool,
}

/// A record populated field-by-field from a [`ParameterSource`].
///
/// Implemented through `#[derive(ParameterTableDerive)]`.
pub trait ParameterTable: Sized {
    /// Build the record, defaulting every field the source does not supply.
    fn load<S: ParameterSource + ?Sized>(source: &S) -> Self;

    /// The declared table, in field order.
    fn parameter_specs() -> Vec<ParameterSpec>;

    /// Current values keyed like [`ParameterTable::parameter_specs`].
    fn parameters(&self) -> Vec<(&'static str, ParameterValue)>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_uses_default() {
        let source: HashMap<String, ParameterValue> = HashMap::new();
        assert!(get_or(&source, "voxelize", true));
    }

    #[test]
    fn present_key_overrides_default() {
        let mut source = HashMap::new();
        source.insert("voxelize".to_string(), ParameterValue::Bool(false));
        assert!(!get_or(&source, "voxelize", true));
    }

    #[test]
    fn wrong_type_uses_default() {
        let mut source = BTreeMap::new();
        source.insert(
            "num_samples".to_string(),
            ParameterValue::String("lots".to_string()),
        );
        assert_eq!(get_or(&source, "num_samples", 100usize), 100);
    }

    #[test]
    fn works_through_trait_objects() {
        let mut map = HashMap::new();
        map.insert("device".to_string(), ParameterValue::Integer(1));
        let source: &dyn ParameterSource = &map;
        assert_eq!(get_or(source, "device", 0i32), 1);
    }
}
