use super::literal::{array_from_scalars, parse_literal, parse_override, validate_key};
use super::ParamError;
use grasp_bridge_macros::{ParameterSource, ParameterValue};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Prefix of environment variables that override parameters,
/// e.g. `GRASP_PARAM_FINGER_WIDTH=0.01`.
pub const ENV_PREFIX: &str = "GRASP_PARAM_";

/// Key under which node parameters are nested in middleware parameter files
const NODE_PARAMETERS_KEY: &str = "ros__parameters";

/// In-memory key-value parameter store.
///
/// Files, environment variables and `key:=value` overrides are layered into
/// one store; later layers replace earlier values key by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterStore {
    values: BTreeMap<String, ParameterValue>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, ParameterValue)>,
        K: Into<String>,
    {
        Self {
            values: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: ParameterValue) -> Option<ParameterValue> {
        self.values.insert(key.into(), value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Layer `other` on top of this store.
    pub fn merge(&mut self, other: ParameterStore) {
        self.values.extend(other.values);
    }

    /// Load a `.toml` or `.json` parameter file.
    ///
    /// Nested tables are flattened into dotted keys, except that a
    /// `<node>.ros__parameters` table contributes its entries at the top
    /// level. Other entries of `<node>` keep the `<node>.` prefix.
    pub fn from_file(path: &Path) -> Result<Self, ParamError> {
        let content = std::fs::read_to_string(path).map_err(|source| ParamError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let store = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content)?,
            Some("json") => Self::from_json_str(&content)?,
            _ => {
                return Err(ParamError::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };

        tracing::info!(
            path = %path.display(),
            count = store.len(),
            "loaded parameter file"
        );
        Ok(store)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ParamError> {
        let table: toml::Table = toml::from_str(content)?;
        let mut store = Self::new();
        store.flatten_toml("", &table)?;
        Ok(store)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ParamError> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        let serde_json::Value::Object(map) = value else {
            return Err(ParamError::UnsupportedValue {
                key: String::new(),
                reason: "top level of a JSON parameter file must be an object".to_string(),
            });
        };
        let mut store = Self::new();
        store.flatten_json("", &map)?;
        Ok(store)
    }

    /// Collect `GRASP_PARAM_*` variables; the rest of the name, lowercased,
    /// is the key.
    pub fn from_env_vars<I>(vars: I) -> Result<Self, ParamError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut store = Self::new();
        for (name, raw) in vars {
            let Some(suffix) = name.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let key = suffix.to_ascii_lowercase();
            validate_key(&key)?;
            let value = parse_literal(&key, raw.trim())?;
            tracing::debug!(key = %key, variable = %name, "parameter set from environment");
            store.insert(key, value);
        }
        Ok(store)
    }

    /// Read the process environment. Variables outside the prefix are
    /// skipped whatever their encoding; a prefixed one must be UTF-8.
    pub fn from_env() -> Result<Self, ParamError> {
        let mut vars = Vec::new();
        for (name, value) in std::env::vars_os() {
            let Some(name) = name.to_str().filter(|n| n.starts_with(ENV_PREFIX)) else {
                continue;
            };
            let value = value.into_string().map_err(|_| ParamError::NonUnicodeEnv {
                name: name.to_string(),
            })?;
            vars.push((name.to_string(), value));
        }
        Self::from_env_vars(vars)
    }

    /// Apply `key:=value` overrides in order.
    pub fn apply_overrides<S: AsRef<str>>(&mut self, overrides: &[S]) -> Result<(), ParamError> {
        for input in overrides {
            let (key, value) = parse_override(input.as_ref())?;
            self.insert(key, value);
        }
        Ok(())
    }

    /// Build the layered store: files in order, then the environment (when
    /// `use_env` is set), then explicit overrides.
    pub fn resolve<S: AsRef<str>>(
        files: &[PathBuf],
        use_env: bool,
        overrides: &[S],
    ) -> Result<Self, ParamError> {
        let mut store = Self::new();
        for path in files {
            store.merge(Self::from_file(path)?);
        }
        if use_env {
            store.merge(Self::from_env()?);
        }
        store.apply_overrides(overrides)?;
        Ok(store)
    }

    fn flatten_toml(&mut self, prefix: &str, table: &toml::Table) -> Result<(), ParamError> {
        for (name, value) in table {
            let key = join_key(prefix, name);
            match value {
                toml::Value::Table(inner) => {
                    if let Some(toml::Value::Table(params)) = inner.get(NODE_PARAMETERS_KEY) {
                        self.flatten_toml("", params)?;
                        let mut siblings = inner.clone();
                        siblings.remove(NODE_PARAMETERS_KEY);
                        self.flatten_toml(&key, &siblings)?;
                    } else {
                        self.flatten_toml(&key, inner)?;
                    }
                }
                other => {
                    let value = toml_to_parameter(&key, other)?;
                    self.insert(key, value);
                }
            }
        }
        Ok(())
    }

    fn flatten_json(
        &mut self,
        prefix: &str,
        map: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<(), ParamError> {
        for (name, value) in map {
            let key = join_key(prefix, name);
            match value {
                serde_json::Value::Object(inner) => {
                    if let Some(serde_json::Value::Object(params)) = inner.get(NODE_PARAMETERS_KEY) {
                        self.flatten_json("", params)?;
                        let mut siblings = inner.clone();
                        siblings.remove(NODE_PARAMETERS_KEY);
                        self.flatten_json(&key, &siblings)?;
                    } else {
                        self.flatten_json(&key, inner)?;
                    }
                }
                other => {
                    let value = json_to_parameter(&key, other)?;
                    self.insert(key, value);
                }
            }
        }
        Ok(())
    }
}

impl ParameterSource for ParameterStore {
    fn get(&self, key: &str) -> Option<&ParameterValue> {
        self.values.get(key)
    }
}

fn join_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn unsupported(key: &str, reason: &str) -> ParamError {
    ParamError::UnsupportedValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn toml_to_parameter(key: &str, value: &toml::Value) -> Result<ParameterValue, ParamError> {
    match value {
        toml::Value::Boolean(b) => Ok(ParameterValue::Bool(*b)),
        toml::Value::Integer(i) => Ok(ParameterValue::Integer(*i)),
        toml::Value::Float(f) => Ok(ParameterValue::Double(*f)),
        toml::Value::String(s) => Ok(ParameterValue::String(s.clone())),
        toml::Value::Array(items) => {
            let scalars = items
                .iter()
                .map(|item| match item {
                    toml::Value::Array(_) | toml::Value::Table(_) => {
                        Err(unsupported(key, "nested arrays and tables are not supported"))
                    }
                    scalar => toml_to_parameter(key, scalar),
                })
                .collect::<Result<Vec<_>, _>>()?;
            array_from_scalars(key, scalars)
        }
        toml::Value::Datetime(_) => Err(unsupported(key, "datetimes are not supported")),
        toml::Value::Table(_) => Err(unsupported(key, "tables are not values")),
    }
}

fn json_to_parameter(key: &str, value: &serde_json::Value) -> Result<ParameterValue, ParamError> {
    match value {
        serde_json::Value::Bool(b) => Ok(ParameterValue::Bool(*b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(ParameterValue::Integer(i))
            } else if let Some(f) = n.as_f64() {
                Ok(ParameterValue::Double(f))
            } else {
                Err(unsupported(key, "number out of range"))
            }
        }
        serde_json::Value::String(s) => Ok(ParameterValue::String(s.clone())),
        serde_json::Value::Array(items) => {
            let scalars = items
                .iter()
                .map(|item| match item {
                    serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                        Err(unsupported(key, "nested arrays and objects are not supported"))
                    }
                    scalar => json_to_parameter(key, scalar),
                })
                .collect::<Result<Vec<_>, _>>()?;
            array_from_scalars(key, scalars)
        }
        serde_json::Value::Null => Err(unsupported(key, "null is not a parameter value")),
        serde_json::Value::Object(_) => Err(unsupported(key, "objects are not values")),
    }
}
