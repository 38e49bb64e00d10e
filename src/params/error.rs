use std::path::PathBuf;

/// Errors raised while building a parameter store.
///
/// Lookups themselves never fail; these only come from reading files and
/// parsing overrides.
#[derive(Debug, thiserror::Error)]
pub enum ParamError {
    #[error("failed to read parameter file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported parameter file format: {path} (expected .toml or .json)")]
    UnsupportedFormat { path: PathBuf },
    #[error("invalid override '{input}' (expected key:=value)")]
    InvalidOverride { input: String },
    #[error("environment variable {name} is not valid UTF-8")]
    NonUnicodeEnv { name: String },
    #[error("invalid parameter name: {key}")]
    InvalidKey { key: String },
    #[error("unsupported value for parameter {key}: {reason}")]
    UnsupportedValue { key: String, reason: String },
}
