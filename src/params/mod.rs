//! Parameter loading
//!
//! Reads the detection and planning parameter tables from a layered
//! key-value store. Every lookup goes through
//! [`grasp_bridge_macros::get_or`]: a missing or incompatible value yields the
//! field's default and never an error.

pub mod detection;
mod error;
mod literal;
pub mod planning;
mod store;

pub use detection::{DetectionConfig, GRIPPER_WIDTH_RANGE};
pub use error::ParamError;
pub use grasp_bridge_macros::{
    ParameterKind, ParameterSource, ParameterSpec, ParameterTable, ParameterValue,
};
pub use literal::{parse_literal, parse_override, validate_key};
pub use planning::PlanningConfig;
pub use store::{ENV_PREFIX, ParameterStore};

/// Read the grasp detection parameters from `source`.
pub fn load_detection_config<S: ParameterSource + ?Sized>(source: &S) -> DetectionConfig {
    DetectionConfig::load(source)
}

/// Read the grasp planning parameters from `source`.
pub fn load_planning_config<S: ParameterSource + ?Sized>(source: &S) -> PlanningConfig {
    PlanningConfig::load(source)
}

/// Keys in `store` that neither table reads, sorted.
pub fn unknown_keys(store: &ParameterStore) -> Vec<&str> {
    let known: Vec<&'static str> = DetectionConfig::parameter_specs()
        .into_iter()
        .chain(PlanningConfig::parameter_specs())
        .filter(|spec| !spec.fixed)
        .map(|spec| spec.key)
        .collect();
    store
        .iter()
        .map(|(key, _)| key)
        .filter(|key| !known.iter().any(|k| k == key))
        .collect()
}
