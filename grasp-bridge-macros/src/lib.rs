//! Declarative parameter tables for grasp-bridge
//!
//! This crate provides the `ParameterTable` derive macro together with the
//! runtime pieces it expands to: parameter values, the source trait, and the
//! single lookup-or-default routine every generated field goes through.
//!
//! # Usage
//!
//! ```rust
//! use grasp_bridge_macros::{ParameterTable, ParameterTableDerive, ParameterValue};
//! use std::collections::HashMap;
//!
//! #[derive(ParameterTableDerive, Debug)]
//! pub struct HandGeometry {
//!     /// Width of each finger
//!     #[param(default = 0.005)]
//!     pub finger_width: f64,
//!     #[param(key = "hand_outer_diameter", default = 0.12)]
//!     pub outer_diameter: f64,
//!     #[param(fixed = vec![0.03, 0.10])]
//!     pub width_range: Vec<f64>,
//! }
//!
//! let mut params = HashMap::new();
//! params.insert("finger_width".to_string(), ParameterValue::Double(0.01));
//!
//! let hand = HandGeometry::load(&params);
//! assert_eq!(hand.finger_width, 0.01);
//! assert_eq!(hand.outer_diameter, 0.12);
//! ```
//!
//! # Field attributes
//!
//! - **`#[param(default = EXPR)]`**: read the field under its own name
//! - **`#[param(key = "name", default = EXPR)]`**: read it under another key
//! - **`#[param(fixed = EXPR)]`**: always `EXPR`, never read
//! - **No attribute**: `Default::default()`, never read
//!
//! String literal defaults are converted to `String`. Doc comments on fields
//! become the description in [`ParameterSpec`].
//!
//! The derive also implements `Default` using the declared defaults.

extern crate self as grasp_bridge_macros;

mod parameter_table;
mod value;

pub use parameter_table::{get_or, ParameterSource, ParameterSpec, ParameterTable};
pub use value::{Parameter, ParameterKind, ParameterValue};

// Re-export the derive macro
pub use grasp_bridge_macros_impl::ParameterTable as ParameterTableDerive;
