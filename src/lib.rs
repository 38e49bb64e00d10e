pub mod config;
pub mod detector;
pub mod msg;
pub mod params;
pub mod render;

pub use detector::{GraspCallback, GraspDetectorBase};
pub use msg::GraspConfigList;
pub use params::{DetectionConfig, ParameterStore, PlanningConfig};
