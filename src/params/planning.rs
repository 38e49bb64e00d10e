use grasp_bridge_macros::ParameterTableDerive;
use schemars::JsonSchema;
use serde::Serialize;

/// Parameters consumed by a grasp planner built on top of the detector.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema, ParameterTableDerive)]
pub struct PlanningConfig {
    /// Seconds to wait for a grasp service response
    #[param(default = 0)]
    pub grasp_service_timeout: i32,
    /// Minimum score for a grasp to be planned
    #[param(default = 200)]
    pub grasp_score_threshold: i32,
    /// Frame grasp poses are expressed in
    #[param(default = "base")]
    pub grasp_frame_id: String,
    /// Preferred approach direction
    #[param(default = [0.0, 0.0, -1.0])]
    pub grasp_approach: [f64; 3],
    /// Maximum angle between a grasp approach and the preferred approach
    #[param(default = std::f64::consts::PI)]
    pub grasp_approach_angle: f64,
    /// Offset added to grasp positions
    #[param(default = vec![0.0, 0.0, 0.0])]
    pub grasp_offset: Vec<f64>,
    /// Bounding box for grasp positions `[x_min, x_max, y_min, y_max, z_min, z_max]`
    #[serde(rename = "grasp_boundry")]
    #[param(key = "grasp_boundry", default = vec![-1.0, 1.0, -1.0, 1.0, -1.0, 1.0])]
    pub grasp_boundary: Vec<f64>,
    /// Distance from the end-effector link to the grasp point
    #[param(default = 0.154)]
    pub eef_offset: f64,
    #[param(default = 0.0)]
    pub eef_yaw_offset: f64,
    #[param(default = 0.06)]
    pub grasp_min_distance: f64,
    /// Pre-grasp standoff along the approach
    #[param(default = 0.1)]
    pub grasp_desired_distance: f64,

    #[param(default = vec!["panda_finger_joint1".into(), "panda_finger_joint2".into()])]
    pub finger_joint_names: Vec<String>,
    /// Finger joint positions of an open gripper
    #[param(default = vec![-0.01, 0.01])]
    pub finger_positions_open: Vec<f64>,
    /// Finger joint positions of a closed gripper
    #[param(default = vec![0.0, 0.0])]
    pub finger_positions_close: Vec<f64>,
}
