use grasp_bridge_macros::ParameterTableDerive;
use schemars::JsonSchema;
use serde::Serialize;

/// Gripper opening range `[min, max]` in meters. Not configurable.
pub const GRIPPER_WIDTH_RANGE: [f64; 2] = [0.03, 0.10];

/// Parameters handed to the grasp detection library.
///
/// Distances are in meters. Every field falls back to its default when the
/// source does not provide a compatible value; ranges are not validated.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema, ParameterTableDerive)]
pub struct DetectionConfig {
    /// Finger width
    #[param(default = 0.005)]
    pub finger_width: f64,
    /// Diameter of the hand opening
    #[param(default = 0.12)]
    pub hand_outer_diameter: f64,
    /// Finger length
    #[param(default = 0.06)]
    pub hand_depth: f64,
    /// Hand extent along the approach normal
    #[param(default = 0.02)]
    pub hand_height: f64,
    /// Minimum depth the object must reach into the hand
    #[param(default = 0.01)]
    pub init_bite: f64,

    /// Neighborhood radius for local reference frames
    #[param(default = 0.01)]
    pub nn_radius: f64,
    /// Hand orientations evaluated per sample
    #[param(default = 8)]
    pub num_orientations: usize,
    /// Points sampled from the cloud
    #[param(default = 100)]
    pub num_samples: usize,
    /// Worker threads for the hand search
    #[param(default = 4)]
    pub num_threads: usize,
    /// Axis the hand is rotated about (0 = x, 1 = y, 2 = z)
    #[param(default = 2)]
    pub rotation_axis: usize,

    #[param(default = false)]
    pub plot_samples: bool,
    #[param(default = false)]
    pub plot_normals: bool,
    #[param(default = false)]
    pub plot_filtered_grasps: bool,
    #[param(default = false)]
    pub plot_valid_grasps: bool,
    #[param(default = false)]
    pub plot_clusters: bool,
    #[param(default = false)]
    pub plot_selected_grasps: bool,

    /// Remove statistical outliers before sampling
    #[param(default = false)]
    pub remove_outliers: bool,
    /// Voxelize the cloud before sampling
    #[param(default = true)]
    pub voxelize: bool,
    /// Cloud bounding box `[x_min, x_max, y_min, y_max, z_min, z_max]`
    #[param(default = vec![-1.0, 1.0, -1.0, 1.0, -1.0, 1.0])]
    pub workspace: Vec<f64>,

    /// Classifier network definition
    #[param(default = "")]
    pub model_file: String,
    /// Classifier weights
    #[serde(rename = "trained_file")]
    #[param(key = "trained_file", default = "")]
    pub weights_file: String,
    #[param(default = 500.0)]
    pub min_score_diff: f64,
    #[param(default = false)]
    pub create_image_batches: bool,
    /// Inference device index
    #[param(default = 0)]
    pub device: i32,

    /// Side length of the grasp image in pixels
    #[param(default = 60)]
    pub image_size: usize,
    #[param(default = 15)]
    pub image_num_channels: usize,
    /// Remove the support plane before computing grasp images
    #[serde(rename = "remove_plane_before_image_calculation")]
    #[param(key = "remove_plane_before_image_calculation", default = false)]
    pub remove_plane: bool,

    #[param(default = false)]
    pub filter_grasps: bool,
    /// Keep only half-antipodal grasps
    #[param(default = false)]
    pub filter_half_antipodal: bool,
    /// Gripper opening range `[min, max]`
    #[param(fixed = GRIPPER_WIDTH_RANGE.to_vec())]
    pub gripper_width_range: Vec<f64>,

    /// Minimum cluster size for a grasp to survive clustering
    #[param(default = 1)]
    pub min_inliers: usize,
    /// Grasps reported per detection
    #[param(default = 5)]
    pub num_selected: usize,
}

impl DetectionConfig {
    /// Bounding box applied to grasp positions; the same box as the cloud
    /// workspace.
    pub fn workspace_grasps(&self) -> &[f64] {
        &self.workspace
    }
}
