//! Every documented parameter key: defaults from an empty store, overrides
//! from a populated one.

use grasp_bridge::params::{
    DetectionConfig, ParameterSpec, ParameterStore, ParameterTable, ParameterValue,
    PlanningConfig, load_detection_config, load_planning_config,
};

#[test]
fn detection_defaults_from_empty_store() {
    let config = load_detection_config(&ParameterStore::new());

    assert_eq!(config.finger_width, 0.005);
    assert_eq!(config.hand_outer_diameter, 0.12);
    assert_eq!(config.hand_depth, 0.06);
    assert_eq!(config.hand_height, 0.02);
    assert_eq!(config.init_bite, 0.01);
    assert_eq!(config.nn_radius, 0.01);
    assert_eq!(config.num_orientations, 8);
    assert_eq!(config.num_samples, 100);
    assert_eq!(config.num_threads, 4);
    assert_eq!(config.rotation_axis, 2);
    assert!(!config.plot_samples);
    assert!(!config.plot_normals);
    assert!(!config.plot_filtered_grasps);
    assert!(!config.plot_valid_grasps);
    assert!(!config.plot_clusters);
    assert!(!config.plot_selected_grasps);
    assert!(!config.remove_outliers);
    assert!(config.voxelize);
    assert_eq!(config.workspace, vec![-1.0, 1.0, -1.0, 1.0, -1.0, 1.0]);
    assert_eq!(config.workspace_grasps(), config.workspace.as_slice());
    assert_eq!(config.model_file, "");
    assert_eq!(config.weights_file, "");
    assert_eq!(config.min_score_diff, 500.0);
    assert!(!config.create_image_batches);
    assert_eq!(config.device, 0);
    assert_eq!(config.image_size, 60);
    assert_eq!(config.image_num_channels, 15);
    assert!(!config.remove_plane);
    assert!(!config.filter_grasps);
    assert!(!config.filter_half_antipodal);
    assert_eq!(config.gripper_width_range, vec![0.03, 0.10]);
    assert_eq!(config.min_inliers, 1);
    assert_eq!(config.num_selected, 5);
}

#[test]
fn planning_defaults_from_empty_store() {
    let config = load_planning_config(&ParameterStore::new());

    assert_eq!(config.grasp_service_timeout, 0);
    assert_eq!(config.grasp_score_threshold, 200);
    assert_eq!(config.grasp_frame_id, "base");
    assert_eq!(config.grasp_approach, [0.0, 0.0, -1.0]);
    assert_eq!(config.grasp_approach_angle, std::f64::consts::PI);
    assert_eq!(config.grasp_offset, vec![0.0, 0.0, 0.0]);
    assert_eq!(config.grasp_boundary, vec![-1.0, 1.0, -1.0, 1.0, -1.0, 1.0]);
    assert_eq!(config.eef_offset, 0.154);
    assert_eq!(config.eef_yaw_offset, 0.0);
    assert_eq!(config.grasp_min_distance, 0.06);
    assert_eq!(config.grasp_desired_distance, 0.1);
    assert_eq!(
        config.finger_joint_names,
        vec![
            "panda_finger_joint1".to_string(),
            "panda_finger_joint2".to_string()
        ]
    );
    assert_eq!(config.finger_positions_open, vec![-0.01, 0.01]);
    assert_eq!(config.finger_positions_close, vec![0.0, 0.0]);
}

#[test]
fn workspace_and_boundary_stay_independent() {
    let store = ParameterStore::from_pairs([(
        "workspace",
        ParameterValue::DoubleArray(vec![0.0, 0.5, 0.0, 0.5, 0.0, 0.5]),
    )]);
    let detection = load_detection_config(&store);
    let planning = load_planning_config(&store);

    assert_eq!(detection.workspace, vec![0.0, 0.5, 0.0, 0.5, 0.0, 0.5]);
    assert_eq!(planning.grasp_boundary, vec![-1.0, 1.0, -1.0, 1.0, -1.0, 1.0]);
}

/// A value of the same kind as `default` that differs from it.
fn changed(default: &ParameterValue) -> ParameterValue {
    match default {
        ParameterValue::Bool(b) => ParameterValue::Bool(!b),
        ParameterValue::Integer(i) => ParameterValue::Integer(i + 1),
        ParameterValue::Double(d) => ParameterValue::Double(d + 0.5),
        ParameterValue::String(s) => ParameterValue::String(format!("{}_override", s)),
        ParameterValue::BoolArray(v) => ParameterValue::BoolArray(v.iter().map(|b| !b).collect()),
        ParameterValue::IntegerArray(v) => {
            ParameterValue::IntegerArray(v.iter().map(|i| i + 1).collect())
        }
        ParameterValue::DoubleArray(v) => {
            ParameterValue::DoubleArray(v.iter().map(|d| d + 1.0).collect())
        }
        ParameterValue::StringArray(v) => {
            ParameterValue::StringArray(v.iter().map(|s| format!("{}_override", s)).collect())
        }
    }
}

fn assert_every_key_overrides<T: ParameterTable>(specs: Vec<ParameterSpec>) {
    let configurable: Vec<&ParameterSpec> = specs.iter().filter(|s| !s.fixed).collect();
    let store =
        ParameterStore::from_pairs(configurable.iter().map(|s| (s.key, changed(&s.default))));

    let loaded = T::load(&store);
    let values = loaded.parameters();

    for spec in configurable {
        let (_, actual) = values
            .iter()
            .find(|(key, _)| *key == spec.key)
            .unwrap_or_else(|| panic!("{} missing from parameters()", spec.key));
        assert_eq!(actual, &changed(&spec.default), "override ignored for {}", spec.key);
        assert_ne!(actual, &spec.default, "{} still at default", spec.key);
    }
}

#[test]
fn every_detection_key_accepts_an_override() {
    assert_every_key_overrides::<DetectionConfig>(DetectionConfig::parameter_specs());
}

#[test]
fn every_planning_key_accepts_an_override() {
    assert_every_key_overrides::<PlanningConfig>(PlanningConfig::parameter_specs());
}

#[test]
fn wrong_types_fall_back_for_every_key() {
    let specs = DetectionConfig::parameter_specs()
        .into_iter()
        .chain(PlanningConfig::parameter_specs());
    // A bool array is not a valid value for any key.
    let store = ParameterStore::from_pairs(
        specs.map(|s| (s.key, ParameterValue::BoolArray(vec![true, false]))),
    );

    assert_eq!(load_detection_config(&store), DetectionConfig::default());
    assert_eq!(load_planning_config(&store), PlanningConfig::default());
}

#[test]
fn gripper_width_range_is_fixed() {
    let store = ParameterStore::from_pairs([
        (
            "gripper_width_range",
            ParameterValue::DoubleArray(vec![0.0, 0.5]),
        ),
        ("finger_width", ParameterValue::Double(0.02)),
    ]);
    let config = load_detection_config(&store);
    assert_eq!(config.gripper_width_range, vec![0.03, 0.10]);
    assert_eq!(config.finger_width, 0.02);
}
