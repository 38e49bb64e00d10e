//! Grasp detection result messages

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, Copy, PartialEq, Eq, Default)]
pub struct Time {
    pub sec: i32,
    pub nanosec: u32,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, PartialEq, Eq, Default)]
pub struct Header {
    pub stamp: Time,
    pub frame_id: String,
}

/// A single grasp candidate
#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, PartialEq, Default)]
pub struct GraspConfig {
    /// Centre of the hand base
    pub bottom: Point,
    /// Centre between the fingertips
    pub top: Point,
    /// Centre of the grasp on the object surface
    pub surface: Point,
    pub approach: Vector3,
    /// Closing direction of the fingers
    pub binormal: Vector3,
    /// Hand axis
    pub axis: Vector3,
    /// Opening width of the hand
    pub width: f64,
    pub score: f64,
    /// Point the candidate was generated from
    pub sample: Point,
}

/// Detection result delivered to a [`GraspCallback`](crate::detector::GraspCallback)
#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, PartialEq, Default)]
pub struct GraspConfigList {
    pub header: Header,
    #[serde(default)]
    pub object_name: String,
    #[serde(default)]
    pub grasps: Vec<GraspConfig>,
}

impl GraspConfigList {
    pub fn new(frame_id: impl Into<String>, object_name: impl Into<String>) -> Self {
        Self {
            header: Header {
                stamp: Time::default(),
                frame_id: frame_id.into(),
            },
            object_name: object_name.into(),
            grasps: Vec::new(),
        }
    }

    pub fn with_grasps(mut self, grasps: Vec<GraspConfig>) -> Self {
        self.grasps = grasps;
        self
    }

    /// Highest scoring grasp, if any
    pub fn best(&self) -> Option<&GraspConfig> {
        self.grasps
            .iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}
