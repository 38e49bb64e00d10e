//! Detector base and the grasp callback capability
//!
//! Concrete detectors embed a [`GraspDetectorBase`] and hand their results to
//! [`GraspDetectorBase::deliver`]. The base does no detection itself.

use crate::msg::GraspConfigList;
use std::sync::{Arc, Weak};

pub mod callbacks;

pub use callbacks::{ChannelCallback, LatestGrasps};

/// Receiver of grasp detection results, e.g. a grasp planner.
///
/// Error handling is up to the implementer; the detector ignores the outcome.
pub trait GraspCallback {
    fn grasp_callback(&self, msg: Arc<GraspConfigList>);
}

/// State shared by all grasp detectors: whether detection is running, which
/// object it targets, and where results go.
///
/// The callback is held weakly. The caller keeps the `Arc` alive for as long
/// as it wants results; once it is dropped, results are discarded. No
/// synchronization is provided.
#[derive(Debug, Default)]
pub struct GraspDetectorBase {
    started: bool,
    object_name: String,
    grasp_cb: Option<Weak<dyn GraspCallback>>,
}

impl GraspDetectorBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start detection for the object called `name`.
    pub fn start(&mut self, name: impl Into<String>) {
        self.started = true;
        self.object_name = name.into();
        tracing::debug!(object = %self.object_name, "grasp detection started");
    }

    /// Start detection without targeting a named object.
    pub fn start_any(&mut self) {
        self.start(String::new());
    }

    /// Stop detection. The target name is kept.
    pub fn stop(&mut self) {
        self.started = false;
        tracing::debug!(object = %self.object_name, "grasp detection stopped");
    }

    /// Register the receiver of detection results, replacing any previous
    /// one.
    pub fn register_callback<C: GraspCallback + 'static>(&mut self, cb: &Arc<C>) {
        self.register_weak(Arc::downgrade(cb) as Weak<dyn GraspCallback>);
    }

    /// Register an already type-erased receiver, e.g. one held as
    /// `Arc<dyn GraspCallback>`.
    pub fn register_weak(&mut self, cb: Weak<dyn GraspCallback>) {
        self.grasp_cb = Some(cb);
    }

    pub fn is_active(&self) -> bool {
        self.started
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    /// True while a registered callback is still alive.
    pub fn has_callback(&self) -> bool {
        self.grasp_cb
            .as_ref()
            .is_some_and(|cb| cb.strong_count() > 0)
    }

    /// Hand `msg` to the registered callback.
    ///
    /// Returns `false` when there is no live callback and the result was
    /// dropped. Whether to deliver while stopped is the caller's decision.
    pub fn deliver(&self, msg: impl Into<Arc<GraspConfigList>>) -> bool {
        let Some(cb) = self.grasp_cb.as_ref().and_then(Weak::upgrade) else {
            tracing::debug!("no grasp callback registered, dropping result");
            return false;
        };
        cb.grasp_callback(msg.into());
        true
    }
}
