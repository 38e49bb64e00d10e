//! Ready-made grasp callbacks

use super::GraspCallback;
use crate::msg::GraspConfigList;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// Forwards every result into a channel, for planners running on another
/// thread.
#[derive(Debug)]
pub struct ChannelCallback {
    tx: Sender<Arc<GraspConfigList>>,
}

impl ChannelCallback {
    pub fn new(tx: Sender<Arc<GraspConfigList>>) -> Self {
        Self { tx }
    }

    /// Callback plus the receiving end of its channel
    pub fn channel() -> (Self, Receiver<Arc<GraspConfigList>>) {
        let (tx, rx) = mpsc::channel();
        (Self::new(tx), rx)
    }
}

impl GraspCallback for ChannelCallback {
    fn grasp_callback(&self, msg: Arc<GraspConfigList>) {
        if self.tx.send(msg).is_err() {
            tracing::warn!("grasp result receiver disconnected, dropping result");
        }
    }
}

/// Keeps only the most recent result.
#[derive(Debug, Default)]
pub struct LatestGrasps {
    latest: Mutex<Option<Arc<GraspConfigList>>>,
}

impl LatestGrasps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<Arc<GraspConfigList>> {
        self.latest
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Remove and return the most recent result.
    pub fn take(&self) -> Option<Arc<GraspConfigList>> {
        match self.latest.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }
}

impl GraspCallback for LatestGrasps {
    fn grasp_callback(&self, msg: Arc<GraspConfigList>) {
        match self.latest.lock() {
            Ok(mut guard) => *guard = Some(msg),
            Err(poisoned) => *poisoned.into_inner() = Some(msg),
        }
    }
}
