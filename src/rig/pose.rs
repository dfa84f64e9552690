//! Live-pose access for sampling.

use glam::Vec3;

use super::NodeId;

/// Local transform state of one bone at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalPose {
    /// Local position relative to the parent bone.
    pub position: Vec3,
    /// Local rotation as Euler angles in degrees.
    pub euler_degrees: Vec3,
    /// Local scale.
    pub scale: Vec3,
}

impl LocalPose {
    /// Identity pose: zero translation and rotation, unit scale.
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            euler_degrees: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Default for LocalPose {
    fn default() -> Self {
        Self::identity()
    }
}

/// Source of live bone poses, read once per tick while recording.
///
/// Implemented by whatever owns the scene graph. Reads must reflect the
/// final pose for the current frame, so the recorder's tick has to run
/// after all systems that move the skeleton.
pub trait PoseSource {
    /// Current local pose of `node`.
    fn local_pose(&self, node: NodeId) -> LocalPose;
}
