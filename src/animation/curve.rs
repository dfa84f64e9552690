//! Per-bone curve data captured during recording.

use glam::Quat;

use super::player::CurveSink;
use crate::maths::{angles_modulo_360, quat_from_euler_degrees};
use crate::rig::LocalPose;

/// Property names handed to a [`CurveSink`], one per channel.
pub const POSITION_PROPERTIES: [&str; 3] =
    ["localPosition.x", "localPosition.y", "localPosition.z"];
pub const ROTATION_PROPERTIES: [&str; 4] = [
    "localRotation.x",
    "localRotation.y",
    "localRotation.z",
    "localRotation.w",
];
pub const SCALE_PROPERTIES: [&str; 3] = ["localScale.x", "localScale.y", "localScale.z"];

/// One time-stamped scalar sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    /// Sample time in seconds from recording start.
    pub time: f32,
    /// Sampled component value.
    pub value: f32,
}

/// Append-only sequence of samples for one scalar component.
///
/// Times are non-decreasing in insertion order; recording only ever appends.
#[derive(Debug, Clone, Default)]
pub struct Channel {
    samples: Vec<CurveSample>,
}

impl Channel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample.
    pub fn push(&mut self, time: f32, value: f32) {
        self.samples.push(CurveSample { time, value });
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[CurveSample] {
        &self.samples
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Rebuild the channel from component values paired positionally with a
    /// shared timeline.
    pub fn set_keyframes(&mut self, values: &[f32], timeline: &[f32]) {
        self.samples.clear();
        self.samples.reserve(timeline.len());
        for (&time, &value) in timeline.iter().zip(values) {
            self.samples.push(CurveSample { time, value });
        }
    }
}

/// Which curve groups of a [`ChannelSet`] are sampled and serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CurveGroups {
    pub position: bool,
    pub rotation: bool,
    pub scale: bool,
}

/// The bundle of channels for one bone.
///
/// Every enabled channel holds the same number of samples, because each
/// sampling tick writes one sample to all enabled channels at once.
#[derive(Debug, Clone)]
pub struct ChannelSet {
    path: String,
    position: [Channel; 3],
    rotation: [Channel; 4],
    scale: [Channel; 3],
    groups: CurveGroups,
}

impl ChannelSet {
    /// Create an empty channel set for the bone at `path`, rotation-only.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            position: Default::default(),
            rotation: Default::default(),
            scale: Default::default(),
            groups: CurveGroups {
                position: false,
                rotation: true,
                scale: false,
            },
        }
    }

    /// Bone path this set belongs to, unique within a document.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn groups(&self) -> CurveGroups {
        self.groups
    }

    /// Select which curve groups are sampled.
    pub fn set_groups(&mut self, position: bool, rotation: bool, scale: bool) {
        self.groups = CurveGroups {
            position,
            rotation,
            scale,
        };
    }

    /// Drop all samples, keeping the group selection.
    pub fn clear(&mut self) {
        for c in &mut self.position {
            c.clear();
        }
        for c in &mut self.rotation {
            c.clear();
        }
        for c in &mut self.scale {
            c.clear();
        }
    }

    /// Number of recorded frames, taken from the rotation.x channel.
    pub fn frames(&self) -> usize {
        self.rotation[0].len()
    }

    pub fn position_channel(&self, component: usize) -> &Channel {
        &self.position[component]
    }

    pub fn rotation_channel(&self, component: usize) -> &Channel {
        &self.rotation[component]
    }

    pub fn scale_channel(&self, component: usize) -> &Channel {
        &self.scale[component]
    }

    /// Append one sample to every enabled channel.
    ///
    /// Rotation is normalized into (-180, 180] per axis before quaternion
    /// conversion so angle wraps do not bake discontinuities into playback.
    pub fn push_frame(&mut self, time: f32, pose: &LocalPose) {
        if self.groups.position {
            for (i, c) in self.position.iter_mut().enumerate() {
                c.push(time, pose.position[i]);
            }
        }
        if self.groups.rotation {
            let q: Quat = quat_from_euler_degrees(angles_modulo_360(pose.euler_degrees));
            for (c, value) in self.rotation.iter_mut().zip([q.x, q.y, q.z, q.w]) {
                c.push(time, value);
            }
        }
        if self.groups.scale {
            for (i, c) in self.scale.iter_mut().enumerate() {
                c.push(time, pose.scale[i]);
            }
        }
    }

    /// Rebuild one position component from decoded values and a timeline.
    pub fn set_position_keyframes(&mut self, component: usize, values: &[f32], timeline: &[f32]) {
        self.position[component].set_keyframes(values, timeline);
    }

    /// Rebuild one rotation component from decoded values and a timeline.
    pub fn set_rotation_keyframes(&mut self, component: usize, values: &[f32], timeline: &[f32]) {
        self.rotation[component].set_keyframes(values, timeline);
    }

    /// Hand every enabled, non-empty curve group to a playable-curve sink.
    pub fn apply_to<S: CurveSink>(&self, sink: &mut S) {
        if self.groups.position && !self.position[0].is_empty() {
            for (c, property) in self.position.iter().zip(POSITION_PROPERTIES) {
                sink.set_curve(&self.path, property, c.samples());
            }
        }
        if self.groups.rotation && !self.rotation[0].is_empty() {
            for (c, property) in self.rotation.iter().zip(ROTATION_PROPERTIES) {
                sink.set_curve(&self.path, property, c.samples());
            }
        }
        if self.groups.scale && !self.scale[0].is_empty() {
            for (c, property) in self.scale.iter().zip(SCALE_PROPERTIES) {
                sink.set_curve(&self.path, property, c.samples());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_new_is_rotation_only() {
        let set = ChannelSet::new("Root/Hips");
        assert_eq!(
            set.groups(),
            CurveGroups {
                position: false,
                rotation: true,
                scale: false
            }
        );
        assert_eq!(set.frames(), 0);
    }

    #[test]
    fn test_push_frame_alignment() {
        let mut set = ChannelSet::new("Root/Hips");
        set.set_groups(true, true, false);

        for i in 0..5 {
            set.push_frame(i as f32 * 0.1, &LocalPose::identity());
        }

        assert_eq!(set.frames(), 5);
        for i in 0..3 {
            assert_eq!(set.position_channel(i).len(), 5);
        }
        for i in 0..4 {
            assert_eq!(set.rotation_channel(i).len(), 5);
        }
        assert!(set.scale_channel(0).is_empty());
    }

    #[test]
    fn test_identity_rotation_samples() {
        let mut set = ChannelSet::new("Root");
        set.push_frame(0.0, &LocalPose::identity());

        for i in 0..3 {
            assert!(set.rotation_channel(i).samples()[0].value.abs() < 1e-6);
        }
        assert!((set.rotation_channel(3).samples()[0].value - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_disabled_groups_not_sampled() {
        let mut set = ChannelSet::new("Root/Spine");
        set.push_frame(0.0, &LocalPose::identity());

        assert_eq!(set.frames(), 1);
        assert!(set.position_channel(0).is_empty());
        assert!(set.scale_channel(0).is_empty());
    }

    #[test]
    fn test_clear_keeps_groups() {
        let mut set = ChannelSet::new("Root");
        set.set_groups(true, true, false);
        set.push_frame(0.0, &LocalPose::identity());
        set.clear();

        assert_eq!(set.frames(), 0);
        assert!(set.groups().position);
    }

    #[test]
    fn test_wrap_normalization_continuity() {
        // 359 degrees and -1 degree must sample to the same quaternion.
        let mut set = ChannelSet::new("Root");
        let mut pose = LocalPose::identity();
        pose.euler_degrees = Vec3::new(0.0, 359.0, 0.0);
        set.push_frame(0.0, &pose);
        pose.euler_degrees = Vec3::new(0.0, -1.0, 0.0);
        set.push_frame(0.016, &pose);

        for i in 0..4 {
            let samples = set.rotation_channel(i).samples();
            assert!((samples[0].value - samples[1].value).abs() < 1e-6);
        }
    }

    #[test]
    fn test_apply_to_skips_disabled_and_empty_groups() {
        use std::collections::BTreeSet;

        struct Names(BTreeSet<String>);
        impl crate::animation::CurveSink for Names {
            fn set_curve(&mut self, path: &str, property: &str, _samples: &[CurveSample]) {
                self.0.insert(format!("{path}:{property}"));
            }
        }

        let mut set = ChannelSet::new("Hips");
        set.set_groups(true, true, false);
        set.push_frame(0.0, &LocalPose::identity());

        let mut sink = Names(BTreeSet::new());
        set.apply_to(&mut sink);

        assert_eq!(sink.0.len(), 7);
        assert!(sink.0.contains("Hips:localPosition.x"));
        assert!(sink.0.contains("Hips:localRotation.w"));
        assert!(!sink.0.contains("Hips:localScale.x"));
    }

    #[test]
    fn test_set_keyframes_pairs_with_timeline() {
        let mut set = ChannelSet::new("Root");
        set.set_rotation_keyframes(0, &[0.5, 0.6], &[0.0, 0.1]);

        let samples = set.rotation_channel(0).samples();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1], CurveSample { time: 0.1, value: 0.6 });
    }
}
