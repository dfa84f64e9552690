//! In-memory recording document handed to the codec for one save.

use super::curve::ChannelSet;
use super::player::CurveSink;

/// Complete bundle for one save operation: shared timeline, the root
/// channel set (position + rotation) and auxiliary sets (rotation only).
///
/// Curve values line up positionally with the timeline: value `i` of every
/// channel belongs to `timeline[i]`. Per-curve times are not stored in the
/// binary form.
#[derive(Debug, Clone)]
pub struct RecordingDocument {
    timeline: Vec<f32>,
    root: ChannelSet,
    auxiliary: Vec<ChannelSet>,
}

impl RecordingDocument {
    /// Assemble a document from the root set and the remaining sets.
    ///
    /// The timeline is taken from the root set's rotation.x sample times.
    /// Sets that never received a frame are dropped.
    pub fn assemble(root: ChannelSet, others: impl IntoIterator<Item = ChannelSet>) -> Self {
        let timeline = root
            .rotation_channel(0)
            .samples()
            .iter()
            .map(|s| s.time)
            .collect();
        let auxiliary = others.into_iter().filter(|s| s.frames() > 0).collect();
        Self {
            timeline,
            root,
            auxiliary,
        }
    }

    /// Rebuild a document from already-decoded parts.
    pub(crate) fn from_parts(timeline: Vec<f32>, root: ChannelSet, auxiliary: Vec<ChannelSet>) -> Self {
        Self {
            timeline,
            root,
            auxiliary,
        }
    }

    /// Shared sample times, one per recorded frame.
    pub fn timeline(&self) -> &[f32] {
        &self.timeline
    }

    pub fn frame_count(&self) -> usize {
        self.timeline.len()
    }

    /// The root (hips) channel set.
    pub fn root(&self) -> &ChannelSet {
        &self.root
    }

    /// All non-root channel sets.
    pub fn auxiliary(&self) -> &[ChannelSet] {
        &self.auxiliary
    }

    pub fn channel_set_count(&self) -> usize {
        1 + self.auxiliary.len()
    }

    /// True when there is nothing worth persisting.
    pub fn is_empty(&self) -> bool {
        self.frame_count() == 0
    }

    /// Hand every curve in the document to a playable-curve sink.
    pub fn apply_to<S: CurveSink>(&self, sink: &mut S) {
        self.root.apply_to(sink);
        for set in &self.auxiliary {
            set.apply_to(sink);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rig::LocalPose;

    fn recorded_set(path: &str, position: bool, frames: usize) -> ChannelSet {
        let mut set = ChannelSet::new(path);
        set.set_groups(position, true, false);
        for i in 0..frames {
            set.push_frame(i as f32 * 0.1, &LocalPose::identity());
        }
        set
    }

    #[test]
    fn test_timeline_from_root_rotation() {
        let root = recorded_set("Hips", true, 3);
        let doc = RecordingDocument::assemble(root, vec![]);

        assert_eq!(doc.timeline(), &[0.0, 0.1, 0.2]);
        assert_eq!(doc.frame_count(), 3);
    }

    #[test]
    fn test_zero_frame_auxiliary_dropped() {
        let root = recorded_set("Hips", true, 2);
        let live = recorded_set("Hips/Spine", false, 2);
        let dead = recorded_set("Hips/Tail", false, 0);
        let doc = RecordingDocument::assemble(root, vec![live, dead]);

        assert_eq!(doc.auxiliary().len(), 1);
        assert_eq!(doc.auxiliary()[0].path(), "Hips/Spine");
        assert_eq!(doc.channel_set_count(), 2);
    }

    #[test]
    fn test_empty_document() {
        let doc = RecordingDocument::assemble(ChannelSet::new("Hips"), vec![]);
        assert!(doc.is_empty());
    }
}
