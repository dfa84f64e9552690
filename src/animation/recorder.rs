//! Recording session: lifecycle, per-tick sampling and save.

use std::fs;
use std::path::Path;

use log::warn;

use super::curve::ChannelSet;
use super::document::RecordingDocument;
use super::player::Clip;
use crate::rig::{NodeId, PoseSource, RigTree};
use crate::schema::RecorderConfig;

/// Session lifecycle.
///
/// ```text
/// Idle -> Recording -> RecordedIdle <-> Replaying
///   ^                       |               |
///   +--------- cancel ------+---------------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Recording,
    RecordedIdle,
    Replaying,
}

/// Errors from assembling or saving a recording.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("nothing to save: recording has no frames")]
    EmptyRecording,
    #[error("no channel set exists for the designated root bone")]
    MissingRootChannel,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result summary of one save operation.
#[derive(Debug, Clone)]
pub struct RecordingStats {
    /// Frames in the persisted document.
    pub frame_count: usize,
    /// Channel sets persisted (root + auxiliary).
    pub channel_set_count: usize,
    /// Bytes written to disk.
    pub total_bytes: u64,
}

impl std::fmt::Display for RecordingStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} frames, {} channel sets, {} bytes",
            self.frame_count, self.channel_set_count, self.total_bytes
        )
    }
}

/// Drives sampling of live bone poses into per-bone channel sets and hands
/// the result to the codec on save.
///
/// One channel set exists per bone of the rig for the whole session; sets
/// are cleared and re-enabled at each recording start, filled by [`tick`],
/// and read (not consumed) by [`save`].
///
/// Lifecycle misuse (e.g. `stop` while idle) is logged as a warning and
/// ignored; the state is left unchanged.
///
/// [`tick`]: RecordingSession::tick
/// [`save`]: RecordingSession::save
pub struct RecordingSession {
    rig: RigTree,
    hips: NodeId,
    config: RecorderConfig,
    channel_sets: Vec<ChannelSet>,
    state: SessionState,
    start_time: f32,
}

impl RecordingSession {
    /// Create a session for `rig`, with `hips` designating the bone whose
    /// position anchors the recording.
    pub fn new(rig: RigTree, hips: NodeId, config: RecorderConfig) -> Self {
        let channel_sets = rig
            .iter()
            .map(|(_, node)| ChannelSet::new(node.path.clone()))
            .collect();
        Self {
            rig,
            hips,
            config,
            channel_sets,
            state: SessionState::Idle,
            start_time: 0.0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == SessionState::Recording
    }

    pub fn rig(&self) -> &RigTree {
        &self.rig
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Channel set recorded for one bone.
    pub fn channel_set(&self, id: NodeId) -> &ChannelSet {
        &self.channel_sets[id.index()]
    }

    /// Seconds since recording (or replay) started.
    pub fn elapsed(&self, now: f32) -> f32 {
        now - self.start_time
    }

    /// Begin recording at time `now`. Only valid while idle.
    pub fn start(&mut self, now: f32) -> bool {
        if self.state != SessionState::Idle {
            warn!("start ignored in {:?} state", self.state);
            return false;
        }
        for set in &mut self.channel_sets {
            set.clear();
            set.set_groups(self.config.record_positions, true, false);
        }
        if let Some(set) = self.channel_sets.get_mut(self.hips.index()) {
            set.set_groups(true, true, false);
        }
        self.start_time = now;
        self.state = SessionState::Recording;
        true
    }

    /// Sample the live pose of every bone into its enabled channels.
    ///
    /// Call exactly once per frame, from a late-update phase after every
    /// system that moves the skeleton has run for the frame, so the
    /// recorded pose is the final one. Does nothing unless recording.
    pub fn tick(&mut self, now: f32, source: &impl PoseSource) {
        if self.state != SessionState::Recording {
            return;
        }
        let elapsed = now - self.start_time;
        let sets = &mut self.channel_sets;
        for (id, _) in self.rig.iter() {
            sets[id.index()].push_frame(elapsed, &source.local_pose(id));
        }
    }

    /// Stop recording. Only valid while recording.
    pub fn stop(&mut self) -> bool {
        if self.state != SessionState::Recording {
            warn!("stop ignored in {:?} state", self.state);
            return false;
        }
        self.state = SessionState::RecordedIdle;
        true
    }

    /// Begin replaying the recorded take. Only valid with a recorded take
    /// at rest.
    pub fn begin_replay(&mut self, now: f32) -> bool {
        if self.state != SessionState::RecordedIdle {
            warn!("begin_replay ignored in {:?} state", self.state);
            return false;
        }
        self.start_time = now;
        self.state = SessionState::Replaying;
        true
    }

    /// Stop an active replay, keeping the recorded take.
    pub fn end_replay(&mut self) -> bool {
        if self.state != SessionState::Replaying {
            warn!("end_replay ignored in {:?} state", self.state);
            return false;
        }
        self.state = SessionState::RecordedIdle;
        true
    }

    /// Discard the recorded take and return to idle.
    pub fn cancel(&mut self) -> bool {
        match self.state {
            SessionState::RecordedIdle | SessionState::Replaying => {
                self.state = SessionState::Idle;
                true
            }
            _ => {
                warn!("cancel ignored in {:?} state", self.state);
                false
            }
        }
    }

    /// Assemble a document from the current channel sets.
    ///
    /// The root set is cloned out and the remaining sets become auxiliary
    /// candidates; the working set stays intact, so this (and [`save`])
    /// can be invoked again.
    ///
    /// [`save`]: RecordingSession::save
    pub fn document(&self) -> Result<RecordingDocument, RecordError> {
        let hips = self.hips.index();
        let root = self
            .channel_sets
            .get(hips)
            .cloned()
            .ok_or(RecordError::MissingRootChannel)?;
        let others = self
            .channel_sets
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != hips)
            .map(|(_, set)| set.clone());
        Ok(RecordingDocument::assemble(root, others))
    }

    /// Encode the recording, write it to `path` (creating parent
    /// directories) and build the playable clip.
    ///
    /// An empty recording writes no file and fails with
    /// [`RecordError::EmptyRecording`]. The clip is built from the live
    /// channel sets, so curves the binary format does not persist (scale,
    /// non-root positions) still reach the sink.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(Clip, RecordingStats), RecordError> {
        let document = self.document()?;
        let bytes = document.to_bytes().ok_or(RecordError::EmptyRecording)?;

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, &bytes)?;

        let mut clip = Clip::new(self.config.frame_rate);
        for set in &self.channel_sets {
            set.apply_to(&mut clip);
        }

        let stats = RecordingStats {
            frame_count: document.frame_count(),
            channel_set_count: document.channel_set_count(),
            total_bytes: bytes.len() as u64,
        };
        Ok((clip, stats))
    }
}
