//! Runtime recording, binary serialization and playback of skeletal rig
//! animation.
//!
//! A rig is captured once as an arena [`RigTree`]; a [`RecordingSession`]
//! then samples local bone poses from a [`PoseSource`] once per frame into
//! per-bone channel sets. Saving serializes the take into a compact binary
//! document and hands the curves to a [`CurveSink`] for playback.
//!
//! # Architecture
//!
//! - `rig`: bone hierarchy and live-pose access
//! - `schema`: recorder configuration
//! - `animation`: curve data model, binary codec, session and playback
//!
//! # Example
//!
//! ```rust,no_run
//! use glam::Vec3;
//! use rig_recorder::{
//!     LocalPose, NodeId, PoseSource, RecorderConfig, RecordingSession, RigTree,
//! };
//!
//! struct Rest;
//!
//! impl PoseSource for Rest {
//!     fn local_pose(&self, _node: NodeId) -> LocalPose {
//!         LocalPose::identity()
//!     }
//! }
//!
//! let mut rig = RigTree::new("Armature");
//! let hips = rig.add_child(rig.root(), "Hips");
//! rig.add_child(hips, "Spine");
//!
//! let mut session = RecordingSession::new(rig, hips, RecorderConfig::default());
//! session.start(0.0);
//! for frame in 0..240 {
//!     // from the late-update phase of the host loop
//!     session.tick(frame as f32 / 24.0, &Rest);
//! }
//! session.stop();
//!
//! let (clip, stats) = session.save("takes/walk.dat").unwrap();
//! println!("saved {stats}, clip covers {} bones", clip.bone_paths().len());
//! ```

pub mod animation;
pub mod maths;
pub mod rig;
pub mod schema;

// Re-export commonly used types
pub use animation::{
    ChannelSet, Clip, CurveSample, CurveSink, DecodeError, RecordError, RecordingDocument,
    RecordingSession, RecordingStats, SessionState,
};
pub use rig::{LocalPose, NodeId, PoseSource, RigNode, RigTree};
pub use schema::RecorderConfig;
