//! Recording, serialization and playback of rig animation.
//!
//! A [`RecordingSession`] samples live bone poses into per-bone
//! [`ChannelSet`]s once per frame; on save the sets are assembled into a
//! [`RecordingDocument`] and serialized. Decoding reverses the process and
//! can feed any [`CurveSink`] for playback.
//!
//! # File Format
//!
//! All integers are little-endian i32, all values little-endian f32:
//!
//! ```text
//! Version tag:
//!   "RigAnimationRecorder.Version" (28 ASCII bytes)
//!   "#" (1 byte)
//!   Version: i32 (currently 0)
//!   "#" (1 byte)
//!
//! Counts:
//!   Keyframe value size: i32 (always 4)
//!   Root channel set count: i32 (always 1)
//!   Auxiliary channel set count: i32
//!   Frame count: i32
//!
//! Timeline block:
//!   Name length: i32, then that many bytes ("timeline")
//!   Frame count f32 sample times
//!
//! Per root channel set:
//!   Path length: i32, then that many bytes
//!   3 position curves then 4 rotation curves,
//!   each a contiguous array of frame-count f32 values
//!
//! Per auxiliary channel set:
//!   Path length: i32, then that many bytes
//!   4 rotation curves, as above
//! ```
//!
//! Curves carry no per-sample times; values pair positionally with the
//! shared timeline.

mod curve;
mod document;
mod format;
mod player;
mod recorder;

pub use curve::{
    Channel, ChannelSet, CurveGroups, CurveSample, POSITION_PROPERTIES, ROTATION_PROPERTIES,
    SCALE_PROPERTIES,
};
pub use document::RecordingDocument;
pub use format::{
    DecodeError, KEYFRAME_VALUE_SIZE, RECORDER_VERSION, TIMELINE_NAME, VERSION_PREFIX,
    VERSION_SEPARATOR,
};
pub use player::{Clip, CurveSink, format_timecode};
pub use recorder::{RecordError, RecordingSession, RecordingStats, SessionState};
