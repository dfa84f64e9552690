//! Binary codec for recording documents.
//!
//! The writer emits fields in a fixed order with no padding; the reader
//! consumes them in the same order through a cursor that checks remaining
//! length before every read, so a truncated or corrupted stream surfaces as
//! a [`DecodeError`] instead of garbage data.

use std::io::{self, Write};

use super::curve::ChannelSet;
use super::document::RecordingDocument;

/// ASCII tag opening every recording stream.
pub const VERSION_PREFIX: &str = "RigAnimationRecorder.Version";

/// Separator around the version number.
pub const VERSION_SEPARATOR: &str = "#";

/// Format version written by this crate.
pub const RECORDER_VERSION: i32 = 0;

/// Size in bytes of one keyframe value (f32).
pub const KEYFRAME_VALUE_SIZE: i32 = 4;

/// Name stored with the shared timeline curve.
pub const TIMELINE_NAME: &str = "timeline";

/// Decode failures for malformed or truncated streams.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("unexpected end of stream: need {needed} bytes, {remaining} remain")]
    UnexpectedEof { needed: usize, remaining: usize },
    #[error("not a rig recording: bad magic/version tag")]
    BadMagic,
    #[error("unsupported recorder version: {0}")]
    UnsupportedVersion(i32),
    #[error("unsupported keyframe value size: {0}")]
    UnsupportedKeyframeSize(i32),
    #[error("invalid {field} count: {value}")]
    InvalidCount { field: &'static str, value: i32 },
    #[error("invalid name bytes in stream")]
    InvalidName(#[from] std::str::Utf8Error),
}

/// Slice cursor that validates remaining length before every read.
struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining() {
            return Err(DecodeError::UnexpectedEof {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_i32(&mut self) -> Result<i32, DecodeError> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Read a length-prefixed count and reject negatives.
    fn read_count(&mut self, field: &'static str) -> Result<usize, DecodeError> {
        let value = self.read_i32()?;
        if value < 0 {
            return Err(DecodeError::InvalidCount { field, value });
        }
        Ok(value as usize)
    }

    fn read_f32_values(&mut self, count: usize) -> Result<Vec<f32>, DecodeError> {
        let needed = count.checked_mul(4).ok_or(DecodeError::UnexpectedEof {
            needed: usize::MAX,
            remaining: self.remaining(),
        })?;
        let bytes = self.take(needed)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect())
    }

    /// Read a length-prefixed name.
    fn read_name(&mut self, field: &'static str) -> Result<&'a str, DecodeError> {
        let len = self.read_count(field)?;
        Ok(std::str::from_utf8(self.take(len)?)?)
    }

    fn expect(&mut self, literal: &str) -> Result<(), DecodeError> {
        if self.take(literal.len())? != literal.as_bytes() {
            return Err(DecodeError::BadMagic);
        }
        Ok(())
    }
}

fn write_i32<W: Write>(w: &mut W, value: i32) -> io::Result<()> {
    w.write_all(&value.to_le_bytes())
}

fn write_name<W: Write>(w: &mut W, name: &str) -> io::Result<()> {
    write_i32(w, name.len() as i32)?;
    w.write_all(name.as_bytes())
}

fn write_channel_values<W: Write>(w: &mut W, channel: &super::curve::Channel) -> io::Result<()> {
    for sample in channel.samples() {
        w.write_all(&sample.value.to_le_bytes())?;
    }
    Ok(())
}

impl RecordingDocument {
    /// Serialize the document.
    ///
    /// Returns `Ok(false)` without writing anything when the document has no
    /// frames; an empty recording must not produce an artifact.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<bool> {
        if self.is_empty() {
            return Ok(false);
        }

        // Version tag
        w.write_all(VERSION_PREFIX.as_bytes())?;
        w.write_all(VERSION_SEPARATOR.as_bytes())?;
        write_i32(w, RECORDER_VERSION)?;
        w.write_all(VERSION_SEPARATOR.as_bytes())?;

        // Size and counter values
        write_i32(w, KEYFRAME_VALUE_SIZE)?;
        write_i32(w, 1)?; // root channel set count
        write_i32(w, self.auxiliary().len() as i32)?;
        write_i32(w, self.frame_count() as i32)?;

        // Timeline
        write_name(w, TIMELINE_NAME)?;
        for &time in self.timeline() {
            w.write_all(&time.to_le_bytes())?;
        }

        // Root record: path, 3 position curves, 4 rotation curves
        let root = self.root();
        write_name(w, root.path())?;
        for i in 0..3 {
            write_channel_values(w, root.position_channel(i))?;
        }
        for i in 0..4 {
            write_channel_values(w, root.rotation_channel(i))?;
        }

        // Auxiliary records: path, 4 rotation curves
        for set in self.auxiliary() {
            write_name(w, set.path())?;
            for i in 0..4 {
                write_channel_values(w, set.rotation_channel(i))?;
            }
        }

        Ok(true)
    }

    /// Serialize to a byte vector, `None` when there is nothing to write.
    pub fn to_bytes(&self) -> Option<Vec<u8>> {
        let mut buf = Vec::new();
        match self.write_to(&mut buf) {
            Ok(true) => Some(buf),
            _ => None,
        }
    }

    /// Decode a document from bytes written by [`Self::write_to`].
    ///
    /// A zero-length stream yields `Ok(None)`. Anything else that does not
    /// parse exactly is a [`DecodeError`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Option<Self>, DecodeError> {
        if bytes.is_empty() {
            return Ok(None);
        }
        let mut r = ByteReader::new(bytes);

        // Version tag
        r.expect(VERSION_PREFIX)?;
        r.expect(VERSION_SEPARATOR)?;
        let version = r.read_i32()?;
        if version != RECORDER_VERSION {
            return Err(DecodeError::UnsupportedVersion(version));
        }
        r.expect(VERSION_SEPARATOR)?;

        // Size and counter values
        let keyframe_value_size = r.read_i32()?;
        if keyframe_value_size != KEYFRAME_VALUE_SIZE {
            return Err(DecodeError::UnsupportedKeyframeSize(keyframe_value_size));
        }
        let root_count = r.read_i32()?;
        if root_count != 1 {
            return Err(DecodeError::InvalidCount {
                field: "root channel set",
                value: root_count,
            });
        }
        let auxiliary_count = r.read_count("auxiliary channel set")?;
        let frame_count = r.read_count("frame")?;
        if frame_count == 0 {
            return Err(DecodeError::InvalidCount {
                field: "frame",
                value: 0,
            });
        }

        // Timeline; the stored curve name is informational
        r.read_name("timeline name byte")?;
        let timeline = r.read_f32_values(frame_count)?;

        // Root record
        let path = r.read_name("path byte")?;
        let mut root = ChannelSet::new(path);
        root.set_groups(true, true, false);
        for i in 0..3 {
            let values = r.read_f32_values(frame_count)?;
            root.set_position_keyframes(i, &values, &timeline);
        }
        for i in 0..4 {
            let values = r.read_f32_values(frame_count)?;
            root.set_rotation_keyframes(i, &values, &timeline);
        }

        // Auxiliary records
        let mut auxiliary = Vec::with_capacity(auxiliary_count.min(1024));
        for _ in 0..auxiliary_count {
            let path = r.read_name("path byte")?;
            let mut set = ChannelSet::new(path);
            for i in 0..4 {
                let values = r.read_f32_values(frame_count)?;
                set.set_rotation_keyframes(i, &values, &timeline);
            }
            auxiliary.push(set);
        }

        Ok(Some(RecordingDocument::from_parts(timeline, root, auxiliary)))
    }
}
