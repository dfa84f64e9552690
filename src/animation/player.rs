//! Playable clip construction and curve evaluation.

use std::collections::BTreeMap;

use super::curve::CurveSample;
use super::document::RecordingDocument;
use super::format::DecodeError;

/// Consumer of recorded curves, building whatever the host engine plays.
///
/// The recorder hands over one call per curve: the bone path, a property
/// name such as `localRotation.x`, and the (time, value) keyframes. The
/// implementation is opaque to the recorder and may be backed by any
/// curve-evaluation engine.
pub trait CurveSink {
    fn set_curve(&mut self, path: &str, property: &str, samples: &[CurveSample]);
}

/// Engine-independent playable clip: curves keyed by bone path and
/// property name, sampled with linear interpolation.
#[derive(Debug, Clone)]
pub struct Clip {
    frame_rate: u32,
    curves: BTreeMap<(String, String), Vec<CurveSample>>,
}

impl Clip {
    pub fn new(frame_rate: u32) -> Self {
        Self {
            frame_rate,
            curves: BTreeMap::new(),
        }
    }

    /// Decode a recording and build a clip from it.
    ///
    /// Mirrors the decode side of the codec: `Ok(None)` for an empty
    /// stream, [`DecodeError`] for a malformed one.
    pub fn from_bytes(bytes: &[u8], frame_rate: u32) -> Result<Option<Self>, DecodeError> {
        let Some(document) = RecordingDocument::from_bytes(bytes)? else {
            return Ok(None);
        };
        let mut clip = Clip::new(frame_rate);
        document.apply_to(&mut clip);
        Ok(Some(clip))
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    /// Number of curves in the clip.
    pub fn curve_count(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Keyframes of one curve.
    pub fn curve(&self, path: &str, property: &str) -> Option<&[CurveSample]> {
        self.curves
            .get(&(path.to_string(), property.to_string()))
            .map(Vec::as_slice)
    }

    /// Bone paths with at least one curve, in sorted order.
    pub fn bone_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = Vec::new();
        for (path, _) in self.curves.keys() {
            if paths.last() != Some(&path.as_str()) {
                paths.push(path);
            }
        }
        paths
    }

    /// Clip length in seconds: the last keyframe time over all curves.
    pub fn duration(&self) -> f32 {
        self.curves
            .values()
            .filter_map(|samples| samples.last())
            .map(|s| s.time)
            .fold(0.0, f32::max)
    }

    /// Evaluate one curve at `time` with linear interpolation.
    ///
    /// Times before the first keyframe clamp to it, times past the last
    /// keyframe clamp to the last. `None` if the curve does not exist.
    pub fn sample(&self, path: &str, property: &str, time: f32) -> Option<f32> {
        let samples = self.curve(path, property)?;
        let first = samples.first()?;
        if time <= first.time {
            return Some(first.value);
        }
        let last = samples[samples.len() - 1];
        if time >= last.time {
            return Some(last.value);
        }
        // Index of the first sample past `time`; the segment before it
        // brackets the query.
        let after = samples.partition_point(|s| s.time <= time);
        let a = samples[after - 1];
        let b = samples[after];
        let span = b.time - a.time;
        if span <= 0.0 {
            return Some(a.value);
        }
        let t = (time - a.time) / span;
        Some(a.value + (b.value - a.value) * t)
    }
}

impl CurveSink for Clip {
    fn set_curve(&mut self, path: &str, property: &str, samples: &[CurveSample]) {
        self.curves
            .insert((path.to_string(), property.to_string()), samples.to_vec());
    }
}

/// Format elapsed seconds as `mm:ss` for progress display.
pub fn format_timecode(elapsed_seconds: f32) -> String {
    let total = elapsed_seconds.max(0.0) as u32;
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(pairs: &[(f32, f32)]) -> Vec<CurveSample> {
        pairs
            .iter()
            .map(|&(time, value)| CurveSample { time, value })
            .collect()
    }

    #[test]
    fn test_sample_interpolates() {
        let mut clip = Clip::new(24);
        clip.set_curve("Hips", "localPosition.y", &samples(&[(0.0, 0.0), (1.0, 2.0)]));

        assert_eq!(clip.sample("Hips", "localPosition.y", 0.5), Some(1.0));
        assert_eq!(clip.sample("Hips", "localPosition.y", 0.25), Some(0.5));
    }

    #[test]
    fn test_sample_clamps_ends() {
        let mut clip = Clip::new(24);
        clip.set_curve("Hips", "localPosition.y", &samples(&[(0.1, 1.0), (0.2, 3.0)]));

        assert_eq!(clip.sample("Hips", "localPosition.y", 0.0), Some(1.0));
        assert_eq!(clip.sample("Hips", "localPosition.y", 5.0), Some(3.0));
    }

    #[test]
    fn test_sample_missing_curve() {
        let clip = Clip::new(24);
        assert_eq!(clip.sample("Hips", "localPosition.y", 0.0), None);
    }

    #[test]
    fn test_duration_and_paths() {
        let mut clip = Clip::new(24);
        clip.set_curve("Hips", "localRotation.x", &samples(&[(0.0, 0.0), (0.5, 0.0)]));
        clip.set_curve("Hips/Spine", "localRotation.x", &samples(&[(0.0, 0.0), (0.7, 0.0)]));

        assert_eq!(clip.duration(), 0.7);
        assert_eq!(clip.bone_paths(), vec!["Hips", "Hips/Spine"]);
        assert_eq!(clip.curve_count(), 2);
    }

    #[test]
    fn test_timecode() {
        assert_eq!(format_timecode(0.0), "00:00");
        assert_eq!(format_timecode(9.9), "00:09");
        assert_eq!(format_timecode(75.0), "01:15");
        assert_eq!(format_timecode(-3.0), "00:00");
    }
}
