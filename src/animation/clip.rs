// Keyframed node animation clips

use super::interpolation::{lerp_vec3, quat_slerp};
use crate::scene::NodeId;
use nalgebra_glm as glm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    Step,
    Linear,
}

#[derive(Debug, Clone)]
pub enum TrackValues {
    Translation(Vec<glm::Vec3>),
    Rotation(Vec<glm::Quat>),
    Scale(Vec<glm::Vec3>),
}

impl TrackValues {
    pub fn len(&self) -> usize {
        match self {
            TrackValues::Translation(v) | TrackValues::Scale(v) => v.len(),
            TrackValues::Rotation(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One sampled property value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    Translation(glm::Vec3),
    Rotation(glm::Quat),
    Scale(glm::Vec3),
}

/// Keyframes for one property of one node
#[derive(Debug, Clone)]
pub struct Track {
    pub node: NodeId,
    pub times: Vec<f32>,
    pub values: TrackValues,
    pub interpolation: Interpolation,
}

impl Track {
    /// Keyframe pair around `t` and the blend factor between them
    fn segment(&self, t: f32) -> (usize, usize, f32) {
        let count = self.times.len().min(self.values.len());
        let last = count - 1;
        if last == 0 || t <= self.times[0] {
            return (0, 0, 0.0);
        }
        if t >= self.times[last] {
            return (last, last, 0.0);
        }
        // Unsorted keys can put the partition at 0
        let next = self.times[..count].partition_point(|&k| k <= t).max(1).min(last);
        let prev = next - 1;
        let span = self.times[next] - self.times[prev];
        let f = if span > 0.0 {
            (t - self.times[prev]) / span
        } else {
            0.0
        };
        match self.interpolation {
            Interpolation::Step => (prev, prev, 0.0),
            Interpolation::Linear => (prev, next, f),
        }
    }

    pub fn sample(&self, t: f32) -> Option<Sample> {
        if self.times.is_empty() || self.values.is_empty() {
            return None;
        }
        let (a, b, f) = self.segment(t);
        Some(match &self.values {
            TrackValues::Translation(v) => Sample::Translation(lerp_vec3(&v[a], &v[b], f)),
            TrackValues::Rotation(v) => Sample::Rotation(quat_slerp(&v[a], &v[b], f)),
            TrackValues::Scale(v) => Sample::Scale(lerp_vec3(&v[a], &v[b], f)),
        })
    }
}

#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    pub tracks: Vec<Track>,
}

impl AnimationClip {
    /// Duration is the latest keyframe time over all tracks
    pub fn new(name: &str, tracks: Vec<Track>) -> Self {
        let duration = tracks
            .iter()
            .filter_map(|t| t.times.last().copied())
            .fold(0.0_f32, f32::max);
        Self {
            name: name.to_string(),
            duration,
            tracks,
        }
    }

    /// Copy of the clip with track targets rewritten through `map`.
    /// Tracks whose node is outside the map or unmapped are dropped.
    pub fn retargeted(&self, map: &[Option<NodeId>]) -> Self {
        let tracks = self
            .tracks
            .iter()
            .filter_map(|t| {
                map.get(t.node).copied().flatten().map(|node| Track {
                    node,
                    ..t.clone()
                })
            })
            .collect();
        Self {
            name: self.name.clone(),
            duration: self.duration,
            tracks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(interpolation: Interpolation) -> Track {
        Track {
            node: 0,
            times: vec![0.0, 1.0, 3.0],
            values: TrackValues::Translation(vec![
                glm::vec3(0.0, 0.0, 0.0),
                glm::vec3(2.0, 0.0, 0.0),
                glm::vec3(2.0, 4.0, 0.0),
            ]),
            interpolation,
        }
    }

    #[test]
    fn linear_track_interpolates_between_keys() {
        let track = ramp(Interpolation::Linear);
        assert_eq!(track.sample(0.5), Some(Sample::Translation(glm::vec3(1.0, 0.0, 0.0))));
        assert_eq!(track.sample(2.0), Some(Sample::Translation(glm::vec3(2.0, 2.0, 0.0))));
    }

    #[test]
    fn track_clamps_outside_its_range() {
        let track = ramp(Interpolation::Linear);
        assert_eq!(track.sample(-1.0), Some(Sample::Translation(glm::vec3(0.0, 0.0, 0.0))));
        assert_eq!(track.sample(10.0), Some(Sample::Translation(glm::vec3(2.0, 4.0, 0.0))));
    }

    #[test]
    fn step_track_holds_previous_key() {
        let track = ramp(Interpolation::Step);
        assert_eq!(track.sample(0.99), Some(Sample::Translation(glm::vec3(0.0, 0.0, 0.0))));
        assert_eq!(track.sample(1.5), Some(Sample::Translation(glm::vec3(2.0, 0.0, 0.0))));
    }

    #[test]
    fn clip_duration_and_retarget() {
        let clip = AnimationClip::new("intro", vec![ramp(Interpolation::Linear)]);
        assert_eq!(clip.duration, 3.0);
        let moved = clip.retargeted(&[Some(7)]);
        assert_eq!(moved.tracks[0].node, 7);
        assert!(clip.retargeted(&[]).tracks.is_empty());
        assert!(clip.retargeted(&[None]).tracks.is_empty());
    }

    #[test]
    fn unsorted_keys_do_not_panic() {
        let track = Track {
            node: 0,
            times: vec![0.0, 2.0, 1.0, 3.0],
            values: TrackValues::Translation(vec![glm::vec3(0.0, 0.0, 0.0); 4]),
            interpolation: Interpolation::Linear,
        };
        assert!(track.sample(0.5).is_some());
        assert!(track.sample(2.5).is_some());
    }
}
