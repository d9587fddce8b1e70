// Animation mixer: plays clip actions and blends them onto scene nodes

use super::clip::{AnimationClip, Sample};
use super::interpolation::{lerp_f32, lerp_vec3, quat_slerp};
use crate::scene::{NodeId, SceneGraph};
use nalgebra_glm as glm;
use std::collections::BTreeMap;

pub type ActionId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    /// Play to the end, then stop (or hold the last frame when clamped)
    Once,
    /// Wrap around forever
    Repeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixerEvent {
    Finished(ActionId),
}

/// Linear weight ramp measured in mixer time
#[derive(Debug, Clone, Copy)]
struct WeightFade {
    start: f32,
    end: f32,
    from: f32,
    to: f32,
}

impl WeightFade {
    fn value(&self, now: f32) -> f32 {
        if now >= self.end || self.end <= self.start {
            return self.to;
        }
        let f = ((now - self.start) / (self.end - self.start)).clamp(0.0, 1.0);
        lerp_f32(self.from, self.to, f)
    }
}

/// Playable instance of a clip with its own loop / blend state
#[derive(Debug, Clone)]
pub struct ClipAction {
    pub clip: usize,
    pub time: f32,
    pub time_scale: f32,
    pub loop_mode: LoopMode,
    pub clamp_when_finished: bool,
    pub weight: f32,
    enabled: bool,
    paused: bool,
    playing: bool,
    finished: bool,
    fade: Option<WeightFade>,
}

impl ClipAction {
    fn new(clip: usize) -> Self {
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            loop_mode: LoopMode::Repeat,
            clamp_when_finished: false,
            weight: 1.0,
            enabled: true,
            paused: false,
            playing: false,
            finished: false,
            fade: None,
        }
    }

    /// Rewind to the start and clear pause / fade state
    pub fn reset(&mut self) -> &mut Self {
        self.time = 0.0;
        self.enabled = true;
        self.paused = false;
        self.finished = false;
        self.fade = None;
        self
    }

    pub fn play(&mut self) -> &mut Self {
        self.playing = true;
        self
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn schedule_fade(&mut self, now: f32, duration: f32, from: f32, to: f32) {
        self.fade = Some(WeightFade {
            start: now,
            end: now + duration,
            from,
            to,
        });
    }

    /// Effective weight at mixer time `now`; finishing a fade-out disables the action
    fn update_weight(&mut self, now: f32) -> f32 {
        if !self.enabled {
            return 0.0;
        }
        let Some(fade) = self.fade else {
            return self.weight;
        };
        let factor = fade.value(now);
        if now >= fade.end {
            self.fade = None;
            if factor == 0.0 {
                self.enabled = false;
            }
        }
        self.weight * factor
    }

    /// Advance local time; returns true on the update that finishes a loop-once action
    fn update_time(&mut self, dt: f32, duration: f32) -> bool {
        if self.paused || dt == 0.0 {
            return false;
        }
        let time = self.time + dt * self.time_scale;
        match self.loop_mode {
            LoopMode::Repeat => {
                self.time = if duration > 0.0 {
                    time.rem_euclid(duration)
                } else {
                    0.0
                };
                false
            }
            LoopMode::Once => {
                if time < duration && time >= 0.0 {
                    self.time = time;
                    return false;
                }
                self.time = time.clamp(0.0, duration);
                if self.clamp_when_finished {
                    self.paused = true;
                } else {
                    self.enabled = false;
                }
                if self.finished {
                    return false;
                }
                self.finished = true;
                true
            }
        }
    }
}

/// Weighted running average of one node's properties for this update
#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    translation: Option<(glm::Vec3, f32)>,
    rotation: Option<(glm::Quat, f32)>,
    scale: Option<(glm::Vec3, f32)>,
}

fn accumulate_vec(slot: &mut Option<(glm::Vec3, f32)>, value: glm::Vec3, weight: f32) {
    *slot = Some(match *slot {
        None => (value, weight),
        Some((acc, total)) => {
            let sum = total + weight;
            (lerp_vec3(&acc, &value, weight / sum), sum)
        }
    });
}

fn accumulate_quat(slot: &mut Option<(glm::Quat, f32)>, value: glm::Quat, weight: f32) {
    *slot = Some(match *slot {
        None => (value, weight),
        Some((acc, total)) => {
            let sum = total + weight;
            (quat_slerp(&acc, &value, weight / sum), sum)
        }
    });
}

pub struct AnimationMixer {
    clips: Vec<AnimationClip>,
    actions: Vec<ClipAction>,
    time: f32,
    /// Every node animated by any clip, restored to rest when undriven
    bound_nodes: Vec<NodeId>,
}

impl AnimationMixer {
    /// Clips must already target scene node ids
    pub fn new(clips: Vec<AnimationClip>) -> Self {
        let mut bound_nodes: Vec<NodeId> = clips
            .iter()
            .flat_map(|c| c.tracks.iter().map(|t| t.node))
            .collect();
        bound_nodes.sort_unstable();
        bound_nodes.dedup();
        Self {
            clips,
            actions: Vec::new(),
            time: 0.0,
            bound_nodes,
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Action for a clip, created on first request
    pub fn clip_action(&mut self, clip: usize) -> Option<ActionId> {
        if clip >= self.clips.len() {
            return None;
        }
        if let Some(id) = self.actions.iter().position(|a| a.clip == clip) {
            return Some(id);
        }
        self.actions.push(ClipAction::new(clip));
        Some(self.actions.len() - 1)
    }

    pub fn action(&self, id: ActionId) -> &ClipAction {
        &self.actions[id]
    }

    pub fn action_mut(&mut self, id: ActionId) -> &mut ClipAction {
        &mut self.actions[id]
    }

    /// Current effective weight without advancing time
    pub fn effective_weight(&self, id: ActionId) -> f32 {
        let action = &self.actions[id];
        if !action.playing || !action.enabled {
            return 0.0;
        }
        match action.fade {
            Some(fade) => action.weight * fade.value(self.time),
            None => action.weight,
        }
    }

    pub fn fade_in(&mut self, id: ActionId, duration: f32) {
        let now = self.time;
        self.actions[id].schedule_fade(now, duration, 0.0, 1.0);
    }

    pub fn fade_out(&mut self, id: ActionId, duration: f32) {
        let now = self.time;
        self.actions[id].schedule_fade(now, duration, 1.0, 0.0);
    }

    /// Fade `from` out while `to` fades in over `duration`
    pub fn cross_fade_from(&mut self, to: ActionId, from: ActionId, duration: f32) {
        self.fade_out(from, duration);
        self.fade_in(to, duration);
    }

    /// Advance every playing action by `dt` and write the blended pose into `graph`
    pub fn update(&mut self, dt: f32, graph: &mut SceneGraph) -> Vec<MixerEvent> {
        self.time += dt;
        let now = self.time;
        let mut events = Vec::new();
        let mut pose: BTreeMap<NodeId, Accumulator> = BTreeMap::new();

        for (id, action) in self.actions.iter_mut().enumerate() {
            if !action.playing {
                continue;
            }
            let clip = &self.clips[action.clip];
            if action.enabled && action.update_time(dt, clip.duration) {
                events.push(MixerEvent::Finished(id));
            }
            let weight = action.update_weight(now);
            if weight <= 0.0 {
                continue;
            }
            for track in &clip.tracks {
                let Some(sample) = track.sample(action.time) else {
                    continue;
                };
                let acc = pose.entry(track.node).or_default();
                match sample {
                    Sample::Translation(v) => accumulate_vec(&mut acc.translation, v, weight),
                    Sample::Rotation(q) => accumulate_quat(&mut acc.rotation, q, weight),
                    Sample::Scale(v) => accumulate_vec(&mut acc.scale, v, weight),
                }
            }
        }

        for &node_id in &self.bound_nodes {
            let acc = pose.get(&node_id).copied().unwrap_or_default();
            let node = graph.node_mut(node_id);
            let rest = node.rest.clone();
            node.local.translation = blend_vec(acc.translation, &rest.translation);
            node.local.rotation = match acc.rotation {
                Some((q, w)) if w < 1.0 => quat_slerp(&q, &rest.rotation, 1.0 - w),
                Some((q, _)) => q,
                None => rest.rotation,
            };
            node.local.scale = blend_vec(acc.scale, &rest.scale);
        }

        events
    }
}

/// Fill any missing weight with the rest value
fn blend_vec(acc: Option<(glm::Vec3, f32)>, rest: &glm::Vec3) -> glm::Vec3 {
    match acc {
        Some((v, w)) if w < 1.0 => lerp_vec3(&v, rest, 1.0 - w),
        Some((v, _)) => v,
        None => *rest,
    }
}
