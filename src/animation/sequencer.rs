// Intro → idle playback for the logo's two clips

use super::clip::AnimationClip;
use super::mixer::{ActionId, AnimationMixer, LoopMode, MixerEvent};
use crate::scene::SceneGraph;

/// Seconds the idle clip takes to blend in over the intro
pub const IDLE_CROSSFADE: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencePhase {
    /// Fewer than two clips; nothing ever plays
    NoAnimation,
    PlayingIntro,
    PlayingIdle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceEvent {
    /// The intro finished and idle took over
    IdleStarted,
}

pub struct IntroIdleSequencer {
    phase: SequencePhase,
    mixer: Option<AnimationMixer>,
    intro: Option<ActionId>,
    idle: Option<ActionId>,
}

impl IntroIdleSequencer {
    pub fn none() -> Self {
        Self {
            phase: SequencePhase::NoAnimation,
            mixer: None,
            intro: None,
            idle: None,
        }
    }

    /// Clip 0 is the intro and clip 1 the idle loop; other clips are ignored.
    /// The mixer only exists when both are present.
    pub fn new(mut clips: Vec<AnimationClip>) -> Self {
        if clips.len() < 2 {
            return Self::none();
        }
        clips.truncate(2);
        let mut mixer = AnimationMixer::new(clips);
        let (Some(intro), Some(idle)) = (mixer.clip_action(0), mixer.clip_action(1)) else {
            return Self::none();
        };

        {
            let action = mixer.action_mut(intro);
            action.loop_mode = LoopMode::Once;
            action.clamp_when_finished = true;
            action.reset().play();
        }
        {
            let action = mixer.action_mut(idle);
            action.loop_mode = LoopMode::Repeat;
            action.clamp_when_finished = false;
        }

        Self {
            phase: SequencePhase::PlayingIntro,
            mixer: Some(mixer),
            intro: Some(intro),
            idle: Some(idle),
        }
    }

    pub fn phase(&self) -> SequencePhase {
        self.phase
    }

    pub fn mixer(&self) -> Option<&AnimationMixer> {
        self.mixer.as_ref()
    }

    pub fn intro(&self) -> Option<ActionId> {
        self.intro
    }

    pub fn idle(&self) -> Option<ActionId> {
        self.idle
    }

    pub fn update(&mut self, dt: f32, graph: &mut SceneGraph) -> Option<SequenceEvent> {
        let mixer = self.mixer.as_mut()?;
        let events = mixer.update(dt, graph);

        let (Some(intro), Some(idle)) = (self.intro, self.idle) else {
            return None;
        };
        let intro_finished = events.contains(&MixerEvent::Finished(intro));
        if self.phase != SequencePhase::PlayingIntro || !intro_finished {
            return None;
        }

        mixer.action_mut(idle).reset().play();
        mixer.cross_fade_from(idle, intro, IDLE_CROSSFADE);
        self.phase = SequencePhase::PlayingIdle;
        log::debug!("intro finished, cross-fading to idle");
        Some(SequenceEvent::IdleStarted)
    }
}
