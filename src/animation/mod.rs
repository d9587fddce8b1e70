// Animation: keyframed clips, the blending mixer and the intro/idle sequencer

pub mod clip;
pub mod interpolation;
pub mod mixer;
pub mod sequencer;

pub use clip::{AnimationClip, Interpolation, Sample, Track, TrackValues};
pub use interpolation::*;
pub use mixer::{ActionId, AnimationMixer, ClipAction, LoopMode, MixerEvent};
pub use sequencer::{IntroIdleSequencer, SequenceEvent, SequencePhase};
