use crate::animation::ease_in_out_quad;

/// Which way the hover ease is travelling. A single value keeps
/// "moving to front" and "moving back" from ever being true together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverDirection {
    Idle,
    ToFront,
    Back,
}

/// Frame-stepped progress between the resting and focused camera poses
#[derive(Debug, Clone)]
pub struct HoverEase {
    progress: f32,
    step: f32,
    direction: HoverDirection,
}

impl HoverEase {
    pub fn new(step: f32) -> Self {
        Self {
            progress: 0.0,
            step,
            direction: HoverDirection::Idle,
        }
    }

    pub fn on_enter(&mut self) {
        self.direction = HoverDirection::ToFront;
    }

    pub fn on_leave(&mut self) {
        self.direction = HoverDirection::Back;
    }

    pub fn direction(&self) -> HoverDirection {
        self.direction
    }

    pub fn is_moving_to_front(&self) -> bool {
        self.direction == HoverDirection::ToFront
    }

    pub fn is_moving_back(&self) -> bool {
        self.direction == HoverDirection::Back
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn eased(&self) -> f32 {
        ease_in_out_quad(self.progress)
    }

    /// Advance one frame and return the eased progress
    pub fn step(&mut self) -> f32 {
        match self.direction {
            HoverDirection::ToFront => self.progress = (self.progress + self.step).min(1.0),
            HoverDirection::Back => self.progress = (self.progress - self.step).max(0.0),
            HoverDirection::Idle => {}
        }
        self.eased()
    }
}
