use crate::settings::InteractionSettings;
use nalgebra_glm as glm;

/// Pointer-driven tilt of the pivot node with decay and spring return
#[derive(Debug, Clone)]
pub struct PointerRotation {
    previous: Option<glm::Vec2>,
    velocity: glm::Vec2,
    angle: glm::Vec2,
    over_model: bool,
    settings: InteractionSettings,
}

impl PointerRotation {
    pub fn new(settings: InteractionSettings) -> Self {
        Self {
            previous: None,
            velocity: glm::vec2(0.0, 0.0),
            angle: glm::vec2(0.0, 0.0),
            over_model: false,
            settings,
        }
    }

    pub fn velocity(&self) -> glm::Vec2 {
        self.velocity
    }

    /// x = rotation about the X axis, y = rotation about the Y axis
    pub fn angle(&self) -> glm::Vec2 {
        self.angle
    }

    pub fn is_over_model(&self) -> bool {
        self.over_model
    }

    pub fn has_previous_sample(&self) -> bool {
        self.previous.is_some()
    }

    fn clamp(&self, v: glm::Vec2) -> glm::Vec2 {
        let max = self.settings.max_rotation;
        glm::vec2(v.x.clamp(-max, max), v.y.clamp(-max, max))
    }

    /// Record a pointer sample; `hit` is whether it lies over the model.
    /// Horizontal motion spins about Y, vertical motion about X.
    pub fn on_pointer_move(&mut self, position: glm::Vec2, hit: bool) {
        self.over_model = hit;
        if let (true, Some(previous)) = (hit, self.previous) {
            let delta = position - previous;
            let k = self.settings.rotation_sensitivity;
            self.velocity.y += delta.x * k;
            self.velocity.x += delta.y * k;
            self.velocity = self.clamp(self.velocity);
        }
        self.previous = Some(position);
    }

    /// Pointer left the render surface; forget the last sample
    pub fn on_pointer_leave(&mut self) {
        self.over_model = false;
        self.previous = None;
    }

    /// Per-frame integration; returns the angle to apply to the pivot
    pub fn step(&mut self) -> glm::Vec2 {
        if !self.over_model {
            self.velocity *= self.settings.velocity_decay;
        }
        self.angle += self.velocity;
        self.angle = self.clamp(self.angle);
        self.angle += (glm::vec2(0.0, 0.0) - self.angle) * self.settings.spring_damping;
        self.angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rotation() -> PointerRotation {
        PointerRotation::new(InteractionSettings::default())
    }

    #[test]
    fn first_sample_adds_no_velocity() {
        let mut r = rotation();
        r.on_pointer_move(glm::vec2(100.0, 100.0), true);
        assert_eq!(r.velocity(), glm::vec2(0.0, 0.0));
        assert!(r.has_previous_sample());
    }

    #[test]
    fn delta_axes_are_swapped() {
        let mut r = rotation();
        r.on_pointer_move(glm::vec2(0.0, 0.0), true);
        r.on_pointer_move(glm::vec2(100.0, 40.0), true);
        assert!((r.velocity().y - 100.0 * 0.00005).abs() < 1e-7);
        assert!((r.velocity().x - 40.0 * 0.00005).abs() < 1e-7);
    }

    #[test]
    fn miss_still_records_the_sample() {
        let mut r = rotation();
        r.on_pointer_move(glm::vec2(0.0, 0.0), false);
        r.on_pointer_move(glm::vec2(50.0, 0.0), false);
        assert_eq!(r.velocity(), glm::vec2(0.0, 0.0));
        r.on_pointer_move(glm::vec2(60.0, 0.0), true);
        assert!((r.velocity().y - 10.0 * 0.00005).abs() < 1e-7);
    }

    #[test]
    fn leave_invalidates_previous_sample() {
        let mut r = rotation();
        r.on_pointer_move(glm::vec2(0.0, 0.0), true);
        r.on_pointer_leave();
        assert!(!r.is_over_model());
        r.on_pointer_move(glm::vec2(5000.0, 5000.0), true);
        assert_eq!(r.velocity(), glm::vec2(0.0, 0.0));
    }

    #[test]
    fn velocity_and_angle_stay_clamped() {
        let mut r = rotation();
        let mut x = 0.0;
        for _ in 0..1000 {
            x += 1.0e6;
            r.on_pointer_move(glm::vec2(x, -x), true);
            assert!(r.velocity().x.abs() <= 0.5 && r.velocity().y.abs() <= 0.5);
            let angle = r.step();
            assert!(angle.x.abs() <= 0.5 && angle.y.abs() <= 0.5);
        }
    }

    #[test]
    fn angle_springs_back_after_pointer_leaves_model() {
        let mut r = rotation();
        r.on_pointer_move(glm::vec2(0.0, 0.0), true);
        r.on_pointer_move(glm::vec2(2000.0, 0.0), true);
        r.step();
        assert!(r.angle().y > 0.0);
        r.on_pointer_move(glm::vec2(2000.0, 0.0), false);
        for _ in 0..300 {
            r.step();
        }
        assert!(r.angle().y.abs() < 1e-6);
        assert!(r.velocity().y.abs() < 1e-6);
    }
}
