use crate::settings::LayoutSettings;

/// Viewport size in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Uniform model scale for the viewport.
///
/// `(min(w, h) / reference) * (base_factor / base_diagonal)`, with a
/// multiplier picked by viewport width band.
pub fn responsive_scale(viewport: Viewport, base_diagonal: f32, settings: &LayoutSettings) -> f32 {
    let shortest = viewport.width.min(viewport.height);
    let scale = (shortest / settings.reference_size) * (settings.base_factor / base_diagonal);
    let band = if viewport.width < settings.narrow_width {
        settings.narrow_multiplier
    } else if viewport.width < settings.medium_width {
        settings.medium_multiplier
    } else {
        1.0
    };
    scale * band
}

/// World-space Y at `distance` in front of the camera for a screen row
pub fn screen_y_to_world_y(screen_y: f32, viewport_height: f32, fov_degrees: f32, distance: f32) -> f32 {
    let world_height = 2.0 * (fov_degrees.to_radians() / 2.0).tan() * distance;
    let normalized = 1.0 - screen_y / viewport_height;
    (normalized - 0.5) * world_height
}

/// Cancel-and-restart timer measured in controller time (seconds)
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: f32,
    deadline: Option<f32>,
}

impl Debounce {
    pub fn new(delay: f32) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn trigger(&mut self, now: f32) {
        self.deadline = Some(now + self.delay);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True once, when the quiet period has elapsed
    pub fn poll(&mut self, now: f32) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
