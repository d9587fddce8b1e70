use crate::animation::{lerp_f32, lerp_vec3};
use crate::settings::CameraSettings;
use nalgebra_glm as glm;

/// Field of view (degrees), eye position and look-at target
#[derive(Debug, Clone, PartialEq)]
pub struct CameraPose {
    pub fov: f32,
    pub position: glm::Vec3,
    pub look_at: glm::Vec3,
}

impl CameraPose {
    pub fn lerp(&self, other: &CameraPose, t: f32) -> CameraPose {
        CameraPose {
            fov: lerp_f32(self.fov, other.fov, t),
            position: lerp_vec3(&self.position, &other.position, t),
            look_at: lerp_vec3(&self.look_at, &other.look_at, t),
        }
    }
}

/// Perspective camera with a resting pose and a focused pose
#[derive(Debug, Clone)]
pub struct CameraState {
    pub fov: f32,
    pub position: glm::Vec3,
    pub look_at: glm::Vec3,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub original: CameraPose,
    pub target: CameraPose,
}

impl CameraState {
    pub fn new(settings: &CameraSettings, aspect: f32) -> Self {
        let original = CameraPose {
            fov: settings.original_fov,
            position: glm::make_vec3(&settings.original_position),
            look_at: glm::make_vec3(&settings.original_look_at),
        };
        let target = CameraPose {
            fov: settings.target_fov,
            position: glm::make_vec3(&settings.target_position),
            look_at: glm::make_vec3(&settings.target_look_at),
        };
        Self {
            fov: original.fov,
            position: original.position,
            look_at: original.look_at,
            aspect,
            near: settings.near,
            far: settings.far,
            original,
            target,
        }
    }

    pub fn apply_pose(&mut self, pose: &CameraPose) {
        self.fov = pose.fov;
        self.position = pose.position;
        self.look_at = pose.look_at;
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn fov_radians(&self) -> f32 {
        self.fov.to_radians()
    }

    pub fn view(&self) -> glm::Mat4 {
        glm::look_at_rh(&self.position, &self.look_at, &glm::vec3(0.0, 1.0, 0.0))
    }

    /// Projection with a [0, 1] depth range for wgpu
    pub fn projection(&self) -> glm::Mat4 {
        glm::perspective_rh_zo(self.aspect, self.fov_radians(), self.near, self.far)
    }

    pub fn view_projection(&self) -> glm::Mat4 {
        self.projection() * self.view()
    }

    pub fn inverse_view_projection(&self) -> glm::Mat4 {
        glm::inverse(&self.view_projection())
    }

    /// Normalized device coordinates for a pointer position in viewport pixels
    pub fn pointer_ndc(pointer: glm::Vec2, width: f32, height: f32) -> glm::Vec2 {
        glm::vec2(pointer.x / width * 2.0 - 1.0, -(pointer.y / height) * 2.0 + 1.0)
    }
}
