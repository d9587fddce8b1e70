use crate::settings::{DirectionalLightSettings, SceneSettings};
use crate::viewer::CameraState;
use nalgebra_glm as glm;

/// Bound at group 0, binding 0
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
}

impl CameraUniform {
    pub fn from_camera(camera: &CameraState) -> Self {
        let p = camera.position;
        Self {
            view_proj: camera.view_projection().into(),
            eye: [p.x, p.y, p.z, 1.0],
        }
    }
}

/// Bound at group 0, binding 1
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    /// xyz = direction toward the light
    pub key_direction: [f32; 4],
    /// rgb premultiplied by intensity
    pub key_color: [f32; 4],
    pub fill_direction: [f32; 4],
    pub fill_color: [f32; 4],
    pub sky_color: [f32; 4],
    pub ground_color: [f32; 4],
    /// roughness, metalness, exposure, unused
    pub material: [f32; 4],
}

fn directional(light: &DirectionalLightSettings) -> ([f32; 4], [f32; 4]) {
    let dir = glm::normalize(&glm::make_vec3(&light.position));
    let c = light.color;
    let i = light.intensity;
    ([dir.x, dir.y, dir.z, 0.0], [c[0] * i, c[1] * i, c[2] * i, 1.0])
}

impl LightsUniform {
    pub fn from_settings(settings: &SceneSettings) -> Self {
        let (key_direction, key_color) = directional(&settings.key_light);
        let (fill_direction, fill_color) = directional(&settings.fill_light);
        let h = settings.hemisphere_intensity;
        let sky = settings.hemisphere_sky_color.map(srgb_to_linear);
        let ground = settings.hemisphere_ground_color.map(srgb_to_linear);
        Self {
            key_direction,
            key_color,
            fill_direction,
            fill_color,
            sky_color: [sky[0] * h, sky[1] * h, sky[2] * h, 1.0],
            ground_color: [ground[0] * h, ground[1] * h, ground[2] * h, 1.0],
            material: [settings.roughness, settings.metalness, settings.exposure, 0.0],
        }
    }
}

/// Bound at group 1, one buffer per drawn mesh instance
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
    pub base_color: [f32; 4],
}

impl ModelUniform {
    pub fn new(world: &glm::Mat4, base_color: [f32; 4]) -> Self {
        let normal = glm::transpose(&glm::inverse(world));
        Self {
            model: (*world).into(),
            normal: normal.into(),
            base_color,
        }
    }
}

/// sRGB-encoded channel to linear
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Clear color for an sRGB render target, from an sRGB-encoded color
pub fn clear_color(srgb: [f32; 3]) -> wgpu::Color {
    wgpu::Color {
        r: srgb_to_linear(srgb[0]) as f64,
        g: srgb_to_linear(srgb[1]) as f64,
        b: srgb_to_linear(srgb[2]) as f64,
        a: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes_match_wgsl_layout() {
        assert_eq!(size_of::<CameraUniform>(), 80);
        assert_eq!(size_of::<LightsUniform>(), 112);
        assert_eq!(size_of::<ModelUniform>(), 144);
    }

    #[test]
    fn lights_follow_scene_settings() {
        let lights = LightsUniform::from_settings(&SceneSettings::default());
        let len = |v: [f32; 4]| (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        assert!((len(lights.key_direction) - 1.0).abs() < 1e-6);
        assert!(lights.key_direction[0] < 0.0 && lights.fill_direction[0] > 0.0);
        assert_eq!(lights.key_color[0], 1.0);
        assert_eq!(lights.fill_color[0], 0.5);
        assert_eq!(lights.material, [0.6, 0.1, 1.2, 0.0]);
    }

    #[test]
    fn srgb_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        assert!(srgb_to_linear(0.5) < 0.5);
    }

    #[test]
    fn normal_matrix_of_a_uniform_scale_keeps_direction() {
        let world = glm::scaling(&glm::vec3(2.0, 2.0, 2.0));
        let u = ModelUniform::new(&world, [1.0; 4]);
        assert!((u.normal[0][0] - 0.5).abs() < 1e-6);
        assert_eq!(u.model[3], [0.0, 0.0, 0.0, 1.0]);
    }
}
