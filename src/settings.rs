use crate::CONFY_APP_NAME;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectionalLightSettings {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSettings {
    pub model_path: String,
    pub background_color: [f32; 3],
    pub exposure: f32,
    pub key_light: DirectionalLightSettings,
    pub fill_light: DirectionalLightSettings,
    pub hemisphere_sky_color: [f32; 3],
    pub hemisphere_ground_color: [f32; 3],
    pub hemisphere_intensity: f32,
    pub roughness: f32,
    pub metalness: f32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            model_path: "./3DModels/Logo.glb".to_string(),
            background_color: [240.0 / 255.0, 240.0 / 255.0, 240.0 / 255.0],
            exposure: 1.2,
            key_light: DirectionalLightSettings {
                position: [-3.0, 2.0, 3.0],
                color: [1.0, 1.0, 1.0],
                intensity: 1.0,
            },
            fill_light: DirectionalLightSettings {
                position: [3.0, 2.0, 3.0],
                color: [1.0, 1.0, 1.0],
                intensity: 0.5,
            },
            hemisphere_sky_color: [1.0, 1.0, 1.0],
            hemisphere_ground_color: [0x44 as f32 / 255.0, 0x44 as f32 / 255.0, 0x44 as f32 / 255.0],
            hemisphere_intensity: 1.0,
            roughness: 0.6,
            metalness: 0.1,
        }
    }
}

impl SceneSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "scene").unwrap_or_default()
    }
}

/// Resting and focused camera poses plus the per-frame hover step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraSettings {
    pub original_fov: f32,
    pub target_fov: f32,
    pub original_position: [f32; 3],
    pub original_look_at: [f32; 3],
    pub target_position: [f32; 3],
    pub target_look_at: [f32; 3],
    pub near: f32,
    pub far: f32,
    pub hover_step: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            original_fov: 80.0,
            target_fov: 50.0,
            original_position: [-0.75, 0.0, 1.2],
            original_look_at: [-0.175, 0.0, 0.0],
            target_position: [0.0, 0.0, 2.75],
            target_look_at: [0.0, 0.0, 0.0],
            near: 0.1,
            far: 1000.0,
            hover_step: 0.015,
        }
    }
}

impl CameraSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "camera").unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionSettings {
    pub rotation_sensitivity: f32,
    pub max_rotation: f32,
    pub velocity_decay: f32,
    pub spring_damping: f32,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            rotation_sensitivity: 0.00005,
            max_rotation: 0.5,
            velocity_decay: 0.85,
            spring_damping: 0.1,
        }
    }
}

impl InteractionSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "interaction").unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSettings {
    pub reference_size: f32,
    pub base_factor: f32,
    pub narrow_width: f32,
    pub medium_width: f32,
    pub narrow_multiplier: f32,
    pub medium_multiplier: f32,
    pub resize_debounce: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            reference_size: 800.0,
            base_factor: 2.0,
            narrow_width: 600.0,
            medium_width: 900.0,
            narrow_multiplier: 1.25,
            medium_multiplier: 0.95,
            resize_debounce: 0.15,
        }
    }
}

impl LayoutSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "layout").unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkButton {
    pub label: String,
    pub link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlaySettings {
    pub buttons: Vec<LinkButton>,
    /// Relative links are joined onto this; empty opens them as local paths
    pub base_url: String,
    pub page_exit_delay: f32,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            buttons: vec![
                LinkButton {
                    label: "Projects".to_string(),
                    link: "projects.html".to_string(),
                },
                LinkButton {
                    label: "About".to_string(),
                    link: "about.html".to_string(),
                },
                LinkButton {
                    label: "Contact".to_string(),
                    link: "contact.html".to_string(),
                },
            ],
            base_url: String::new(),
            page_exit_delay: 2.0,
        }
    }
}

impl OverlaySettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "overlay").unwrap_or_default()
    }
}

// Aggregate struct for convenience
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub scene: SceneSettings,
    pub camera: CameraSettings,
    pub interaction: InteractionSettings,
    pub layout: LayoutSettings,
    pub overlay: OverlaySettings,
}

impl Settings {
    pub fn load() -> Self {
        Self {
            scene: SceneSettings::load(),
            camera: CameraSettings::load(),
            interaction: InteractionSettings::load(),
            layout: LayoutSettings::load(),
            overlay: OverlaySettings::load(),
        }
    }
}
