//! Renderer configuration structures
//!
//! Configurable startup settings for the renderer that can be serialized
//! and loaded from configuration files. Everything here has a default
//! matching the reference scene.

use serde::{Deserialize, Serialize};

use crate::constants::shadow::SHADOW_MAP_SIZE;

/// Shadow mapping configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShadowConfig {
    /// Shadow map resolution (square), fixed after startup
    pub map_size: u32,
    /// Shadow depth bias to prevent shadow acne
    pub bias: f32,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            map_size: SHADOW_MAP_SIZE,
            bias: 0.003,
        }
    }
}

/// Viewport rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewportConfig {
    /// Background clear color (RGBA)
    pub background_color: [f32; 4],
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            background_color: [0.1, 0.1, 0.1, 1.0],
        }
    }
}

/// Camera startup configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CameraConfig {
    /// Initial camera position
    pub position: [f32; 3],
    /// Initial look target
    pub target: [f32; 3],
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane distance
    pub near_plane: f32,
    /// Far clipping plane distance
    pub far_plane: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [9.0, 6.0, -9.0],
            target: [0.0, 0.0, 0.0],
            fov_degrees: 45.0,
            near_plane: 0.1,
            far_plane: 100.0,
        }
    }
}

/// Directional light startup configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LightConfig {
    /// Light position
    pub position: [f32; 3],
    /// Light look target
    pub target: [f32; 3],
    /// Orthographic frustum half width
    pub half_width: f32,
    /// Orthographic frustum half height
    pub half_height: f32,
    /// Near clipping plane distance
    pub near_plane: f32,
    /// Far clipping plane distance
    pub far_plane: f32,
    /// Physical light size for the penumbra estimate
    pub light_width: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: [7.5, 7.5, 7.5],
            target: [-2.0, 0.0, -2.0],
            half_width: 10.0,
            half_height: 10.0,
            near_plane: 0.1,
            far_plane: 30.0,
            light_width: 50.0,
        }
    }
}

/// Complete renderer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RendererConfig {
    /// Shadow settings
    #[serde(default)]
    pub shadow: ShadowConfig,
    /// Viewport settings
    #[serde(default)]
    pub viewport: ViewportConfig,
    /// Camera settings
    #[serde(default)]
    pub camera: CameraConfig,
    /// Light settings
    #[serde(default)]
    pub light: LightConfig,
}

impl RendererConfig {
    /// Create a new renderer configuration with default values
    pub fn new() -> Self {
        Self::default()
    }
}
