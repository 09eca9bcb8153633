//! Renderer constants

/// Shadow map constants.
pub mod shadow {
    /// Shadow map resolution in texels (square), fixed at startup.
    pub const SHADOW_MAP_SIZE: u32 = 1024;
}

/// Viewport constants.
pub mod viewport {
    /// Background clear color for the lighting pass.
    pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
        r: 0.1,
        g: 0.1,
        b: 0.1,
        a: 1.0,
    };

    /// MSAA sample count for the lighting pass (1 disables MSAA).
    pub const SAMPLE_COUNT: u32 = 4;
}
