//! Main application module

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::ViewerConfig;
use crate::frame_clock::FrameClock;
use crate::panels::component_panel;
use crate::viewport::{SharedViewportState, ViewportState};

/// Main application
pub struct PenumbraApp {
    viewport_state: SharedViewportState,
    frame_clock: FrameClock,
}

impl PenumbraApp {
    /// Create the app.
    ///
    /// A missing wgpu render state is a fatal setup error: this pipeline
    /// has no fallback without depth-capture support.
    pub fn new(cc: &eframe::CreationContext<'_>, config: ViewerConfig) -> Self {
        let render_state = cc
            .wgpu_render_state
            .as_ref()
            .expect("WGPU render state unavailable: a GPU device is required");

        let device = render_state.device.clone();
        let queue = render_state.queue.clone();
        let format = render_state.target_format;

        let viewport_state = Arc::new(Mutex::new(ViewportState::new(
            device,
            queue,
            format,
            &config.renderer,
        )));

        Self {
            viewport_state,
            frame_clock: FrameClock::new(),
        }
    }
}

impl eframe::App for PenumbraApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        let dt = self.frame_clock.mark();

        egui::SidePanel::right("component_panel")
            .resizable(false)
            .default_width(280.0)
            .show(ctx, |ui| {
                component_panel(ui, &self.viewport_state);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let render_state = frame
                .wgpu_render_state()
                .expect("WGPU render state unavailable: a GPU device is required");

            let available_size = ui.available_size();
            let width = available_size.x as u32;
            let height = available_size.y as u32;
            if width == 0 || height == 0 {
                return;
            }

            // Advance the orbit, then run both passes into the texture.
            let texture_id = {
                let mut state = self.viewport_state.lock();
                let mut egui_renderer = render_state.renderer.write();
                let texture_id = state.ensure_texture(width, height, &mut egui_renderer);
                state.advance(dt);
                state.render();
                texture_id
            };

            ui.add(egui::Image::new(egui::load::SizedTexture::new(
                texture_id,
                [available_size.x, available_size.y],
            )));
        });

        // Continuous animation.
        ctx.request_repaint();
    }
}
