//! Debug overlay panel
//!
//! Read/write access to the mutable runtime state: camera field of view,
//! light position and width, and the shadow algorithm. Changes take effect
//! at the next frame's uniform uploads.

use crate::viewport::SharedViewportState;

/// Draw the component panel.
pub fn component_panel(ui: &mut egui::Ui, viewport_state: &SharedViewportState) {
    let mut state = viewport_state.lock();

    ui.heading("Component");
    ui.separator();

    ui.collapsing("Camera", |ui| {
        let camera = state.renderer.camera_mut();
        ui.add(egui::Slider::new(&mut camera.fov_degrees, 0.0..=90.0).text("Fov"));
    });

    ui.collapsing("Light", |ui| {
        let light = state.renderer.light_mut();
        ui.label("Position");
        ui.horizontal(|ui| {
            ui.add(egui::DragValue::new(&mut light.position.x).speed(0.1).prefix("x: "));
            ui.add(egui::DragValue::new(&mut light.position.y).speed(0.1).prefix("y: "));
            ui.add(egui::DragValue::new(&mut light.position.z).speed(0.1).prefix("z: "));
        });
        ui.add(egui::Slider::new(&mut light.light_width, 2.0..=250.0).text("Light width"));
    });

    ui.collapsing("Shadow Algorithm", |ui| {
        if ui.button("Change Algorithm").clicked() {
            state.mode = state.mode.toggled();
        }
        ui.label(format!("Now: {}", state.mode.label()));
    });
}
