//! Penumbra viewer entry point

mod app;
mod config;
mod frame_clock;
mod panels;
mod viewport;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Fixed presentation surface size.
const WINDOW_WIDTH: f32 = 1440.0;
const WINDOW_HEIGHT: f32 = 810.0;

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "penumbra_viewer=debug,penumbra_renderer=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Penumbra");

    let config = config::ViewerConfig::load_or_default();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_resizable(false)
            .with_title("Penumbra"),
        ..Default::default()
    };

    eframe::run_native(
        "penumbra",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::PenumbraApp::new(cc, config)))),
    )
}
