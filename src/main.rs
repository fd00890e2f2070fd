//! Cuboid annotator: a tri-view editor for 3D boxes in point clouds
//!
//! Draw boxes on the bird's-eye ground view, then refine them in the top,
//! front and side projections. Annotations save as RON (optionally brotli
//! compressed) and export as JSON.
//!
//! Usage: cuboid-annotator [POINT_CLOUD] [ANNOTATIONS]

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod annotate;
mod cloud;
mod document;
mod config;
mod ui;
mod editor;
mod app;

use macroquad::prelude::*;
use app::AppState;
use config::EditorConfig;
use editor::draw_editor;
use std::path::PathBuf;
use ui::{MouseState, UiContext};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Cuboid Annotator v{}", VERSION),
        window_width: 1600,
        window_height: 1000,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Crash logging first
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = EditorConfig::default_path();
    let config = EditorConfig::load_or_default(&config_path);
    let last_document = config.last_document.clone();

    let mut ui_ctx = UiContext::new();
    let mut app = AppState::new(config, config_path);

    log::info!("=== CUBOID ANNOTATOR v{} ===", VERSION);

    let args: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    match args.as_slice() {
        [] => {
            // Reopen the last document if it is still around
            if let Some(path) = last_document.map(PathBuf::from).filter(|p| p.exists()) {
                app.open_document(&path);
            }
        }
        [cloud] => app.open_cloud(cloud),
        [cloud, annotations, ..] => {
            app.open_cloud(cloud);
            app.open_document(annotations);
        }
    }

    loop {
        ui_ctx.begin_frame(MouseState::capture());

        app.handle_shortcuts();
        let action = draw_editor(&mut ui_ctx, &mut app.layout, &mut app.editor);
        app.handle_action(action);

        next_frame().await;
    }
}
