//! Walk-around sandbox for the upright first-person controller.
//!
//! Spawns a capsule player driven by `upright-fps` in a small static scene,
//! with Avian physics and an egui debug overlay.

mod input;
mod launch_params;
mod physics;
mod player;
mod scene;
mod ui;

use bevy::prelude::*;
use input::InputPlugin;
use physics::PhysicsIntegrationPlugin;
use player::PlayerPlugin;
use scene::ScenePlugin;
use ui::DebugUiPlugin;

/// Plugin for the main application.
pub struct AppPlugin;

impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            PhysicsIntegrationPlugin,
            InputPlugin,
            ScenePlugin,
            PlayerPlugin,
            DebugUiPlugin,
        ));
    }
}

fn main() {
    // Initialize tracing for native platforms.
    #[cfg(not(target_family = "wasm"))]
    {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    // Initialize tracing for WASM (logs to browser console).
    #[cfg(target_family = "wasm")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }

    let params = launch_params::parse();
    tracing::info!(?params, "Launch parameters");

    let mut app = App::new();

    #[allow(unused_mut)]
    let mut window = Window {
        title: "upright-fps-sandbox".to_string(),
        resolution: (1280, 720).into(),
        ..Default::default()
    };

    // WASM: Fit canvas to parent element and prevent browser event handling.
    #[cfg(target_family = "wasm")]
    {
        window.fit_canvas_to_parent = true;
        window.prevent_default_event_handling = true;
    }

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(window),
        ..Default::default()
    }))
    .insert_resource(Time::<Fixed>::from_hz(params.physics_hz))
    .insert_resource(params)
    .add_plugins(AppPlugin)
    .run();
}
