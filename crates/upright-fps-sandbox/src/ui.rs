//! Debug UI for the player controller.
//!
//! Shows FPS, ground contact, pitch, velocity and tilt, plus the active tuning.

use avian3d::prelude::*;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::gizmos::config::GizmoConfigStore;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass, egui};
use leafwing_input_manager::prelude::*;

use crate::input::PlayerAction;
use crate::physics::{is_physics_debug_enabled, toggle_physics_debug};
use crate::player::{Player, PlayerController};

/// Resource controlling whether the debug UI is visible.
#[derive(Resource)]
pub struct UiVisible(pub bool);

impl Default for UiVisible {
    fn default() -> Self {
        Self(true)
    }
}

/// Plugin for debug UI overlay.
pub struct DebugUiPlugin;

impl Plugin for DebugUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin::default())
            .add_plugins(FrameTimeDiagnosticsPlugin::default())
            .init_resource::<UiVisible>()
            .add_systems(Update, toggle_ui_visible)
            .add_systems(
                EguiPrimaryContextPass,
                debug_ui_system.run_if(|visible: Res<UiVisible>| visible.0),
            );
    }
}

/// Toggle UI visibility with F1.
fn toggle_ui_visible(
    action_query: Query<&ActionState<PlayerAction>>,
    mut visible: ResMut<UiVisible>,
) {
    let Ok(action_state) = action_query.single() else {
        return;
    };

    if action_state.just_pressed(&PlayerAction::ToggleDebugUi) {
        visible.0 = !visible.0;
    }
}

/// Angle in degrees between the body's up axis and world up.
fn tilt_degrees(rotation: Quat) -> f32 {
    (rotation * Vec3::Y).angle_between(Vec3::Y).to_degrees()
}

/// Render the debug UI overlay.
#[allow(clippy::needless_pass_by_value)]
fn debug_ui_system(
    mut contexts: EguiContexts,
    diagnostics: Res<DiagnosticsStore>,
    mut config_store: ResMut<GizmoConfigStore>,
    player_query: Query<(&PlayerController, &Rotation, &LinearVelocity), With<Player>>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(bevy::diagnostic::Diagnostic::smoothed)
        .unwrap_or(0.0);

    egui::Window::new("Player")
        .default_pos([10.0, 10.0])
        .show(ctx, |ui| {
            ui.label(format!("FPS: {fps:.0}"));

            if let Ok((controller, rotation, velocity)) = player_query.single() {
                let controller = &controller.0;
                let frame = controller.frame();
                let v = velocity.0;
                let horizontal = Vec2::new(v.x, v.z).length();

                ui.separator();
                ui.label(format!(
                    "Grounded: {}",
                    if frame.grounded { "yes" } else { "no" }
                ));
                ui.label(format!("Pitch: {:.1}°", controller.pitch()));
                ui.label(format!(
                    "Velocity: ({:.2}, {:.2}, {:.2})",
                    v.x, v.y, v.z
                ));
                ui.label(format!("Horizontal speed: {horizontal:.2} m/s"));
                ui.label(format!("Tilt: {:.2}°", tilt_degrees(rotation.0)));

                let config = controller.config();
                ui.separator();
                ui.label(format!("Move speed: {:.1} m/s", config.move_speed));
                ui.label(format!("Jump force: {:.1}", config.jump_force));
                ui.label(format!("Ground distance: {:.2} m", config.ground_distance));
                ui.label(format!("Mouse sensitivity: {:.0}", config.mouse_sensitivity));
                ui.label(format!("Upright torque: {:.1}", config.upright_torque));
            }

            ui.separator();
            let mut debug_enabled = is_physics_debug_enabled(&config_store);
            if ui
                .checkbox(&mut debug_enabled, "Debug visualization")
                .changed()
            {
                toggle_physics_debug(&mut config_store);
            }

            ui.separator();
            ui.label("Controls:");
            ui.label("  WASD - Move");
            ui.label("  Mouse - Look");
            ui.label("  Space - Jump");
            ui.label("  Click / Esc - Grab / release cursor");
            ui.label("  F1 - Toggle this panel");
        });

    Ok(())
}
