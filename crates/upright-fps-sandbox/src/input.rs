//! Centralized input action definitions and management.
//!
//! Defines player actions using `leafwing-input-manager` for declarative,
//! rebindable input mapping, and adapts them to the controller's
//! [`InputSource`] and [`CursorControl`] traits.

use bevy::{
    prelude::*,
    window::{CursorGrabMode, CursorOptions},
};
use leafwing_input_manager::{plugin::InputManagerSystem, prelude::*};
use upright_fps::host::{CursorControl, InputAxis, InputSource};

/// Pixels of mouse motion per look-axis unit. The default sensitivity is
/// tuned for this scale.
const MOUSE_PIXELS_PER_AXIS_UNIT: f32 = 10.0;

// ============================================================================
// Action enums
// ============================================================================

/// Actions for the first-person player.
#[derive(Actionlike, PartialEq, Eq, Hash, Clone, Copy, Debug, Reflect)]
pub enum PlayerAction {
    /// WASD movement (strafe on X, forward on Y).
    #[actionlike(DualAxis)]
    Move,
    /// Mouse look (yaw/pitch).
    #[actionlike(DualAxis)]
    Look,
    /// Jump (Space).
    Jump,
    /// Grab cursor (left click when ungrabbed).
    GrabCursor,
    /// Release cursor (ESC).
    ReleaseCursor,
    /// Toggle the debug overlay (F1).
    ToggleDebugUi,
}

// ============================================================================
// Input maps
// ============================================================================

/// Create the default input map for player actions.
pub fn default_player_input_map() -> InputMap<PlayerAction> {
    InputMap::default()
        .with_dual_axis(PlayerAction::Move, VirtualDPad::wasd())
        .with_dual_axis(PlayerAction::Move, VirtualDPad::arrow_keys())
        .with_dual_axis(PlayerAction::Look, MouseMove::default())
        .with(PlayerAction::Jump, KeyCode::Space)
        .with(PlayerAction::GrabCursor, MouseButton::Left)
        .with(PlayerAction::ReleaseCursor, KeyCode::Escape)
        .with(PlayerAction::ToggleDebugUi, KeyCode::F1)
}

// ============================================================================
// Plugin
// ============================================================================

/// Plugin that registers input action types and cursor grab handling.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<PlayerAction>::default())
            .add_systems(
                PreUpdate,
                (manage_input_focus, handle_cursor_grab)
                    .chain()
                    .after(InputManagerSystem::Update),
            );
    }
}

/// Whether the cursor is captured by the window.
pub fn is_grabbed(cursor: &CursorOptions) -> bool {
    matches!(
        cursor.grab_mode,
        CursorGrabMode::Locked | CursorGrabMode::Confined
    )
}

// ============================================================================
// Cursor grab helpers
// ============================================================================

/// Set cursor grab state, centering the cursor when grabbing.
pub fn set_cursor_grab(cursor: &mut CursorOptions, window: &mut Window, grabbed: bool) {
    if grabbed {
        // Native: Use Locked mode for true mouse capture.
        // WASM: Use Confined mode (Locked not supported in browsers).
        #[cfg(not(target_family = "wasm"))]
        {
            cursor.grab_mode = CursorGrabMode::Locked;
        }
        #[cfg(target_family = "wasm")]
        {
            cursor.grab_mode = CursorGrabMode::Confined;
        }
        cursor.visible = false;
        let center = Vec2::new(window.width() / 2.0, window.height() / 2.0);
        window.set_cursor_position(Some(center));
    } else {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    }
}

/// The primary window's cursor, seen as a controller collaborator.
pub struct WindowCursor<'a> {
    pub cursor: &'a mut CursorOptions,
    pub window: &'a mut Window,
}

impl CursorControl for WindowCursor<'_> {
    fn set_cursor_locked(&mut self, locked: bool) {
        set_cursor_grab(self.cursor, self.window, locked);
    }
}

/// Grab on click while released, release on ESC while grabbed.
fn handle_cursor_grab(
    action_query: Query<&ActionState<PlayerAction>>,
    window: Single<(&mut Window, &mut CursorOptions)>,
) {
    let Ok(action_state) = action_query.single() else {
        return;
    };
    let (mut window, mut cursor) = window.into_inner();

    if action_state.just_pressed(&PlayerAction::GrabCursor) {
        set_cursor_grab(&mut cursor, &mut window, true);
    } else if action_state.just_pressed(&PlayerAction::ReleaseCursor) {
        set_cursor_grab(&mut cursor, &mut window, false);
    }
}

// ============================================================================
// Input focus management
// ============================================================================

/// Gameplay actions. Disabled when the cursor is not grabbed.
const GAMEPLAY_ACTIONS: &[PlayerAction] =
    &[PlayerAction::Move, PlayerAction::Look, PlayerAction::Jump];

/// Enable gameplay actions only while the cursor is grabbed.
///
/// `ToggleDebugUi` is always kept enabled.
fn manage_input_focus(
    mut action_query: Query<&mut ActionState<PlayerAction>>,
    cursor: Single<&CursorOptions>,
) {
    let grabbed = is_grabbed(&cursor);

    for mut action_state in &mut action_query {
        action_state.enable_action(&PlayerAction::ToggleDebugUi);

        for action in GAMEPLAY_ACTIONS {
            if grabbed {
                action_state.enable_action(action);
            } else {
                action_state.disable_action(action);
            }
        }

        if grabbed {
            action_state.disable_action(&PlayerAction::GrabCursor);
            action_state.enable_action(&PlayerAction::ReleaseCursor);
        } else {
            action_state.enable_action(&PlayerAction::GrabCursor);
            action_state.disable_action(&PlayerAction::ReleaseCursor);
        }
    }
}

// ============================================================================
// Controller adapter
// ============================================================================

/// This frame's action state, seen as a controller input source.
pub struct ActionInput<'a>(pub &'a ActionState<PlayerAction>);

impl InputSource for ActionInput<'_> {
    fn axis(&self, axis: InputAxis) -> f32 {
        match axis {
            InputAxis::MoveX => self.0.clamped_axis_pair(&PlayerAction::Move).x,
            InputAxis::MoveZ => self.0.clamped_axis_pair(&PlayerAction::Move).y,
            InputAxis::LookX => self.0.axis_pair(&PlayerAction::Look).x / MOUSE_PIXELS_PER_AXIS_UNIT,
            // Screen Y grows downward; the controller wants positive up.
            InputAxis::LookY => {
                -self.0.axis_pair(&PlayerAction::Look).y / MOUSE_PIXELS_PER_AXIS_UNIT
            }
        }
    }

    fn jump_pressed(&self) -> bool {
        self.0.just_pressed(&PlayerAction::Jump)
    }
}

/// Input used while the cursor is released: nothing held, nothing pressed.
pub struct NeutralInput;

impl InputSource for NeutralInput {
    fn axis(&self, _axis: InputAxis) -> f32 {
        0.0
    }

    fn jump_pressed(&self) -> bool {
        false
    }
}
