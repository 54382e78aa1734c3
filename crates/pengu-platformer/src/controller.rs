use serde::{Deserialize, Serialize};

use crate::player::{Direction, Player};

/// One frame of player intent, from keyboard or touch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlInput {
    pub direction: Direction,
    /// Jump on the ground, float in the air.
    pub action_held: bool,
}

impl ControlInput {
    pub fn new(direction: Direction, action_held: bool) -> Self {
        Self {
            direction,
            action_held,
        }
    }

    /// Combine keyboard and touch input. An active touch replaces the
    /// keyboard state entirely.
    pub fn merge(keyboard: ControlInput, touch: Option<ControlInput>) -> ControlInput {
        touch.unwrap_or(keyboard)
    }
}

/// Current touch gesture. The left half of the screen steers left, the right
/// half steers right, and touching the lower half holds the action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchState {
    active: Option<ControlInput>,
}

impl TouchState {
    pub fn touch_start(&mut self, x: f32, y: f32, screen_width: f32, screen_height: f32) {
        let direction = if x < screen_width / 2.0 {
            Direction::Left
        } else {
            Direction::Right
        };
        self.active = Some(ControlInput::new(direction, y > screen_height / 2.0));
    }

    pub fn touch_end(&mut self) {
        self.active = None;
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn input(&self) -> Option<ControlInput> {
        self.active
    }
}

/// Applies a frame of input to a player.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerController;

impl PlayerController {
    pub fn apply(player: &mut Player, input: ControlInput, delta_ms: f32) {
        player.move_in(input.direction);
        let grounded = player.body().touching_down;
        if input.action_held && grounded {
            player.jump();
        }
        if input.action_held && !grounded {
            player.float();
        } else {
            player.stop_float();
        }
        player.update(delta_ms);
    }
}
