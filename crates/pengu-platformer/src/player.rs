use serde::{Deserialize, Serialize};

use pengu_core::events::{SharedSink, notify};
use pengu_core::player::PlayerId;

use crate::body::Body;
use crate::config::{GameSettings, PlayerSettings};
use crate::events::GameNotification;
use crate::geometry::Point;
use crate::powerups::PowerUpKind;

/// Float time credited per `float()` call (one 60 Hz frame).
pub const FLOAT_TICK_MS: f32 = 16.0;
/// Vertical velocity factor applied per `float()` call.
pub const FLOAT_DAMPING: f32 = 0.8;
/// Damage taken by `take_hit`.
pub const DEFAULT_DAMAGE: u32 = 1;

/// Horizontal movement intent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    #[default]
    Stop,
}

impl Direction {
    /// Unknown names stop the player.
    pub fn from_name(name: &str) -> Self {
        match name {
            "left" => Direction::Left,
            "right" => Direction::Right,
            _ => Direction::Stop,
        }
    }
}

/// Serializable snapshot of a player, for HUD and debug views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    pub health: u32,
    pub is_dead: bool,
    pub is_floating: bool,
    pub float_time: f32,
    pub power_ups: Vec<PowerUpKind>,
    pub position: Point,
}

/// The player character.
///
/// Movement writes velocities into the body; the external physics step
/// integrates them and reports ground contact back through
/// `Body::touching_down`. A dead player ignores movement, jumping, floating,
/// and damage until `reset`.
pub struct Player {
    id: PlayerId,
    body: Body,
    base: PlayerSettings,
    power_up_multiplier: f32,
    health: u32,
    speed: f32,
    jump_velocity: f32,
    is_floating: bool,
    float_time: f32,
    is_dead: bool,
    power_ups: Vec<PowerUpKind>,
    sink: SharedSink<GameNotification>,
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("id", &self.id)
            .field("body", &self.body)
            .field("health", &self.health)
            .field("speed", &self.speed)
            .field("jump_velocity", &self.jump_velocity)
            .field("is_floating", &self.is_floating)
            .field("float_time", &self.float_time)
            .field("is_dead", &self.is_dead)
            .field("power_ups", &self.power_ups)
            .finish_non_exhaustive()
    }
}

impl Player {
    pub fn new(
        id: PlayerId,
        x: f32,
        y: f32,
        settings: &GameSettings,
        sink: SharedSink<GameNotification>,
    ) -> Self {
        let mut base = settings.player.clone();
        // A player always spawns alive.
        base.health = base.health.max(1);
        Self {
            id,
            body: Body::new(x, y, base.width, base.height),
            power_up_multiplier: settings.power_up_multiplier,
            health: base.health,
            speed: base.speed,
            jump_velocity: base.jump_velocity,
            is_floating: false,
            float_time: 0.0,
            is_dead: false,
            power_ups: Vec::new(),
            base,
            sink,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Body handle for the physics step.
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    pub fn position(&self) -> Point {
        self.body.position()
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn jump_velocity(&self) -> f32 {
        self.jump_velocity
    }

    pub fn max_float_time(&self) -> f32 {
        self.base.max_float_time
    }

    pub fn float_time(&self) -> f32 {
        self.float_time
    }

    pub fn is_floating(&self) -> bool {
        self.is_floating
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    pub fn power_ups(&self) -> &[PowerUpKind] {
        &self.power_ups
    }

    pub fn has_power_up(&self, kind: PowerUpKind) -> bool {
        self.power_ups.contains(&kind)
    }

    pub fn move_in(&mut self, direction: Direction) {
        if self.is_dead {
            return;
        }
        self.body.velocity_x = match direction {
            Direction::Left => -self.speed,
            Direction::Right => self.speed,
            Direction::Stop => 0.0,
        };
    }

    /// Jump, only from the ground.
    pub fn jump(&mut self) {
        if self.is_dead || !self.body.touching_down {
            return;
        }
        self.body.velocity_y = self.jump_velocity;
    }

    /// Slow the current vertical motion while airborne and float budget
    /// remains. Each call credits a fixed `FLOAT_TICK_MS`, independent of
    /// the time `update` integrates.
    pub fn float(&mut self) {
        if self.is_dead {
            return;
        }
        if !self.body.touching_down && self.float_time < self.base.max_float_time {
            self.body.velocity_y *= FLOAT_DAMPING;
            self.is_floating = true;
            self.float_time = (self.float_time + FLOAT_TICK_MS).min(self.base.max_float_time);
        } else {
            self.is_floating = false;
        }
    }

    pub fn stop_float(&mut self) {
        self.is_floating = false;
    }

    /// Lose `amount` health, dying when it reaches zero.
    pub fn take_damage(&mut self, amount: u32) {
        if self.is_dead {
            return;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.is_dead = true;
            self.die();
        }
    }

    pub fn take_hit(&mut self) {
        self.take_damage(DEFAULT_DAMAGE);
    }

    fn die(&self) {
        tracing::info!(player = self.id, "player died");
        notify(
            self.sink.as_ref(),
            GameNotification::PlayerDeath { player: self.id },
        );
    }

    /// Revive with base stats. Held power-ups are discarded.
    pub fn reset(&mut self) {
        self.health = self.base.health;
        self.is_dead = false;
        self.is_floating = false;
        self.float_time = 0.0;
        self.power_ups.clear();
        self.speed = self.base.speed;
        self.jump_velocity = self.base.jump_velocity;
        tracing::info!(player = self.id, health = self.health, "player reset");
    }

    /// Apply a power-up. Re-applying a held one is a no-op.
    pub fn apply_power_up(&mut self, kind: PowerUpKind) {
        if self.has_power_up(kind) {
            return;
        }
        self.power_ups.push(kind);
        match kind {
            PowerUpKind::Speed => self.speed = self.base.speed * self.power_up_multiplier,
            PowerUpKind::Jump => {
                self.jump_velocity = self.base.jump_velocity * self.power_up_multiplier;
            },
        }
    }

    /// Drop a power-up and restore its stat to the base value.
    pub fn remove_power_up(&mut self, kind: PowerUpKind) {
        self.power_ups.retain(|&held| held != kind);
        match kind {
            PowerUpKind::Speed => self.speed = self.base.speed,
            PowerUpKind::Jump => self.jump_velocity = self.base.jump_velocity,
        }
    }

    /// Advance float bookkeeping by `delta_ms` of real time. Floating spends
    /// the budget; otherwise it recovers at twice that rate.
    pub fn update(&mut self, delta_ms: f32) {
        if self.is_floating {
            self.float_time = (self.float_time + delta_ms).min(self.base.max_float_time);
            if self.float_time >= self.base.max_float_time {
                self.is_floating = false;
            }
        } else {
            self.float_time = (self.float_time - delta_ms * 2.0).max(0.0);
        }
    }

    pub fn state(&self) -> PlayerState {
        PlayerState {
            id: self.id,
            health: self.health,
            is_dead: self.is_dead,
            is_floating: self.is_floating,
            float_time: self.float_time,
            power_ups: self.power_ups.clone(),
            position: self.position(),
        }
    }
}
