//! Gameplay core for the Pengu platformer: the player state machine, static
//! obstacles, and per-frame collision detection. Rendering, physics
//! integration, and input devices live in the embedding driver, which writes
//! body state each frame and calls in here.

pub mod body;
pub mod collision;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod geometry;
pub mod obstacle;
pub mod player;
pub mod powerups;

pub use body::Body;
pub use collision::{CollisionDetection, CollisionStats, RaycastHit};
pub use config::{CollisionSettings, Difficulty, GameSettings, PlayerSettings};
pub use controller::{ControlInput, PlayerController, TouchState};
pub use error::ConfigError;
pub use events::{CollisionEvent, GameNotification};
pub use obstacle::{Obstacle, ObstacleId, ObstacleKind, ObstacleSpec, ObstacleTable};
pub use player::{Direction, Player, PlayerState};
pub use powerups::PowerUpKind;
