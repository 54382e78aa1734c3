use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::obstacle::ObstacleTable;

/// Starting health.
pub const PLAYER_HEALTH: u32 = 3;
/// Horizontal move speed (px/s).
pub const PLAYER_SPEED: f32 = 200.0;
/// Jump initial velocity (px/s, negative is up).
pub const JUMP_VELOCITY: f32 = -400.0;
/// Float budget per airborne period (ms).
pub const MAX_FLOAT_TIME: f32 = 3000.0;
/// Player body width.
pub const PLAYER_WIDTH: f32 = 40.0;
/// Player body height.
pub const PLAYER_HEIGHT: f32 = 40.0;
/// Stat multiplier applied by a held power-up.
pub const POWER_UP_MULTIPLIER: f32 = 1.5;
/// Distance below the screen bottom past which the player takes fall damage.
pub const FALL_MARGIN: f32 = 50.0;
/// Default retention for `clear_old_collisions_default`.
pub const HISTORY_MAX_AGE_MS: u64 = 10_000;
/// Trailing window used by collision stats.
pub const STATS_WINDOW_MS: u64 = 5_000;

/// Base player stats. Power-ups scale from these and `reset` restores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub health: u32,
    pub speed: f32,
    pub jump_velocity: f32,
    pub max_float_time: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            health: PLAYER_HEALTH,
            speed: PLAYER_SPEED,
            jump_velocity: JUMP_VELOCITY,
            max_float_time: MAX_FLOAT_TIME,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
        }
    }
}

impl PlayerSettings {
    /// Default stats with the preset's starting health.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self {
            health: difficulty.health(),
            ..Self::default()
        }
    }
}

/// Collision detector tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionSettings {
    pub fall_margin: f32,
    pub history_max_age_ms: u64,
    pub stats_window_ms: u64,
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self {
            fall_margin: FALL_MARGIN,
            history_max_age_ms: HISTORY_MAX_AGE_MS,
            stats_window_ms: STATS_WINDOW_MS,
        }
    }
}

/// Difficulty presets. Only starting health varies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub const fn health(self) -> u32 {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Normal => 3,
            Difficulty::Hard => 1,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Top-level settings, loadable from TOML. Loaded once, immutable after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub power_up_multiplier: f32,
    pub player: PlayerSettings,
    pub collision: CollisionSettings,
    pub obstacles: ObstacleTable,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            power_up_multiplier: POWER_UP_MULTIPLIER,
            player: PlayerSettings::default(),
            collision: CollisionSettings::default(),
            obstacles: ObstacleTable::default(),
        }
    }
}

impl GameSettings {
    /// Parse and validate settings. Missing fields take their defaults;
    /// obstacle entries override the built-in table per type.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: GameSettings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load settings from `PENGU_CONFIG` or `config/pengu.toml`. Falls back to
    /// defaults if the file is missing or invalid.
    pub fn load() -> Self {
        let path =
            std::env::var("PENGU_CONFIG").unwrap_or_else(|_| "config/pengu.toml".to_string());
        if !Path::new(&path).exists() {
            return GameSettings::default();
        }
        match Self::from_path(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Failed to load {path}: {e}, using defaults");
                GameSettings::default()
            },
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player.health == 0 {
            return Err(ConfigError::Invalid("player.health must be at least 1".into()));
        }
        if self.player.max_float_time.is_nan() || self.player.max_float_time <= 0.0 {
            return Err(ConfigError::Invalid(
                "player.max_float_time must be positive".into(),
            ));
        }
        if self.player.width.is_nan()
            || self.player.height.is_nan()
            || self.player.width <= 0.0
            || self.player.height <= 0.0
        {
            return Err(ConfigError::Invalid(
                "player body extents must be positive".into(),
            ));
        }
        if !self.power_up_multiplier.is_finite() {
            return Err(ConfigError::Invalid(
                "power_up_multiplier must be finite".into(),
            ));
        }
        self.obstacles.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstacle::ObstacleKind;

    #[test]
    fn defaults_match_tuning_constants() {
        let settings = GameSettings::default();
        assert_eq!(settings.player.health, 3);
        assert_eq!(settings.player.speed, 200.0);
        assert_eq!(settings.player.jump_velocity, -400.0);
        assert_eq!(settings.player.max_float_time, 3000.0);
        assert_eq!(settings.power_up_multiplier, 1.5);
        assert_eq!(settings.collision.fall_margin, 50.0);
        assert_eq!(settings.collision.history_max_age_ms, 10_000);
        assert_eq!(settings.collision.stats_window_ms, 5_000);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let settings = GameSettings::from_toml_str(
            r#"
            power_up_multiplier = 2.0

            [player]
            health = 5
            "#,
        )
        .unwrap();
        assert_eq!(settings.player.health, 5);
        assert_eq!(settings.player.speed, 200.0);
        assert_eq!(settings.power_up_multiplier, 2.0);
        assert_eq!(settings.collision, CollisionSettings::default());
        assert_eq!(settings.obstacles, ObstacleTable::default());
    }

    #[test]
    fn obstacle_override_keeps_other_entries() {
        let settings = GameSettings::from_toml_str(
            r#"
            [obstacles.pit]
            texture = "deep_pit"
            damage = 5
            description = "Deep pit"
            "#,
        )
        .unwrap();
        assert_eq!(settings.obstacles.spec(ObstacleKind::Pit).damage, 5);
        assert_eq!(settings.obstacles.spec(ObstacleKind::Pit).texture, "deep_pit");
        assert_eq!(settings.obstacles.spec(ObstacleKind::Fire).damage, 2);
        assert_eq!(settings.obstacles.spec(ObstacleKind::Spike).damage, 1);
    }

    #[test]
    fn zero_health_is_rejected() {
        let err = GameSettings::from_toml_str("[player]\nhealth = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "got {err}");
    }

    #[test]
    fn non_positive_float_time_is_rejected() {
        let err = GameSettings::from_toml_str("[player]\nmax_float_time = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_damage_obstacle_is_rejected() {
        let err = GameSettings::from_toml_str(
            r#"
            [obstacles.ice]
            texture = "ice"
            damage = 0
            description = "Ice"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = GameSettings::from_toml_str("[player\nhealth = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GameSettings::from_path("definitely/not/here/pengu.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("definitely/not/here"));
    }

    #[test]
    fn settings_toml_roundtrip() {
        let settings = GameSettings::default();
        let text = toml::to_string(&settings).unwrap();
        let back = GameSettings::from_toml_str(&text).unwrap();
        assert_eq!(settings, back);
    }

    #[test]
    fn difficulty_presets() {
        assert_eq!(Difficulty::Easy.health(), 5);
        assert_eq!(Difficulty::Normal.health(), 3);
        assert_eq!(Difficulty::Hard.health(), 1);
        assert_eq!(Difficulty::from_name("hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_name("nightmare"), None);
        for d in Difficulty::ALL {
            let player = PlayerSettings::for_difficulty(d);
            assert_eq!(player.health, d.health());
            assert_eq!(player.speed, PLAYER_SPEED);
        }
    }
}
