use serde::{Deserialize, Serialize};

/// Platformer power-up types. Each one scales a single movement stat and
/// stays active until removed or the player is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerUpKind {
    Speed,
    Jump,
}

impl PowerUpKind {
    pub const fn name(self) -> &'static str {
        match self {
            PowerUpKind::Speed => "speed",
            PowerUpKind::Jump => "jump",
        }
    }

    /// `None` for names with no stat effect.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "speed" => Some(PowerUpKind::Speed),
            "jump" => Some(PowerUpKind::Jump),
            _ => None,
        }
    }
}
