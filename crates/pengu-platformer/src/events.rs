use serde::{Deserialize, Serialize};

use pengu_core::player::PlayerId;

use crate::obstacle::{ObstacleId, ObstacleKind};

/// A detected collision, as kept in the detector's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CollisionEvent {
    Obstacle {
        player: PlayerId,
        obstacle: ObstacleId,
        kind: ObstacleKind,
        damage: u32,
        timestamp_ms: u64,
    },
    Fall {
        player: PlayerId,
        timestamp_ms: u64,
    },
}

impl CollisionEvent {
    pub fn timestamp_ms(&self) -> u64 {
        match self {
            Self::Obstacle { timestamp_ms, .. } | Self::Fall { timestamp_ms, .. } => *timestamp_ms,
        }
    }

    pub fn player(&self) -> PlayerId {
        match self {
            Self::Obstacle { player, .. } | Self::Fall { player, .. } => *player,
        }
    }

    pub fn is_obstacle(&self) -> bool {
        matches!(self, Self::Obstacle { .. })
    }

    pub fn is_fall(&self) -> bool {
        matches!(self, Self::Fall { .. })
    }
}

/// Notifications published to the injected sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameNotification {
    /// An obstacle applied its damage to a player.
    #[serde(rename = "obstacle-collision")]
    ObstacleCollision {
        obstacle: ObstacleId,
        kind: ObstacleKind,
        player: PlayerId,
        damage: u32,
    },
    /// The collision detector recorded an obstacle hit.
    #[serde(rename = "player-obstacle-collision")]
    PlayerObstacleCollision(CollisionEvent),
    /// The player dropped below the fall threshold.
    #[serde(rename = "player-fall")]
    PlayerFall(CollisionEvent),
    #[serde(rename = "player-death")]
    PlayerDeath { player: PlayerId },
}

impl GameNotification {
    /// Channel name as seen by listeners.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ObstacleCollision { .. } => "obstacle-collision",
            Self::PlayerObstacleCollision(_) => "player-obstacle-collision",
            Self::PlayerFall(_) => "player-fall",
            Self::PlayerDeath { .. } => "player-death",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collision_event_json_is_tagged() {
        let event = CollisionEvent::Fall {
            player: 1,
            timestamp_ms: 42,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "fall");
        assert_eq!(json["timestamp_ms"], 42);

        let event = CollisionEvent::Obstacle {
            player: 1,
            obstacle: ObstacleId(7),
            kind: ObstacleKind::Fire,
            damage: 2,
            timestamp_ms: 5,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "obstacle");
        assert_eq!(json["kind"], "fire");
        let back: CollisionEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn notification_names_match_serde_tags() {
        let notes = [
            GameNotification::ObstacleCollision {
                obstacle: ObstacleId(1),
                kind: ObstacleKind::Spike,
                player: 1,
                damage: 1,
            },
            GameNotification::PlayerObstacleCollision(CollisionEvent::Fall {
                player: 1,
                timestamp_ms: 0,
            }),
            GameNotification::PlayerFall(CollisionEvent::Fall {
                player: 1,
                timestamp_ms: 0,
            }),
            GameNotification::PlayerDeath { player: 1 },
        ];
        for note in notes {
            let json = serde_json::to_value(&note).unwrap();
            let tag = json.as_object().unwrap().keys().next().unwrap().clone();
            assert_eq!(tag, note.name());
        }
    }

    #[test]
    fn accessors() {
        let event = CollisionEvent::Fall {
            player: 4,
            timestamp_ms: 900,
        };
        assert_eq!(event.player(), 4);
        assert_eq!(event.timestamp_ms(), 900);
        assert!(event.is_fall());
        assert!(!event.is_obstacle());
    }
}
