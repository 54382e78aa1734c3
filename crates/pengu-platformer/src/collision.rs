use serde::Serialize;

use pengu_core::events::{SharedSink, notify};
use pengu_core::time::{Clock, age_ms};

use crate::config::CollisionSettings;
use crate::events::{CollisionEvent, GameNotification};
use crate::geometry::{Point, distance, ray_rect_intersection};
use crate::obstacle::Obstacle;
use crate::player::Player;

/// Fall damage per frame spent below the threshold.
pub const FALL_DAMAGE: u32 = 1;

/// Nearest obstacle along a ray.
#[derive(Debug, Clone, Copy)]
pub struct RaycastHit<'a> {
    pub obstacle: &'a Obstacle,
    pub point: Point,
    pub distance: f32,
}

/// Counts over the collision history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollisionStats {
    /// Events recorded since creation or the last `clear_collisions`,
    /// including pruned ones.
    pub total_collisions: usize,
    pub recent_collisions: usize,
    pub obstacle_collisions: usize,
    pub fall_collisions: usize,
}

/// Per-frame collision checks plus a timestamped history of what was hit.
pub struct CollisionDetection {
    history: Vec<CollisionEvent>,
    total_recorded: usize,
    settings: CollisionSettings,
    clock: Box<dyn Clock>,
    sink: SharedSink<GameNotification>,
}

impl std::fmt::Debug for CollisionDetection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollisionDetection")
            .field("history", &self.history)
            .field("total_recorded", &self.total_recorded)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl CollisionDetection {
    pub fn new(
        settings: CollisionSettings,
        clock: Box<dyn Clock>,
        sink: SharedSink<GameNotification>,
    ) -> Self {
        Self {
            history: Vec::new(),
            total_recorded: 0,
            settings,
            clock,
            sink,
        }
    }

    pub fn settings(&self) -> &CollisionSettings {
        &self.settings
    }

    /// Test every obstacle against the player in order, applying effects for
    /// each hit. Returns the events recorded this call.
    pub fn check_player_obstacle_collisions(
        &mut self,
        player: &mut Player,
        obstacles: &[Obstacle],
    ) -> Vec<CollisionEvent> {
        let mut hits = Vec::new();
        for obstacle in obstacles {
            if !obstacle.overlaps(player) {
                continue;
            }
            obstacle.apply_collision_effects(player);
            let event = CollisionEvent::Obstacle {
                player: player.id(),
                obstacle: obstacle.id(),
                kind: obstacle.kind(),
                damage: obstacle.damage(),
                timestamp_ms: self.clock.now_ms(),
            };
            self.record(event.clone());
            notify(
                self.sink.as_ref(),
                GameNotification::PlayerObstacleCollision(event.clone()),
            );
            hits.push(event);
        }
        hits
    }

    /// Damage the player once if it has dropped more than `fall_margin`
    /// below the bottom of the screen.
    pub fn check_fall_damage(&mut self, player: &mut Player, screen_height: f32) -> bool {
        let threshold = screen_height + self.settings.fall_margin;
        let y = player.position().y;
        if y <= threshold {
            return false;
        }

        player.take_damage(FALL_DAMAGE);
        tracing::debug!(
            player = player.id(),
            y,
            threshold,
            health = player.health(),
            "player fell"
        );
        let event = CollisionEvent::Fall {
            player: player.id(),
            timestamp_ms: self.clock.now_ms(),
        };
        self.record(event.clone());
        notify(self.sink.as_ref(), GameNotification::PlayerFall(event));
        true
    }

    fn record(&mut self, event: CollisionEvent) {
        self.history.push(event);
        self.total_recorded += 1;
    }

    /// Closest live obstacle crossed by the segment `start..end`. Ties keep
    /// the earlier obstacle.
    pub fn raycast<'a>(
        &self,
        start: Point,
        end: Point,
        obstacles: &'a [Obstacle],
    ) -> Option<RaycastHit<'a>> {
        let mut closest: Option<RaycastHit<'a>> = None;
        for obstacle in obstacles {
            let Some(bounds) = obstacle.bounds() else {
                continue;
            };
            let Some(point) = ray_rect_intersection(start, end, &bounds) else {
                continue;
            };
            let dist = distance(start, point);
            if closest.is_none_or(|best| dist < best.distance) {
                closest = Some(RaycastHit {
                    obstacle,
                    point,
                    distance: dist,
                });
            }
        }
        closest
    }

    /// Snapshot of the history, oldest first.
    pub fn collision_history(&self) -> Vec<CollisionEvent> {
        self.history.clone()
    }

    /// Drop events at least `max_age_ms` old.
    pub fn clear_old_collisions(&mut self, max_age_ms: u64) {
        let now = self.clock.now_ms();
        self.history
            .retain(|event| age_ms(now, event.timestamp_ms()) < max_age_ms);
    }

    /// `clear_old_collisions` with the configured retention.
    pub fn clear_old_collisions_default(&mut self) {
        self.clear_old_collisions(self.settings.history_max_age_ms);
    }

    /// Empty the history and reset the all-time count.
    pub fn clear_collisions(&mut self) {
        self.history.clear();
        self.total_recorded = 0;
    }

    pub fn stats(&self) -> CollisionStats {
        let now = self.clock.now_ms();
        let window = self.settings.stats_window_ms;
        let mut stats = CollisionStats {
            total_collisions: self.total_recorded,
            ..CollisionStats::default()
        };
        for event in self
            .history
            .iter()
            .filter(|e| age_ms(now, e.timestamp_ms()) < window)
        {
            stats.recent_collisions += 1;
            match event {
                CollisionEvent::Obstacle { .. } => stats.obstacle_collisions += 1,
                CollisionEvent::Fall { .. } => stats.fall_collisions += 1,
            }
        }
        stats
    }
}
