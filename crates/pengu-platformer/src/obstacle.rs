use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use pengu_core::events::{SharedSink, notify};

use crate::body::Body;
use crate::error::ConfigError;
use crate::events::GameNotification;
use crate::geometry::{Point, Rect, aabb_overlap};
use crate::player::Player;

/// Default obstacle body extent (px).
pub const OBSTACLE_SIZE: f32 = 40.0;

/// Obstacle types. Unknown type names resolve to `Spike`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    #[default]
    Spike,
    Pit,
    Fire,
    Ice,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Spike,
        ObstacleKind::Pit,
        ObstacleKind::Fire,
        ObstacleKind::Ice,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ObstacleKind::Spike => "spike",
            ObstacleKind::Pit => "pit",
            ObstacleKind::Fire => "fire",
            ObstacleKind::Ice => "ice",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "pit" => ObstacleKind::Pit,
            "fire" => ObstacleKind::Fire,
            "ice" => ObstacleKind::Ice,
            _ => ObstacleKind::Spike,
        }
    }
}

/// Per-type obstacle metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub texture: String,
    pub damage: u32,
    pub description: String,
    #[serde(default = "default_extent")]
    pub width: f32,
    #[serde(default = "default_extent")]
    pub height: f32,
}

fn default_extent() -> f32 {
    OBSTACLE_SIZE
}

impl ObstacleSpec {
    fn new(texture: &str, damage: u32, description: &str) -> Self {
        Self {
            texture: texture.to_string(),
            damage,
            description: description.to_string(),
            width: OBSTACLE_SIZE,
            height: OBSTACLE_SIZE,
        }
    }
}

static DEFAULT_SPIKE: LazyLock<ObstacleSpec> =
    LazyLock::new(|| ObstacleSpec::new("spike", 1, "Spike"));

static DEFAULT_TABLE: LazyLock<BTreeMap<String, ObstacleSpec>> = LazyLock::new(|| {
    BTreeMap::from([
        ("spike".to_string(), DEFAULT_SPIKE.clone()),
        ("pit".to_string(), ObstacleSpec::new("pit", 3, "Pit")),
        ("fire".to_string(), ObstacleSpec::new("fire", 2, "Fire")),
        ("ice".to_string(), ObstacleSpec::new("ice", 1, "Ice")),
    ])
});

/// Type name -> obstacle metadata. Entries read from settings are layered
/// over the built-in table, so a file only needs the types it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, ObstacleSpec>",
    into = "BTreeMap<String, ObstacleSpec>"
)]
pub struct ObstacleTable {
    entries: BTreeMap<String, ObstacleSpec>,
}

impl Default for ObstacleTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_TABLE.clone(),
        }
    }
}

impl From<BTreeMap<String, ObstacleSpec>> for ObstacleTable {
    fn from(overrides: BTreeMap<String, ObstacleSpec>) -> Self {
        let mut table = Self::default();
        table.entries.extend(overrides);
        table
    }
}

impl From<ObstacleTable> for BTreeMap<String, ObstacleSpec> {
    fn from(table: ObstacleTable) -> Self {
        table.entries
    }
}

impl ObstacleTable {
    /// Metadata for a type name. Unknown names get the `spike` entry.
    pub fn lookup(&self, name: &str) -> &ObstacleSpec {
        self.entries
            .get(name)
            .or_else(|| self.entries.get(ObstacleKind::Spike.name()))
            .unwrap_or(&*DEFAULT_SPIKE)
    }

    pub fn spec(&self, kind: ObstacleKind) -> &ObstacleSpec {
        self.lookup(kind.name())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, spec) in &self.entries {
            if spec.damage == 0 {
                return Err(ConfigError::Invalid(format!(
                    "obstacle `{name}` must deal at least 1 damage"
                )));
            }
            if spec.width.is_nan()
                || spec.height.is_nan()
                || spec.width <= 0.0
                || spec.height <= 0.0
            {
                return Err(ConfigError::Invalid(format!(
                    "obstacle `{name}` body extents must be positive"
                )));
            }
        }
        Ok(())
    }
}

/// Identifier of an obstacle placement within a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId(pub u32);

impl std::fmt::Display for ObstacleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "obstacle#{}", self.0)
    }
}

/// Snapshot of an obstacle for HUD and debug views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleState {
    pub id: ObstacleId,
    pub kind: ObstacleKind,
    pub position: Option<Point>,
    pub damage: u32,
    pub description: String,
}

/// A static hazard placed in the level.
///
/// Kind and damage are fixed at construction. `destroy` drops the body;
/// a destroyed obstacle never overlaps anything.
pub struct Obstacle {
    id: ObstacleId,
    kind: ObstacleKind,
    spec: ObstacleSpec,
    body: Option<Body>,
    sink: SharedSink<GameNotification>,
}

impl std::fmt::Debug for Obstacle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Obstacle")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("spec", &self.spec)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

impl Obstacle {
    pub fn new(
        id: ObstacleId,
        kind: ObstacleKind,
        x: f32,
        y: f32,
        table: &ObstacleTable,
        sink: SharedSink<GameNotification>,
    ) -> Self {
        let spec = table.spec(kind).clone();
        let body = Body::new(x, y, spec.width, spec.height);
        Self {
            id,
            kind,
            spec,
            body: Some(body),
            sink,
        }
    }

    /// Place an obstacle from a type name; unknown names become spikes.
    pub fn from_name(
        id: ObstacleId,
        name: &str,
        x: f32,
        y: f32,
        table: &ObstacleTable,
        sink: SharedSink<GameNotification>,
    ) -> Self {
        Self::new(id, ObstacleKind::from_name(name), x, y, table, sink)
    }

    pub fn id(&self) -> ObstacleId {
        self.id
    }

    pub fn kind(&self) -> ObstacleKind {
        self.kind
    }

    pub fn damage(&self) -> u32 {
        self.spec.damage
    }

    pub fn texture(&self) -> &str {
        &self.spec.texture
    }

    pub fn description(&self) -> &str {
        &self.spec.description
    }

    pub fn config(&self) -> &ObstacleSpec {
        &self.spec
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    pub fn is_destroyed(&self) -> bool {
        self.body.is_none()
    }

    pub fn position(&self) -> Option<Point> {
        self.body.as_ref().map(Body::position)
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.body.as_ref().map(Body::bounds)
    }

    /// Whether the player's body overlaps this obstacle. No side effects.
    pub fn overlaps(&self, player: &Player) -> bool {
        self.bounds()
            .is_some_and(|bounds| aabb_overlap(&player.body().bounds(), &bounds))
    }

    /// Damage the player and announce the hit.
    pub fn apply_collision_effects(&self, player: &mut Player) {
        let damage = self.damage();
        player.take_damage(damage);
        tracing::debug!(
            obstacle = %self.id,
            kind = self.kind.name(),
            damage,
            health = player.health(),
            "{} hit",
            self.spec.description
        );
        notify(
            self.sink.as_ref(),
            GameNotification::ObstacleCollision {
                obstacle: self.id,
                kind: self.kind,
                player: player.id(),
                damage,
            },
        );
    }

    /// Overlap test that applies the collision effects on a hit.
    pub fn check_collision(&self, player: &mut Player) -> bool {
        let hit = self.overlaps(player);
        if hit {
            self.apply_collision_effects(player);
        }
        hit
    }

    pub fn state(&self) -> ObstacleState {
        ObstacleState {
            id: self.id,
            kind: self.kind,
            position: self.position(),
            damage: self.damage(),
            description: self.spec.description.clone(),
        }
    }

    /// Release the body. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.body.take().is_some() {
            tracing::trace!(obstacle = %self.id, "obstacle destroyed");
        }
    }
}
