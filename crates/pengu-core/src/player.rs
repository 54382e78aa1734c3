/// Unique identifier for a player in a level.
pub type PlayerId = u64;

/// Identifier given to the local player when a level has only one.
pub const LOCAL_PLAYER: PlayerId = 1;
