use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal problems detected while loading map or wave data.
///
/// Every variant names the data source through `origin` so an author can
/// locate the offending file.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A game lists no levels.
    #[error("invalid game {origin}: no levels listed")]
    EmptyGame {
        /// Source identifier of the game.
        origin: String,
    },
    /// The map contained no rows at all.
    #[error("invalid map {origin}: map contains no rows")]
    EmptyMap {
        /// Source identifier of the map.
        origin: String,
    },
    /// A row's width differs from the first row's.
    #[error("invalid map {origin}: inconsistent width at line {line} (expected {expected}, found {found})")]
    RaggedRow {
        /// Source identifier of the map.
        origin: String,
        /// One-based line number of the offending row.
        line: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A symbol does not name any tile kind.
    #[error("invalid map {origin}: unknown tile type '{symbol}' at position ({x},{y})")]
    UnknownTile {
        /// Source identifier of the map.
        origin: String,
        /// Offending symbol.
        symbol: char,
        /// Zero-based column of the symbol.
        x: usize,
        /// Zero-based row of the symbol.
        y: usize,
    },
    /// No spawn tile was found.
    #[error("invalid map {origin}: no enemy spawn point (S)")]
    MissingSpawn {
        /// Source identifier of the map.
        origin: String,
    },
    /// More than one spawn tile was found.
    #[error("invalid map {origin}: {count} enemy spawn points (S), only one is allowed")]
    MultipleSpawns {
        /// Source identifier of the map.
        origin: String,
        /// Number of spawn tiles found.
        count: usize,
    },
    /// No base tile was found.
    #[error("invalid map {origin}: no base (B)")]
    MissingBase {
        /// Source identifier of the map.
        origin: String,
    },
    /// More than one base tile was found.
    #[error("invalid map {origin}: {count} bases (B), only one is allowed")]
    MultipleBases {
        /// Source identifier of the map.
        origin: String,
        /// Number of base tiles found.
        count: usize,
    },
    /// The spawn cannot reach the base over road tiles.
    #[error("invalid map path in {origin}: no path found from spawn to base")]
    NoPath {
        /// Source identifier of the map.
        origin: String,
    },
    /// The spawn reaches the base over more than one simple path.
    #[error("invalid map path in {origin}: {count} distinct paths from spawn to base, only one is allowed")]
    AmbiguousPath {
        /// Source identifier of the map.
        origin: String,
        /// Number of distinct simple paths found.
        count: usize,
    },
    /// A wave line does not have the `time|name` shape.
    #[error("malformed spawn entry in {origin}, line {line}: `{content}`")]
    MalformedSpawnEntry {
        /// Source identifier of the wave.
        origin: String,
        /// One-based line number.
        line: usize,
        /// Offending line.
        content: String,
    },
    /// A wave line carries a time that is not a non-negative number.
    #[error("invalid spawn time `{value}` in {origin}, line {line}: `{content}`")]
    InvalidSpawnTime {
        /// Source identifier of the wave.
        origin: String,
        /// One-based line number.
        line: usize,
        /// Offending line.
        content: String,
        /// Text that failed to parse as a time.
        value: String,
    },
    /// A wave line names an unknown enemy archetype.
    #[error("unknown enemy type `{name}` in {origin}, line {line}: `{content}`")]
    UnknownEnemy {
        /// Source identifier of the wave.
        origin: String,
        /// One-based line number.
        line: usize,
        /// Offending line.
        content: String,
        /// Unrecognised enemy name.
        name: String,
    },
    /// A wave line is scheduled earlier than the line before it.
    #[error("spawn time goes backwards in {origin}, line {line}: `{content}`")]
    UnorderedSpawnTime {
        /// Source identifier of the wave.
        origin: String,
        /// One-based line number.
        line: usize,
        /// Offending line.
        content: String,
    },
    /// A session setting holds a value the simulation cannot use.
    #[error("invalid value for `{setting}` in {origin}: {value}")]
    InvalidSetting {
        /// Source identifier of the configuration.
        origin: String,
        /// Name of the rejected setting.
        setting: String,
        /// Rejected value as written.
        value: String,
    },
}

/// Reasons a tower placement request can be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The cell lies outside the grid.
    OutOfBounds,
    /// The tile does not accept towers.
    NotConstructible,
    /// The tile already hosts a tower.
    Occupied,
    /// The player cannot pay for the tower.
    InsufficientFunds,
    /// The session has already ended.
    SessionOver,
}

/// Reasons a tower removal request can be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemovalError {
    /// No tower with the provided identifier exists.
    MissingTower,
    /// The session has already ended.
    SessionOver,
}
