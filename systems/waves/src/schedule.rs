//! Timed spawn schedules and their text form.

use std::{sync::Arc, time::Duration};

use elemental_defence_core::{ConfigError, EnemyKind};
use elemental_defence_world::{Enemy, Path};

/// One scheduled spawn together with the line it was read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnEntry {
    time: Duration,
    kind: EnemyKind,
    line: usize,
    content: String,
}

impl SpawnEntry {
    /// Creates an entry that spawns `kind` once `time` has elapsed.
    #[must_use]
    pub fn new(time: Duration, kind: EnemyKind, line: usize, content: impl Into<String>) -> Self {
        Self {
            time,
            kind,
            line,
            content: content.into(),
        }
    }

    /// Offset from the start of the wave.
    #[must_use]
    pub const fn time(&self) -> Duration {
        self.time
    }

    /// Archetype to spawn.
    #[must_use]
    pub const fn kind(&self) -> EnemyKind {
        self.kind
    }

    /// One-based source line.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Source line as written.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Parses wave text made of `time|Enemy Name` lines.
///
/// Blank lines are skipped. Times are seconds from the start of the wave and
/// may not decrease from one entry to the next.
pub fn parse_wave(origin: &str, text: &str) -> Result<Vec<SpawnEntry>, ConfigError> {
    let mut entries: Vec<SpawnEntry> = Vec::new();

    for (index, content) in text.lines().enumerate() {
        let line = index + 1;
        if content.trim().is_empty() {
            continue;
        }

        let mut parts = content.split('|');
        let (Some(time_text), Some(name_text), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ConfigError::MalformedSpawnEntry {
                origin: origin.to_owned(),
                line,
                content: content.to_owned(),
            });
        };

        let value = time_text.trim();
        let Some(time) = parse_seconds(value) else {
            return Err(ConfigError::InvalidSpawnTime {
                origin: origin.to_owned(),
                line,
                content: content.to_owned(),
                value: value.to_owned(),
            });
        };

        let name = name_text.trim();
        let Some(kind) = EnemyKind::from_name(name) else {
            return Err(ConfigError::UnknownEnemy {
                origin: origin.to_owned(),
                line,
                content: content.to_owned(),
                name: name.to_owned(),
            });
        };

        if entries.last().is_some_and(|previous| time < previous.time) {
            return Err(ConfigError::UnorderedSpawnTime {
                origin: origin.to_owned(),
                line,
                content: content.to_owned(),
            });
        }

        entries.push(SpawnEntry::new(time, kind, line, content));
    }

    Ok(entries)
}

fn parse_seconds(value: &str) -> Option<Duration> {
    let seconds: f64 = value.parse().ok()?;
    Duration::try_from_secs_f64(seconds).ok()
}

/// Ordered spawn schedule with its own clock.
#[derive(Clone, Debug)]
pub struct Wave {
    entries: Vec<SpawnEntry>,
    elapsed: Duration,
    cursor: usize,
}

impl Wave {
    /// Creates a wave that has not started yet.
    #[must_use]
    pub fn new(entries: Vec<SpawnEntry>) -> Self {
        Self {
            entries,
            elapsed: Duration::ZERO,
            cursor: 0,
        }
    }

    /// Advances the wave clock and spawns at most one due enemy on `path`.
    ///
    /// Entries whose time passed during a long tick fire on later ticks, one
    /// per tick, since the clock is already past them.
    pub fn update(&mut self, dt: Duration, path: &Arc<Path>) -> Option<Enemy> {
        self.elapsed = self.elapsed.saturating_add(dt);
        let entry = self.entries.get(self.cursor)?;
        if entry.time > self.elapsed {
            return None;
        }
        self.cursor += 1;
        Some(Enemy::new(entry.kind, Arc::clone(path)))
    }

    /// Reports whether every entry has been spawned.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.entries.len()
    }

    /// Time elapsed since the wave started.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Scheduled entries in order.
    #[must_use]
    pub fn entries(&self) -> &[SpawnEntry] {
        &self.entries
    }

    /// Number of entries already spawned.
    #[must_use]
    pub const fn spawned(&self) -> usize {
        self.cursor
    }
}
