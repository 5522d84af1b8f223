use chrono::Weekday;

use crate::{EpochMillis, Position, Vitality};

/// How long a participant stays restricted after dying (milliseconds).
pub const SPECTATOR_DURATION_MS: EpochMillis = 3_600 * 1_000;

/// Vitality removed on death.
///
/// Convention: vitality is stored in half-units, so `2` = one heart.
pub const DEATH_MALUS: u32 = 2;

/// Vitality granted by every weekly regeneration sweep (half-units).
pub const WEEKLY_INCREMENT: u32 = 2;

/// Lowest vitality the increase procedure clamps up to before adding.
pub const VITALITY_FLOOR: Vitality = 2;

/// Highest vitality any participant can hold. Also the administrative reset target.
pub const VITALITY_CAP: Vitality = 20;

/// Weekday of the weekly regeneration anchor (local time).
///
/// Saturday 00:00 is used as "the end of Friday".
pub const REGEN_WEEKDAY: Weekday = Weekday::Sat;

/// Hour of the weekly regeneration anchor (local time, 0..=23).
pub const REGEN_HOUR: u32 = 0;

/// Minute of the weekly regeneration anchor (local time, 0..=59).
pub const REGEN_MINUTE: u32 = 0;

/// One week in milliseconds.
pub const WEEK_MS: EpochMillis = 7 * 24 * 3_600 * 1_000;

/// File-name suffix of persisted participant records in the player data directory.
pub const PLAYER_DATA_SUFFIX: &str = ".dat";

/// Volume of the release bell.
pub const BELL_VOLUME: f32 = 2.0;

/// Pitch of the release bell.
pub const BELL_PITCH: f32 = 1.0;

/// World default spawn used when the host has no configured one (meters).
pub const WORLD_SPAWN: Position = Position::new(0.0, 64.0, 0.0);
