use crate::types::*;
use shared::{constants::WORLD_SPAWN, HardcoreSettings};
use spacetimedb::*;

/// Hardcore rule settings shared by server and clients.
///
/// This is intended to be a single-row table (`id = 1`) seeded by `init`. The server reads it
/// on every event; clients subscribe to it to display durations and health bounds.
///
/// Notes
/// - Durations are milliseconds, health values are half-hearts.
/// - The weekly regeneration runs on Saturday 00:00 local time, where local time is UTC
///   shifted by `utc_offset_minutes`. The shift is fixed; daylight saving is not followed.
#[table(name = hardcore_settings, public)]
pub struct HardcoreSettingsRow {
    /// Unique id (primary key). Use a single row with `id = 1`.
    #[primary_key]
    pub id: u32,

    /// How long a player spectates after dying (milliseconds).
    pub spectator_duration_ms: i64,

    /// Max health lost per death (half-hearts).
    pub death_malus: u32,

    /// Max health gained per weekly regeneration (half-hearts).
    pub weekly_increment: u32,

    pub min_health: i32,
    pub max_health: i32,

    /// Whether a death may take max health below `min_health`.
    pub clamp_penalty_to_floor: bool,

    /// Offset of local time from UTC (minutes) for the weekly regeneration.
    pub utc_offset_minutes: i32,

    /// Where released players without a personal spawn point reappear.
    pub world_spawn: DbVec3,
}

/// The row `init` seeds, and what the server assumes while the row is missing.
impl Default for HardcoreSettingsRow {
    fn default() -> Self {
        Self::new(&HardcoreSettings::default(), WORLD_SPAWN.into())
    }
}

impl HardcoreSettingsRow {
    pub const ID: u32 = 1;

    pub fn new(settings: &HardcoreSettings, world_spawn: DbVec3) -> Self {
        Self {
            id: Self::ID,
            spectator_duration_ms: settings.spectator_duration_ms,
            death_malus: settings.death_malus,
            weekly_increment: settings.weekly_increment,
            min_health: settings.vitality_floor,
            max_health: settings.vitality_cap,
            clamp_penalty_to_floor: settings.clamp_penalty_to_floor,
            utc_offset_minutes: settings.utc_offset_minutes,
            world_spawn,
        }
    }

    pub fn settings(&self) -> HardcoreSettings {
        HardcoreSettings {
            spectator_duration_ms: self.spectator_duration_ms,
            death_malus: self.death_malus,
            weekly_increment: self.weekly_increment,
            vitality_floor: self.min_health,
            vitality_cap: self.max_health,
            clamp_penalty_to_floor: self.clamp_penalty_to_floor,
            utc_offset_minutes: self.utc_offset_minutes,
        }
    }
}
