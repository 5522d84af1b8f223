//! Rule configuration.
//!
//! [`HardcoreSettings`] is the schema-agnostic form of the configuration row a host persists.
//! Defaults come from [`crate::constants`]. Hosts should call [`HardcoreSettings::validate`]
//! before handing settings to the engine.
//!
//! The weekly anchor weekday/time is fixed (see [`crate::constants::REGEN_WEEKDAY`]). Only the
//! UTC offset that defines "local time" is configurable, since a hosted module has no time zone.

use chrono::FixedOffset;

use crate::{
    EpochMillis, HardcoreError, Vitality,
    constants::{
        DEATH_MALUS, REGEN_HOUR, REGEN_MINUTE, REGEN_WEEKDAY, SPECTATOR_DURATION_MS,
        VITALITY_CAP, VITALITY_FLOOR, WEEK_MS, WEEKLY_INCREMENT,
    },
    vitality::VitalityBounds,
    weekly::WeeklyAnchor,
};

/// Largest accepted UTC offset magnitude, exclusive (minutes).
const MAX_UTC_OFFSET_MINUTES: i32 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardcoreSettings {
    /// Restriction length after a death (milliseconds). Must be positive.
    pub spectator_duration_ms: EpochMillis,
    /// Vitality removed on death (half-units).
    pub death_malus: u32,
    /// Vitality granted per weekly sweep (half-units).
    pub weekly_increment: u32,
    pub vitality_floor: Vitality,
    pub vitality_cap: Vitality,
    /// When true, the death penalty never takes vitality below the floor.
    /// When false, the penalty is a plain subtraction and may go below the floor.
    pub clamp_penalty_to_floor: bool,
    /// Offset of "local time" from UTC, in minutes, for the weekly anchor.
    ///
    /// The offset is fixed. Daylight saving changes are not followed, so a region that shifts
    /// its clocks sees the regeneration move by an hour of local time for part of the year.
    pub utc_offset_minutes: i32,
}

impl Default for HardcoreSettings {
    fn default() -> Self {
        Self {
            spectator_duration_ms: SPECTATOR_DURATION_MS,
            death_malus: DEATH_MALUS,
            weekly_increment: WEEKLY_INCREMENT,
            vitality_floor: VITALITY_FLOOR,
            vitality_cap: VITALITY_CAP,
            clamp_penalty_to_floor: true,
            utc_offset_minutes: 0,
        }
    }
}

impl HardcoreSettings {
    pub fn validate(&self) -> Result<(), HardcoreError> {
        if self.spectator_duration_ms <= 0 {
            return Err(HardcoreError::InvalidSettings(format!(
                "spectator duration must be positive, got {}ms",
                self.spectator_duration_ms
            )));
        }
        if self.vitality_floor > self.vitality_cap {
            return Err(HardcoreError::InvalidSettings(format!(
                "vitality floor {} exceeds cap {}",
                self.vitality_floor, self.vitality_cap
            )));
        }
        if self.utc_offset_minutes.abs() >= MAX_UTC_OFFSET_MINUTES {
            return Err(HardcoreError::InvalidSettings(format!(
                "utc offset {} minutes is out of range",
                self.utc_offset_minutes
            )));
        }
        Ok(())
    }

    pub fn bounds(&self) -> VitalityBounds {
        VitalityBounds {
            floor: self.vitality_floor,
            cap: self.vitality_cap,
        }
    }

    pub fn local_offset(&self) -> Result<FixedOffset, HardcoreError> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            HardcoreError::InvalidSettings(format!(
                "utc offset {} minutes is out of range",
                self.utc_offset_minutes
            ))
        })
    }

    /// The weekly regeneration anchor in this configuration's local time.
    pub fn weekly_anchor(&self) -> Result<WeeklyAnchor, HardcoreError> {
        WeeklyAnchor::new(REGEN_WEEKDAY, REGEN_HOUR, REGEN_MINUTE, self.local_offset()?)
    }

    /// Next weekly regeneration instant strictly after `now`.
    ///
    /// An unusable anchor falls back to one week from `now` so the trigger is never lost.
    pub fn next_weekly_fire(&self, now: EpochMillis) -> EpochMillis {
        let next = match self.weekly_anchor() {
            Ok(anchor) => anchor.next_fire_after(now),
            Err(err) => {
                log::error!("{err}; next weekly regeneration falls back to one week from now");
                now.saturating_add(WEEK_MS)
            }
        };
        log::info!("Next weekly regeneration in {}m", (next - now) / 60_000);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = HardcoreSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.spectator_duration_ms, 3_600_000);
        assert_eq!(settings.bounds(), VitalityBounds { floor: 2, cap: 20 });
    }

    #[test]
    fn rejects_non_positive_duration() {
        let settings = HardcoreSettings {
            spectator_duration_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(HardcoreError::InvalidSettings(_))
        ));
    }

    #[test]
    fn rejects_floor_above_cap() {
        let settings = HardcoreSettings {
            vitality_floor: 30,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_offset() {
        let settings = HardcoreSettings {
            utc_offset_minutes: 24 * 60,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
        assert!(settings.weekly_anchor().is_err());
    }

    #[test]
    fn broken_anchor_falls_back_to_one_week() {
        let settings = HardcoreSettings {
            utc_offset_minutes: 24 * 60,
            ..Default::default()
        };
        assert_eq!(settings.next_weekly_fire(1_000), 1_000 + WEEK_MS);
    }

    #[test]
    fn offset_converts_to_seconds() {
        let settings = HardcoreSettings {
            utc_offset_minutes: -330,
            ..Default::default()
        };
        let offset = settings.local_offset().unwrap();
        assert_eq!(offset.local_minus_utc(), -330 * 60);
    }
}
