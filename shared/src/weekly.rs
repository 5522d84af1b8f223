//! Calendar anchor for the weekly regeneration trigger.
//!
//! Anchor rule: the next occurrence of `weekday` at `time` in local time, strictly after `now`.
//! The candidate is taken in the current local week; if it is not in the future, exactly one
//! week is added. Each fire re-anchors from the fire time, so the cadence never drifts
//! relative to the calendar even across long host downtime.

use chrono::{Datelike, Days, FixedOffset, NaiveTime, TimeZone, Weekday};

use crate::{EpochMillis, HardcoreError, constants::WEEK_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyAnchor {
    weekday: Weekday,
    time: NaiveTime,
    offset: FixedOffset,
}

impl WeeklyAnchor {
    pub fn new(
        weekday: Weekday,
        hour: u32,
        minute: u32,
        offset: FixedOffset,
    ) -> Result<Self, HardcoreError> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
            HardcoreError::InvalidSettings(format!("invalid anchor time {hour:02}:{minute:02}"))
        })?;
        Ok(Self {
            weekday,
            time,
            offset,
        })
    }

    /// Returns the next fire instant strictly after `now`.
    pub fn next_fire_after(&self, now: EpochMillis) -> EpochMillis {
        let Some(local_now) = self.offset.timestamp_millis_opt(now).single() else {
            log::warn!("Weekly anchor: {now}ms is outside the calendar range, deferring one week");
            return now.saturating_add(WEEK_MS);
        };

        let target = self.weekday.num_days_from_monday();
        let today = local_now.weekday().num_days_from_monday();
        let days_ahead = (7 + target - today) % 7;

        let candidate = local_now
            .date_naive()
            .checked_add_days(Days::new(u64::from(days_ahead)))
            .and_then(|date| date.and_time(self.time).and_local_timezone(self.offset).single())
            .map(|at| at.timestamp_millis());

        match candidate {
            Some(at) if at > now => at,
            Some(at) => at.saturating_add(WEEK_MS),
            None => now.saturating_add(WEEK_MS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-01-06 is a Saturday.
    const SAT_JAN_06: EpochMillis = 1_704_499_200_000;
    const SAT_JAN_13: EpochMillis = 1_705_104_000_000;

    fn saturday_midnight(offset_minutes: i32) -> WeeklyAnchor {
        let offset = FixedOffset::east_opt(offset_minutes * 60).unwrap();
        WeeklyAnchor::new(Weekday::Sat, 0, 0, offset).unwrap()
    }

    #[test]
    fn midweek_anchors_to_coming_saturday() {
        let wednesday_noon = 1_704_283_200_000;
        assert_eq!(saturday_midnight(0).next_fire_after(wednesday_noon), SAT_JAN_06);
    }

    #[test]
    fn last_millisecond_of_friday_anchors_to_next_millisecond() {
        assert_eq!(saturday_midnight(0).next_fire_after(SAT_JAN_06 - 1), SAT_JAN_06);
    }

    #[test]
    fn exactly_at_anchor_moves_one_week() {
        assert_eq!(saturday_midnight(0).next_fire_after(SAT_JAN_06), SAT_JAN_13);
    }

    #[test]
    fn just_after_anchor_moves_one_week() {
        assert_eq!(saturday_midnight(0).next_fire_after(SAT_JAN_06 + 1), SAT_JAN_13);
    }

    #[test]
    fn positive_offset_uses_local_saturday() {
        // Fri 22:30 UTC is already Sat 00:30 at UTC+2.
        let now = 1_704_493_800_000;
        let expected = 1_705_096_800_000; // 2024-01-12 22:00 UTC
        assert_eq!(saturday_midnight(120).next_fire_after(now), expected);
    }

    #[test]
    fn negative_offset_uses_local_saturday() {
        // Fri 23:00 UTC is Fri 18:00 at UTC-5.
        let now = 1_704_495_600_000;
        let expected = 1_704_517_200_000; // 2024-01-06 05:00 UTC
        assert_eq!(saturday_midnight(-300).next_fire_after(now), expected);
    }

    #[test]
    fn fixed_offset_ignores_daylight_saving() {
        // Wed 2024-07-03 12:00 UTC. At a constant UTC-5, summer time does not move the anchor.
        let now = 1_720_008_000_000;
        let expected = 1_720_242_000_000; // 2024-07-06 05:00 UTC
        assert_eq!(saturday_midnight(-300).next_fire_after(now), expected);
    }

    #[test]
    fn rejects_invalid_time() {
        let offset = FixedOffset::east_opt(0).unwrap();
        assert!(WeeklyAnchor::new(Weekday::Sat, 24, 0, offset).is_err());
    }
}
