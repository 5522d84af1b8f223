mod common;

use chrono::{Datelike, FixedOffset, TimeZone, Timelike, Weekday};
use common::{FakeWorld, HOUR_MS, WEDNESDAY_NOON};
use proptest::prelude::*;
use shared::{
    EffectStore, HardcoreService, HardcoreSettings, PendingEffects, PlayMode, VitalityBounds,
    constants::WEEK_MS,
};
use uuid::Uuid;

const BOUNDS: VitalityBounds = VitalityBounds { floor: 2, cap: 20 };

proptest! {
    #[test]
    fn increase_matches_formula_and_stays_in_bounds(current in -100i32..100, amount in 0u32..100) {
        let value = BOUNDS.increase(current, amount);
        prop_assert_eq!(value, (current.max(2) + amount as i32).min(20));
        prop_assert!(BOUNDS.contains(value));
    }

    #[test]
    fn increase_never_lowers_an_in_range_value(current in 2i32..=20, amount in 0u32..50) {
        prop_assert!(BOUNDS.increase(current, amount) >= current);
    }

    #[test]
    fn clamped_penalty_never_goes_below_floor(current in 2i32..=20, malus in 0u32..50) {
        let value = BOUNDS.penalize(current, malus, true);
        prop_assert!(value >= 2);
        prop_assert!(value <= current);
    }

    #[test]
    fn accrual_is_order_independent(amounts in prop::collection::vec(1u32..1_000, 1..8)) {
        let forward: PendingEffects<u32> = PendingEffects::new();
        let backward: PendingEffects<u32> = PendingEffects::new();
        for &amount in &amounts {
            forward.accrue(7u32, amount);
        }
        for &amount in amounts.iter().rev() {
            backward.accrue(7u32, amount);
        }
        let total: u32 = amounts.iter().sum();
        prop_assert_eq!(forward.take_pending(7), Some(total));
        prop_assert_eq!(backward.take_pending(7), Some(total));
        prop_assert_eq!(forward.take_pending(7), None);
    }

    #[test]
    fn weekly_fire_is_next_local_saturday_midnight(
        now in 0i64..4_000_000_000_000,
        offset_minutes in -1_439i32..1_440,
    ) {
        let settings = HardcoreSettings { utc_offset_minutes: offset_minutes, ..Default::default() };
        let next = settings.next_weekly_fire(now);

        prop_assert!(next > now);
        prop_assert!(next - now <= WEEK_MS);

        let offset = FixedOffset::east_opt(offset_minutes * 60).unwrap();
        let local = offset.timestamp_millis_opt(next).unwrap();
        prop_assert_eq!(local.weekday(), Weekday::Sat);
        prop_assert_eq!((local.hour(), local.minute(), local.second()), (0, 0, 0));
    }

    #[test]
    fn reconnect_releases_exactly_at_deadline(elapsed in 0i64..2 * HOUR_MS) {
        let svc = HardcoreService::new(HardcoreSettings::default()).unwrap();
        let mut world = FakeWorld::new();
        let steve: Uuid = world.add_player(1, "Steve", 10, true);
        let deadline = svc.on_death(&mut world, steve, WEDNESDAY_NOON).unwrap().deadline;
        world.set_connected(steve, false);

        world.set_connected(steve, true);
        let now = WEDNESDAY_NOON + elapsed;
        let outcome = svc.on_connect(&mut world, steve, now);

        prop_assert_eq!(outcome.released, now >= deadline);
        let expected = if now >= deadline { PlayMode::Normal } else { PlayMode::Restricted };
        prop_assert_eq!(world.player(steve).mode, expected);
    }
}
