//! Weekly max-health regeneration.
//!
//! This file contains:
//! - `WeeklyRegenTimer` scheduled table
//! - `init(ctx)` to arm the first regeneration
//! - `weekly_regen_reducer` scheduled reducer
//!
//! Notes:
//! - There is exactly one armed row. Each run re-arms the next Saturday 00:00 local time
//!   instead of using a fixed interval, so the schedule follows the calendar.

use crate::host::Host;
use spacetimedb::{ReducerContext, ScheduleAt};

/// Scheduled timer for the weekly regeneration (single row).
#[spacetimedb::table(name = weekly_regen_timer, scheduled(weekly_regen_reducer))]
pub struct WeeklyRegenTimer {
    #[primary_key]
    #[auto_inc]
    pub scheduled_id: u64,

    pub scheduled_at: ScheduleAt,
}

/// Arm the weekly regeneration.
///
/// This should be called from the crate `init` reducer.
pub fn init(ctx: &ReducerContext) {
    let mut host = Host::load(ctx);
    let now = host.now();
    host.engine().arm_weekly(now);
}

#[spacetimedb::reducer]
pub fn weekly_regen_reducer(ctx: &ReducerContext, _timer: WeeklyRegenTimer) -> Result<(), String> {
    if ctx.sender != ctx.identity() {
        return Err("`weekly_regen_reducer` may not be invoked by clients.".into());
    }

    let mut host = Host::load(ctx);
    let now = host.now();
    let report = host.engine().run_weekly_sweep(now);
    log::debug!("Weekly regeneration report: {report:?}");
    Ok(())
}
