//! One-shot spectator release timers.
//!
//! Each death inserts one `ReleaseTimer` row scheduled at the player's deadline. SpacetimeDB
//! removes the row once the reducer has run; pardons delete it early.

use crate::host::Host;
use spacetimedb::{Identity, ReducerContext, ScheduleAt};

/// Scheduled release of one spectating player.
///
/// IMPORTANT:
/// Scheduled tables must include a `scheduled_id: u64` primary key with `#[auto_inc]`.
#[spacetimedb::table(name = release_timer, scheduled(release_timer_reducer))]
pub struct ReleaseTimer {
    #[primary_key]
    #[auto_inc]
    pub scheduled_id: u64,

    /// When to release the participant.
    pub scheduled_at: ScheduleAt,

    /// The player to release. At most one armed timer per player.
    #[unique]
    pub participant: Identity,
}

#[spacetimedb::reducer]
pub fn release_timer_reducer(ctx: &ReducerContext, timer: ReleaseTimer) -> Result<(), String> {
    // Only the server (module identity) may invoke scheduled reducers.
    if ctx.sender != ctx.identity() {
        return Err("`release_timer_reducer` may not be invoked by clients.".into());
    }

    let mut host = Host::load(ctx);
    host.engine().fire_release(timer.participant);
    Ok(())
}
