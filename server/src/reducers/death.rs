use crate::{host::Host, schema::*, utils::require_admin};
use spacetimedb::{Identity, ReducerContext};

/// Report a player death and apply the hardcore penalty.
///
/// Behavior:
/// - `victim = None` reports the caller's own death.
/// - Reporting someone else's death requires admin privileges.
/// - Lowers max health, switches the victim to spectator mode and schedules their release.
/// - A player who is already spectating cannot die again; the report is rejected.
#[spacetimedb::reducer]
pub fn report_death(ctx: &ReducerContext, victim: Option<Identity>) -> Result<(), String> {
    let victim = victim.unwrap_or(ctx.sender);
    if victim != ctx.sender {
        require_admin(ctx, "report_death")?;
    }

    if ctx.db.player().identity().find(victim).is_none() {
        return Err("No player found!".into());
    }

    let mut host = Host::load(ctx);
    let now = host.now();
    match host.engine().apply_death_penalty(victim, now) {
        Some(_) => Ok(()),
        None => Err("Player is already in spectator mode".into()),
    }
}
