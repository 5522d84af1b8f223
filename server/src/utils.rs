use shared::EpochMillis;
use spacetimedb::{Identity, ReducerContext, Timestamp};

use crate::schema::admin;

pub fn to_millis(ts: Timestamp) -> EpochMillis {
    ts.to_micros_since_unix_epoch().div_euclid(1_000)
}

pub fn from_millis(millis: EpochMillis) -> Timestamp {
    Timestamp::from_micros_since_unix_epoch(millis.saturating_mul(1_000))
}

/// Name shown for players who never called `set_name`.
pub fn default_name(identity: Identity) -> String {
    identity.to_string().chars().take(8).collect()
}

pub fn require_admin(ctx: &ReducerContext, reducer: &str) -> Result<(), String> {
    if ctx.db.admin().identity().find(ctx.sender).is_none() {
        return Err(format!("`{reducer}` requires admin privileges."));
    }
    Ok(())
}
