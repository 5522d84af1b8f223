//! Connection lifecycle reducers.
//!
//! These reducers keep `player.online` in sync with client sessions and run the connection
//! reconciliation that lifts expired spectator restrictions and applies max health granted
//! while the player was away.
//!
//! Behavior
//! - On connect:
//!   - Ensure a `Player` row exists for the caller's identity. New players start at full max
//!     health, in normal mode, at the world spawn.
//!   - Mark the player online, then reconcile: release first, then apply pending increases.
//! - On disconnect:
//!   - Mark the player offline. Deadlines and armed release timers are left untouched.

use crate::{host::Host, schema::*, types::DbPlayMode, utils::default_name};
use spacetimedb::{ReducerContext, Table};

/// Fired when a client connects to the module.
#[spacetimedb::reducer(client_connected)]
pub fn identity_connected(ctx: &ReducerContext) {
    log::info!("Client connected: {:?}", ctx.sender);

    let mut host = Host::load(ctx);

    if let Some(player) = ctx.db.player().identity().find(ctx.sender) {
        ctx.db.player().identity().update(Player {
            online: true,
            ..player
        });
    } else {
        ctx.db.player().insert(Player {
            identity: ctx.sender,
            name: default_name(ctx.sender),
            online: true,
            max_health: host.settings().vitality_cap,
            mode: DbPlayMode::Normal,
            translation: host.world_spawn().into(),
            yaw: 0.0,
            pitch: 0.0,
            spawn_point: None,
        });
    }

    let now = host.now();
    let outcome = host.engine().reconcile_connection(ctx.sender, now);
    if outcome.released || outcome.applied.is_some() {
        log::info!("Reconciled {:?} on connect: {outcome:?}", ctx.sender);
    }
}

/// Fired when a client disconnects from the module.
#[spacetimedb::reducer(client_disconnected)]
pub fn identity_disconnected(ctx: &ReducerContext) {
    log::info!("Client disconnected: {:?}", ctx.sender);

    let Some(player) = ctx.db.player().identity().find(ctx.sender) else {
        return;
    };

    ctx.db.player().identity().update(Player {
        online: false,
        ..player
    });
}
