//! Player and admin commands.
//!
//! Admin-only reducers check the `admin` table first. Player-facing answers are written to
//! `chat_message`; those reducers return `Ok` so the answer is committed.

use crate::{host::Host, schema::*, types::DbVec3, utils::require_admin};
use spacetimedb::{Identity, ReducerContext, Table};

const MAX_NAME_LEN: usize = 32;

/// Set every online player's max health to the cap. Spectator restrictions are unaffected.
#[spacetimedb::reducer]
pub fn reset_hardcore(ctx: &ReducerContext) -> Result<(), String> {
    require_admin(ctx, "reset_hardcore")?;

    let mut host = Host::load(ctx);
    let count = host.engine().reset_all();
    log::info!("{:?} reset max health for {count} players", ctx.sender);
    Ok(())
}

/// Tell the caller how long they remain in spectator mode.
#[spacetimedb::reducer]
pub fn show_respawn_timer(ctx: &ReducerContext) -> Result<(), String> {
    let mut host = Host::load(ctx);
    let now = host.now();
    if let Err(err) = host.engine().show_remaining_time(ctx.sender, now) {
        log::debug!("show_respawn_timer for {:?}: {err}", ctx.sender);
    }
    Ok(())
}

/// Lift a player's spectator restriction early.
#[spacetimedb::reducer]
pub fn pardon(ctx: &ReducerContext, target: Identity) -> Result<(), String> {
    require_admin(ctx, "pardon")?;

    let mut host = Host::load(ctx);
    let now = host.now();
    if !host.engine().pardon(target, now) {
        return Err("Player is not in spectator mode".into());
    }
    Ok(())
}

#[spacetimedb::reducer]
pub fn grant_admin(ctx: &ReducerContext, target: Identity) -> Result<(), String> {
    require_admin(ctx, "grant_admin")?;

    if ctx.db.admin().identity().find(target).is_none() {
        ctx.db.admin().insert(Admin { identity: target });
        log::info!("{:?} granted admin to {target:?}", ctx.sender);
    }
    Ok(())
}

#[spacetimedb::reducer]
pub fn set_name(ctx: &ReducerContext, name: String) -> Result<(), String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Name must not be empty".into());
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(format!("Name must be at most {MAX_NAME_LEN} characters"));
    }

    let Some(player) = ctx.db.player().identity().find(ctx.sender) else {
        return Err("No player found!".into());
    };
    ctx.db.player().identity().update(Player {
        name: name.to_string(),
        ..player
    });
    Ok(())
}

/// Set or clear the caller's personal respawn point.
#[spacetimedb::reducer]
pub fn set_spawn_point(ctx: &ReducerContext, spawn_point: Option<DbVec3>) -> Result<(), String> {
    let Some(player) = ctx.db.player().identity().find(ctx.sender) else {
        return Err("No player found!".into());
    };
    ctx.db.player().identity().update(Player {
        spawn_point,
        ..player
    });
    Ok(())
}

/// Client-reported transform. The release teleport keeps the last reported facing.
#[spacetimedb::reducer]
pub fn update_transform(
    ctx: &ReducerContext,
    translation: DbVec3,
    yaw: f32,
    pitch: f32,
) -> Result<(), String> {
    if !(translation.x.is_finite()
        && translation.y.is_finite()
        && translation.z.is_finite()
        && yaw.is_finite()
        && pitch.is_finite())
    {
        return Err("Transform must be finite".into());
    }

    let Some(player) = ctx.db.player().identity().find(ctx.sender) else {
        return Err("No player found!".into());
    };
    ctx.db.player().identity().update(Player {
        translation,
        yaw,
        pitch,
        ..player
    });
    Ok(())
}
