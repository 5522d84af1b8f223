//! Table-backed implementations of the rule collaborators.
//!
//! Every reducer builds a [`Host`] for the duration of one call:
//! - [`HostWorld`] maps players onto `player` rows and writes chat/sound output rows
//! - [`TableStore`] keeps deadlines and pending increases in `spectator_deadline` and
//!   `pending_vitality`
//! - [`TableTimers`] arms one-shot `release_timer` rows and the single `weekly_regen_timer` row
//!
//! All writes happen inside the reducer's transaction, so an event either applies in full or
//! not at all.

use std::collections::HashSet;

use shared::{
    constants::{BELL_PITCH, BELL_VOLUME},
    Cue, EffectStore, EpochMillis, Engine, HardcoreSettings, Orientation, PlayMode, Position,
    RegistryError, Timers, Vitality, World,
};
use spacetimedb::{Identity, ReducerContext, ScheduleAt, Table};

use crate::{
    reducers::{
        release::{release_timer, ReleaseTimer},
        weekly_regen::{weekly_regen_timer, WeeklyRegenTimer},
    },
    schema::*,
    utils::{from_millis, to_millis},
};

/// Settings row contents, falling back to defaults when the row is missing or invalid.
pub fn load_settings(ctx: &ReducerContext) -> (HardcoreSettings, Position) {
    let row = ctx
        .db
        .hardcore_settings()
        .id()
        .find(HardcoreSettingsRow::ID)
        .unwrap_or_else(|| {
            log::warn!("Hardcore settings row missing; using defaults");
            HardcoreSettingsRow::default()
        });

    let settings = row.settings();
    match settings.validate() {
        Ok(()) => (settings, row.world_spawn.into()),
        Err(err) => {
            log::warn!("{err}; using default hardcore settings");
            (HardcoreSettings::default(), row.world_spawn.into())
        }
    }
}

pub struct Host<'a> {
    settings: HardcoreSettings,
    world: HostWorld<'a>,
    store: TableStore<'a>,
    timers: TableTimers<'a>,
    now: EpochMillis,
}

impl<'a> Host<'a> {
    pub fn load(ctx: &'a ReducerContext) -> Self {
        let (settings, world_spawn) = load_settings(ctx);
        Self {
            settings,
            world: HostWorld { ctx, world_spawn },
            store: TableStore { ctx },
            timers: TableTimers { ctx },
            now: to_millis(ctx.timestamp),
        }
    }

    /// Reducer time in epoch milliseconds.
    pub fn now(&self) -> EpochMillis {
        self.now
    }

    pub fn settings(&self) -> &HardcoreSettings {
        &self.settings
    }

    pub fn world_spawn(&self) -> Position {
        self.world.world_spawn
    }

    pub fn engine(&mut self) -> Engine<'_, HostWorld<'a>, TableStore<'a>, TableTimers<'a>> {
        Engine::new(
            &self.settings,
            &mut self.world,
            &self.store,
            &mut self.timers,
        )
    }
}

pub struct HostWorld<'a> {
    ctx: &'a ReducerContext,
    world_spawn: Position,
}

impl HostWorld<'_> {
    fn update_player(&self, id: Identity, f: impl FnOnce(&mut Player)) {
        let Some(mut player) = self.ctx.db.player().identity().find(id) else {
            log::warn!("No player row for {id:?}");
            return;
        };
        f(&mut player);
        self.ctx.db.player().identity().update(player);
    }

    fn send(&self, recipient: Option<Identity>, text: &str) {
        self.ctx.db.chat_message().insert(ChatMessage {
            id: 0,
            recipient,
            text: text.to_string(),
            sent_at: self.ctx.timestamp,
        });
    }
}

impl World for HostWorld<'_> {
    type Id = Identity;

    fn is_connected(&self, id: Identity) -> bool {
        self.ctx
            .db
            .player()
            .identity()
            .find(id)
            .is_some_and(|p| p.online)
    }

    fn connected(&self) -> Vec<Identity> {
        self.ctx
            .db
            .player()
            .online()
            .filter(true)
            .map(|p| p.identity)
            .collect()
    }

    /// The `player` table keeps every player ever seen, so the scan cannot fail.
    fn known_identities(&self) -> Result<HashSet<Identity>, RegistryError> {
        Ok(self.ctx.db.player().iter().map(|p| p.identity).collect())
    }

    fn display_name(&self, id: Identity) -> String {
        self.ctx
            .db
            .player()
            .identity()
            .find(id)
            .map(|p| p.name)
            .unwrap_or_else(|| crate::utils::default_name(id))
    }

    fn vitality(&self, id: Identity) -> Option<Vitality> {
        self.ctx
            .db
            .player()
            .identity()
            .find(id)
            .map(|p| p.max_health)
    }

    fn set_vitality(&mut self, id: Identity, value: Vitality) {
        self.update_player(id, |p| p.max_health = value);
    }

    fn set_mode(&mut self, id: Identity, mode: PlayMode) {
        self.update_player(id, |p| p.mode = mode.into());
    }

    fn spawn_point(&self, id: Identity) -> Option<Position> {
        self.ctx
            .db
            .player()
            .identity()
            .find(id)
            .and_then(|p| p.spawn_point)
            .map(Position::from)
    }

    fn world_spawn(&self) -> Position {
        self.world_spawn
    }

    fn orientation(&self, id: Identity) -> Orientation {
        self.ctx
            .db
            .player()
            .identity()
            .find(id)
            .map(|p| Orientation {
                yaw: p.yaw,
                pitch: p.pitch,
            })
            .unwrap_or_default()
    }

    fn relocate(&mut self, id: Identity, position: Position, orientation: Orientation) {
        self.update_player(id, |p| {
            p.translation = position.into();
            p.yaw = orientation.yaw;
            p.pitch = orientation.pitch;
        });
    }

    fn play_cue(&mut self, id: Identity, cue: Cue) {
        self.ctx.db.sound_cue().insert(SoundCue {
            id: 0,
            recipient: id,
            sound: cue.into(),
            volume: BELL_VOLUME,
            pitch: BELL_PITCH,
            played_at: self.ctx.timestamp,
        });
    }

    fn notify(&mut self, id: Identity, text: &str) {
        self.send(Some(id), text);
    }

    fn broadcast(&mut self, text: &str) {
        self.send(None, text);
    }
}

pub struct TableStore<'a> {
    ctx: &'a ReducerContext,
}

impl EffectStore<Identity> for TableStore<'_> {
    fn put_deadline(&self, id: Identity, deadline: EpochMillis) {
        self.ctx.db.spectator_deadline().identity().delete(id);
        self.ctx.db.spectator_deadline().insert(SpectatorDeadline {
            identity: id,
            deadline: from_millis(deadline),
        });
    }

    fn deadline(&self, id: Identity) -> Option<EpochMillis> {
        self.ctx
            .db
            .spectator_deadline()
            .identity()
            .find(id)
            .map(|row| to_millis(row.deadline))
    }

    fn remove_deadline(&self, id: Identity) -> Option<EpochMillis> {
        let row = self.ctx.db.spectator_deadline().identity().find(id)?;
        self.ctx.db.spectator_deadline().identity().delete(id);
        Some(to_millis(row.deadline))
    }

    fn accrue(&self, id: Identity, amount: u32) -> u32 {
        let pending = self.ctx.db.pending_vitality();
        match pending.identity().find(id) {
            Some(row) if amount == 0 => row.amount,
            Some(row) => {
                let amount = row.amount.saturating_add(amount);
                pending.identity().update(PendingVitality {
                    identity: id,
                    amount,
                });
                amount
            }
            None if amount == 0 => 0,
            None => {
                pending.insert(PendingVitality {
                    identity: id,
                    amount,
                });
                amount
            }
        }
    }

    fn take_pending(&self, id: Identity) -> Option<u32> {
        let row = self.ctx.db.pending_vitality().identity().find(id)?;
        self.ctx.db.pending_vitality().identity().delete(id);
        Some(row.amount)
    }
}

pub struct TableTimers<'a> {
    ctx: &'a ReducerContext,
}

impl Timers<Identity> for TableTimers<'_> {
    fn arm_release(&mut self, id: Identity, at: EpochMillis) {
        self.ctx.db.release_timer().participant().delete(id);
        self.ctx.db.release_timer().insert(ReleaseTimer {
            scheduled_id: 0,
            participant: id,
            scheduled_at: ScheduleAt::Time(from_millis(at).into()),
        });
    }

    fn cancel_release(&mut self, id: Identity) -> bool {
        self.ctx.db.release_timer().participant().delete(id)
    }

    fn arm_weekly(&mut self, at: EpochMillis) {
        let armed: Vec<u64> = self
            .ctx
            .db
            .weekly_regen_timer()
            .iter()
            .map(|row| row.scheduled_id)
            .collect();
        for scheduled_id in armed {
            self.ctx
                .db
                .weekly_regen_timer()
                .scheduled_id()
                .delete(scheduled_id);
        }
        self.ctx.db.weekly_regen_timer().insert(WeeklyRegenTimer {
            scheduled_id: 0,
            scheduled_at: ScheduleAt::Time(from_millis(at).into()),
        });
    }
}
