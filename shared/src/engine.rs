//! Penalty, release, reconciliation and regeneration rules.
//!
//! Responsibilities
//! - Death penalty: lower vitality, force restricted mode, record the release deadline and arm
//!   the one-shot release.
//! - Release: restore normal mode, clear the deadline, move the participant to their spawn.
//! - Connection reconciliation: lazily release an expired restriction, then apply any vitality
//!   accrued while offline.
//! - Weekly sweep: grant vitality to connected participants, accrue it for the rest of the
//!   registry, re-arm the trigger.
//! - Administrative surface: reset, remaining-time query, pardon.
//!
//! Design notes
//! - An [`Engine`] borrows the host's world, store and timers for one event only. It keeps no
//!   state of its own, so the same rules run against an in-memory runtime or database tables.
//! - Participants are addressed by identity. The world resolves them at the moment of each
//!   mutation; a participant that disconnected in between is simply "not connected".
//! - Every failure is local to the triggering event. Nothing here can stop the weekly re-arm.

use std::collections::HashSet;

use crate::{
    EpochMillis, HardcoreError, HardcoreSettings, RemainingTime, Vitality,
    host::{Cue, PlayMode, Timers, World},
    messages,
    store::EffectStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PenaltyOutcome {
    pub previous: Vitality,
    pub vitality: Vitality,
    pub deadline: EpochMillis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseFire {
    /// The participant was connected and has been released.
    Released,
    /// The participant was disconnected; the deadline stays for the next connection.
    Deferred,
    /// No deadline was recorded (already released or pardoned); nothing changed.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnectOutcome {
    /// An expired restriction was lifted.
    pub released: bool,
    /// Vitality accrued while offline that was applied.
    pub applied: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    /// Connected participants that received the increment.
    pub online: usize,
    /// Disconnected participants whose pending increase was accrued.
    pub accrued: usize,
    /// Whether the registry scan failed (offline participants were skipped this cycle).
    pub registry_failed: bool,
    /// When the trigger fires next.
    pub next_fire: EpochMillis,
}

pub struct Engine<'a, W, S, T> {
    settings: &'a HardcoreSettings,
    world: &'a mut W,
    store: &'a S,
    timers: &'a mut T,
}

impl<'a, W, S, T> Engine<'a, W, S, T>
where
    W: World,
    S: EffectStore<W::Id>,
    T: Timers<W::Id>,
{
    pub fn new(
        settings: &'a HardcoreSettings,
        world: &'a mut W,
        store: &'a S,
        timers: &'a mut T,
    ) -> Self {
        Self {
            settings,
            world,
            store,
            timers,
        }
    }

    /// Applies the death penalty to `id`.
    ///
    /// Returns `None` when nothing was applied: the participant is unknown to the world, or is
    /// already restricted (a spectator cannot die, and a second deadline would break the
    /// one-entry-per-participant rule).
    pub fn apply_death_penalty(&mut self, id: W::Id, now: EpochMillis) -> Option<PenaltyOutcome> {
        if let Some(deadline) = self.store.deadline(id) {
            log::debug!("Death of {id:?} ignored: already restricted until {deadline}");
            return None;
        }
        let Some(previous) = self.world.vitality(id) else {
            log::warn!("Death reported for unknown participant {id:?}");
            return None;
        };

        let vitality = self.settings.bounds().penalize(
            previous,
            self.settings.death_malus,
            self.settings.clamp_penalty_to_floor,
        );
        self.world.set_vitality(id, vitality);
        self.world.set_mode(id, PlayMode::Restricted);

        let deadline = now.saturating_add(self.settings.spectator_duration_ms);
        self.store.put_deadline(id, deadline);
        self.timers.arm_release(id, deadline);

        let duration = RemainingTime::from_millis(self.settings.spectator_duration_ms);
        self.world.notify(id, &messages::death_notice(duration));

        log::info!(
            "Death penalty: {id:?} vitality {previous} -> {vitality}, restricted for {duration}"
        );
        Some(PenaltyOutcome {
            previous,
            vitality,
            deadline,
        })
    }

    /// Handles a fired release timer.
    pub fn fire_release(&mut self, id: W::Id) -> ReleaseFire {
        if self.store.deadline(id).is_none() {
            log::debug!("Release timer for {id:?} fired with no deadline recorded");
            return ReleaseFire::Stale;
        }
        if !self.world.is_connected(id) {
            log::info!("Release timer for {id:?} fired while disconnected; deferring");
            return ReleaseFire::Deferred;
        }

        // A reconnect may have released them in between.
        if !self.release(id) {
            return ReleaseFire::Stale;
        }
        let name = self.world.display_name(id);
        self.world.broadcast(&messages::back_from_the_dead(&name));
        ReleaseFire::Released
    }

    /// Restores a connected participant's normal state.
    ///
    /// Idempotent: with no deadline recorded this changes nothing and returns `false`.
    pub fn release(&mut self, id: W::Id) -> bool {
        if self.store.remove_deadline(id).is_none() {
            return false;
        }
        self.world.set_mode(id, PlayMode::Normal);

        let position = self
            .world
            .spawn_point(id)
            .unwrap_or_else(|| self.world.world_spawn());
        let orientation = self.world.orientation(id);
        self.world.relocate(id, position, orientation);
        self.world.play_cue(id, Cue::Bell);

        log::info!("Released {id:?} at {position:?}");
        true
    }

    /// Reconciles pending effects when `id` connects.
    ///
    /// The release check runs before the increase; both may apply in the same connection.
    /// Reconnecting before the deadline never shortens the restriction.
    pub fn reconcile_connection(&mut self, id: W::Id, now: EpochMillis) -> ConnectOutcome {
        let mut outcome = ConnectOutcome::default();

        if let Some(deadline) = self.store.deadline(id) {
            if now >= deadline {
                outcome.released = self.release(id);
                self.timers.cancel_release(id);
            } else {
                log::info!(
                    "{id:?} connected while restricted, {} left",
                    RemainingTime::until(deadline, now)
                );
            }
        }

        if let Some(amount) = self.store.take_pending(id) {
            if self.increase_vitality(id, amount).is_some() {
                outcome.applied = Some(amount);
            } else {
                // Keep it for a connection where the world knows the participant.
                self.store.accrue(id, amount);
            }
        }

        outcome
    }

    /// Runs the weekly regeneration sweep and re-arms the trigger.
    pub fn run_weekly_sweep(&mut self, now: EpochMillis) -> SweepReport {
        let increment = self.settings.weekly_increment;
        let connected = self.world.connected();

        let mut online = 0;
        for &id in &connected {
            if self.increase_vitality(id, increment).is_some() {
                online += 1;
            }
        }

        let (accrued, registry_failed) = match self.world.known_identities() {
            Ok(known) => {
                let connected: HashSet<W::Id> = connected.into_iter().collect();
                let mut accrued = 0;
                for id in known.into_iter().filter(|id| !connected.contains(id)) {
                    self.store.accrue(id, increment);
                    accrued += 1;
                }
                (accrued, false)
            }
            Err(err) => {
                log::warn!("Weekly regeneration: {err}; skipping offline participants this cycle");
                (0, true)
            }
        };

        let next_fire = self.arm_weekly(now);
        log::info!(
            "Weekly regeneration: +{increment} to {online} online, accrued for {accrued} offline"
        );

        SweepReport {
            online,
            accrued,
            registry_failed,
            next_fire,
        }
    }

    /// Arms the weekly trigger for the next anchor after `now`.
    pub fn arm_weekly(&mut self, now: EpochMillis) -> EpochMillis {
        let next = self.settings.next_weekly_fire(now);
        self.timers.arm_weekly(next);
        next
    }

    /// Applies the canonical increase procedure and notifies the participant.
    ///
    /// Returns the new vitality, or `None` if the world does not know the participant.
    pub fn increase_vitality(&mut self, id: W::Id, amount: u32) -> Option<Vitality> {
        let Some(current) = self.world.vitality(id) else {
            log::warn!("Vitality increase for unknown participant {id:?}");
            return None;
        };
        let value = self.settings.bounds().increase(current, amount);
        self.world.set_vitality(id, value);
        self.world.notify(id, &messages::vitality_increased(amount));
        Some(value)
    }

    /// Sets every connected participant's vitality to the cap. Returns how many were reset.
    pub fn reset_all(&mut self) -> usize {
        let cap = self.settings.vitality_cap;
        let connected = self.world.connected();
        for &id in &connected {
            self.world.set_vitality(id, cap);
        }
        log::info!("Reset vitality to {cap} for {} participants", connected.len());
        connected.len()
    }

    /// Time left on `id`'s restriction.
    pub fn remaining(&self, id: W::Id, now: EpochMillis) -> Result<RemainingTime, HardcoreError> {
        self.store.remaining(id, now)
    }

    /// Answers the remaining-time query to the participant who asked.
    pub fn show_remaining_time(
        &mut self,
        id: W::Id,
        now: EpochMillis,
    ) -> Result<RemainingTime, HardcoreError> {
        match self.remaining(id, now) {
            Ok(remaining) => {
                let name = self.world.display_name(id);
                self.world
                    .notify(id, &messages::remaining_notice(&name, remaining));
                Ok(remaining)
            }
            Err(err) => {
                self.world.notify(id, &messages::not_restricted_notice());
                Err(err)
            }
        }
    }

    /// Lifts `id`'s restriction early and cancels its release timer.
    ///
    /// A connected participant is released immediately. A disconnected one has the deadline
    /// moved to `now` so the next connection releases them. Returns `false` if `id` was not
    /// restricted.
    pub fn pardon(&mut self, id: W::Id, now: EpochMillis) -> bool {
        self.timers.cancel_release(id);
        if self.store.deadline(id).is_none() {
            return false;
        }

        if self.world.is_connected(id) {
            self.release(id);
            let name = self.world.display_name(id);
            self.world.broadcast(&messages::back_from_the_dead(&name));
        } else {
            self.store.put_deadline(id, now);
        }
        log::info!("Pardoned {id:?}");
        true
    }
}
