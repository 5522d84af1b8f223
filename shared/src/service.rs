//! In-memory runtime for hosts without their own timer storage.
//!
//! [`HardcoreService`] is constructed explicitly at host startup and torn down with
//! [`HardcoreService::shutdown`]. It owns the pending-effect store and the single deferred-action
//! queue; the host drives it by forwarding events and calling [`HardcoreService::tick`] from one
//! scheduler loop, sleeping until [`HardcoreService::next_due`] in between.
//!
//! All entry points take `&self`: event handlers on the main loop and the scheduler loop may
//! call in concurrently. Store operations are atomic per key. The queue sits behind a mutex
//! that is held only to pop due actions or to arm and cancel one timer, never while the rules
//! run, so a slow weekly sweep does not hold up connections or deaths of other participants.
//!
//! Nothing here is persisted. A process restart loses every deadline, pending increase and armed
//! action.

use std::{fmt::Debug, hash::Hash};

use parking_lot::Mutex;

use crate::{
    EpochMillis, HardcoreError, HardcoreSettings, RemainingTime,
    deferred::{DeferredAction, DeferredQueue},
    engine::{ConnectOutcome, Engine, PenaltyOutcome},
    host::{Timers, World},
    store::{EffectStore, PendingEffects},
};

/// [`Timers`] over the shared queue, locking it once per call.
struct QueueTimers<'q, Id: Eq + Hash> {
    queue: &'q Mutex<DeferredQueue<Id>>,
}

impl<Id: Copy + Eq + Hash> Timers<Id> for QueueTimers<'_, Id> {
    fn arm_release(&mut self, id: Id, at: EpochMillis) {
        self.queue.lock().arm_release(id, at);
    }

    fn cancel_release(&mut self, id: Id) -> bool {
        self.queue.lock().cancel_release(id)
    }

    fn arm_weekly(&mut self, at: EpochMillis) {
        self.queue.lock().arm_weekly(at);
    }
}

pub struct HardcoreService<Id: Eq + Hash> {
    settings: HardcoreSettings,
    effects: PendingEffects<Id>,
    queue: Mutex<DeferredQueue<Id>>,
}

impl<Id> HardcoreService<Id>
where
    Id: Copy + Eq + Hash + Debug,
{
    pub fn new(settings: HardcoreSettings) -> Result<Self, HardcoreError> {
        settings.validate()?;
        Ok(Self {
            settings,
            effects: PendingEffects::new(),
            queue: Mutex::new(DeferredQueue::new()),
        })
    }

    pub fn settings(&self) -> &HardcoreSettings {
        &self.settings
    }

    pub fn effects(&self) -> &PendingEffects<Id> {
        &self.effects
    }

    /// Arms the weekly trigger. Returns its first fire instant.
    pub fn start(&self, now: EpochMillis) -> EpochMillis {
        let next = self.settings.next_weekly_fire(now);
        self.queue.lock().arm_weekly(next);
        next
    }

    /// Drops every armed action and pending effect. Returns how many actions were armed.
    pub fn shutdown(&self) -> usize {
        let mut queue = self.queue.lock();
        let armed = queue.len();
        queue.clear();
        self.effects.clear();
        log::info!("Hardcore service stopped with {armed} armed actions");
        armed
    }

    /// Instant of the earliest armed action.
    pub fn next_due(&self) -> Option<EpochMillis> {
        self.queue.lock().next_due()
    }

    pub fn armed_count(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_release_armed(&self, id: Id) -> bool {
        self.queue.lock().is_release_armed(id)
    }

    fn timers(&self) -> QueueTimers<'_, Id> {
        QueueTimers { queue: &self.queue }
    }

    /// Fires every action due at or before `now`. Returns how many fired.
    pub fn tick<W>(&self, world: &mut W, now: EpochMillis) -> usize
    where
        W: World<Id = Id>,
    {
        let due = self.queue.lock().pop_due(now);
        let mut timers = self.timers();
        let mut engine = Engine::new(&self.settings, world, &self.effects, &mut timers);
        for action in &due {
            match *action {
                DeferredAction::Release(id) => {
                    engine.fire_release(id);
                }
                DeferredAction::WeeklyRegen => {
                    engine.run_weekly_sweep(now);
                }
            }
        }
        due.len()
    }

    pub fn on_death<W>(&self, world: &mut W, id: Id, now: EpochMillis) -> Option<PenaltyOutcome>
    where
        W: World<Id = Id>,
    {
        let mut timers = self.timers();
        Engine::new(&self.settings, world, &self.effects, &mut timers).apply_death_penalty(id, now)
    }

    pub fn on_connect<W>(&self, world: &mut W, id: Id, now: EpochMillis) -> ConnectOutcome
    where
        W: World<Id = Id>,
    {
        let mut timers = self.timers();
        Engine::new(&self.settings, world, &self.effects, &mut timers).reconcile_connection(id, now)
    }

    pub fn reset_all<W>(&self, world: &mut W) -> usize
    where
        W: World<Id = Id>,
    {
        let mut timers = self.timers();
        Engine::new(&self.settings, world, &self.effects, &mut timers).reset_all()
    }

    pub fn remaining(&self, id: Id, now: EpochMillis) -> Result<RemainingTime, HardcoreError> {
        self.effects.remaining(id, now)
    }

    pub fn show_remaining_time<W>(
        &self,
        world: &mut W,
        id: Id,
        now: EpochMillis,
    ) -> Result<RemainingTime, HardcoreError>
    where
        W: World<Id = Id>,
    {
        let mut timers = self.timers();
        Engine::new(&self.settings, world, &self.effects, &mut timers).show_remaining_time(id, now)
    }

    pub fn pardon<W>(&self, world: &mut W, id: Id, now: EpochMillis) -> bool
    where
        W: World<Id = Id>,
    {
        let mut timers = self.timers();
        Engine::new(&self.settings, world, &self.effects, &mut timers).pardon(id, now)
    }
}
