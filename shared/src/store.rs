//! Pending-effect store.
//!
//! Two independent mappings keyed by participant identity:
//! - spectator-release deadlines (presence means the participant is restricted)
//! - accrued vitality increases awaiting the participant's next connection
//!
//! [`EffectStore`] is the contract the engine works against. [`PendingEffects`] is the
//! in-memory implementation, sharded per key so unrelated participants never contend. Hosts
//! with their own storage (e.g. database tables) implement the trait directly.

use std::hash::Hash;

use dashmap::DashMap;

use crate::{EpochMillis, HardcoreError, RemainingTime};

pub trait EffectStore<Id> {
    /// Stores (or replaces) the release deadline for `id`.
    fn put_deadline(&self, id: Id, deadline: EpochMillis);

    fn deadline(&self, id: Id) -> Option<EpochMillis>;

    /// Removes the deadline, returning it if one existed. Removing an absent key is a no-op.
    fn remove_deadline(&self, id: Id) -> Option<EpochMillis>;

    /// Adds `amount` to the pending increase for `id` and returns the new total.
    ///
    /// Zero amounts are ignored so stored amounts stay positive.
    fn accrue(&self, id: Id, amount: u32) -> u32;

    /// Removes and returns the full pending increase for `id`.
    fn take_pending(&self, id: Id) -> Option<u32>;

    /// Time left on `id`'s restriction.
    fn remaining(&self, id: Id, now: EpochMillis) -> Result<RemainingTime, HardcoreError> {
        self.deadline(id)
            .map(|deadline| RemainingTime::until(deadline, now))
            .ok_or(HardcoreError::NoActiveRestriction)
    }
}

/// In-memory, concurrency-safe [`EffectStore`].
///
/// Each operation is atomic on its own key. Sequences such as "read deadline, then release"
/// are not atomic; callers rely on a single owner (the participant's timer or connection event)
/// touching a given key at a time.
#[derive(Debug)]
pub struct PendingEffects<Id: Eq + Hash> {
    deadlines: DashMap<Id, EpochMillis>,
    increases: DashMap<Id, u32>,
}

impl<Id: Eq + Hash> Default for PendingEffects<Id> {
    fn default() -> Self {
        Self {
            deadlines: DashMap::new(),
            increases: DashMap::new(),
        }
    }
}

impl<Id: Eq + Hash> PendingEffects<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restricted_count(&self) -> usize {
        self.deadlines.len()
    }

    pub fn pending_count(&self) -> usize {
        self.increases.len()
    }

    pub fn pending(&self, id: &Id) -> Option<u32> {
        self.increases.get(id).map(|amount| *amount)
    }

    pub fn clear(&self) {
        self.deadlines.clear();
        self.increases.clear();
    }
}

impl<Id: Eq + Hash> EffectStore<Id> for PendingEffects<Id> {
    fn put_deadline(&self, id: Id, deadline: EpochMillis) {
        self.deadlines.insert(id, deadline);
    }

    fn deadline(&self, id: Id) -> Option<EpochMillis> {
        self.deadlines.get(&id).map(|deadline| *deadline)
    }

    fn remove_deadline(&self, id: Id) -> Option<EpochMillis> {
        self.deadlines.remove(&id).map(|(_, deadline)| deadline)
    }

    fn accrue(&self, id: Id, amount: u32) -> u32 {
        if amount == 0 {
            return self.increases.get(&id).map(|total| *total).unwrap_or(0);
        }
        let mut total = self.increases.entry(id).or_insert(0);
        *total = total.saturating_add(amount);
        *total
    }

    fn take_pending(&self, id: Id) -> Option<u32> {
        self.increases.remove(&id).map(|(_, amount)| amount)
    }
}
