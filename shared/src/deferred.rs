//! Time-ordered queue of deferred actions.
//!
//! A single `BinaryHeap` holds every armed action (one-shot releases and the weekly trigger),
//! serviced by one scheduler loop instead of one timer object per death. Each armed action gets
//! a monotonically increasing sequence number:
//! - ordering is `(at, seq)`, so actions due at the same instant fire in arming order
//! - cancelling or re-arming only updates the live-handle table; stale heap entries are
//!   skipped when they surface (lazy deletion)

use std::{
    cmp::{Ordering, Reverse},
    collections::{BinaryHeap, HashMap},
    hash::Hash,
};

use crate::{EpochMillis, host::Timers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction<Id> {
    /// Restore the participant's normal state if they are connected.
    Release(Id),
    /// Run the weekly regeneration sweep (which re-arms itself).
    WeeklyRegen,
}

#[derive(Debug)]
struct Entry<Id> {
    at: EpochMillis,
    seq: u64,
    action: DeferredAction<Id>,
}

// Sequence numbers are unique per queue, so `(at, seq)` is a total order.
impl<Id> PartialEq for Entry<Id> {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl<Id> Eq for Entry<Id> {}

impl<Id> PartialOrd for Entry<Id> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Id> Ord for Entry<Id> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.at
            .cmp(&other.at)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

#[derive(Debug)]
pub struct DeferredQueue<Id: Eq + Hash> {
    heap: BinaryHeap<Reverse<Entry<Id>>>,
    /// Live release handle per participant (the sequence number of its current entry).
    releases: HashMap<Id, u64>,
    /// Live weekly handle, if armed.
    weekly: Option<u64>,
    next_seq: u64,
}

impl<Id: Eq + Hash> Default for DeferredQueue<Id> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            releases: HashMap::new(),
            weekly: None,
            next_seq: 0,
        }
    }
}

impl<Id: Copy + Eq + Hash> DeferredQueue<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (armed, not cancelled) actions.
    pub fn len(&self) -> usize {
        self.releases.len() + usize::from(self.weekly.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_release_armed(&self, id: Id) -> bool {
        self.releases.contains_key(&id)
    }

    pub fn is_weekly_armed(&self) -> bool {
        self.weekly.is_some()
    }

    /// Instant of the earliest live action, discarding stale entries on the way.
    pub fn next_due(&mut self) -> Option<EpochMillis> {
        while let Some(Reverse(entry)) = self.heap.peek() {
            if self.is_live(entry) {
                return Some(entry.at);
            }
            self.heap.pop();
        }
        None
    }

    /// Removes and returns every live action due at or before `now`, in fire order.
    pub fn pop_due(&mut self, now: EpochMillis) -> Vec<DeferredAction<Id>> {
        let mut due = Vec::new();
        while let Some(Reverse(entry)) = self.heap.peek() {
            if entry.at > now && self.is_live(entry) {
                break;
            }
            let Some(Reverse(entry)) = self.heap.pop() else {
                break;
            };
            if !self.is_live(&entry) {
                continue;
            }
            match entry.action {
                DeferredAction::Release(id) => {
                    self.releases.remove(&id);
                }
                DeferredAction::WeeklyRegen => self.weekly = None,
            }
            due.push(entry.action);
        }
        due
    }

    /// Drops every armed action.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.releases.clear();
        self.weekly = None;
    }

    fn is_live(&self, entry: &Entry<Id>) -> bool {
        match entry.action {
            DeferredAction::Release(id) => self.releases.get(&id) == Some(&entry.seq),
            DeferredAction::WeeklyRegen => self.weekly == Some(entry.seq),
        }
    }

    fn push(&mut self, at: EpochMillis, action: DeferredAction<Id>) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { at, seq, action }));
        seq
    }
}

impl<Id: Copy + Eq + Hash> Timers<Id> for DeferredQueue<Id> {
    fn arm_release(&mut self, id: Id, at: EpochMillis) {
        let seq = self.push(at, DeferredAction::Release(id));
        self.releases.insert(id, seq);
    }

    fn cancel_release(&mut self, id: Id) -> bool {
        self.releases.remove(&id).is_some()
    }

    fn arm_weekly(&mut self, at: EpochMillis) {
        let seq = self.push(at, DeferredAction::WeeklyRegen);
        self.weekly = Some(seq);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_time_order() {
        let mut queue = DeferredQueue::new();
        queue.arm_release(1u32, 300);
        queue.arm_release(2, 100);
        queue.arm_weekly(200);

        assert_eq!(queue.next_due(), Some(100));
        assert_eq!(
            queue.pop_due(1_000),
            vec![
                DeferredAction::Release(2),
                DeferredAction::WeeklyRegen,
                DeferredAction::Release(1),
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn nothing_fires_before_due() {
        let mut queue = DeferredQueue::new();
        queue.arm_release(1u32, 500);

        assert!(queue.pop_due(499).is_empty());
        assert_eq!(queue.pop_due(500), vec![DeferredAction::Release(1)]);
    }

    #[test]
    fn same_instant_fires_in_arming_order() {
        let mut queue = DeferredQueue::new();
        queue.arm_release(9u32, 50);
        queue.arm_release(3, 50);
        queue.arm_release(5, 50);

        assert_eq!(
            queue.pop_due(50),
            vec![
                DeferredAction::Release(9),
                DeferredAction::Release(3),
                DeferredAction::Release(5),
            ]
        );
    }

    #[test]
    fn cancelled_release_never_fires() {
        let mut queue = DeferredQueue::new();
        queue.arm_release(1u32, 100);
        queue.arm_release(2, 200);

        assert!(queue.cancel_release(1));
        assert!(!queue.cancel_release(1));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next_due(), Some(200));
        assert_eq!(queue.pop_due(1_000), vec![DeferredAction::Release(2)]);
    }

    #[test]
    fn rearming_release_replaces_previous_handle() {
        let mut queue = DeferredQueue::new();
        queue.arm_release(1u32, 100);
        queue.arm_release(1, 400);

        assert_eq!(queue.len(), 1);
        assert!(queue.pop_due(300).is_empty());
        assert_eq!(queue.pop_due(400), vec![DeferredAction::Release(1)]);
        assert!(!queue.is_release_armed(1));
    }

    #[test]
    fn weekly_is_a_single_logical_trigger() {
        let mut queue: DeferredQueue<u32> = DeferredQueue::new();
        queue.arm_weekly(100);
        queue.arm_weekly(700);

        assert_eq!(queue.len(), 1);
        assert!(queue.pop_due(500).is_empty());
        assert_eq!(queue.pop_due(700), vec![DeferredAction::WeeklyRegen]);
        assert!(!queue.is_weekly_armed());
    }

    #[test]
    fn clear_drops_everything() {
        let mut queue = DeferredQueue::new();
        queue.arm_release(1u32, 100);
        queue.arm_weekly(100);
        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(queue.next_due(), None);
        assert!(queue.pop_due(i64::MAX).is_empty());
    }
}
