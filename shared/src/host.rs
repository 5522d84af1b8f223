//! Interfaces to the hosting game server.
//!
//! The core never holds world objects. It names participants by identity and asks the host to
//! resolve them at the moment of each mutation, so a participant disconnecting between a death
//! and its release never leaves a dangling reference behind.

use std::{collections::HashSet, fmt::Debug, hash::Hash};

use crate::{EpochMillis, Vitality, registry::RegistryError};

/// Control state of a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayMode {
    /// Normal, interactive play.
    Normal,
    /// Forced non-interactive observation after a death.
    Restricted,
}

/// World position in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Facing direction in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub yaw: f32,
    pub pitch: f32,
}

/// Audio cues the core asks the host to play to a single participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Confirmation that a restriction has been lifted.
    Bell,
}

/// The world/host collaborator.
pub trait World {
    type Id: Copy + Eq + Hash + Debug;

    fn is_connected(&self, id: Self::Id) -> bool;

    /// Identities of every currently connected participant.
    fn connected(&self) -> Vec<Self::Id>;

    /// Every participant the host has ever persisted, connected or not.
    fn known_identities(&self) -> Result<HashSet<Self::Id>, RegistryError>;

    fn display_name(&self, id: Self::Id) -> String;

    /// Current vitality, or `None` if the host does not know the participant.
    fn vitality(&self, id: Self::Id) -> Option<Vitality>;

    fn set_vitality(&mut self, id: Self::Id, value: Vitality);

    fn set_mode(&mut self, id: Self::Id, mode: PlayMode);

    /// Personal spawn point, if the participant has set one.
    fn spawn_point(&self, id: Self::Id) -> Option<Position>;

    /// World default spawn point.
    fn world_spawn(&self) -> Position;

    fn orientation(&self, id: Self::Id) -> Orientation;

    fn relocate(&mut self, id: Self::Id, position: Position, orientation: Orientation);

    fn play_cue(&mut self, id: Self::Id, cue: Cue);

    /// Sends a message to one participant.
    fn notify(&mut self, id: Self::Id, text: &str);

    /// Sends a message to every connected participant.
    fn broadcast(&mut self, text: &str);
}

/// Deferred-action timers.
///
/// - At most one release is armed per participant; arming again replaces the previous one.
/// - There is a single logical weekly trigger; arming it again replaces the previous one.
pub trait Timers<Id> {
    fn arm_release(&mut self, id: Id, at: EpochMillis);

    /// Cancels the participant's armed release. Returns whether one was armed.
    fn cancel_release(&mut self, id: Id) -> bool;

    fn arm_weekly(&mut self, at: EpochMillis);
}
