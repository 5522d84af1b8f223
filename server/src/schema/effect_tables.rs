use spacetimedb::*;

/// When a spectating player is due to be released. At most one row per player.
#[table(name = spectator_deadline, public)]
pub struct SpectatorDeadline {
    #[primary_key]
    pub identity: Identity,
    pub deadline: Timestamp,
}

/// Max health granted by weekly regenerations while the player was offline (half-hearts).
///
/// Applied and removed on the player's next connection.
#[table(name = pending_vitality)]
pub struct PendingVitality {
    #[primary_key]
    pub identity: Identity,
    pub amount: u32,
}
