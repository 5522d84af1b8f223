use crate::types::*;
use spacetimedb::*;

/// Player account data persisted across sessions.
///
/// Rows are created on first connection and never deleted, so the table doubles as the
/// registry of every player the module has ever seen, online or not.
#[table(name = player, public)]
pub struct Player {
    #[primary_key]
    pub identity: Identity,

    pub name: String,

    /// Whether a client is currently connected for this identity.
    #[index(btree)]
    pub online: bool,

    /// Maximum health in half-hearts.
    pub max_health: i32,

    pub mode: DbPlayMode,

    /// Last reported transform.
    pub translation: DbVec3,
    pub yaw: f32,
    pub pitch: f32,

    /// Personal respawn point. `None` respawns at the world spawn.
    pub spawn_point: Option<DbVec3>,
}
