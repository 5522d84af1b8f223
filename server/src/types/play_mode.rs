/// Persisted control state of a player.
#[derive(spacetimedb::SpacetimeType, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbPlayMode {
    /// Normal, interactive play.
    Normal,
    /// Spectating until the death penalty expires.
    Spectator,
}

impl From<DbPlayMode> for shared::PlayMode {
    fn from(mode: DbPlayMode) -> Self {
        match mode {
            DbPlayMode::Normal => shared::PlayMode::Normal,
            DbPlayMode::Spectator => shared::PlayMode::Restricted,
        }
    }
}

impl From<shared::PlayMode> for DbPlayMode {
    fn from(mode: shared::PlayMode) -> Self {
        match mode {
            shared::PlayMode::Normal => DbPlayMode::Normal,
            shared::PlayMode::Restricted => DbPlayMode::Spectator,
        }
    }
}
