/// Sounds the module asks a client to play.
#[derive(spacetimedb::SpacetimeType, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundKind {
    /// Bell rung when a player is back from the dead.
    Bell,
}

impl From<shared::Cue> for SoundKind {
    fn from(cue: shared::Cue) -> Self {
        match cue {
            shared::Cue::Bell => SoundKind::Bell,
        }
    }
}
