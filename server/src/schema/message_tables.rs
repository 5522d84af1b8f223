use crate::types::*;
use spacetimedb::*;

/// Chat output of the module.
#[table(name = chat_message, public)]
pub struct ChatMessage {
    #[primary_key]
    #[auto_inc]
    pub id: u64,

    /// Addressee. `None` is a broadcast to everyone.
    pub recipient: Option<Identity>,

    pub text: String,
    pub sent_at: Timestamp,
}

/// A sound a client should play for its player.
#[table(name = sound_cue, public)]
pub struct SoundCue {
    #[primary_key]
    #[auto_inc]
    pub id: u64,

    #[index(btree)]
    pub recipient: Identity,

    pub sound: SoundKind,
    pub volume: f32,
    pub pitch: f32,
    pub played_at: Timestamp,
}
