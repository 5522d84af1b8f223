use spacetimedb::*;

/// Identities allowed to run administrative reducers.
#[table(name = admin)]
pub struct Admin {
    #[primary_key]
    pub identity: Identity,
}
