mod reducers {
    pub mod commands;
    mod connection;
    pub mod death;
    pub(crate) mod release;
    pub(crate) mod weekly_regen;
}
mod host;
pub mod schema;
pub mod types;
mod utils;

use crate::schema::*;
use spacetimedb::*;

#[reducer(init)]
pub fn init(ctx: &ReducerContext) {
    ctx.db.hardcore_settings().id().delete(HardcoreSettingsRow::ID);
    ctx.db
        .hardcore_settings()
        .insert(HardcoreSettingsRow::default());

    // The publisher administers the module.
    if ctx.db.admin().identity().find(ctx.sender).is_none() {
        ctx.db.admin().insert(Admin {
            identity: ctx.sender,
        });
    }

    reducers::weekly_regen::init(ctx);
}
