mod admin_table;
mod effect_tables;
mod hardcore_settings_table;
mod message_tables;
mod player_table;

pub use admin_table::*;
pub use effect_tables::*;
pub use hardcore_settings_table::*;
pub use message_tables::*;
pub use player_table::*;
