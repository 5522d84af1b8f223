mod db_vec3;
mod play_mode;
mod sound;

pub use db_vec3::DbVec3;
pub use play_mode::DbPlayMode;
pub use sound::SoundKind;
