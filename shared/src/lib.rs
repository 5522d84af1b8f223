pub mod constants;
pub mod deferred;
pub mod engine;
mod error;
pub mod host;
pub mod messages;
pub mod registry;
pub mod service;
pub mod settings;
pub mod store;
mod time;
pub mod vitality;
pub mod weekly;

pub use deferred::{DeferredAction, DeferredQueue};
pub use engine::{ConnectOutcome, Engine, PenaltyOutcome, ReleaseFire, SweepReport};
pub use error::HardcoreError;
pub use host::{Cue, Orientation, PlayMode, Position, Timers, World};
pub use registry::{PlayerDataDir, RegistryError};
pub use service::HardcoreService;
pub use settings::HardcoreSettings;
pub use store::{EffectStore, PendingEffects};
pub use time::{EpochMillis, RemainingTime};
pub use vitality::{Vitality, VitalityBounds};
pub use weekly::WeeklyAnchor;
