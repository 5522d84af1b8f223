use thiserror::Error;

use crate::registry::RegistryError;

/// Errors surfaced by the core to its callers.
///
/// A missing deadline or pending increase is not an error anywhere in the core; those paths
/// return `Option`. The only caller-visible "missing" case is the remaining-time query.
#[derive(Debug, Error)]
pub enum HardcoreError {
    #[error("participant has no active restriction")]
    NoActiveRestriction,

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
