//! Participant registry backed by a persisted-state directory.
//!
//! Hosts that persist one record file per participant (named `<uuid><suffix>`) can enumerate
//! every known participant, including those that are not connected, by scanning that directory.
//!
//! Failure policy
//! - A file name without the suffix, or whose stem is not a UUID, is skipped silently.
//! - A directory entry that cannot be read is skipped.
//! - Failing to open the directory is a [`RegistryError::Io`]; callers decide how to degrade.

use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use uuid::Uuid;

use crate::constants::PLAYER_DATA_SUFFIX;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read participant directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerDataDir {
    path: PathBuf,
    suffix: String,
}

impl PlayerDataDir {
    /// A registry over `path` using the default `.dat` suffix.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_suffix(path, PLAYER_DATA_SUFFIX)
    }

    pub fn with_suffix(path: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            suffix: suffix.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Enumerates every participant identity with a record in the directory.
    pub fn identities(&self) -> Result<HashSet<Uuid>, RegistryError> {
        let entries = fs::read_dir(&self.path).map_err(|source| RegistryError::Io {
            path: self.path.clone(),
            source,
        })?;

        let mut identities = HashSet::new();
        for entry in entries {
            let Ok(entry) = entry else {
                continue;
            };
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(id) = parse_record_name(file_name, &self.suffix) {
                identities.insert(id);
            }
        }
        Ok(identities)
    }
}

/// Parses `<uuid><suffix>` into the identity, or `None` if the name does not match.
pub fn parse_record_name(file_name: &str, suffix: &str) -> Option<Uuid> {
    let stem = file_name.strip_suffix(suffix)?;
    Uuid::parse_str(stem).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "1b4e28ba-2fa1-11d2-883f-0016d3cca427";
    const BOB: &str = "6fa459ea-ee8a-3ca4-894e-db77e160355e";

    #[test]
    fn parses_identity_with_suffix() {
        let id = parse_record_name(&format!("{ALICE}.dat"), ".dat");
        assert_eq!(id, Some(Uuid::parse_str(ALICE).unwrap()));
    }

    #[test]
    fn rejects_wrong_suffix_or_malformed_stem() {
        assert_eq!(parse_record_name(&format!("{ALICE}.dat_old"), ".dat"), None);
        assert_eq!(parse_record_name("not-a-uuid.dat", ".dat"), None);
        assert_eq!(parse_record_name(".dat", ".dat"), None);
    }

    #[test]
    fn scans_directory_and_skips_noise() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(format!("{ALICE}.dat")), b"").unwrap();
        fs::write(dir.path().join(format!("{BOB}.dat")), b"").unwrap();
        fs::write(dir.path().join(format!("{BOB}.dat_old")), b"").unwrap();
        fs::write(dir.path().join("garbage.dat"), b"").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let registry = PlayerDataDir::new(dir.path());
        let ids = registry.identities().unwrap();

        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&Uuid::parse_str(ALICE).unwrap()));
        assert!(ids.contains(&Uuid::parse_str(BOB).unwrap()));
    }

    #[test]
    fn custom_suffix() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(format!("{ALICE}.json")), b"{}").unwrap();
        fs::write(dir.path().join(format!("{BOB}.dat")), b"").unwrap();

        let ids = PlayerDataDir::with_suffix(dir.path(), ".json")
            .identities()
            .unwrap();
        assert_eq!(ids.len(), 1);
        assert!(ids.contains(&Uuid::parse_str(ALICE).unwrap()));
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("playerdata");

        let err = PlayerDataDir::new(&missing).identities().unwrap_err();
        let RegistryError::Io { path, .. } = err;
        assert_eq!(path, missing);
    }
}
