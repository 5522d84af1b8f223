#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    io,
    sync::mpsc::{Receiver, Sender},
    time::Duration,
};

use shared::{
    Cue, Orientation, PlayMode, PlayerDataDir, Position, RegistryError, Vitality, World,
    constants::WORLD_SPAWN,
};
use uuid::Uuid;

/// 2024-01-03 12:00 UTC, a Wednesday.
pub const WEDNESDAY_NOON: i64 = 1_704_283_200_000;
/// 2024-01-06 00:00 UTC, the following Saturday.
pub const SATURDAY_MIDNIGHT: i64 = 1_704_499_200_000;
pub const HOUR_MS: i64 = 3_600_000;

#[derive(Debug, Clone)]
pub struct FakePlayer {
    pub name: String,
    pub connected: bool,
    pub vitality: Vitality,
    pub mode: PlayMode,
    pub position: Position,
    pub orientation: Orientation,
    pub spawn_point: Option<Position>,
    pub messages: Vec<String>,
    pub cues: Vec<Cue>,
}

pub enum Registry {
    /// Every participant the world has a record for.
    Players,
    Directory(PlayerDataDir),
    Failing,
    /// Like `Players`, but signals `entered` and waits on `release` first, so a test can hold a
    /// sweep in the middle of its registry scan.
    Gated {
        entered: Sender<()>,
        release: Receiver<()>,
    },
}

pub struct FakeWorld {
    pub players: HashMap<Uuid, FakePlayer>,
    pub registry: Registry,
    pub world_spawn: Position,
    pub broadcasts: Vec<String>,
}

impl FakeWorld {
    pub fn new() -> Self {
        Self {
            players: HashMap::new(),
            registry: Registry::Players,
            world_spawn: WORLD_SPAWN,
            broadcasts: Vec::new(),
        }
    }

    pub fn add_player(&mut self, n: u128, name: &str, vitality: Vitality, connected: bool) -> Uuid {
        let id = Uuid::from_u128(n);
        self.players.insert(
            id,
            FakePlayer {
                name: name.to_string(),
                connected,
                vitality,
                mode: PlayMode::Normal,
                position: Position::new(120.0, 70.0, -40.0),
                orientation: Orientation {
                    yaw: 1.25,
                    pitch: -0.5,
                },
                spawn_point: None,
                messages: Vec::new(),
                cues: Vec::new(),
            },
        );
        id
    }

    pub fn player(&self, id: Uuid) -> &FakePlayer {
        &self.players[&id]
    }

    pub fn player_mut(&mut self, id: Uuid) -> &mut FakePlayer {
        self.players.get_mut(&id).expect("player exists")
    }

    pub fn set_connected(&mut self, id: Uuid, connected: bool) {
        self.player_mut(id).connected = connected;
    }
}

impl World for FakeWorld {
    type Id = Uuid;

    fn is_connected(&self, id: Uuid) -> bool {
        self.players.get(&id).is_some_and(|p| p.connected)
    }

    fn connected(&self) -> Vec<Uuid> {
        self.players
            .iter()
            .filter(|(_, p)| p.connected)
            .map(|(id, _)| *id)
            .collect()
    }

    fn known_identities(&self) -> Result<HashSet<Uuid>, RegistryError> {
        match &self.registry {
            Registry::Players => Ok(self.players.keys().copied().collect()),
            Registry::Directory(dir) => dir.identities(),
            Registry::Failing => Err(RegistryError::Io {
                path: "playerdata".into(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            }),
            Registry::Gated { entered, release } => {
                let _ = entered.send(());
                let _ = release.recv_timeout(Duration::from_secs(5));
                Ok(self.players.keys().copied().collect())
            }
        }
    }

    fn display_name(&self, id: Uuid) -> String {
        self.players
            .get(&id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    fn vitality(&self, id: Uuid) -> Option<Vitality> {
        self.players.get(&id).map(|p| p.vitality)
    }

    fn set_vitality(&mut self, id: Uuid, value: Vitality) {
        if let Some(p) = self.players.get_mut(&id) {
            p.vitality = value;
        }
    }

    fn set_mode(&mut self, id: Uuid, mode: PlayMode) {
        if let Some(p) = self.players.get_mut(&id) {
            p.mode = mode;
        }
    }

    fn spawn_point(&self, id: Uuid) -> Option<Position> {
        self.players.get(&id).and_then(|p| p.spawn_point)
    }

    fn world_spawn(&self) -> Position {
        self.world_spawn
    }

    fn orientation(&self, id: Uuid) -> Orientation {
        self.players
            .get(&id)
            .map(|p| p.orientation)
            .unwrap_or_default()
    }

    fn relocate(&mut self, id: Uuid, position: Position, orientation: Orientation) {
        if let Some(p) = self.players.get_mut(&id) {
            p.position = position;
            p.orientation = orientation;
        }
    }

    fn play_cue(&mut self, id: Uuid, cue: Cue) {
        if let Some(p) = self.players.get_mut(&id) {
            p.cues.push(cue);
        }
    }

    fn notify(&mut self, id: Uuid, text: &str) {
        if let Some(p) = self.players.get_mut(&id) {
            p.messages.push(text.to_string());
        }
    }

    fn broadcast(&mut self, text: &str) {
        self.broadcasts.push(text.to_string());
    }
}
