//! Game sessions of every channel.

use std::collections::HashMap;

use tokio::sync::{Mutex, MutexGuard};

use crate::tanks::{map::GameMap, session::GameSession};

/// Owns one [`GameSession`] per channel id.
///
/// Callers lock the whole registry for the create, join and render sequence,
/// so two commands in the same channel can neither create two sessions nor
/// lose an enrollment.
pub struct GameRegistry {
    /// Board every new session is created on
    map: GameMap,
    /// Sessions indexed by channel id
    sessions: Mutex<HashMap<String, GameSession>>,
}

impl GameRegistry {
    pub fn new(map: GameMap) -> Self {
        GameRegistry {
            map,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// A fresh session on the registry board.
    pub fn new_session(&self) -> GameSession {
        GameSession::new(self.map.clone())
    }

    /// Locks the sessions until the guard is dropped.
    pub async fn sessions(&self) -> MutexGuard<'_, HashMap<String, GameSession>> {
        self.sessions.lock().await
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        GameRegistry::new(GameMap::default_map())
    }
}
