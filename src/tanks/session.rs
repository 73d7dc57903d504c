//! A single game and its players.

use std::{collections::HashMap, fmt};

use image::ImageError;
use log::{debug, info};

use crate::tanks::{
    map::{Direction, GameMap, Position},
    render::render_board,
};

/// Health of a freshly spawned tank.
pub const MAX_HEALTH: u8 = 3;

/// Reasons a player cannot join a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// Every spawn point is taken
    GameFull,
    /// The player is already enrolled
    AlreadyJoined,
}

impl fmt::Display for JoinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinError::GameFull => write!(f, "Sorry, this game is full!"),
            JoinError::AlreadyJoined => write!(f, "You have already joined this game!"),
        }
    }
}

impl std::error::Error for JoinError {}

/// Per-player state drawn on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tank {
    pub position: Position,
    pub facing: Direction,
    pub health: u8,
    /// Palette slot, the join order
    pub color_index: usize,
}

/// A game: a fixed board and its enrolled players.
///
/// A player id appears at most once; players keep their join order.
#[derive(Debug, Clone)]
pub struct GameSession {
    map: GameMap,
    players: Vec<String>,
    tanks: HashMap<String, Tank>,
}

impl GameSession {
    pub fn new(map: GameMap) -> Self {
        info!("create game on map {}", map.name);
        GameSession {
            map,
            players: Vec::new(),
            tanks: HashMap::new(),
        }
    }

    pub fn map(&self) -> &GameMap {
        &self.map
    }

    /// Enrolled player ids in join order.
    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn has_player(&self, player_id: &str) -> bool {
        self.tanks.contains_key(player_id)
    }

    pub fn tank(&self, player_id: &str) -> Option<&Tank> {
        self.tanks.get(player_id)
    }

    /// Tanks with their owner, in join order.
    pub fn tanks(&self) -> impl Iterator<Item = (&str, &Tank)> {
        self.players
            .iter()
            .filter_map(|id| self.tank(id).map(|tank| (id.as_str(), tank)))
    }

    /// Enrolls `player_id` on the next free spawn point.
    ///
    /// # Errors
    ///
    /// * [`JoinError::AlreadyJoined`] - The player is already enrolled
    /// * [`JoinError::GameFull`] - Every spawn point is taken
    pub fn join(&mut self, player_id: &str) -> Result<(), JoinError> {
        if self.has_player(player_id) {
            return Err(JoinError::AlreadyJoined);
        }

        if self.players.len() >= self.map.max_players() {
            debug!("player {} cannot join, game is full", player_id);
            return Err(JoinError::GameFull);
        }

        let spawn = self.map.spawns[self.players.len()];

        let tank = Tank {
            position: spawn.position,
            facing: spawn.facing,
            health: MAX_HEALTH,
            color_index: self.players.len(),
        };

        info!("player {} joined at {}", player_id, spawn.position);
        self.players.push(player_id.to_owned());
        self.tanks.insert(player_id.to_owned(), tank);

        Ok(())
    }

    /// Renders the board as seen by `viewer_id` and returns the PNG bytes.
    ///
    /// The viewer's tank is highlighted; a viewer who is not enrolled sees the
    /// board without highlight.
    pub fn render(&self, viewer_id: &str) -> Result<Vec<u8>, ImageError> {
        debug!("render game for {}", viewer_id);
        render_board(self, viewer_id).export_png()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join() {
        let mut session = GameSession::new(GameMap::default_map());
        assert!(!session.has_player("alice"));

        session.join("alice").unwrap();

        assert!(session.has_player("alice"));
        assert_eq!(session.players(), ["alice".to_owned()]);
        let tank = session.tank("alice").unwrap();
        assert_eq!(tank.position, Position::new(0, 0));
        assert_eq!(tank.facing, Direction::Right);
        assert_eq!(tank.health, MAX_HEALTH);
    }

    #[test]
    fn test_join_twice_is_rejected() {
        let mut session = GameSession::new(GameMap::default_map());
        session.join("alice").unwrap();

        assert_eq!(session.join("alice"), Err(JoinError::AlreadyJoined));
        assert_eq!(session.players().len(), 1);
    }

    #[test]
    fn test_join_uses_next_spawn() {
        let mut session = GameSession::new(GameMap::default_map());
        session.join("alice").unwrap();
        session.join("bob").unwrap();

        assert_eq!(session.tank("bob").unwrap().position, Position::new(9, 7));
        assert_eq!(session.tank("bob").unwrap().color_index, 1);
    }

    #[test]
    fn test_join_full_game() {
        let mut session = GameSession::new(GameMap::default_map());
        for player in ["a", "b", "c", "d"] {
            session.join(player).unwrap();
        }

        assert_eq!(session.join("e"), Err(JoinError::GameFull));
        assert!(!session.has_player("e"));
        assert_eq!(session.players().len(), 4);
    }

    #[test]
    fn test_tanks_in_join_order() {
        let mut session = GameSession::new(GameMap::default_map());
        session.join("bob").unwrap();
        session.join("alice").unwrap();

        let owners: Vec<&str> = session.tanks().map(|(id, _)| id).collect();
        assert_eq!(owners, vec!["bob", "alice"]);
    }

    #[test]
    fn test_join_error_messages() {
        assert_eq!(JoinError::GameFull.to_string(), "Sorry, this game is full!");
        assert_eq!(
            JoinError::AlreadyJoined.to_string(),
            "You have already joined this game!"
        );
    }

    #[test]
    fn test_render_returns_png() {
        let mut session = GameSession::new(GameMap::default_map());
        session.join("alice").unwrap();

        let bytes = session.render("alice").unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
