//! Board definitions.

use std::fmt;

/// A cell of the board, `(0, 0)` being the top left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub const fn new(x: u32, y: u32) -> Self {
        Position { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Direction a tank is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector of the direction, `y` growing downwards.
    pub fn offset(self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// A spawn point and the direction tanks spawned there face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub position: Position,
    pub facing: Direction,
}

/// A board: its size, its walls and where tanks spawn.
///
/// The number of spawn points is the player limit of a game played on it.
#[derive(Debug, Clone, PartialEq)]
pub struct GameMap {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub walls: Vec<Position>,
    pub spawns: Vec<Spawn>,
}

impl GameMap {
    /// The board every new game is played on.
    ///
    /// ```text
    /// S . . . . . . . . S
    /// . # # . . . . # # .
    /// . # . . . . . . # .
    /// . . . . # # . . . .
    /// . . . . # # . . . .
    /// . # . . . . . . # .
    /// . # # . . . . # # .
    /// S . . . . . . . . S
    /// ```
    pub fn default_map() -> Self {
        let walls = [
            (1, 1),
            (2, 1),
            (7, 1),
            (8, 1),
            (1, 2),
            (8, 2),
            (4, 3),
            (5, 3),
            (4, 4),
            (5, 4),
            (1, 5),
            (8, 5),
            (1, 6),
            (2, 6),
            (7, 6),
            (8, 6),
        ]
        .into_iter()
        .map(|(x, y)| Position::new(x, y))
        .collect();

        let spawns = vec![
            Spawn {
                position: Position::new(0, 0),
                facing: Direction::Right,
            },
            Spawn {
                position: Position::new(9, 7),
                facing: Direction::Left,
            },
            Spawn {
                position: Position::new(9, 0),
                facing: Direction::Down,
            },
            Spawn {
                position: Position::new(0, 7),
                facing: Direction::Up,
            },
        ];

        GameMap {
            name: "map1".to_owned(),
            width: 10,
            height: 8,
            walls,
            spawns,
        }
    }

    pub fn max_players(&self) -> usize {
        self.spawns.len()
    }

    pub fn is_wall(&self, position: Position) -> bool {
        self.walls.contains(&position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_map_is_consistent() {
        let map = GameMap::default_map();
        assert_eq!(map.max_players(), 4);

        for wall in &map.walls {
            assert!(wall.x < map.width && wall.y < map.height);
        }
        for spawn in &map.spawns {
            let p = spawn.position;
            assert!(p.x < map.width && p.y < map.height);
            assert!(!map.is_wall(p), "spawn {} is a wall", p);
        }
    }

    #[test]
    fn test_direction_offset() {
        assert_eq!(Direction::Up.offset(), (0, -1));
        assert_eq!(Direction::Right.offset(), (1, 0));
    }
}
