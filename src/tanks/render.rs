//! Board rendering.

use crate::{
    avatar::draw_turtle,
    canvas::{Color, Surface, rgb},
    tanks::{
        map::Position,
        session::{GameSession, MAX_HEALTH},
    },
};

/// Side of a board cell, in pixels.
pub const CELL_SIZE: u32 = 48;

const FLOOR: Color = rgb(222, 184, 135);
const GRID: Color = rgb(205, 170, 125);
const WALL: Color = rgb(101, 67, 33);
const HIGHLIGHT: Color = rgb(255, 215, 0);
const CANNON: Color = rgb(60, 60, 60);
const HEALTH: Color = rgb(220, 20, 60);
const PALETTE: &[Color] = &[
    rgb(34, 139, 34),
    rgb(70, 130, 180),
    rgb(178, 34, 34),
    rgb(147, 112, 219),
];

/// Draws `session` as seen by `viewer_id`.
pub fn render_board(session: &GameSession, viewer_id: &str) -> Surface {
    let map = session.map();
    let cell = i64::from(CELL_SIZE);
    let mut surface = Surface::new(map.width * CELL_SIZE, map.height * CELL_SIZE, FLOOR);

    for y in 0..map.height {
        for x in 0..map.width {
            let (px, py) = (i64::from(x) * cell, i64::from(y) * cell);
            if map.is_wall(Position::new(x, y)) {
                surface.fill_rect(px, py, CELL_SIZE, CELL_SIZE, WALL);
            } else {
                surface.stroke_rect(px, py, CELL_SIZE, CELL_SIZE, 1, GRID);
            }
        }
    }

    let unit = cell / 12;
    for (player_id, tank) in session.tanks() {
        let (px, py) = (
            i64::from(tank.position.x) * cell,
            i64::from(tank.position.y) * cell,
        );
        let (cx, cy) = (px + cell / 2, py + cell / 2);

        if player_id == viewer_id {
            surface.stroke_rect(px, py, CELL_SIZE, CELL_SIZE, 3, HIGHLIGHT);
        }

        let (dx, dy) = tank.facing.offset();
        surface.fill_circle(cx + dx * 5 * unit, cy + dy * 5 * unit, unit as u32, CANNON);
        draw_turtle(
            &mut surface,
            cx,
            cy,
            unit,
            PALETTE[tank.color_index % PALETTE.len()],
        );

        for h in 0..i64::from(tank.health.min(MAX_HEALTH)) {
            surface.fill_rect(px + 4 + h * (unit + 2), py + 4, unit as u32, unit as u32, HEALTH);
        }
    }

    surface
}
