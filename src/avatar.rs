//! Turtle avatar rendering.
//!
//! A turtle is drawn with one of the [`FACES`]; the face decides the eyes,
//! the mouth and the shell color.

use image::Rgba;
use log::debug;
use rand::{Rng, seq::SliceRandom};

use crate::canvas::{Color, Surface, rgb};

/// Names of the faces a turtle can wear.
pub const FACES: &[&str] = &["happy", "sad", "angry", "cool", "sleepy", "surprised"];

/// Side of the square avatar, in pixels.
pub const AVATAR_SIZE: u32 = 256;

/// Filename used when no known face was asked for.
pub const DEFAULT_FILENAME: &str = "turtle.png";

const BACKGROUND: Color = rgb(135, 206, 235);
const SKIN: Color = rgb(154, 205, 50);
const DARK: Color = rgb(20, 20, 20);
const WHITE: Color = rgb(255, 255, 255);

/// Resolves the face to draw: `face` itself when it is known, a random one
/// otherwise.
pub fn pick_face<R: Rng>(face: Option<&str>, rng: &mut R) -> &'static str {
    if let Some(known) = face.and_then(|f| FACES.iter().copied().find(|known| *known == f)) {
        return known;
    }

    FACES.choose(rng).copied().unwrap_or(FACES[0])
}

/// Attachment filename for a `turtle` command argument.
pub fn filename(face: Option<&str>) -> String {
    match face {
        Some(f) if FACES.contains(&f) => format!("{}.png", f),
        _ => DEFAULT_FILENAME.to_owned(),
    }
}

/// Draws a turtle wearing `face`, or a random face when `face` is `None` or
/// unknown, and returns the face drawn.
pub fn render_avatar(surface: &mut Surface, face: Option<&str>) -> &'static str {
    let face = pick_face(face, &mut rand::thread_rng());
    debug!("render turtle avatar with face {}", face);

    let size = i64::from(surface.width().min(surface.height()));
    let unit = (size / 16).max(1);
    let center = size / 2;

    surface.fill_rect(0, 0, surface.width(), surface.height(), BACKGROUND);
    draw_turtle(surface, center, center + unit, unit, shell_color(face));
    draw_face(surface, center, center - 4 * unit, unit, face);

    face
}

/// Draws a small turtle centered on `(cx, cy)`, used by the tank board.
pub fn draw_turtle(surface: &mut Surface, cx: i64, cy: i64, unit: i64, shell: Color) {
    let u = unit.max(1) as u32;

    // Legs
    for (dx, dy) in [(-3, -2), (3, -2), (-3, 3), (3, 3)] {
        surface.fill_circle(cx + dx * unit, cy + dy * unit, u, SKIN);
    }
    // Head
    surface.fill_circle(cx, cy - 4 * unit, 2 * u, SKIN);
    // Shell
    surface.fill_circle(cx, cy, 4 * u, shell);
    surface.fill_circle(cx, cy, 2 * u, darken(shell));
}

fn draw_face(surface: &mut Surface, cx: i64, cy: i64, unit: i64, face: &str) {
    let u = unit as u32;
    let (left, right) = (cx - unit, cx + unit);
    let eye_y = cy - unit / 2;
    let mouth_y = cy + unit;

    match face {
        "cool" => {
            surface.fill_rect(left - unit, eye_y - unit / 2, 4 * u, u, DARK);
        }
        "sleepy" => {
            surface.fill_rect(left - unit / 2, eye_y, u, (u / 3).max(1), DARK);
            surface.fill_rect(right - unit / 2, eye_y, u, (u / 3).max(1), DARK);
        }
        "surprised" => {
            surface.fill_circle(left, eye_y, u / 2 + 1, WHITE);
            surface.fill_circle(right, eye_y, u / 2 + 1, WHITE);
            surface.fill_circle(left, eye_y, u / 4, DARK);
            surface.fill_circle(right, eye_y, u / 4, DARK);
        }
        _ => {
            surface.fill_circle(left, eye_y, u / 3 + 1, DARK);
            surface.fill_circle(right, eye_y, u / 3 + 1, DARK);
        }
    }

    if face == "angry" {
        surface.fill_rect(left - unit / 2, eye_y - unit, u, (u / 4).max(1), DARK);
        surface.fill_rect(right - unit / 2, eye_y - unit, u, (u / 4).max(1), DARK);
    }

    let thin = (u / 4).max(1);
    match face {
        "happy" | "cool" => {
            surface.fill_rect(cx - unit, mouth_y, 2 * u, thin, DARK);
            surface.fill_rect(cx - unit, mouth_y - unit / 3, thin, u / 3, DARK);
            surface.fill_rect(cx + unit - i64::from(thin), mouth_y - unit / 3, thin, u / 3, DARK);
        }
        "sad" | "angry" => {
            surface.fill_rect(cx - unit, mouth_y, 2 * u, thin, DARK);
            surface.fill_rect(cx - unit, mouth_y, thin, u / 3, DARK);
            surface.fill_rect(cx + unit - i64::from(thin), mouth_y, thin, u / 3, DARK);
        }
        "surprised" => {
            surface.fill_circle(cx, mouth_y, u / 3 + 1, DARK);
        }
        _ => {
            surface.fill_rect(cx - unit / 2, mouth_y, u, thin, DARK);
        }
    }
}

fn shell_color(face: &str) -> Color {
    match face {
        "happy" => rgb(34, 139, 34),
        "sad" => rgb(70, 130, 180),
        "angry" => rgb(178, 34, 34),
        "cool" => rgb(72, 61, 139),
        "sleepy" => rgb(147, 112, 219),
        _ => rgb(218, 165, 32),
    }
}

fn darken(color: Color) -> Color {
    let [r, g, b, a] = color.0;
    Rgba([r / 2, g / 2, b / 2, a])
}
