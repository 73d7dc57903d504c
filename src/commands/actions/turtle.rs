//! Turtle command handler.

use log::{debug, error};

use crate::{
    avatar::{AVATAR_SIZE, filename, render_avatar},
    canvas::{Surface, rgb},
    commands::{CommandResult, Reply, markdown_response::format_render_error},
};

/// Draws a turtle wearing `face`, or a random face, and replies with the PNG.
///
/// The attachment is named after the face when it is known, `turtle.png`
/// otherwise.
pub fn handle_turtle(face: Option<&str>) -> CommandResult {
    let mut surface = Surface::new(AVATAR_SIZE, AVATAR_SIZE, rgb(255, 255, 255));
    let drawn = render_avatar(&mut surface, face);
    debug!("handling turtle command, asked {:?}, drew {}", face, drawn);

    match surface.export_png() {
        Ok(bytes) => CommandResult {
            replies: vec![Reply::Image {
                bytes,
                filename: filename(face),
            }],
        },
        Err(e) => {
            error!("failed to export turtle avatar: {}", e);
            CommandResult::text(format_render_error())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_filename(result: &CommandResult) -> &str {
        match result.replies.as_slice() {
            [Reply::Image { bytes, filename }] => {
                assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
                filename
            }
            replies => panic!("Expected a single image reply, got {:?}", replies.len()),
        }
    }

    #[test]
    fn test_handle_turtle_known_face() {
        let result = handle_turtle(Some("sleepy"));
        assert_eq!(image_filename(&result), "sleepy.png");
    }

    #[test]
    fn test_handle_turtle_random_face() {
        assert_eq!(image_filename(&handle_turtle(None)), "turtle.png");
        assert_eq!(image_filename(&handle_turtle(Some("grumpy"))), "turtle.png");
    }
}
