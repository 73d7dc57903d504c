//! Minimal 2D drawing surface exported as PNG.
//!
//! Used by the avatar and the tank board renderers. Shapes falling partially
//! outside the surface are clipped.

use std::io::Cursor;

use image::{ImageError, ImageFormat, Rgba, RgbaImage};

/// An RGBA color.
pub type Color = Rgba<u8>;

pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Rgba([r, g, b, 255])
}

/// A drawing surface backed by an RGBA buffer.
pub struct Surface {
    image: RgbaImage,
}

impl Surface {
    /// Creates a `width` x `height` surface filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Surface {
            image: RgbaImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Color at `(x, y)`, `None` outside the surface.
    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image.get_pixel_checked(x, y).copied()
    }

    /// Fills the axis aligned rectangle whose top left corner is `(x, y)`.
    pub fn fill_rect(&mut self, x: i64, y: i64, width: u32, height: u32, color: Color) {
        let x_end = (x + i64::from(width)).min(i64::from(self.width()));
        let y_end = (y + i64::from(height)).min(i64::from(self.height()));

        for py in y.max(0)..y_end {
            for px in x.max(0)..x_end {
                self.image.put_pixel(px as u32, py as u32, color);
            }
        }
    }

    /// Fills the disc centered on `(cx, cy)`.
    pub fn fill_circle(&mut self, cx: i64, cy: i64, radius: u32, color: Color) {
        let r = i64::from(radius);
        for py in (cy - r).max(0)..(cy + r + 1).min(i64::from(self.height())) {
            for px in (cx - r).max(0)..(cx + r + 1).min(i64::from(self.width())) {
                let (dx, dy) = (px - cx, py - cy);
                if dx * dx + dy * dy <= r * r {
                    self.image.put_pixel(px as u32, py as u32, color);
                }
            }
        }
    }

    /// Draws a `thickness` wide outline of the rectangle.
    pub fn stroke_rect(
        &mut self,
        x: i64,
        y: i64,
        width: u32,
        height: u32,
        thickness: u32,
        color: Color,
    ) {
        let t = i64::from(thickness);
        let (w, h) = (i64::from(width), i64::from(height));
        self.fill_rect(x, y, width, thickness, color);
        self.fill_rect(x, y + h - t, width, thickness, color);
        self.fill_rect(x, y, thickness, height, color);
        self.fill_rect(x + w - t, y, thickness, height, color);
    }

    /// Encodes the surface as a PNG byte stream.
    pub fn export_png(&self) -> Result<Vec<u8>, ImageError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}
