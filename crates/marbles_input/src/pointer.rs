//! Pointer position tracking

use glam::Vec2;

/// Last known cursor position and the size of the surface it moves over
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
    position: Option<(f64, f64)>,
    width: u32,
    height: u32,
}

impl Pointer {
    /// Create a pointer over a surface of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: None,
            width,
            height,
        }
    }

    /// Record a cursor move (physical pixels, origin top-left)
    pub fn moved(&mut self, x: f64, y: f64) {
        self.position = Some((x, y));
    }

    /// Forget the cursor position (cursor left the window)
    pub fn left(&mut self) {
        self.position = None;
    }

    /// Update the surface size
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Cursor position in normalized device coordinates
    ///
    /// x and y are in [-1, 1] with +y up. `None` when the cursor position is
    /// unknown or the surface has no area.
    pub fn ndc(&self) -> Option<Vec2> {
        let (x, y) = self.position?;
        if self.width == 0 || self.height == 0 {
            return None;
        }
        Some(Vec2::new(
            (x / self.width as f64 * 2.0 - 1.0) as f32,
            (-(y / self.height as f64) * 2.0 + 1.0) as f32,
        ))
    }
}
