//! Rendering contract
//!
//! The simulation never talks to a canvas directly. Everything it paints goes
//! through [`Surface`], which a host backs with its own 2D context.

pub mod recording;
pub mod shapes;

pub use recording::{DrawCommand, RecordingSurface};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `factor` (clamped to 0-1)
    pub fn scaled(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        let ch = |c: u8| (c as f32 * f).round() as u8;
        Self::new(ch(self.r), ch(self.g), ch(self.b))
    }

    /// Linear blend toward `other` (`t = 0` is `self`)
    pub fn lerp(self, other: Rgb, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self::new(ch(self.r, other.r), ch(self.g, other.g), ch(self.b, other.b))
    }
}

/// A 2D render target
pub trait Surface {
    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgb);
    fn draw_disc(&mut self, center: Vec2, radius: f32, color: Rgb);
    fn clear(&mut self, color: Rgb);
    /// (width, height) in pixels
    fn size(&self) -> (f32, f32);

    /// False for zero-sized targets; render passes skip painting on those
    fn is_drawable(&self) -> bool {
        let (w, h) = self.size();
        w > 0.0 && h > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_scaled() {
        let c = Rgb::new(200, 100, 50);
        assert_eq!(c.scaled(0.5), Rgb::new(100, 50, 25));
        assert_eq!(c.scaled(2.0), c);
        assert_eq!(c.scaled(-1.0), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_rgb_lerp() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(255, 255, 255);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(128, 128, 128));
    }
}
