//! Headless surface that records draw calls

use glam::Vec2;

use super::{Rgb, Surface};

/// A single recorded draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Line { from: Vec2, to: Vec2, width: f32, color: Rgb },
    Disc { center: Vec2, radius: f32, color: Rgb },
    Clear { color: Rgb },
}

/// Surface that keeps every command issued since the last clear
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    pub commands: Vec<DrawCommand>,
    /// Number of clears (one per painted frame)
    pub frames: u64,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            frames: 0,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }

    pub fn disc_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Disc { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgb) {
        self.commands.push(DrawCommand::Line { from, to, width, color });
    }

    fn draw_disc(&mut self, center: Vec2, radius: f32, color: Rgb) {
        self.commands.push(DrawCommand::Disc { center, radius, color });
    }

    fn clear(&mut self, color: Rgb) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { color });
        self.frames += 1;
    }

    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_and_clears() {
        let mut s = RecordingSurface::new(100.0, 50.0);
        s.draw_line(Vec2::ZERO, Vec2::ONE, 1.0, Rgb::new(1, 2, 3));
        s.draw_disc(Vec2::ZERO, 4.0, Rgb::new(1, 2, 3));
        assert_eq!(s.line_count(), 1);
        assert_eq!(s.disc_count(), 1);

        s.clear(Rgb::new(0, 0, 0));
        assert_eq!(s.commands.len(), 1);
        assert_eq!(s.frames, 1);
        assert!(s.is_drawable());
    }

    #[test]
    fn test_zero_size_not_drawable() {
        let s = RecordingSurface::new(0.0, 200.0);
        assert!(!s.is_drawable());
    }
}
