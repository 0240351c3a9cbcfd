use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::peripherals::Display;

/// The FrameBuffer is indexed as [y][x]; 1 is lit and 0 is dark.
pub type Frame = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Frame buffer
/// An in-memory [`Display`] holding the next frame to be drawn.
///
/// `render` marks the frame as ready; a host picks it up with `take_frame`
/// and only has to redraw when something changed.
pub struct FrameBuffer {
    pixels: Frame,
    draw_flag: bool,
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
        }
    }

    /// Whether the pixel at (x, y) is lit; coordinates wrap like `set_pixel`.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH] == 1
    }

    pub fn pixels(&self) -> &Frame {
        &self.pixels
    }

    /// Returns the frame if it was rendered since the last call.
    pub fn take_frame(&mut self) -> Option<Frame> {
        if std::mem::take(&mut self.draw_flag) {
            Some(self.pixels)
        } else {
            None
        }
    }

    /// Renders the frame as text, one line per row, `#` for lit pixels.
    pub fn to_text(&self) -> String {
        self.pixels
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&pixel| if pixel == 1 { '#' } else { '.' })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for FrameBuffer {
    fn set_pixel(&mut self, x: usize, y: usize) -> bool {
        let pixel = &mut self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH];
        *pixel ^= 1;
        *pixel == 0
    }

    fn clear(&mut self) {
        self.pixels = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    fn render(&mut self) {
        self.draw_flag = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_pixel_toggles() {
        let mut frame = FrameBuffer::new();
        assert!(!frame.set_pixel(3, 4));
        assert!(frame.pixel(3, 4));
        assert!(frame.set_pixel(3, 4));
        assert!(!frame.pixel(3, 4));
    }

    #[test]
    fn test_set_pixel_wraps() {
        let mut frame = FrameBuffer::new();
        frame.set_pixel(DISPLAY_WIDTH + 1, DISPLAY_HEIGHT + 2);
        assert_eq!(frame.pixels()[2][1], 1);
    }

    #[test]
    fn test_clear() {
        let mut frame = FrameBuffer::new();
        frame.set_pixel(0, 0);
        frame.clear();
        assert!(frame.pixels().iter().flatten().all(|&p| p == 0));
    }

    #[test]
    fn test_take_frame_only_after_render() {
        let mut frame = FrameBuffer::new();
        assert_eq!(frame.take_frame(), None);
        frame.set_pixel(0, 0);
        frame.render();
        let taken = frame.take_frame().unwrap();
        assert_eq!(taken[0][0], 1);
        assert_eq!(frame.take_frame(), None);
    }

    #[test]
    fn test_to_text() {
        let mut frame = FrameBuffer::new();
        frame.set_pixel(1, 0);
        let text = frame.to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), DISPLAY_HEIGHT);
        assert!(lines[0].starts_with(".#.."));
        assert_eq!(lines[1], ".".repeat(DISPLAY_WIDTH));
    }
}
