//! Panel controller model
//!
//! Tracks the address window, the write cursor and a few mode bits. Pixels
//! land in a square framebuffer large enough for either scan direction, so
//! both landscape and portrait windows address it directly.

use crate::Word;

/// Side of the framebuffer in pixels
pub const FRAME_SIZE: u16 = 320;

const COLUMN: u8 = 0x2A;
const PAGE: u8 = 0x2B;
const WRITE: u8 = 0x2C;
const MEMACCESS_CTRL: u8 = 0x36;
const SLEEP_OUT: u8 = 0x11;
const INV_OFF: u8 = 0x20;
const INV_ON: u8 = 0x21;
const DISPLAY_OFF: u8 = 0x28;
const DISPLAY_ON: u8 = 0x29;

#[derive(Debug, Clone)]
pub struct Panel {
    column: (u16, u16),
    page: (u16, u16),
    cursor: (u16, u16),
    command: Option<u8>,
    args: Vec<u8>,
    pixel_high: Option<u8>,
    memory_access: u8,
    inverted: bool,
    display_on: bool,
    awake: bool,
    framebuffer: Vec<u16>,
    pixels_written: u64,
    clipped_pixels: u64,
    resets: usize,
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel {
    pub fn new() -> Self {
        let size = usize::from(FRAME_SIZE) * usize::from(FRAME_SIZE);
        Self {
            column: (0, FRAME_SIZE - 1),
            page: (0, FRAME_SIZE - 1),
            cursor: (0, 0),
            command: None,
            args: Vec::new(),
            pixel_high: None,
            memory_access: 0,
            inverted: false,
            display_on: false,
            awake: false,
            framebuffer: vec![0; size],
            pixels_written: 0,
            clipped_pixels: 0,
            resets: 0,
        }
    }

    /// Hardware reset: registers return to power-on values, memory is kept
    pub(crate) fn reset(&mut self) {
        let framebuffer = std::mem::take(&mut self.framebuffer);
        let resets = self.resets + 1;
        *self = Self {
            framebuffer,
            resets,
            ..Self::new()
        };
    }

    pub(crate) fn accept(&mut self, word: Word) {
        match word {
            Word::Command(command) => self.command(command),
            Word::Data(data) => self.data(data),
        }
    }

    fn command(&mut self, command: u8) {
        self.command = Some(command);
        self.args.clear();
        self.pixel_high = None;

        match command {
            WRITE => self.cursor = (self.column.0, self.page.0),
            SLEEP_OUT => self.awake = true,
            INV_ON => self.inverted = true,
            INV_OFF => self.inverted = false,
            DISPLAY_ON => self.display_on = true,
            DISPLAY_OFF => self.display_on = false,
            _ => {}
        }
    }

    fn data(&mut self, data: u8) {
        match self.command {
            Some(WRITE) => match self.pixel_high.take() {
                Some(high) => self.write_pixel(u16::from_be_bytes([high, data])),
                None => self.pixel_high = Some(data),
            },
            Some(COLUMN) => {
                if let Some(range) = self.window_arg(data) {
                    self.column = range;
                }
            }
            Some(PAGE) => {
                if let Some(range) = self.window_arg(data) {
                    self.page = range;
                }
            }
            Some(MEMACCESS_CTRL) => self.memory_access = data,
            _ => self.args.push(data),
        }
    }

    /// Collect a four-byte start/end pair
    fn window_arg(&mut self, data: u8) -> Option<(u16, u16)> {
        self.args.push(data);
        if self.args.len() < 4 {
            return None;
        }
        let start = u16::from_be_bytes([self.args[0], self.args[1]]);
        let end = u16::from_be_bytes([self.args[2], self.args[3]]);
        self.args.clear();
        Some((start, end))
    }

    fn write_pixel(&mut self, color: u16) {
        let (x, y) = self.cursor;
        if x < FRAME_SIZE && y < FRAME_SIZE {
            self.framebuffer[usize::from(y) * usize::from(FRAME_SIZE) + usize::from(x)] = color;
        } else {
            self.clipped_pixels += 1;
        }
        self.pixels_written += 1;

        self.cursor = if x >= self.column.1 {
            if y >= self.page.1 {
                (self.column.0, self.page.0)
            } else {
                (self.column.0, y + 1)
            }
        } else {
            (x + 1, y)
        };
    }

    pub fn pixel(&self, x: u16, y: u16) -> Option<u16> {
        if x < FRAME_SIZE && y < FRAME_SIZE {
            Some(self.framebuffer[usize::from(y) * usize::from(FRAME_SIZE) + usize::from(x)])
        } else {
            None
        }
    }

    /// Column window `(start, end)`, inclusive
    pub fn column(&self) -> (u16, u16) {
        self.column
    }

    /// Page window `(start, end)`, inclusive
    pub fn page(&self) -> (u16, u16) {
        self.page
    }

    /// Next pixel position
    pub fn cursor(&self) -> (u16, u16) {
        self.cursor
    }

    pub fn memory_access(&self) -> u8 {
        self.memory_access
    }

    pub fn inverted(&self) -> bool {
        self.inverted
    }

    pub fn display_on(&self) -> bool {
        self.display_on
    }

    pub fn awake(&self) -> bool {
        self.awake
    }

    pub fn pixels_written(&self) -> u64 {
        self.pixels_written
    }

    /// Pixels written outside the framebuffer
    pub fn clipped_pixels(&self) -> u64 {
        self.clipped_pixels
    }

    pub(crate) fn reset_pixel_count(&mut self) {
        self.pixels_written = 0;
        self.clipped_pixels = 0;
    }

    /// Number of hardware resets seen
    pub fn resets(&self) -> usize {
        self.resets
    }

    /// Count pixels of `color` inside `[x0, x1] × [y0, y1]`
    pub fn count_color(&self, x0: u16, y0: u16, x1: u16, y1: u16, color: u16) -> usize {
        (y0..=y1.min(FRAME_SIZE - 1))
            .flat_map(|y| (x0..=x1.min(FRAME_SIZE - 1)).map(move |x| (x, y)))
            .filter(|&(x, y)| self.pixel(x, y) == Some(color))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn send(panel: &mut Panel, words: &[Word]) {
        for &word in words {
            panel.accept(word);
        }
    }

    fn window(panel: &mut Panel, x0: u16, y0: u16, x1: u16, y1: u16) {
        let [x0h, x0l] = x0.to_be_bytes();
        let [x1h, x1l] = x1.to_be_bytes();
        let [y0h, y0l] = y0.to_be_bytes();
        let [y1h, y1l] = y1.to_be_bytes();
        send(
            panel,
            &[
                Word::Command(COLUMN),
                Word::Data(x0h),
                Word::Data(x0l),
                Word::Data(x1h),
                Word::Data(x1l),
                Word::Command(PAGE),
                Word::Data(y0h),
                Word::Data(y0l),
                Word::Data(y1h),
                Word::Data(y1l),
            ],
        );
    }

    #[test]
    fn test_window_and_wrap() {
        let mut panel = Panel::new();
        window(&mut panel, 10, 20, 11, 21);
        assert_eq!(panel.column(), (10, 11));
        assert_eq!(panel.page(), (20, 21));

        panel.accept(Word::Command(WRITE));
        for color in [1u16, 2, 3, 4, 5] {
            let [h, l] = color.to_be_bytes();
            send(&mut panel, &[Word::Data(h), Word::Data(l)]);
        }

        assert_eq!(panel.pixel(10, 20), Some(5));
        assert_eq!(panel.pixel(11, 20), Some(2));
        assert_eq!(panel.pixel(10, 21), Some(3));
        assert_eq!(panel.pixel(11, 21), Some(4));
        assert_eq!(panel.pixels_written(), 5);
        assert_eq!(panel.cursor(), (11, 20));
    }

    #[test]
    fn test_mode_commands() {
        let mut panel = Panel::new();
        send(
            &mut panel,
            &[
                Word::Command(SLEEP_OUT),
                Word::Command(DISPLAY_ON),
                Word::Command(INV_ON),
                Word::Command(MEMACCESS_CTRL),
                Word::Data(0x48),
            ],
        );
        assert!(panel.awake());
        assert!(panel.display_on());
        assert!(panel.inverted());
        assert_eq!(panel.memory_access(), 0x48);

        panel.reset();
        assert!(!panel.awake());
        assert_eq!(panel.resets(), 1);
    }
}
