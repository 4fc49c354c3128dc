//! Pixel streaming and fills
//!
//! Every drawing operation sets an address window, then streams RGB-565
//! pixels after a single WRITE command. The controller places them in raster
//! order and wraps at the window edges, so a window of `w × h` takes exactly
//! `w · h` pixels.

use embedded_hal::delay::DelayNs;
use tftouch_hal::{OutputPin, PwmTimer, SerialBus};

use crate::color::Color;
use crate::command;
use crate::driver::Display;
use crate::error::Error;
use crate::transport::Transport;

/// An open pixel stream
///
/// Holds the panel chip-select asserted. The display cannot be used for
/// anything else until the batch is stopped or dropped.
pub struct Batch<'a, BUS, PIN>
where
    BUS: SerialBus,
    PIN: OutputPin,
{
    link: &'a mut Transport<BUS, PIN>,
}

impl<BUS, PIN> Batch<'_, BUS, PIN>
where
    BUS: SerialBus,
    PIN: OutputPin,
{
    /// Send one pixel
    pub fn draw(&mut self, color: Color) -> Result<(), Error<BUS::Error>> {
        self.link.data16(color)
    }

    /// Send the same pixel `count` times
    pub fn draw_repeated(&mut self, color: Color, count: u32) -> Result<(), Error<BUS::Error>> {
        for _ in 0..count {
            self.link.data16(color)?;
        }
        Ok(())
    }

    /// End the stream
    pub fn stop(self) {}
}

impl<BUS, PIN> Drop for Batch<'_, BUS, PIN>
where
    BUS: SerialBus,
    PIN: OutputPin,
{
    fn drop(&mut self) {
        self.link.end();
    }
}

impl<BUS, PIN, TIMER, DELAY> Display<BUS, PIN, TIMER, DELAY>
where
    BUS: SerialBus,
    PIN: OutputPin,
    TIMER: PwmTimer,
    DELAY: DelayNs,
{
    /// Open a pixel stream over `[x, x + w - 1] × [y, y + h - 1]`
    pub fn batch_start(
        &mut self,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
    ) -> Result<Batch<'_, BUS, PIN>, Error<BUS::Error>> {
        let x1 = x.saturating_add(w.saturating_sub(1));
        let y1 = y.saturating_add(h.saturating_sub(1));
        self.set_area(x, y, x1, y1)?;

        self.link.begin();
        if let Err(e) = self.link.command(command::WRITE) {
            self.link.end();
            return Err(e);
        }

        Ok(Batch {
            link: &mut self.link,
        })
    }

    /// Plot one pixel; out-of-range coordinates are ignored
    pub fn draw_pixel(&mut self, x: u16, y: u16, color: Color) -> Result<(), Error<BUS::Error>> {
        if x >= self.width() || y >= self.height() {
            return Ok(());
        }

        let mut batch = self.batch_start(x, y, 1, 1)?;
        batch.draw(color)?;
        batch.stop();
        Ok(())
    }

    /// Fill a rectangle, clamped to the screen
    ///
    /// An origin past the edge is pulled back onto the last row or column;
    /// the extent is cut so the rectangle ends at the edge. Zero-sized
    /// rectangles draw nothing.
    pub fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        color: Color,
    ) -> Result<(), Error<BUS::Error>> {
        if w == 0 || h == 0 {
            return Ok(());
        }

        let (x, w) = clamp_span(x, w, self.width());
        let (y, h) = clamp_span(y, h, self.height());

        let mut batch = self.batch_start(x, y, w, h)?;
        batch.draw_repeated(color, u32::from(w) * u32::from(h))?;
        batch.stop();
        Ok(())
    }

    /// Fill the whole screen
    pub fn fill_screen(&mut self, color: Color) -> Result<(), Error<BUS::Error>> {
        let (w, h) = (self.width(), self.height());
        let mut batch = self.batch_start(0, 0, w, h)?;
        batch.draw_repeated(color, u32::from(w) * u32::from(h))?;
        batch.stop();
        Ok(())
    }
}

/// Clamp one axis of a rectangle to `0..limit`
pub(crate) fn clamp_span(start: u16, len: u16, limit: u16) -> (u16, u16) {
    let start = start.min(limit.saturating_sub(1));
    let len = if u32::from(start) + u32::from(len) >= u32::from(limit) {
        limit - start
    } else {
        len
    };
    (start, len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::vec;

    #[test]
    fn test_clamp_span() {
        assert_eq!(clamp_span(310, 100, 320), (310, 10));
        assert_eq!(clamp_span(230, 100, 240), (230, 10));
        assert_eq!(clamp_span(500, 5, 320), (319, 1));
        assert_eq!(clamp_span(0, 320, 320), (0, 320));
        assert_eq!(clamp_span(10, 20, 320), (10, 20));
        assert_eq!(clamp_span(0, u16::MAX, 240), (0, 240));
    }

    proptest! {
        #[test]
        fn prop_clamped_rect_fits(
            start in any::<u16>(),
            len in 1u16..=u16::MAX,
            limit in prop::sample::select(vec![240u16, 320]),
        ) {
            let (s, l) = clamp_span(start, len, limit);
            prop_assert!(s < limit);
            prop_assert!(l >= 1);
            prop_assert!(u32::from(s) + u32::from(l) <= u32::from(limit));
        }
    }
}
