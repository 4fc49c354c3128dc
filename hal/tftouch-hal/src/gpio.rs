//! Output lines
//!
//! The driver owns five lines besides the serial engine: the two active-low
//! chip-selects, the panel reset, and the MOSI/SCK pair it clocks by hand
//! to shift the D/CX bit in front of every panel word.

/// A push-pull output line
///
/// The line must already be configured as an output when handed to the
/// driver. Reading back returns the latched level, not the pad.
pub trait OutputPin {
    /// Drive the line to logic 1
    fn set_high(&mut self);

    /// Drive the line to logic 0
    fn set_low(&mut self);

    /// Drive the line to `high`
    ///
    /// Used for the D/CX level, which follows the word kind.
    fn write(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Latched level of the line
    fn is_driven_high(&self) -> bool;

    /// Whether an active-low line is asserted
    fn is_driven_low(&self) -> bool {
        !self.is_driven_high()
    }
}
