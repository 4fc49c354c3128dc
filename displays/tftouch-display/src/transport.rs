//! 9-bit command/data framing over a byte-oriented serial bus
//!
//! The panel controller reads 9-bit words: a leading D/CX bit (1 = data,
//! 0 = command) followed by an 8-bit payload. The serial engine only shifts
//! whole bytes, so the D/CX bit is clocked out by hand first:
//!
//! ```text
//!  MOSI  ──< D/CX >──────< b7 b6 ... b0 >──
//!  SCK   ‾‾\__/‾‾‾‾‾‾‾‾‾‾\_/‾\_/ ... \_/‾‾
//!            │              └ engine transfer
//!            └ manual edge, engine detached
//! ```
//!
//! The engine is detached for the manual edge so it does not count the bit.
//! That window runs inside a critical section with compiler fences on both
//! sides, so no interrupt handler or reordered access lands between the
//! detach and the re-attach.

use core::sync::atomic::{compiler_fence, Ordering};

use tftouch_hal::{OutputPin, SerialBus};

use crate::error::Error;

/// The D/CX bit of a 9-bit word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WordKind {
    Command,
    Data,
}

impl WordKind {
    /// Level of the D/CX bit on the wire
    pub const fn dcx(self) -> bool {
        matches!(self, WordKind::Data)
    }
}

/// Framed link to the panel controller
///
/// Owns the serial bus, the panel chip-select and the clock/data lines used
/// for the manual D/CX edge. The chip-select is active low.
pub struct Transport<BUS, PIN> {
    bus: BUS,
    cs: PIN,
    mosi: PIN,
    sck: PIN,
}

impl<BUS, PIN> Transport<BUS, PIN>
where
    BUS: SerialBus,
    PIN: OutputPin,
{
    pub fn new(bus: BUS, cs: PIN, mosi: PIN, sck: PIN) -> Self {
        Self { bus, cs, mosi, sck }
    }

    /// Assert the panel chip-select
    pub fn begin(&mut self) {
        self.cs.set_low();
    }

    /// Release the panel chip-select
    pub fn end(&mut self) {
        self.cs.set_high();
    }

    /// Whether the panel chip-select is asserted
    pub fn is_selected(&self) -> bool {
        self.cs.is_driven_low()
    }

    /// Run `f` with the chip-select asserted, releasing it afterwards even
    /// when `f` fails
    pub fn transaction<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, Error<BUS::Error>>,
    ) -> Result<T, Error<BUS::Error>> {
        self.begin();
        let result = f(self);
        self.end();
        result
    }

    /// Clock the D/CX bit out with the engine detached
    fn send_dcx(&mut self, kind: WordKind) {
        let Self { bus, mosi, sck, .. } = self;

        critical_section::with(|_| {
            mosi.write(kind.dcx());
            sck.set_low();
            compiler_fence(Ordering::SeqCst);
            bus.set_engine_enabled(false);
            compiler_fence(Ordering::SeqCst);
            sck.set_high();
            compiler_fence(Ordering::SeqCst);
            bus.set_engine_enabled(true);
            compiler_fence(Ordering::SeqCst);
        });
    }

    /// Send one framed word
    pub fn send(&mut self, byte: u8, kind: WordKind) -> Result<(), Error<BUS::Error>> {
        self.send_dcx(kind);
        self.bus.transfer(byte).map_err(Error::Bus)?;
        Ok(())
    }

    pub fn command(&mut self, command: u8) -> Result<(), Error<BUS::Error>> {
        self.send(command, WordKind::Command)
    }

    pub fn data(&mut self, data: u8) -> Result<(), Error<BUS::Error>> {
        self.send(data, WordKind::Data)
    }

    /// Send a 16-bit value as two data words, high byte first
    pub fn data16(&mut self, data: u16) -> Result<(), Error<BUS::Error>> {
        let [high, low] = data.to_be_bytes();
        self.data(high)?;
        self.data(low)
    }

    /// Direct access to the bus for devices sharing it
    pub fn bus_mut(&mut self) -> &mut BUS {
        &mut self.bus
    }

    /// Give back the bus and the chip-select, data and clock lines
    pub fn release(self) -> (BUS, PIN, PIN, PIN) {
        (self.bus, self.cs, self.mosi, self.sck)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec;
    use tftouch_hal_sim::{Line, Sim, SimBus, SimError, SimPin, Word};

    fn link(sim: &Sim) -> Transport<SimBus, SimPin> {
        Transport::new(
            sim.bus(),
            sim.pin(Line::DisplayCs),
            sim.pin(Line::Mosi),
            sim.pin(Line::Sck),
        )
    }

    #[test]
    fn test_word_kinds() {
        assert!(WordKind::Data.dcx());
        assert!(!WordKind::Command.dcx());
    }

    #[test]
    fn test_framed_words() {
        let sim = Sim::new();
        let mut link = link(&sim);

        link.transaction(|link| {
            link.command(0x2A)?;
            link.data(0x12)?;
            link.data16(0x0140)
        })
        .unwrap();

        assert_eq!(
            sim.words(),
            vec![
                Word::Command(0x2A),
                Word::Data(0x12),
                Word::Data(0x01),
                Word::Data(0x40),
            ]
        );
        assert!(sim.violations().is_empty());
        assert!(sim.engine_enabled());
        assert!(!link.is_selected());
    }

    #[test]
    fn test_transaction_ends_on_error() {
        let sim = Sim::new();
        let mut link = link(&sim);
        sim.fail_transfers_after(1);

        let result = link.transaction(|link| {
            link.command(0x2C)?;
            link.data(0xFF)
        });

        assert_eq!(result, Err(Error::Bus(SimError::Fault)));
        assert!(sim.line(Line::DisplayCs));
        assert_eq!(sim.words(), vec![Word::Command(0x2C)]);
    }
}
