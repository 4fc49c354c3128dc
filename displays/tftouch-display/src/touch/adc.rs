//! Resistive touch ADC protocol
//!
//! Each conversion is started by a single control byte:
//!
//! ```text
//!  bit  7     6..4     3      2      1..0
//!     START  CHANNEL  MODE  SER/DFR  PD1..0
//! ```
//!
//! The converted value is clocked out on the following bytes, MSB first. An
//! 8-bit conversion fits in one byte. A 12-bit conversion spans two; the
//! driver keeps the top ten bits as `(hi << 2) | (lo >> 6)`.

use tftouch_hal::SerialBus;

/// Start bit, always set in a control byte
pub const START: u8 = 0x80;

/// Input channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Channel {
    Y = 0x10,
    Z1 = 0x30,
    Z2 = 0x40,
    X = 0x50,
}

/// Conversion width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Conversion {
    Bits12 = 0x00,
    Bits8 = 0x08,
}

/// Reference mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Reference {
    Differential = 0x00,
    SingleEnded = 0x04,
}

/// Build a control byte; power-down bits are left at zero
pub const fn control_byte(channel: Channel, conversion: Conversion, reference: Reference) -> u8 {
    START | channel as u8 | conversion as u8 | reference as u8
}

/// Pressure estimate from the two 8-bit Z readings
pub const fn pressure(z1: u8, z2: u8) -> u8 {
    (z1 & 0x7F) + ((255 - z2) & 0x7F)
}

/// Combine two back-to-back position samples
///
/// Returns 0 when the high bytes disagree.
pub const fn position(a1: u8, a2: u8, b2: u8) -> u16 {
    if a1 == a2 {
        ((a2 as u16) << 2) | ((b2 as u16) >> 6)
    } else {
        0
    }
}

/// Sample the pressure channels
///
/// The touch chip-select must already be asserted.
pub fn read_pressure<B: SerialBus>(bus: &mut B) -> Result<u8, B::Error> {
    bus.transfer(control_byte(Channel::Z1, Conversion::Bits8, Reference::Differential))?;
    let z1 = bus.transfer(0)?;
    bus.transfer(control_byte(Channel::Z2, Conversion::Bits8, Reference::Differential))?;
    let z2 = bus.transfer(0)?;
    Ok(pressure(z1, z2))
}

/// Sample one position channel twice, 0 if the samples are unstable
///
/// The touch chip-select must already be asserted.
pub fn read_position<B: SerialBus>(bus: &mut B, channel: Channel) -> Result<u16, B::Error> {
    let command = control_byte(channel, Conversion::Bits12, Reference::Differential);

    bus.transfer(command)?;
    let a1 = bus.transfer(0)?;
    bus.transfer(0)?;

    bus.transfer(command)?;
    let a2 = bus.transfer(0)?;
    let b2 = bus.transfer(0)?;

    Ok(position(a1, a2, b2))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bus replaying a fixed response script and recording what it was sent
    struct ScriptBus {
        responses: &'static [u8],
        sent: [u8; 16],
        count: usize,
    }

    impl ScriptBus {
        fn new(responses: &'static [u8]) -> Self {
            Self {
                responses,
                sent: [0; 16],
                count: 0,
            }
        }
    }

    impl SerialBus for ScriptBus {
        type Error = ();

        fn configure(&mut self, _config: tftouch_hal::SpiConfig) -> Result<(), ()> {
            Ok(())
        }

        fn transfer(&mut self, byte: u8) -> Result<u8, ()> {
            let reply = self.responses.get(self.count).copied().ok_or(())?;
            self.sent[self.count] = byte;
            self.count += 1;
            Ok(reply)
        }

        fn set_engine_enabled(&mut self, _enabled: bool) {}
    }

    #[test]
    fn test_control_bytes() {
        assert_eq!(
            control_byte(Channel::Z1, Conversion::Bits8, Reference::Differential),
            0xB8
        );
        assert_eq!(
            control_byte(Channel::X, Conversion::Bits12, Reference::Differential),
            0xD0
        );
        assert_eq!(
            control_byte(Channel::Y, Conversion::Bits12, Reference::SingleEnded),
            0x94
        );
    }

    #[test]
    fn test_pressure() {
        assert_eq!(pressure(10, 250), 15);
        assert_eq!(pressure(2, 254), 3);
        assert_eq!(pressure(0xFF, 0x00), 0x7F + 0x7F);
    }

    #[test]
    fn test_position_agreement() {
        assert_eq!(position(0x80, 0x80, 0xC0), 0x203);
        assert_eq!(position(0x80, 0x81, 0xC0), 0);
    }

    #[test]
    fn test_read_pressure_sequence() {
        let mut bus = ScriptBus::new(&[0, 10, 0, 250]);
        assert_eq!(read_pressure(&mut bus), Ok(15));
        assert_eq!(&bus.sent[..4], &[0xB8, 0x00, 0xC8, 0x00]);
    }

    #[test]
    fn test_read_position_sequence() {
        let mut bus = ScriptBus::new(&[0, 0x40, 0xFF, 0, 0x40, 0x80]);
        assert_eq!(read_position(&mut bus, Channel::X), Ok(0x102));
        assert_eq!(&bus.sent[..6], &[0xD0, 0, 0, 0xD0, 0, 0]);
    }

    #[test]
    fn test_read_position_propagates_bus_error() {
        let mut bus = ScriptBus::new(&[0, 0x40]);
        assert_eq!(read_position(&mut bus, Channel::Y), Err(()));
    }
}
