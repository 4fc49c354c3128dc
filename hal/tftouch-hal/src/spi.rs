//! SPI bus abstractions
//!
//! Provides the master-mode serial bus contract shared by the display
//! controller and the touch ADC. Transfers are one byte at a time and always
//! full duplex: the byte shifted in during a write is returned.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// SPI bus master
pub trait SerialBus {
    /// Error type for SPI operations
    type Error;

    /// Apply a clock divisor and bit order
    ///
    /// May be called at any time between transfers; the display driver uses
    /// it to slow the bus down around touch sampling.
    fn configure(&mut self, config: SpiConfig) -> Result<(), Self::Error>;

    /// Exchange one byte, returning the byte received during the transfer
    fn transfer(&mut self, byte: u8) -> Result<u8, Self::Error>;

    /// Attach or detach the serial engine from its clock and data pins
    ///
    /// While detached, the pins follow their GPIO output latches, so a
    /// clock edge driven by hand is not shifted into the engine.
    fn set_engine_enabled(&mut self, enabled: bool);

    /// Transfer data in place
    ///
    /// Each byte is replaced with the byte received while it was sent.
    fn transfer_in_place(&mut self, data: &mut [u8]) -> Result<(), Self::Error> {
        for byte in data.iter_mut() {
            *byte = self.transfer(*byte)?;
        }
        Ok(())
    }
}

/// SPI clock divisor
///
/// The discriminant is the 3-bit rate code: bit 2 selects double speed,
/// bits 1..0 select the base rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum ClockDivisor {
    Div2 = 0b100,
    Div4 = 0b000,
    Div8 = 0b101,
    Div16 = 0b001,
    Div32 = 0b110,
    Div64 = 0b010,
    /// Second encoding of /64 (double speed over /128)
    Div64Alt = 0b111,
    Div128 = 0b011,
}

impl ClockDivisor {
    /// Get the 3-bit rate code
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decode a 3-bit rate code
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0b100 => Some(Self::Div2),
            0b000 => Some(Self::Div4),
            0b101 => Some(Self::Div8),
            0b001 => Some(Self::Div16),
            0b110 => Some(Self::Div32),
            0b010 => Some(Self::Div64),
            0b111 => Some(Self::Div64Alt),
            0b011 => Some(Self::Div128),
            _ => None,
        }
    }

    /// Whether the double-speed bit is set
    pub const fn double_speed(self) -> bool {
        self.code() & 0b100 != 0
    }

    /// Base rate select bits
    pub const fn rate_bits(self) -> u8 {
        self.code() & 0b011
    }

    /// The system clock divisor this code produces
    pub const fn divisor(self) -> u8 {
        let base: u8 = match self.rate_bits() {
            0b00 => 4,
            0b01 => 16,
            0b10 => 64,
            _ => 128,
        };
        if self.double_speed() {
            base / 2
        } else {
            base
        }
    }
}

/// Bit order on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BitOrder {
    MsbFirst,
    LsbFirst,
}

/// SPI configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpiConfig {
    /// Clock divisor code
    pub divisor: ClockDivisor,
    /// Bit order
    pub bit_order: BitOrder,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            divisor: ClockDivisor::Div64,
            bit_order: BitOrder::MsbFirst,
        }
    }
}

impl SpiConfig {
    /// MSB-first configuration with the given divisor
    pub const fn msb_first(divisor: ClockDivisor) -> Self {
        Self {
            divisor,
            bit_order: BitOrder::MsbFirst,
        }
    }
}
