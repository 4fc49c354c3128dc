//! Touch ADC model
//!
//! Answers control bytes the way the converter does: the result of a
//! conversion is shifted out on the bytes that follow the control byte. A
//! new control byte discards whatever was still pending.

use heapless::Deque;
use tftouch_hal::ClockDivisor;

const START: u8 = 0x80;
const CHANNEL_MASK: u8 = 0x70;
const MODE_8_BIT: u8 = 0x08;

const CHANNEL_Y: u8 = 0x10;
const CHANNEL_Z1: u8 = 0x30;
const CHANNEL_Z2: u8 = 0x40;
const CHANNEL_X: u8 = 0x50;

const MAX_PRESSES: usize = 16;
const MAX_SCRIPT: usize = 64;

/// Contact state of the panel for one sample
///
/// `x` and `y` are 10-bit positions; `z1` and `z2` are the 8-bit pressure
/// readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Press {
    pub x: u16,
    pub y: u16,
    pub z1: u8,
    pub z2: u8,
}

impl Press {
    /// No contact: pressure reads as zero
    pub const RELEASED: Press = Press {
        x: 0,
        y: 0,
        z1: 0,
        z2: 255,
    };

    /// A firm press at a raw position
    pub const fn at(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            z1: 60,
            z2: 180,
        }
    }

    /// A press with explicit pressure readings
    pub const fn with_pressure(x: u16, y: u16, z1: u8, z2: u8) -> Self {
        Self { x, y, z1, z2 }
    }
}

#[derive(Debug)]
pub struct TouchAdc {
    output: Deque<u8, 2>,
    presses: Deque<Press, MAX_PRESSES>,
    script: Deque<u8, MAX_SCRIPT>,
    divisors: Vec<ClockDivisor>,
    samples: usize,
}

impl Default for TouchAdc {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchAdc {
    pub fn new() -> Self {
        Self {
            output: Deque::new(),
            presses: Deque::new(),
            script: Deque::new(),
            divisors: Vec::new(),
            samples: 0,
        }
    }

    fn current(&self) -> Press {
        self.presses.front().copied().unwrap_or(Press::RELEASED)
    }

    /// Queue a press; the oldest press is dropped when the queue is full
    pub(crate) fn push_press(&mut self, press: Press) {
        if self.presses.is_full() {
            self.presses.pop_front();
        }
        // Cannot fail: a slot was freed above
        let _ = self.presses.push_back(press);
    }

    pub(crate) fn release(&mut self) {
        self.presses.clear();
    }

    /// Queue raw reply bytes; bytes past the script capacity are dropped
    pub(crate) fn script(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            if self.script.push_back(byte).is_err() {
                break;
            }
        }
    }

    /// Chip-select released: move on to the next queued press
    pub(crate) fn end_sample(&mut self) {
        self.samples += 1;
        self.output.clear();
        if self.presses.len() > 1 {
            self.presses.pop_front();
        }
    }

    pub(crate) fn transfer(&mut self, byte: u8, divisor: ClockDivisor) -> u8 {
        self.divisors.push(divisor);

        let reply = match self.script.pop_front() {
            Some(scripted) => scripted,
            None => self.output.pop_front().unwrap_or(0),
        };

        if byte & START != 0 {
            self.convert(byte);
        }
        reply
    }

    fn convert(&mut self, control: u8) {
        let press = self.current();
        let eight_bit = control & MODE_8_BIT != 0;

        let value: u16 = match control & CHANNEL_MASK {
            CHANNEL_X => press.x,
            CHANNEL_Y => press.y,
            CHANNEL_Z1 => u16::from(press.z1) << 2,
            CHANNEL_Z2 => u16::from(press.z2) << 2,
            _ => 0,
        };

        let bytes = if eight_bit {
            [(value >> 2) as u8, 0]
        } else {
            [(value >> 2) as u8, ((value & 0x03) << 6) as u8]
        };

        self.output.clear();
        for byte in bytes {
            // Capacity is exactly two after the clear
            let _ = self.output.push_back(byte);
        }
    }

    pub fn divisors(&self) -> &[ClockDivisor] {
        &self.divisors
    }

    pub fn samples(&self) -> usize {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIV: ClockDivisor = ClockDivisor::Div8;

    #[test]
    fn test_eight_bit_pressure() {
        let mut adc = TouchAdc::new();
        adc.push_press(Press::with_pressure(0, 0, 10, 250));

        adc.transfer(0xB8, DIV);
        assert_eq!(adc.transfer(0, DIV), 10);
        adc.transfer(0xC8, DIV);
        assert_eq!(adc.transfer(0, DIV), 250);
    }

    #[test]
    fn test_twelve_bit_position() {
        let mut adc = TouchAdc::new();
        adc.push_press(Press::at(0x203, 0x155));

        adc.transfer(0xD0, DIV);
        let hi = adc.transfer(0, DIV);
        let lo = adc.transfer(0, DIV);
        assert_eq!((u16::from(hi) << 2) | (u16::from(lo) >> 6), 0x203);
        assert_eq!(adc.divisors().len(), 3);
    }

    #[test]
    fn test_released_reads_no_pressure() {
        let mut adc = TouchAdc::new();
        adc.transfer(0xB8, DIV);
        let z1 = adc.transfer(0, DIV);
        adc.transfer(0xC8, DIV);
        let z2 = adc.transfer(0, DIV);
        assert_eq!((z1 & 0x7F) + ((255 - z2) & 0x7F), 0);
    }

    #[test]
    fn test_press_queue_holds_last() {
        let mut adc = TouchAdc::new();
        adc.push_press(Press::at(1, 1));
        adc.push_press(Press::at(2, 2));
        adc.end_sample();
        assert_eq!(adc.current(), Press::at(2, 2));
        adc.end_sample();
        assert_eq!(adc.current(), Press::at(2, 2));
        assert_eq!(adc.samples(), 2);
    }

    #[test]
    fn test_script_overrides_model() {
        let mut adc = TouchAdc::new();
        adc.push_press(Press::at(100, 100));
        adc.script(&[7, 8]);
        assert_eq!(adc.transfer(0xD0, DIV), 7);
        assert_eq!(adc.transfer(0, DIV), 8);
        assert_eq!(adc.transfer(0, DIV), (100u16 >> 2) as u8);
    }
}
