//! Panel init program
//!
//! The program is a flat byte stream of instructions. Each instruction byte
//! holds a 2-bit kind in its high bits and a 6-bit count in its low bits:
//!
//! ```text
//! 0b10nn_nnnn  send the next n bytes as data
//! 0b01nn_nnnn  send the next n bytes as commands
//! 0xFF         end of program
//! ```
//!
//! The values below are panel tuning data and are sent exactly as listed.

use crate::command::*;
use crate::transport::WordKind;

/// Program terminator
pub const END: u8 = 0xFF;

const KIND_MASK: u8 = 0b1100_0000;
const COUNT_MASK: u8 = 0b0011_1111;
const KIND_DATA: u8 = 0b1000_0000;
const KIND_COMMAND: u8 = 0b0100_0000;

const fn cmd(n: u8) -> u8 {
    KIND_COMMAND | n
}

const fn data(n: u8) -> u8 {
    KIND_DATA | n
}

const MEMACCESS_DEFAULT: u8 = madctl::BGR | madctl::MX | madctl::MY | madctl::MV;
const LAST_COLUMN: u16 = crate::driver::PANEL_WIDTH - 1;
const LAST_PAGE: u16 = crate::driver::PANEL_HEIGHT - 1;

/// Power, timing, gamma and addressing setup run after the reset pulse
#[rustfmt::skip]
pub const INIT_PROGRAM: &[u8] = &[
    cmd(1), POWER_CTRLB,
    data(3), 0x00, 0x83, 0x30,
    cmd(1), POWERON_SEQ_CTRL,
    data(4), 0x64, 0x03, 0x12, 0x81,
    cmd(1), DRV_TIMING_CTRLA,
    data(3), 0x85, 0x01, 0x79,
    cmd(1), POWER_CTRLA,
    data(5), 0x39, 0x2C, 0x00, 0x34, 0x02,
    cmd(1), PUMP_RATIO_CTRL,
    data(1), 0x20,
    cmd(1), DRV_TIMING_CTRLB,
    data(2), 0x00, 0x00,
    cmd(1), POWER_CTRL1,
    data(1), 0x26,
    cmd(1), POWER_CTRL2,
    data(1), 0x11,
    cmd(1), VCOM_CTRL1,
    data(2), 0x35, 0x3E,
    cmd(1), VCOM_CTRL2,
    data(1), 0xBE,
    cmd(1), FRAME_CTRL,
    data(2), 0x00, 0x1B,
    cmd(1), ENABLE_3G,
    data(1), 0x08,
    cmd(1), GAMMA,
    data(1), 0x01, // G2.2
    cmd(1), POS_GAMMA,
    data(15), 0x1F, 0x1A, 0x18, 0x0A, 0x0F, 0x06, 0x45, 0x87, 0x32, 0x0A, 0x07, 0x02, 0x07, 0x05, 0x00,
    cmd(1), NEG_GAMMA,
    data(15), 0x00, 0x25, 0x27, 0x05, 0x10, 0x09, 0x3A, 0x78, 0x4D, 0x05, 0x18, 0x0D, 0x38, 0x3A, 0x1F,
    cmd(1), DISPLAY_CTRL,
    data(4), 0x0A, 0x82, 0x27, 0x00,
    cmd(1), ENTRY_MODE,
    data(1), 0x07,
    cmd(1), PIXEL_FORMAT,
    data(1), PIXEL_FORMAT_RGB565,
    cmd(1), MEMACCESS_CTRL,
    // 0xE8: the 0° mask set, not the OR of bit indices (0x07)
    data(1), MEMACCESS_DEFAULT,
    cmd(1), COLUMN,
    data(2), 0x00, 0x00,
    data(2), (LAST_COLUMN >> 8) as u8, LAST_COLUMN as u8,
    cmd(1), PAGE,
    data(2), 0x00, 0x00,
    data(2), (LAST_PAGE >> 8) as u8, LAST_PAGE as u8,
    cmd(1), SLEEP_OUT,
    END,
];

/// Errors found while decoding a program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProgramError {
    /// Instruction byte with kind `00` or `11` (other than the terminator)
    InvalidInstruction { offset: usize, byte: u8 },
    /// An instruction announces more bytes than the program holds
    Truncated { offset: usize },
    /// The program ends without the terminator
    MissingTerminator,
}

/// One decoded instruction: a run of bytes sent with the same D/CX bit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction<'a> {
    pub kind: WordKind,
    pub bytes: &'a [u8],
}

/// Iterator over the instructions of a program
///
/// Stops after the terminator, or after yielding the first error.
#[derive(Debug, Clone)]
pub struct Instructions<'a> {
    program: &'a [u8],
    offset: usize,
    done: bool,
}

impl<'a> Instructions<'a> {
    pub fn new(program: &'a [u8]) -> Self {
        Self {
            program,
            offset: 0,
            done: false,
        }
    }

    fn fail(&mut self, error: ProgramError) -> Option<Result<Instruction<'a>, ProgramError>> {
        self.done = true;
        Some(Err(error))
    }
}

impl<'a> Iterator for Instructions<'a> {
    type Item = Result<Instruction<'a>, ProgramError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let offset = self.offset;
        let Some(&byte) = self.program.get(offset) else {
            return self.fail(ProgramError::MissingTerminator);
        };

        if byte == END {
            self.done = true;
            return None;
        }

        let kind = match byte & KIND_MASK {
            KIND_DATA => WordKind::Data,
            KIND_COMMAND => WordKind::Command,
            _ => return self.fail(ProgramError::InvalidInstruction { offset, byte }),
        };

        let start = offset + 1;
        let end = start + (byte & COUNT_MASK) as usize;
        let Some(bytes) = self.program.get(start..end) else {
            return self.fail(ProgramError::Truncated { offset });
        };

        self.offset = end;
        Some(Ok(Instruction { kind, bytes }))
    }
}

/// Check a program decodes cleanly, returning the number of words it sends
pub fn validate(program: &[u8]) -> Result<usize, ProgramError> {
    let mut words = 0;
    for instruction in Instructions::new(program) {
        words += instruction?.bytes.len();
    }
    Ok(words)
}
