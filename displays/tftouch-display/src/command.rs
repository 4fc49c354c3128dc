//! Panel controller command opcodes and memory-access-control bits

pub const NOP: u8 = 0x00;
pub const SLEEP_OUT: u8 = 0x11;
pub const INV_OFF: u8 = 0x20;
pub const INV_ON: u8 = 0x21;
pub const GAMMA: u8 = 0x26;
pub const DISPLAY_OFF: u8 = 0x28;
pub const DISPLAY_ON: u8 = 0x29;
pub const COLUMN: u8 = 0x2A;
pub const PAGE: u8 = 0x2B;
pub const WRITE: u8 = 0x2C;
pub const MEMACCESS_CTRL: u8 = 0x36;
pub const PIXEL_FORMAT: u8 = 0x3A;
pub const RGB_CTRL: u8 = 0xB0;
pub const FRAME_CTRL: u8 = 0xB1;
pub const DISPLAY_CTRL: u8 = 0xB6;
pub const ENTRY_MODE: u8 = 0xB7;
pub const POWER_CTRL1: u8 = 0xC0;
pub const POWER_CTRL2: u8 = 0xC1;
pub const VCOM_CTRL1: u8 = 0xC5;
pub const VCOM_CTRL2: u8 = 0xC7;
pub const POWER_CTRLA: u8 = 0xCB;
pub const POWER_CTRLB: u8 = 0xCF;
pub const POS_GAMMA: u8 = 0xE0;
pub const NEG_GAMMA: u8 = 0xE1;
pub const DRV_TIMING_CTRLA: u8 = 0xE8;
pub const DRV_TIMING_CTRLB: u8 = 0xEA;
pub const POWERON_SEQ_CTRL: u8 = 0xED;
pub const ENABLE_3G: u8 = 0xF2;
pub const PUMP_RATIO_CTRL: u8 = 0xF7;

/// 16 bits per pixel, RGB-565
pub const PIXEL_FORMAT_RGB565: u8 = 0x55;

/// MEMACCESS_CTRL bits
pub mod madctl {
    /// Row address order
    pub const MY: u8 = 0x80;
    /// Column address order
    pub const MX: u8 = 0x40;
    /// Row/column exchange
    pub const MV: u8 = 0x20;
    /// Vertical refresh order
    pub const ML: u8 = 0x10;
    /// BGR colour filter order
    pub const BGR: u8 = 0x08;
    /// Horizontal refresh order
    pub const MH: u8 = 0x04;
}
