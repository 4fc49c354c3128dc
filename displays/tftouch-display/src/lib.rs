//! Display and touch driver for a 320x240 serial TFT panel
//!
//! This crate provides:
//! - The 9-bit command/data framing the panel controller expects, built on a
//!   byte-oriented serial bus by clocking the D/CX bit out by hand
//! - The reset sequence and the tabular init program run at power-up
//! - Address windows, batched pixel streaming and rectangle fills
//! - Orientation, inversion and PWM backlight control
//! - Sampling of the touch ADC sharing the same bus
//! - Three-point touch calibration and orientation-aware coordinate mapping
//!
//! # Usage
//!
//! ```ignore
//! let mut display = Display::init(bus, pins, timer, delay, DisplayConfig::default())?;
//! display.set_orientation(Orientation::Deg90)?;
//! display.fill_rect(10, 10, 50, 20, rgb(255, 0, 0))?;
//!
//! display.touch_start_calibration()?;
//! if let Some(point) = display.touch_read()? {
//!     display.draw_pixel(point.x, point.y, color::WHITE)?;
//! }
//! ```
//!
//! The driver owns every line it touches. Operations run to completion in
//! program order; callers sharing the driver across contexts must serialise
//! access themselves.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod color;
pub mod command;
pub mod config;
pub mod draw;
pub mod driver;
pub mod error;
pub mod orientation;
pub mod program;
pub mod touch;
pub mod transport;

// Re-export key types
pub use color::{rgb, Color};
pub use config::{CalibrationColors, DisplayConfig};
pub use draw::Batch;
pub use driver::{ControlPins, Display, PANEL_HEIGHT, PANEL_WIDTH};
pub use error::Error;
pub use orientation::{BaseOrientation, Orientation};
pub use touch::calibration::{Calibration, CalibrationError};
pub use touch::{RawTouch, TouchPoint};
