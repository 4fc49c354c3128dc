//! tftouch Hardware Abstraction Layer
//!
//! This crate defines the contracts the display/touch driver consumes from
//! the microcontroller: a byte-oriented serial bus, a PWM-capable timer and
//! plain output lines. Chip-specific crates implement these traits so the
//! same driver runs on real hardware and on the host simulator.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  tftouch-display (panel + touch driver) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tftouch-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  chip HAL     │       │ tftouch-hal-  │
//! │  (target)     │       │    sim        │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output lines (chip-selects, reset, clock)
//! - [`spi::SerialBus`] - Full-duplex byte transfers with a detachable engine
//! - [`timer::PwmTimer`] - Phase-correct PWM generation for the backlight

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod spi;
pub mod timer;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use spi::{BitOrder, ClockDivisor, SerialBus, SpiConfig};
pub use timer::{PwmTimer, TimerConfig, TimerError};
