//! Driver configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tftouch_hal::ClockDivisor;

use crate::color::{self, Color};

/// Colours used while running the calibration procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationColors {
    /// Target rings
    pub target: Color,
    /// Screen clear colour
    pub background: Color,
    /// Square painted once a target has been touched
    pub acknowledge: Color,
}

impl Default for CalibrationColors {
    fn default() -> Self {
        Self {
            target: color::GREEN,
            background: color::BLACK,
            acknowledge: color::MAGENTA,
        }
    }
}

/// Display driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Bus divisor for panel traffic; restored after every touch sample
    pub bus_divisor: ClockDivisor,
    /// Bus divisor while the touch ADC is selected
    pub touch_divisor: ClockDivisor,
    /// Backlight level applied at the end of init (percent)
    pub initial_brightness: u8,
    /// Samples at or below this pressure count as "no touch"
    pub required_pressure: u8,
    /// Calibration screen colours
    pub calibration_colors: CalibrationColors,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            bus_divisor: ClockDivisor::Div4,
            touch_divisor: ClockDivisor::Div8,
            initial_brightness: 50,
            required_pressure: 5,
            calibration_colors: CalibrationColors::default(),
        }
    }
}

impl DisplayConfig {
    /// Default configuration with a specific panel bus divisor
    pub fn with_bus_divisor(bus_divisor: ClockDivisor) -> Self {
        Self {
            bus_divisor,
            ..Self::default()
        }
    }
}
