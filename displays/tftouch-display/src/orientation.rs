//! Panel orientation
//!
//! Each orientation is encoded as a single byte: the low two bits hold the
//! base orientation (landscape or portrait) and the high six bits hold the
//! MEMACCESS_CTRL value that makes the controller scan in that direction.

use crate::command::madctl;
use crate::driver::{PANEL_HEIGHT, PANEL_WIDTH};

const BASE_MASK: u8 = 0b0000_0011;
const MEMORY_ACCESS_MASK: u8 = 0b1111_1100;

/// Landscape or portrait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BaseOrientation {
    Landscape = 0,
    Portrait = 1,
}

/// Screen rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Deg0 = BaseOrientation::Landscape as u8 | madctl::BGR | madctl::MX | madctl::MY | madctl::MV,
    Deg90 = BaseOrientation::Portrait as u8 | madctl::BGR | madctl::MX,
    Deg180 = BaseOrientation::Landscape as u8 | madctl::BGR | madctl::ML | madctl::MV,
    Deg270 = BaseOrientation::Portrait as u8 | madctl::BGR | madctl::MY,
}

impl Orientation {
    /// All four orientations in clockwise order
    pub const ALL: [Orientation; 4] = [
        Orientation::Deg0,
        Orientation::Deg90,
        Orientation::Deg180,
        Orientation::Deg270,
    ];

    /// The encoded orientation byte
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decode an orientation byte
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.code() == code)
    }

    /// Base orientation taken from the low two bits
    pub const fn base(self) -> BaseOrientation {
        if self.code() & BASE_MASK == BaseOrientation::Portrait as u8 {
            BaseOrientation::Portrait
        } else {
            BaseOrientation::Landscape
        }
    }

    /// MEMACCESS_CTRL byte for this orientation
    pub const fn memory_access(self) -> u8 {
        self.code() & MEMORY_ACCESS_MASK
    }

    /// Logical (width, height) in this orientation
    pub const fn dimensions(self) -> (u16, u16) {
        match self.base() {
            BaseOrientation::Landscape => (PANEL_WIDTH, PANEL_HEIGHT),
            BaseOrientation::Portrait => (PANEL_HEIGHT, PANEL_WIDTH),
        }
    }

    pub const fn is_landscape(self) -> bool {
        matches!(self.base(), BaseOrientation::Landscape)
    }

    /// Rotation in degrees
    pub const fn degrees(self) -> u16 {
        match self {
            Orientation::Deg0 => 0,
            Orientation::Deg90 => 90,
            Orientation::Deg180 => 180,
            Orientation::Deg270 => 270,
        }
    }
}
