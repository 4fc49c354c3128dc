//! Shared setup for driver tests running on the host simulator

#![allow(dead_code)]

use tftouch_display::{ControlPins, Display, DisplayConfig};
use tftouch_hal_sim::{Sim, SimBus, SimDelay, SimPin, SimTimer, Word};

pub type SimDisplay = Display<SimBus, SimPin, SimTimer, SimDelay>;

pub fn control_pins(sim: &Sim) -> ControlPins<SimPin> {
    let [reset, display_cs, touch_cs, mosi, sck] = sim.control_pins();
    ControlPins {
        reset,
        display_cs,
        touch_cs,
        mosi,
        sck,
    }
}

pub fn init_with(sim: &Sim, config: DisplayConfig) -> SimDisplay {
    Display::init(sim.bus(), control_pins(sim), sim.timer(), sim.delay(), config)
        .expect("display init")
}

/// Bring a display up and forget the init traffic
pub fn init(sim: &Sim) -> SimDisplay {
    let display = init_with(sim, DisplayConfig::default());
    sim.take_words();
    sim.reset_pixel_count();
    display
}

pub fn cmd(byte: u8) -> Word {
    Word::Command(byte)
}

pub fn data(bytes: &[u8]) -> impl Iterator<Item = Word> + '_ {
    bytes.iter().map(|&b| Word::Data(b))
}

/// Expected words for a COLUMN/PAGE window
pub fn window_words(x0: u16, y0: u16, x1: u16, y1: u16) -> Vec<Word> {
    let mut words = vec![cmd(0x2A)];
    for v in [x0, x1] {
        words.extend(data(&v.to_be_bytes()));
    }
    words.push(cmd(0x2B));
    for v in [y0, y1] {
        words.extend(data(&v.to_be_bytes()));
    }
    words
}
