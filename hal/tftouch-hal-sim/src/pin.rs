//! Simulated output lines

use tftouch_hal::OutputPin;

use crate::{Line, Sim};

/// One control line of a [`Sim`]
#[derive(Debug, Clone)]
pub struct SimPin {
    sim: Sim,
    line: Line,
}

impl SimPin {
    pub(crate) fn new(sim: Sim, line: Line) -> Self {
        Self { sim, line }
    }

    pub fn line(&self) -> Line {
        self.line
    }
}

impl OutputPin for SimPin {
    fn set_high(&mut self) {
        self.sim.state_mut().set_line(self.line, true);
    }

    fn set_low(&mut self) {
        self.sim.state_mut().set_line(self.line, false);
    }

    fn is_driven_high(&self) -> bool {
        self.sim.line(self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pins_share_state() {
        let sim = Sim::new();
        let mut a = sim.pin(Line::Reset);
        let b = sim.pin(Line::Reset);
        a.set_low();
        assert!(b.is_driven_low());
        a.set_high();
        assert!(b.is_driven_high());
        assert_eq!(sim.with_panel(|p| p.resets()), 1);
    }
}
