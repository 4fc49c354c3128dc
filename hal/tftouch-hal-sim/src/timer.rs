//! Simulated backlight timer and delay

use tftouch_hal::timer::TimerWidth;
use tftouch_hal::{PwmTimer, TimerConfig, TimerError};

use crate::Sim;

/// 16-bit PWM timer attached to a [`Sim`]
#[derive(Debug, Clone)]
pub struct SimTimer {
    sim: Sim,
}

impl SimTimer {
    pub(crate) fn new(sim: Sim) -> Self {
        Self { sim }
    }
}

impl PwmTimer for SimTimer {
    fn configure(&mut self, config: &TimerConfig) -> Result<(), TimerError> {
        config.waveform_mode(TimerWidth::Bits16)?;
        self.sim.state_mut().timer_config = Some(*config);
        Ok(())
    }

    fn set_compare_a(&mut self, value: u16) {
        let mut state = self.sim.state_mut();
        state.compare_a = value;
        state.compare_writes.push(value);
    }

    fn compare_a(&self) -> u16 {
        self.sim.compare_a()
    }
}

/// Delay that only advances the simulated clock
#[derive(Debug, Clone)]
pub struct SimDelay {
    sim: Sim,
}

impl SimDelay {
    pub(crate) fn new(sim: Sim) -> Self {
        Self { sim }
    }
}

impl embedded_hal::delay::DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.sim.state_mut().elapsed_ns += u64::from(ns);
    }
}

impl embedded_hal_async::delay::DelayNs for SimDelay {
    async fn delay_ns(&mut self, ns: u32) {
        let mut state = self.sim.state_mut();
        state.elapsed_ns += u64::from(ns);
        state.async_waits += 1;
    }
}
