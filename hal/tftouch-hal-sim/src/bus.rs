//! Simulated serial bus

use tftouch_hal::{SerialBus, SpiConfig};

use crate::Sim;

/// Error returned once fault injection is armed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    Fault,
}

/// Serial bus attached to a [`Sim`]
#[derive(Debug, Clone)]
pub struct SimBus {
    sim: Sim,
}

impl SimBus {
    pub(crate) fn new(sim: Sim) -> Self {
        Self { sim }
    }
}

impl SerialBus for SimBus {
    type Error = SimError;

    fn configure(&mut self, config: SpiConfig) -> Result<(), SimError> {
        let mut state = self.sim.state_mut();
        state.spi_config = config;
        state.spi_configs.push(config);
        Ok(())
    }

    fn transfer(&mut self, byte: u8) -> Result<u8, SimError> {
        self.sim.state_mut().transfer(byte)
    }

    fn set_engine_enabled(&mut self, enabled: bool) {
        self.sim.state_mut().engine_enabled = enabled;
    }
}
