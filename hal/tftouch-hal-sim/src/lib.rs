//! Host simulation of the tftouch HAL
//!
//! Implements the HAL traits on the host so the display driver can run in
//! ordinary tests. Every bus and pin handed out by one [`Sim`] shares the
//! same wire state, which is decoded as it changes:
//!
//! - Manual clock edges with the serial engine detached latch the D/CX bit
//!   of the next panel word
//! - Panel words drive a model of the controller's address window and
//!   framebuffer
//! - Bytes sent with the touch chip-select asserted are answered by a model
//!   of the touch ADC
//!
//! Anything that breaks the framing or chip-select rules is recorded as a
//! [`Violation`] instead of panicking, so tests can assert there were none.

mod adc;
mod bus;
mod panel;
mod pin;
mod timer;

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use tftouch_hal::{ClockDivisor, SpiConfig, TimerConfig};

pub use adc::{Press, TouchAdc};
pub use bus::{SimBus, SimError};
pub use panel::{Panel, FRAME_SIZE};
pub use pin::SimPin;
pub use timer::{SimDelay, SimTimer};

/// A GPIO line of the simulated board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Reset,
    DisplayCs,
    TouchCs,
    Mosi,
    Sck,
}

impl Line {
    const COUNT: usize = 5;

    const fn index(self) -> usize {
        match self {
            Line::Reset => 0,
            Line::DisplayCs => 1,
            Line::TouchCs => 2,
            Line::Mosi => 3,
            Line::Sck => 4,
        }
    }
}

/// One decoded 9-bit panel word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Word {
    Command(u8),
    Data(u8),
}

/// Broken framing or chip-select discipline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// Panel byte transferred without a preceding D/CX edge
    PayloadWithoutPreBit { byte: u8 },
    /// D/CX edge clocked while the panel chip-select was released
    PreBitWithoutSelect,
    /// Second D/CX edge before the payload of the first was sent
    RepeatedPreBit,
    /// Byte transfer requested while the engine was detached
    TransferWhileDetached { byte: u8 },
    /// Panel and touch chip-selects asserted together
    BothSelected,
    /// Byte transferred with neither chip-select asserted
    TransferWithoutSelect { byte: u8 },
}

/// Shared wire and device state
#[derive(Debug)]
pub(crate) struct State {
    lines: [bool; Line::COUNT],
    engine_enabled: bool,
    pending_dcx: Option<bool>,
    spi_config: SpiConfig,
    spi_configs: Vec<SpiConfig>,
    words: Vec<Word>,
    violations: Vec<Violation>,
    display_selects: usize,
    transfers_until_fault: Option<usize>,
    panel: Panel,
    adc: TouchAdc,
    timer_config: Option<TimerConfig>,
    compare_a: u16,
    compare_writes: Vec<u16>,
    elapsed_ns: u64,
    async_waits: usize,
}

impl State {
    fn new() -> Self {
        Self {
            lines: [true; Line::COUNT],
            engine_enabled: true,
            pending_dcx: None,
            spi_config: SpiConfig::default(),
            spi_configs: Vec::new(),
            words: Vec::new(),
            violations: Vec::new(),
            display_selects: 0,
            transfers_until_fault: None,
            panel: Panel::new(),
            adc: TouchAdc::new(),
            timer_config: None,
            compare_a: 0,
            compare_writes: Vec::new(),
            elapsed_ns: 0,
            async_waits: 0,
        }
    }

    fn line(&self, line: Line) -> bool {
        self.lines[line.index()]
    }

    fn display_selected(&self) -> bool {
        !self.line(Line::DisplayCs)
    }

    fn touch_selected(&self) -> bool {
        !self.line(Line::TouchCs)
    }

    /// Drive a line and react to the edge it makes
    fn set_line(&mut self, line: Line, level: bool) {
        let previous = self.lines[line.index()];
        self.lines[line.index()] = level;
        if previous == level {
            return;
        }

        match line {
            Line::Sck if level && !self.engine_enabled => self.latch_dcx(),
            Line::DisplayCs if !level => {
                self.display_selects += 1;
                if self.touch_selected() {
                    self.violations.push(Violation::BothSelected);
                }
            }
            Line::DisplayCs => self.pending_dcx = None,
            Line::TouchCs if !level => {
                if self.display_selected() {
                    self.violations.push(Violation::BothSelected);
                }
            }
            Line::TouchCs => self.adc.end_sample(),
            Line::Reset if level => self.panel.reset(),
            _ => {}
        }
    }

    fn latch_dcx(&mut self) {
        if !self.display_selected() {
            self.violations.push(Violation::PreBitWithoutSelect);
            return;
        }
        if self.pending_dcx.is_some() {
            self.violations.push(Violation::RepeatedPreBit);
        }
        self.pending_dcx = Some(self.line(Line::Mosi));
    }

    fn transfer(&mut self, byte: u8) -> Result<u8, SimError> {
        if let Some(remaining) = self.transfers_until_fault.as_mut() {
            if *remaining == 0 {
                return Err(SimError::Fault);
            }
            *remaining -= 1;
        }

        if !self.engine_enabled {
            self.violations.push(Violation::TransferWhileDetached { byte });
        }

        if self.touch_selected() {
            return Ok(self.adc.transfer(byte, self.spi_config.divisor));
        }

        if !self.display_selected() {
            self.violations.push(Violation::TransferWithoutSelect { byte });
            return Ok(0);
        }

        match self.pending_dcx.take() {
            Some(dcx) => {
                let word = if dcx {
                    Word::Data(byte)
                } else {
                    Word::Command(byte)
                };
                self.words.push(word);
                self.panel.accept(word);
            }
            None => self
                .violations
                .push(Violation::PayloadWithoutPreBit { byte }),
        }
        Ok(0)
    }
}

/// Handle on a simulated board
///
/// Cloning the handle shares the same board.
#[derive(Debug, Clone)]
pub struct Sim {
    state: Rc<RefCell<State>>,
}

impl Default for Sim {
    fn default() -> Self {
        Self::new()
    }
}

impl Sim {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(State::new())),
        }
    }

    pub(crate) fn state(&self) -> Ref<'_, State> {
        self.state.borrow()
    }

    pub(crate) fn state_mut(&self) -> RefMut<'_, State> {
        self.state.borrow_mut()
    }

    pub fn bus(&self) -> SimBus {
        SimBus::new(self.clone())
    }

    pub fn pin(&self, line: Line) -> SimPin {
        SimPin::new(self.clone(), line)
    }

    /// The five control lines in driver order: reset, panel chip-select,
    /// touch chip-select, data out, clock
    pub fn control_pins(&self) -> [SimPin; 5] {
        [
            self.pin(Line::Reset),
            self.pin(Line::DisplayCs),
            self.pin(Line::TouchCs),
            self.pin(Line::Mosi),
            self.pin(Line::Sck),
        ]
    }

    pub fn timer(&self) -> SimTimer {
        SimTimer::new(self.clone())
    }

    pub fn delay(&self) -> SimDelay {
        SimDelay::new(self.clone())
    }

    // Wire inspection

    /// Current level of a line
    pub fn line(&self, line: Line) -> bool {
        self.state().line(line)
    }

    pub fn engine_enabled(&self) -> bool {
        self.state().engine_enabled
    }

    /// Bus configuration in force
    pub fn spi_config(&self) -> SpiConfig {
        self.state().spi_config
    }

    /// Every configuration applied to the bus, oldest first
    pub fn spi_configs(&self) -> Vec<SpiConfig> {
        self.state().spi_configs.clone()
    }

    /// Panel words decoded so far
    pub fn words(&self) -> Vec<Word> {
        self.state().words.clone()
    }

    /// Drain the decoded panel words
    pub fn take_words(&self) -> Vec<Word> {
        std::mem::take(&mut self.state_mut().words)
    }

    pub fn violations(&self) -> Vec<Violation> {
        self.state().violations.clone()
    }

    /// Number of times the panel chip-select was asserted
    pub fn display_selects(&self) -> usize {
        self.state().display_selects
    }

    /// Fail every byte transfer after the next `count`
    pub fn fail_transfers_after(&self, count: usize) {
        self.state_mut().transfers_until_fault = Some(count);
    }

    pub fn clear_fault(&self) {
        self.state_mut().transfers_until_fault = None;
    }

    // Panel inspection

    /// Run `f` against the panel model
    pub fn with_panel<T>(&self, f: impl FnOnce(&Panel) -> T) -> T {
        f(&self.state().panel)
    }

    pub fn pixel(&self, x: u16, y: u16) -> Option<u16> {
        self.state().panel.pixel(x, y)
    }

    pub fn pixels_written(&self) -> u64 {
        self.state().panel.pixels_written()
    }

    pub fn reset_pixel_count(&self) {
        self.state_mut().panel.reset_pixel_count();
    }

    // Touch ADC

    /// Queue a press; each completed sample moves on to the next one, the
    /// last press is held
    pub fn push_press(&self, press: Press) {
        self.state_mut().adc.push_press(press);
    }

    /// Release the panel and drop all queued presses
    pub fn release_touch(&self) {
        self.state_mut().adc.release();
    }

    /// Answer the next ADC transfers from `bytes` instead of the model
    pub fn script_adc(&self, bytes: &[u8]) {
        self.state_mut().adc.script(bytes);
    }

    /// Divisor in force for every ADC transfer, oldest first
    pub fn adc_divisors(&self) -> Vec<ClockDivisor> {
        self.state().adc.divisors().to_vec()
    }

    /// Number of completed touch samples
    pub fn touch_samples(&self) -> usize {
        self.state().adc.samples()
    }

    // Timer and delay

    pub fn timer_config(&self) -> Option<TimerConfig> {
        self.state().timer_config
    }

    pub fn compare_a(&self) -> u16 {
        self.state().compare_a
    }

    pub fn compare_writes(&self) -> Vec<u16> {
        self.state().compare_writes.clone()
    }

    /// Total time spent in blocking and async delays
    pub fn elapsed_ns(&self) -> u64 {
        self.state().elapsed_ns
    }

    /// Number of async delays awaited
    pub fn async_waits(&self) -> usize {
        self.state().async_waits
    }
}
