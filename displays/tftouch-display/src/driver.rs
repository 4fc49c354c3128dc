//! Display driver instance
//!
//! Owns every line the panel and its touch ADC use. Construction runs the
//! full power-up sequence; the instance then carries the orientation,
//! brightness and touch calibration for as long as it lives.

use embedded_hal::delay::DelayNs;
use tftouch_hal::timer::ClockSource;
use tftouch_hal::{OutputPin, PwmTimer, SerialBus, SpiConfig, TimerConfig};

use crate::color;
use crate::command;
use crate::config::DisplayConfig;
use crate::error::Error;
use crate::orientation::Orientation;
use crate::program::{Instructions, INIT_PROGRAM};
use crate::touch::calibration::Calibration;
use crate::touch::TouchCache;
use crate::transport::Transport;

/// Native panel width (landscape)
pub const PANEL_WIDTH: u16 = 320;
/// Native panel height (landscape)
pub const PANEL_HEIGHT: u16 = 240;

/// Reset held low for at least this long
const RESET_PULSE_MS: u32 = 50;
/// Wait after releasing reset before the first command
const RESET_RECOVERY_MS: u32 = 120;

/// Highest brightness percentage
pub const MAX_BRIGHTNESS: u8 = 100;

/// GPIO lines driven by the display
pub struct ControlPins<PIN> {
    /// Panel reset, active low
    pub reset: PIN,
    /// Panel chip-select, active low
    pub display_cs: PIN,
    /// Touch ADC chip-select, active low
    pub touch_cs: PIN,
    /// Serial data out, driven by hand for the D/CX bit
    pub mosi: PIN,
    /// Serial clock, driven by hand for the D/CX bit
    pub sck: PIN,
}

/// Display and touch driver
pub struct Display<BUS, PIN, TIMER, DELAY> {
    pub(crate) link: Transport<BUS, PIN>,
    pub(crate) touch_cs: PIN,
    reset: PIN,
    timer: TIMER,
    pub(crate) delay: DELAY,
    pub(crate) config: DisplayConfig,
    width: u16,
    height: u16,
    orientation: Orientation,
    brightness: u8,
    inverted: bool,
    pub(crate) calibration: Option<Calibration>,
    pub(crate) touch_cache: TouchCache,
}

impl<BUS, PIN, TIMER, DELAY> Display<BUS, PIN, TIMER, DELAY>
where
    BUS: SerialBus,
    PIN: OutputPin,
    TIMER: PwmTimer,
    DELAY: DelayNs,
{
    /// Bring the panel up
    ///
    /// Sets up the backlight PWM, parks both chip-selects, configures the
    /// bus, runs the reset sequence (which clears the screen) and applies the
    /// initial brightness.
    pub fn init(
        mut bus: BUS,
        pins: ControlPins<PIN>,
        mut timer: TIMER,
        delay: DELAY,
        config: DisplayConfig,
    ) -> Result<Self, Error<BUS::Error>> {
        timer.configure(&TimerConfig::backlight_pwm(ClockSource::Div64))?;

        let ControlPins {
            mut reset,
            mut display_cs,
            mut touch_cs,
            mosi,
            sck,
        } = pins;
        display_cs.set_high();
        touch_cs.set_high();
        reset.set_high();

        bus.configure(SpiConfig::msb_first(config.bus_divisor))
            .map_err(Error::Bus)?;

        let (width, height) = Orientation::default().dimensions();
        let mut display = Self {
            link: Transport::new(bus, display_cs, mosi, sck),
            touch_cs,
            reset,
            timer,
            delay,
            config,
            width,
            height,
            orientation: Orientation::default(),
            brightness: 0,
            inverted: false,
            calibration: None,
            touch_cache: TouchCache::new(),
        };

        display.reset()?;
        display.set_brightness(config.initial_brightness);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Display ready: {}x{}, bus {}",
            display.width,
            display.height,
            config.bus_divisor
        );

        Ok(display)
    }

    /// Pulse the reset line and rerun the init program
    ///
    /// Leaves the panel at 0°, non-inverted, cleared to black.
    pub fn reset(&mut self) -> Result<(), Error<BUS::Error>> {
        self.link.end();
        self.reset.set_low();
        self.delay.delay_ms(RESET_PULSE_MS);
        self.reset.set_high();
        self.delay.delay_ms(RESET_RECOVERY_MS);

        self.link.transaction(|link| {
            link.command(command::DISPLAY_OFF)?;
            for instruction in Instructions::new(INIT_PROGRAM) {
                let instruction = instruction?;
                for &byte in instruction.bytes {
                    link.send(byte, instruction.kind)?;
                }
            }
            link.command(command::DISPLAY_ON)
        })?;

        self.orientation = Orientation::default();
        (self.width, self.height) = self.orientation.dimensions();
        self.inverted = false;
        self.touch_cache.invalidate();

        self.fill_screen(color::BLACK)
    }

    /// Rotate the panel and reset the address window to the full screen
    pub fn set_orientation(&mut self, orientation: Orientation) -> Result<(), Error<BUS::Error>> {
        (self.width, self.height) = orientation.dimensions();

        self.link.transaction(|link| {
            link.command(command::MEMACCESS_CTRL)?;
            link.data(orientation.memory_access())
        })?;

        self.set_area(0, 0, self.width - 1, self.height - 1)?;

        if self.orientation != orientation {
            self.touch_cache.invalidate();
        }
        self.orientation = orientation;

        #[cfg(feature = "defmt")]
        defmt::debug!("Orientation {} ({}x{})", orientation, self.width, self.height);

        Ok(())
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Logical width in the current orientation
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Logical height in the current orientation
    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), Error<BUS::Error>> {
        let opcode = if inverted {
            command::INV_ON
        } else {
            command::INV_OFF
        };
        self.link.transaction(|link| link.command(opcode))?;
        self.inverted = inverted;
        Ok(())
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Set the backlight level in percent
    ///
    /// Values above 100 are treated as 100. The timer was validated during
    /// init, so this cannot fail.
    pub fn set_brightness(&mut self, percent: u8) {
        let percent = percent.min(MAX_BRIGHTNESS);
        self.timer.set_compare_a(brightness_compare(percent));
        self.brightness = percent;
    }

    /// Current backlight level in percent
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Set the controller address window to `[x0, x1] × [y0, y1]`
    pub fn set_area(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), Error<BUS::Error>> {
        self.link.transaction(|link| {
            link.command(command::COLUMN)?;
            link.data16(x0)?;
            link.data16(x1)?;
            link.command(command::PAGE)?;
            link.data16(y0)?;
            link.data16(y1)
        })
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Tear the driver down, handing back its parts
    ///
    /// Both chip-selects are left deasserted.
    pub fn release(self) -> (BUS, ControlPins<PIN>, TIMER, DELAY) {
        let (bus, display_cs, mosi, sck) = self.link.release();
        let pins = ControlPins {
            reset: self.reset,
            display_cs,
            touch_cs: self.touch_cs,
            mosi,
            sck,
        };
        (bus, pins, self.timer, self.delay)
    }
}

/// Compare-A value for a brightness percentage
pub const fn brightness_compare(percent: u8) -> u16 {
    percent as u16 * 255 / 100
}
