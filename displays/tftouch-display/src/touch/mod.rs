//! Touch sampling, calibration and coordinate mapping
//!
//! The touch ADC sits on the display's serial bus behind its own
//! chip-select. A raw read samples pressure and both axes; a calibrated read
//! runs the raw values through the affine transform, clamps them into the
//! panel and rotates them into the current orientation.

pub mod adc;
pub mod calibration;
pub mod remap;

use embedded_hal::delay::DelayNs;
use tftouch_hal::{OutputPin, PwmTimer, SerialBus, SpiConfig};

use crate::color::Color;
use crate::driver::Display;
use crate::error::Error;
use crate::orientation::Orientation;
use crate::touch::adc::Channel;
use crate::touch::calibration::{targets, Calibration, CalibrationError, Point};

/// Delay between touch polls while waiting for a calibration press
pub const CALIBRATION_POLL_MS: u32 = 10;

/// Outer and inner ring sizes of a calibration target
const TARGET_RINGS: [u16; 2] = [20, 8];
/// Side of the square painted once a target is touched
const ACK_SIZE: u16 = 6;

/// Uncalibrated touch sample in ADC units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawTouch {
    pub pressure: u8,
    pub x: u16,
    pub y: u16,
}

/// Calibrated touch position in the current orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
    pub pressure: u8,
}

/// Last transformed coordinates, recomputed only when their raw input moves
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TouchCache {
    last_tx: Option<u16>,
    last_ty: Option<u16>,
    sx: u16,
    sy: u16,
}

impl TouchCache {
    pub(crate) const fn new() -> Self {
        Self {
            last_tx: None,
            last_ty: None,
            sx: 0,
            sy: 0,
        }
    }

    pub(crate) fn invalidate(&mut self) {
        *self = Self::new();
    }

    /// Landscape coordinates for a raw sample, clamped to `limit_x × limit_y`
    fn update(&mut self, cal: &Calibration, raw: &RawTouch, limit_x: u16, limit_y: u16) -> (u16, u16) {
        if self.last_tx != Some(raw.x) {
            self.last_tx = Some(raw.x);
            self.sx = remap::clamp_axis(cal.apply_x(raw.x, raw.y), limit_x);
        }
        if self.last_ty != Some(raw.y) {
            self.last_ty = Some(raw.y);
            self.sy = remap::clamp_axis(cal.apply_y(raw.x, raw.y), limit_y);
        }
        (self.sx, self.sy)
    }
}

/// Pressure, X then Y, bailing out at the first failed check
fn sample<B: SerialBus>(bus: &mut B, required_pressure: u8) -> Result<Option<RawTouch>, B::Error> {
    let pressure = adc::read_pressure(bus)?;
    if pressure <= required_pressure {
        return Ok(None);
    }

    let x = adc::read_position(bus, Channel::X)?;
    if x == 0 {
        return Ok(None);
    }

    let y = adc::read_position(bus, Channel::Y)?;
    if y == 0 {
        return Ok(None);
    }

    Ok(Some(RawTouch { pressure, x, y }))
}

impl<BUS, PIN, TIMER, DELAY> Display<BUS, PIN, TIMER, DELAY>
where
    BUS: SerialBus,
    PIN: OutputPin,
    TIMER: PwmTimer,
    DELAY: DelayNs,
{
    /// Sample the touch ADC without calibration
    ///
    /// Returns `Ok(None)` when the panel is not pressed hard enough or the
    /// position samples are unstable. The bus runs at the touch divisor for
    /// the duration of the sample and is restored afterwards, also on error.
    pub fn touch_read_raw(&mut self) -> Result<Option<RawTouch>, Error<BUS::Error>> {
        let touch_divisor = self.config.touch_divisor;
        let bus_divisor = self.config.bus_divisor;
        let required_pressure = self.config.required_pressure;

        let bus = self.link.bus_mut();
        bus.configure(SpiConfig::msb_first(touch_divisor))
            .map_err(Error::Bus)?;

        self.touch_cs.set_low();
        let result = sample(self.link.bus_mut(), required_pressure);
        self.touch_cs.set_high();

        let restored = self
            .link
            .bus_mut()
            .configure(SpiConfig::msb_first(bus_divisor));

        let touch = result.map_err(Error::Bus)?;
        restored.map_err(Error::Bus)?;
        Ok(touch)
    }

    /// Sample the touch panel and map it onto the screen
    ///
    /// Returns `Ok(None)` when there is no valid touch, and also before any
    /// calibration has been applied.
    pub fn touch_read(&mut self) -> Result<Option<TouchPoint>, Error<BUS::Error>> {
        let Some(cal) = self.calibration else {
            #[cfg(feature = "defmt")]
            defmt::warn!("Touch read before calibration");
            return Ok(None);
        };

        let Some(raw) = self.touch_read_raw()? else {
            return Ok(None);
        };

        let (width, height) = (self.width(), self.height());
        let (limit_x, limit_y) = if self.orientation().is_landscape() {
            (width, height)
        } else {
            (height, width)
        };

        let (sx, sy) = self.touch_cache.update(&cal, &raw, limit_x, limit_y);
        let (x, y) = remap::remap(self.orientation(), sx, sy, width, height);

        Ok(Some(TouchPoint {
            x,
            y,
            pressure: raw.pressure,
        }))
    }

    /// Current touch calibration, if any
    pub fn calibration(&self) -> Option<Calibration> {
        self.calibration
    }

    /// Install a previously computed calibration
    pub fn set_calibration(&mut self, calibration: Calibration) -> Result<(), Error<BUS::Error>> {
        if !calibration.is_valid() {
            return Err(CalibrationError::Degenerate.into());
        }
        self.calibration = Some(calibration);
        self.touch_cache.invalidate();
        Ok(())
    }

    /// Run the interactive three-point calibration
    ///
    /// Draws each target at 0°, busy-polls until it is pressed, then solves
    /// the transform. The previous calibration is kept when the presses are
    /// degenerate. The orientation is restored before returning.
    pub fn touch_start_calibration(&mut self) -> Result<Calibration, Error<BUS::Error>> {
        let saved = self.orientation();
        let result = self.collect_calibration();
        self.calibration_restore(saved, result)
    }

    fn collect_calibration(&mut self) -> Result<Calibration, Error<BUS::Error>> {
        let screen = self.calibration_begin()?;
        let mut touch = [Point::default(); 3];
        for (target, raw) in screen.iter().zip(touch.iter_mut()) {
            self.draw_target(*target)?;
            *raw = loop {
                if let Some(t) = self.touch_read_raw()? {
                    break Point::new(t.x, t.y);
                }
            };
            self.acknowledge_target(*target)?;
        }
        self.calibration_finish(&screen, &touch)
    }

    fn calibration_begin(&mut self) -> Result<[Point; 3], Error<BUS::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Touch calibration started");

        self.set_orientation(Orientation::Deg0)?;
        self.fill_screen(self.config.calibration_colors.background)?;
        Ok(targets(self.width(), self.height()))
    }

    /// Two concentric rings around `target`
    fn draw_target(&mut self, target: Point) -> Result<(), Error<BUS::Error>> {
        let colors = self.config.calibration_colors;
        for size in TARGET_RINGS {
            self.target_square(target, size, colors.target)?;
            self.target_square(target, size - 2, colors.background)?;
        }
        Ok(())
    }

    fn target_square(&mut self, center: Point, size: u16, color: Color) -> Result<(), Error<BUS::Error>> {
        let offset = size / 2 + 1;
        self.fill_rect(
            center.x.saturating_sub(offset),
            center.y.saturating_sub(offset),
            size,
            size,
            color,
        )
    }

    /// Mark a target as taken, then clear the screen for the next one
    fn acknowledge_target(&mut self, target: Point) -> Result<(), Error<BUS::Error>> {
        let colors = self.config.calibration_colors;
        let offset = ACK_SIZE / 2 + 1;
        self.fill_rect(
            target.x.saturating_sub(offset),
            target.y.saturating_sub(offset),
            ACK_SIZE,
            ACK_SIZE,
            colors.acknowledge,
        )?;
        self.fill_screen(colors.background)
    }

    fn calibration_finish(
        &mut self,
        screen: &[Point; 3],
        touch: &[Point; 3],
    ) -> Result<Calibration, Error<BUS::Error>> {
        match Calibration::from_points(screen, touch) {
            Ok(calibration) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("Touch calibrated: {}", calibration);

                self.calibration = Some(calibration);
                self.touch_cache.invalidate();
                Ok(calibration)
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Calibration points are degenerate, keeping previous transform");

                Err(e.into())
            }
        }
    }

    fn calibration_restore(
        &mut self,
        saved: Orientation,
        result: Result<Calibration, Error<BUS::Error>>,
    ) -> Result<Calibration, Error<BUS::Error>> {
        let restored = self.set_orientation(saved);
        let calibration = result?;
        restored?;
        Ok(calibration)
    }
}

impl<BUS, PIN, TIMER, DELAY> Display<BUS, PIN, TIMER, DELAY>
where
    BUS: SerialBus,
    PIN: OutputPin,
    TIMER: PwmTimer,
    DELAY: DelayNs + embedded_hal_async::delay::DelayNs,
{
    /// Three-point calibration that waits between touch polls
    ///
    /// Same procedure as [`touch_start_calibration`](Self::touch_start_calibration),
    /// but yields for [`CALIBRATION_POLL_MS`] between samples instead of
    /// spinning on the bus.
    pub async fn touch_start_calibration_async(&mut self) -> Result<Calibration, Error<BUS::Error>> {
        let saved = self.orientation();
        let result = self.collect_calibration_async().await;
        self.calibration_restore(saved, result)
    }

    async fn collect_calibration_async(&mut self) -> Result<Calibration, Error<BUS::Error>> {
        let screen = self.calibration_begin()?;
        let mut touch = [Point::default(); 3];
        for (target, raw) in screen.iter().zip(touch.iter_mut()) {
            self.draw_target(*target)?;
            *raw = loop {
                if let Some(t) = self.touch_read_raw()? {
                    break Point::new(t.x, t.y);
                }
                embedded_hal_async::delay::DelayNs::delay_ms(&mut self.delay, CALIBRATION_POLL_MS)
                    .await;
            };
            self.acknowledge_target(*target)?;
        }
        self.calibration_finish(&screen, &touch)
    }
}
