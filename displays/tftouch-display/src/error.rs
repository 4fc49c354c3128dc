//! Driver error type

use tftouch_hal::TimerError;

use crate::program::ProgramError;
use crate::touch::calibration::CalibrationError;

/// Errors returned by [`Display`](crate::Display) operations
///
/// `E` is the serial bus error type. Touch samples that fail the pressure or
/// stability checks are not errors; they are reported as `Ok(None)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Serial bus transfer or configuration failed
    Bus(E),
    /// Backlight timer could not be configured
    Timer(TimerError),
    /// Init program is malformed
    Program(ProgramError),
    /// Calibration points do not define a transform
    Calibration(CalibrationError),
}

impl<E> From<TimerError> for Error<E> {
    fn from(e: TimerError) -> Self {
        Error::Timer(e)
    }
}

impl<E> From<ProgramError> for Error<E> {
    fn from(e: ProgramError) -> Self {
        Error::Program(e)
    }
}

impl<E> From<CalibrationError> for Error<E> {
    fn from(e: CalibrationError) -> Self {
        Error::Calibration(e)
    }
}
