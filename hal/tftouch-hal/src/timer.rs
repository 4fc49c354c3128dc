//! Timer/PWM abstractions
//!
//! The backlight is driven by a timer running as a PWM generator whose
//! compare-A register sets the duty cycle of a dedicated output pin. The
//! configuration types here describe the timer in terms of a wave type and
//! a wrap point; [`TimerConfig::waveform_mode`] resolves the pair into the
//! waveform-generation mode number a chip HAL writes to hardware.

/// Errors from timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerError {
    /// The wave type and wrap type combination has no hardware mode
    UnsupportedWaveform,
}

/// Shape of the generated waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaveType {
    /// Count up and wrap
    Normal,
    /// Count up then down, symmetric pulses
    PhaseCorrectPwm,
    /// Count up and wrap, single-slope PWM
    FastPwm,
    /// Phase and frequency correct PWM (16-bit timers only)
    PhaseFrequencyCorrectPwm,
}

/// Where the counter wraps (its TOP value)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WrapType {
    Bits8,
    /// 16-bit timers only
    Bits9,
    /// 16-bit timers only
    Bits10,
    /// 16-bit timers only
    Bits16,
    /// Wrap at the compare-A register
    CompareA,
    /// Wrap at the input-capture register (16-bit timers only)
    InputCapture,
}

/// Timer clock prescaler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ClockSource {
    Off = 0,
    Div1 = 1,
    Div8 = 2,
    Div64 = 3,
    Div256 = 4,
    Div1024 = 5,
    ExternalFalling = 6,
    ExternalRising = 7,
}

/// Action on the compare output pin at a compare match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum CompareOutputMode {
    Off = 0,
    Toggle = 1,
    Clear = 2,
    Set = 3,
}

/// Counter width of the timer being configured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerWidth {
    Bits8,
    Bits16,
}

/// Timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerConfig {
    pub wave: WaveType,
    pub wrap: WrapType,
    pub clock_source: ClockSource,
    pub compare_output_a: CompareOutputMode,
    pub compare_output_b: CompareOutputMode,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            wave: WaveType::Normal,
            wrap: WrapType::Bits8,
            clock_source: ClockSource::Off,
            compare_output_a: CompareOutputMode::Off,
            compare_output_b: CompareOutputMode::Off,
        }
    }
}

impl TimerConfig {
    /// 8-bit phase-correct PWM with the compare-A pin cleared on match
    pub const fn backlight_pwm(clock_source: ClockSource) -> Self {
        Self {
            wave: WaveType::PhaseCorrectPwm,
            wrap: WrapType::Bits8,
            clock_source,
            compare_output_a: CompareOutputMode::Clear,
            compare_output_b: CompareOutputMode::Off,
        }
    }

    /// Resolve the waveform-generation mode number
    pub fn waveform_mode(&self, width: TimerWidth) -> Result<u8, TimerError> {
        use WaveType::*;
        use WrapType::*;

        let mode = match width {
            TimerWidth::Bits8 => match (self.wave, self.wrap) {
                (Normal, Bits8) => 0,
                (PhaseCorrectPwm, Bits8) => 1,
                (Normal, CompareA) => 2,
                (FastPwm, Bits8) => 3,
                (PhaseCorrectPwm, CompareA) => 5,
                (FastPwm, CompareA) => 7,
                _ => return Err(TimerError::UnsupportedWaveform),
            },
            TimerWidth::Bits16 => match (self.wave, self.wrap) {
                (Normal, Bits16) => 0,
                (PhaseCorrectPwm, Bits8) => 1,
                (PhaseCorrectPwm, Bits9) => 2,
                (PhaseCorrectPwm, Bits10) => 3,
                (Normal, CompareA) => 4,
                (FastPwm, Bits8) => 5,
                (FastPwm, Bits9) => 6,
                (FastPwm, Bits10) => 7,
                (PhaseFrequencyCorrectPwm, InputCapture) => 8,
                (PhaseFrequencyCorrectPwm, CompareA) => 9,
                (PhaseCorrectPwm, InputCapture) => 10,
                (PhaseCorrectPwm, CompareA) => 11,
                (Normal, InputCapture) => 12,
                (FastPwm, InputCapture) => 14,
                (FastPwm, CompareA) => 15,
                _ => return Err(TimerError::UnsupportedWaveform),
            },
        };

        Ok(mode)
    }
}

/// PWM-capable timer
///
/// The implementation owns the compare-A output pin and configures it as an
/// output when [`PwmTimer::configure`] succeeds.
pub trait PwmTimer {
    /// Configure the timer; fails when the waveform has no hardware mode
    fn configure(&mut self, config: &TimerConfig) -> Result<(), TimerError>;

    /// Set the compare-A register (duty cycle against the wrap value)
    fn set_compare_a(&mut self, value: u16);

    /// Read back the compare-A register
    fn compare_a(&self) -> u16;
}
