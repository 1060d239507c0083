//! User feedback outputs: an RGB status LED and a piezo buzzer, both on PWM.
//!
//! Both are generic over [`SetDutyCycle`], so any `embedded-hal` PWM output works.
//! Duty cycles are set as fractions of each output's range, which lets two outputs share
//! one PWM slice even when their slice's `top` was chosen for the other device. On the
//! reference board the buzzer (GPIO10) and the blue LED (GPIO11) share slice 5.
//!
//! See [`StatusLed`] and [`Buzzer`] for examples.

use embedded_hal::pwm::SetDutyCycle;

use crate::{Error, Result};

/// PWM `top` for the status LED's slices (one tick per brightness step).
pub const STATUS_LED_TOP: u16 = 255;

/// PWM `top` for the buzzer's slice; about 10 kHz at a 125 MHz system clock.
pub const BUZZER_TOP: u16 = 12_500;

/// Full-scale brightness accepted by [`StatusLed::set_brightness`].
const BRIGHTNESS_MAX: u16 = 255;

// ============================================================================
// StatusLed
// ============================================================================

/// A common-cathode RGB LED on three PWM outputs.
///
/// # Example
///
/// ```rust
/// # use core::convert::Infallible;
/// # use embedded_hal::pwm::{ErrorType, SetDutyCycle};
/// # #[derive(Default)]
/// # struct Output(u16);
/// # impl ErrorType for Output { type Error = Infallible; }
/// # impl SetDutyCycle for Output {
/// #     fn max_duty_cycle(&self) -> u16 { 255 }
/// #     fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> { self.0 = duty; Ok(()) }
/// # }
/// use joystick_arrows::indicator::StatusLed;
///
/// let mut led = StatusLed::new(Output::default(), Output::default(), Output::default());
/// led.set_brightness(15, 0, 0)?;
/// assert_eq!(led.brightness(), (15, 0, 0));
/// led.off()?;
/// # Ok::<(), joystick_arrows::Error>(())
/// ```
pub struct StatusLed<R, G, B> {
    red: R,
    green: G,
    blue: B,
    brightness: (u8, u8, u8),
}

impl<R: SetDutyCycle, G: SetDutyCycle, B: SetDutyCycle> StatusLed<R, G, B> {
    /// Wrap three PWM outputs. The LED is not touched until the first call.
    pub const fn new(red: R, green: G, blue: B) -> Self {
        Self {
            red,
            green,
            blue,
            brightness: (0, 0, 0),
        }
    }

    /// Set each channel's brightness, `0` (off) to `255` (full duty).
    ///
    /// # Errors
    ///
    /// [`Error::Pwm`] if an output rejects its duty cycle.
    pub fn set_brightness(&mut self, r: u8, g: u8, b: u8) -> Result<()> {
        set_level(&mut self.red, r)?;
        set_level(&mut self.green, g)?;
        set_level(&mut self.blue, b)?;
        self.brightness = (r, g, b);
        Ok(())
    }

    /// Turn all three channels off.
    ///
    /// # Errors
    ///
    /// [`Error::Pwm`] if an output rejects its duty cycle.
    pub fn off(&mut self) -> Result<()> {
        self.set_brightness(0, 0, 0)
    }

    /// Last brightness set, as `(r, g, b)`.
    #[must_use]
    pub const fn brightness(&self) -> (u8, u8, u8) {
        self.brightness
    }
}

fn set_level(output: &mut impl SetDutyCycle, level: u8) -> Result<()> {
    output
        .set_duty_cycle_fraction(u16::from(level), BRIGHTNESS_MAX)
        .map_err(Error::pwm)
}

// ============================================================================
// Buzzer
// ============================================================================

/// A passive piezo buzzer driven at a fixed tone.
///
/// The tone's pitch is set by the PWM slice's `top` and divider ([`BUZZER_TOP`]);
/// this type only switches it on (50 % duty) and off.
pub struct Buzzer<P> {
    output: P,
    active: bool,
}

impl<P: SetDutyCycle> Buzzer<P> {
    /// Wrap a PWM output. The buzzer is not touched until the first call.
    pub const fn new(output: P) -> Self {
        Self {
            output,
            active: false,
        }
    }

    /// Start or stop the tone.
    ///
    /// # Errors
    ///
    /// [`Error::Pwm`] if the output rejects its duty cycle.
    pub fn set_tone(&mut self, active: bool) -> Result<()> {
        let applied = if active {
            self.output.set_duty_cycle_percent(50)
        } else {
            self.output.set_duty_cycle_fully_off()
        };
        applied.map_err(Error::pwm)?;
        self.active = active;
        Ok(())
    }

    /// Whether the tone is on.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

// ============================================================================
// Pico PWM setup
// ============================================================================

/// Build the PWM configuration for one slice with the given `top`.
///
/// The divider is left at 1, so the PWM frequency is `clk_sys / (top + 1)`.
#[cfg(not(feature = "host"))]
#[must_use]
pub fn pwm_config(top: u16) -> embassy_rp::pwm::Config {
    let mut cfg = embassy_rp::pwm::Config::default();
    cfg.top = top;
    cfg.phase_correct = false;
    cfg.compare_a = 0;
    cfg.compare_b = 0;
    cfg.enable = true;
    defmt::info!(
        "pwm top={} -> {}Hz",
        top,
        embassy_rp::clocks::clk_sys_freq() / (u32::from(top) + 1)
    );
    cfg
}

/// Split a two-channel PWM slice into its A and B outputs.
///
/// # Errors
///
/// [`Error::Pwm`] if the slice was created without both outputs.
#[cfg(not(feature = "host"))]
pub fn split_outputs(
    pwm: embassy_rp::pwm::Pwm<'_>,
) -> Result<(embassy_rp::pwm::PwmOutput<'_>, embassy_rp::pwm::PwmOutput<'_>)> {
    match pwm.split() {
        (Some(output_a), Some(output_b)) => Ok((output_a, output_b)),
        _ => Err(Error::Pwm(embedded_hal::pwm::ErrorKind::Other)),
    }
}
