//! A device abstraction for a two-axis analog joystick.
//!
//! Each axis is a potentiometer on an ADC-capable pin. Samples are raw 12-bit readings
//! (`0..=4095`); no filtering, debouncing or calibration is applied.

use embassy_rp::Peri;
use embassy_rp::adc::{Adc, AdcPin, Async, Channel, Config};
use embassy_rp::gpio::Pull;
use embassy_rp::peripherals::ADC;

use crate::Result;
use crate::irqs::AdcIrqs;
use crate::sequencer::{Axis, JoystickSample};

/// A two-axis joystick read through the ADC.
///
/// # Example
///
/// ```rust,no_run
/// # #![no_std]
/// # #![no_main]
/// # use panic_probe as _;
/// use joystick_arrows::{Result, joystick::Joystick};
///
/// async fn example(p: embassy_rp::Peripherals) -> Result<()> {
///     let mut joystick = Joystick::new(p.ADC, p.PIN_26, p.PIN_27);
///     let sample = joystick.read().await?;
///     defmt::info!("x={} y={}", sample.x, sample.y);
///     Ok(())
/// }
/// ```
pub struct Joystick<'d> {
    adc: Adc<'d, Async>,
    x: Channel<'d>,
    y: Channel<'d>,
}

impl<'d> Joystick<'d> {
    /// Create a joystick from the ADC and the two axis pins (GPIO26 and GPIO27 on the
    /// reference board).
    pub fn new(
        adc: Peri<'d, ADC>,
        x_pin: Peri<'d, impl AdcPin>,
        y_pin: Peri<'d, impl AdcPin>,
    ) -> Self {
        Self {
            adc: Adc::new(adc, AdcIrqs, Config::default()),
            x: Channel::new_pin(x_pin, Pull::None),
            y: Channel::new_pin(y_pin, Pull::None),
        }
    }

    /// Sample one axis.
    ///
    /// # Errors
    ///
    /// [`Error::Adc`](crate::Error::Adc) if the conversion fails.
    pub async fn read_axis(&mut self, axis: Axis) -> Result<u16> {
        let channel = match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        };
        Ok(self.adc.read(channel).await?)
    }

    /// Sample both axes, x first.
    ///
    /// # Errors
    ///
    /// [`Error::Adc`](crate::Error::Adc) if either conversion fails.
    pub async fn read(&mut self) -> Result<JoystickSample> {
        let x = self.read_axis(Axis::X).await?;
        let y = self.read_axis(Axis::Y).await?;
        Ok(JoystickSample { x, y })
    }
}
