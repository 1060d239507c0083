//! Crate-wide error type.

use derive_more::{Display, Error};

/// Result alias used throughout this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors produced while configuring or driving the matrix and its indicators.
#[derive(Debug, Display, Error)]
pub enum Error {
    /// The streaming resources (pixel buffer, DMA channel, state machine) were already claimed.
    ///
    /// Raised when the matrix is initialized a second time. There is no retry: the
    /// resources are held for the life of the program.
    #[display("streaming channel unavailable: the LED matrix is already initialized")]
    ChannelUnavailable,

    /// A glyph mask did not have exactly one flag per matrix pixel.
    #[display("glyph mask has {actual} entries but the matrix has {expected} pixels")]
    MaskLength {
        /// Pixel count of the matrix.
        expected: usize,
        /// Length of the rejected mask.
        actual: usize,
    },

    /// A render was requested while the previous frame was still streaming out.
    #[display("previous frame is still streaming to the matrix")]
    TransferInProgress,

    /// A PWM output used for the status LED or buzzer reported a failure.
    #[display("PWM output error: {_0:?}")]
    Pwm(#[error(not(source))] embedded_hal::pwm::ErrorKind),

    /// The ADC failed to sample a joystick axis.
    #[cfg(not(feature = "host"))]
    #[display("ADC read failed: {_0:?}")]
    Adc(#[error(not(source))] embassy_rp::adc::Error),
}

#[cfg(not(feature = "host"))]
impl From<embassy_rp::adc::Error> for Error {
    fn from(err: embassy_rp::adc::Error) -> Self {
        Self::Adc(err)
    }
}

impl Error {
    /// Wrap any `embedded-hal` PWM error.
    pub fn pwm(err: impl embedded_hal::pwm::Error) -> Self {
        Self::Pwm(err.kind())
    }
}
