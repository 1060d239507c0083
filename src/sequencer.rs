//! Polls the joystick, picks an arrow, and drives the matrix, status LED and buzzer.
//!
//! Each iteration classifies one [`JoystickSample`] into a [`JoystickState`]. A deflected
//! stick renders that state's arrow, lights the status LED in its color, and beeps; a
//! centered stick turns the status LED off and leaves the matrix showing its last arrow.
//!
//! The loop period ([`SEQUENCER_PERIOD_DEFAULT`]) is what keeps renders from overlapping a
//! frame that is still streaming. That is checked at compile time against
//! [`drain_time`](crate::transfer::drain_time).

use embassy_time::Duration;
use embedded_hal::pwm::SetDutyCycle;

use crate::frame_encoder::{ColorWord, FrameEncoder, MATRIX_LEN, ON_COLOR_DEFAULT};
use crate::glyph::Arrow;
use crate::indicator::{Buzzer, StatusLed};
use crate::transfer::{StreamingChannel, TransferEngine, drain_time};
use crate::{Error, Result};

/// Time from the start of one iteration's sleep to the next sample.
pub const SEQUENCER_PERIOD_DEFAULT: Duration = Duration::from_millis(100);

/// How long the buzzer sounds after each render.
pub const BEEP_DEFAULT: Duration = Duration::from_millis(100);

/// Deflection thresholds for 12-bit samples centered near 2048.
pub const THRESHOLDS_DEFAULT: Thresholds = Thresholds {
    low: 1000,
    high: 3000,
};

const _: () = assert!(
    SEQUENCER_PERIOD_DEFAULT.as_micros() > drain_time(MATRIX_LEN).as_micros(),
    "sequencer period must exceed one full matrix drain"
);

/// A joystick axis.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, defmt::Format)]
pub enum Axis {
    /// Horizontal axis (ADC input 0 on the reference board).
    X,
    /// Vertical axis (ADC input 1 on the reference board).
    Y,
}

/// One raw reading of both axes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, defmt::Format)]
pub struct JoystickSample {
    /// Horizontal reading.
    pub x: u16,
    /// Vertical reading.
    pub y: u16,
}

/// Where the stick is pushed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, defmt::Format)]
pub enum JoystickState {
    /// `y` above the high threshold.
    Up,
    /// `y` below the low threshold.
    Down,
    /// `x` above the high threshold.
    Right,
    /// `x` below the low threshold.
    Left,
    /// Neither axis past a threshold.
    Neutral,
}

/// What the user sees and hears for a deflected stick.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub struct Feedback {
    /// Glyph drawn on the matrix.
    pub arrow: Arrow,
    /// Status LED brightness as `(r, g, b)`.
    pub status: (u8, u8, u8),
}

impl JoystickState {
    /// Feedback for this state, or `None` when centered.
    ///
    /// The arrow for each direction follows how the matrix is mounted on the reference
    /// board, so it is not always the arrow of the same name.
    #[must_use]
    pub const fn feedback(self) -> Option<Feedback> {
        let (arrow, status) = match self {
            Self::Up => (Arrow::Right, (15, 0, 0)),
            Self::Down => (Arrow::Up, (0, 15, 0)),
            Self::Right => (Arrow::Left, (0, 0, 15)),
            Self::Left => (Arrow::Down, (15, 15, 0)),
            Self::Neutral => return None,
        };
        Some(Feedback { arrow, status })
    }
}

/// Low and high cut-offs applied to both axes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub struct Thresholds {
    /// Readings strictly below this count as deflected low.
    pub low: u16,
    /// Readings strictly above this count as deflected high.
    pub high: u16,
}

impl Thresholds {
    /// Classify a sample. The y axis wins when both axes are deflected.
    #[must_use]
    pub const fn classify(&self, sample: JoystickSample) -> JoystickState {
        if sample.y > self.high {
            JoystickState::Up
        } else if sample.y < self.low {
            JoystickState::Down
        } else if sample.x > self.high {
            JoystickState::Right
        } else if sample.x < self.low {
            JoystickState::Left
        } else {
            JoystickState::Neutral
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        THRESHOLDS_DEFAULT
    }
}

/// Timing and thresholds for the sequencer loop.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SequencerConfig {
    /// Axis cut-offs.
    pub thresholds: Thresholds,
    /// Sleep at the end of each iteration.
    pub period: Duration,
    /// Buzzer on-time after a render.
    pub beep: Duration,
    /// Color of lit arrow pixels.
    pub on_color: ColorWord,
}

impl SequencerConfig {
    /// The reference board's settings.
    pub const DEFAULT: Self = Self {
        thresholds: THRESHOLDS_DEFAULT,
        period: SEQUENCER_PERIOD_DEFAULT,
        beep: BEEP_DEFAULT,
        on_color: ON_COLOR_DEFAULT,
    };

    /// Whether `period` leaves a `pixels`-long frame time to finish streaming.
    #[must_use]
    pub const fn outpaces_drain(&self, pixels: usize) -> bool {
        self.period.as_micros() > drain_time(pixels).as_micros()
    }
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Outcome of one [`Sequencer::apply`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub enum Step {
    /// The arrow was rendered and the buzzer switched on.
    Rendered(Arrow),
    /// The previous frame was still streaming, so this arrow was dropped.
    Skipped(Arrow),
    /// Stick centered; status LED off, matrix unchanged.
    Neutral,
}

/// The joystick-to-arrow control loop.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sequencer {
    config: SequencerConfig,
}

impl Sequencer {
    /// Create a sequencer with `config`.
    #[must_use]
    pub const fn new(config: SequencerConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// Point `engine` at this configuration's arrow color. Takes effect on the next render.
    pub fn prepare<C: StreamingChannel>(&self, engine: &mut TransferEngine<'_, C, MATRIX_LEN>) {
        engine.set_encoder(FrameEncoder::new(self.config.on_color, ColorWord::OFF));
    }

    /// Do one iteration's non-waiting work for `sample`.
    ///
    /// Renders the arrow, then sets the status LED and starts the tone. A skipped render
    /// leaves the status LED on the arrow still shown. The caller holds the tone for
    /// [`SequencerConfig::beep`] and then turns it off.
    ///
    /// # Errors
    ///
    /// [`Error::Pwm`] if an indicator output fails. A busy matrix is reported as
    /// [`Step::Skipped`], not as an error.
    pub fn apply<C, R, G, B, P>(
        &self,
        sample: JoystickSample,
        engine: &mut TransferEngine<'_, C, MATRIX_LEN>,
        status: &mut StatusLed<R, G, B>,
        buzzer: &mut Buzzer<P>,
    ) -> Result<Step>
    where
        C: StreamingChannel,
        R: SetDutyCycle,
        G: SetDutyCycle,
        B: SetDutyCycle,
        P: SetDutyCycle,
    {
        let state = self.config.thresholds.classify(sample);
        let Some(Feedback { arrow, status: (r, g, b) }) = state.feedback() else {
            status.off()?;
            return Ok(Step::Neutral);
        };

        match engine.render(arrow.mask()) {
            Ok(()) => {
                status.set_brightness(r, g, b)?;
                buzzer.set_tone(true)?;
                defmt::trace!("sequencer: {} -> {}", state, arrow);
                Ok(Step::Rendered(arrow))
            }
            Err(Error::TransferInProgress) => Ok(Step::Skipped(arrow)),
            Err(err) => Err(err),
        }
    }

    /// Run the loop forever: sample, apply, hold the beep, sleep.
    ///
    /// # Errors
    ///
    /// Returns the first joystick or indicator error.
    #[cfg(not(feature = "host"))]
    pub async fn run<C, R, G, B, P>(
        &self,
        joystick: &mut crate::joystick::Joystick<'_>,
        engine: &mut TransferEngine<'_, C, MATRIX_LEN>,
        status: &mut StatusLed<R, G, B>,
        buzzer: &mut Buzzer<P>,
    ) -> Result<core::convert::Infallible>
    where
        C: StreamingChannel,
        R: SetDutyCycle,
        G: SetDutyCycle,
        B: SetDutyCycle,
        P: SetDutyCycle,
    {
        use embassy_time::Timer;

        defmt::info!(
            "sequencer: period={}ms beep={}ms",
            self.config.period.as_millis(),
            self.config.beep.as_millis()
        );
        self.prepare(engine);
        loop {
            let sample = joystick.read().await?;
            match self.apply(sample, engine, status, buzzer)? {
                Step::Rendered(arrow) => {
                    defmt::debug!("sequencer: rendered {} for {}", arrow, sample);
                    Timer::after(self.config.beep).await;
                    buzzer.set_tone(false)?;
                }
                Step::Skipped(arrow) => {
                    defmt::warn!("sequencer: matrix busy, dropped {}", arrow);
                }
                Step::Neutral => {}
            }
            Timer::after(self.config.period).await;
        }
    }
}
