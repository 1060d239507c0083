//! Fire-and-forget streaming of the pixel buffer to the matrix.
//!
//! A [`TransferEngine`] owns the [`PixelBuffer`] and a [`StreamingChannel`]. Each
//! [`render`](TransferEngine::render) encodes a glyph into the buffer and re-triggers the
//! channel, then returns at once. The channel drains the buffer on its own, paced by the
//! matrix's bit rate, and never reports completion.
//!
//! # Overlapping renders
//!
//! The buffer is read by the channel while it drains. Writing it during that window would
//! tear the frame on the wire, so `render` refuses to run while the channel is busy and
//! returns [`Error::TransferInProgress`] instead. Callers that render on a fixed cadence
//! must keep the cadence longer than [`drain_time`] for the buffer length; the firmware's
//! 100 ms loop is about a hundred times that.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "host")]
//! # {
//! use joystick_arrows::frame_encoder::{FrameEncoder, MatrixBuffer};
//! use joystick_arrows::glyph::Arrow;
//! use joystick_arrows::transfer::{TransferEngine, TransferState, simulated::SimulatedChannel};
//!
//! let mut buffer = MatrixBuffer::new();
//! let channel = SimulatedChannel::wire_paced(MatrixBuffer::LEN);
//! let mut engine = TransferEngine::new(channel, &mut buffer, FrameEncoder::default());
//!
//! engine.render(Arrow::Left.mask())?;
//! assert_eq!(engine.state(), TransferState::Draining);
//! # }
//! # Ok::<(), joystick_arrows::Error>(())
//! ```

use embassy_time::Duration;

use crate::frame_encoder::{ColorWord, FrameEncoder, GlyphMask, PixelBuffer};
use crate::{Error, Result};

#[cfg(feature = "host")]
pub mod simulated;

// ============================================================================
// Wire timing
// ============================================================================

/// Bit rate of the matrix's serial protocol.
pub const WIRE_BIT_RATE_HZ: u32 = 800_000;

/// Bits streamed per pixel (8 each for green, red and blue).
pub const BITS_PER_PIXEL: u32 = 24;

/// Waveform generator cycles per wire bit.
pub const CYCLES_PER_BIT: u32 = 10;

/// Extra generator cycles per pixel spent fetching the next word, outside the bit loop.
pub const FETCH_CYCLES_PER_PIXEL: u32 = 2;

/// Low time after the last bit before the matrix latches the frame.
pub const RESET_LATCH: Duration = Duration::from_micros(280);

/// Shortest time in which `pixels` words can be streamed and latched.
///
/// For the 25-pixel matrix this is about 756 µs of data (each word costs 24 bit periods
/// plus its fetch) followed by the latch gap, rounded up to whole microseconds.
#[must_use]
pub const fn drain_time(pixels: usize) -> Duration {
    let cycles_per_pixel = (BITS_PER_PIXEL * CYCLES_PER_BIT + FETCH_CYCLES_PER_PIXEL) as u64;
    let cycle_hz = WIRE_BIT_RATE_HZ as u64 * CYCLES_PER_BIT as u64;
    let data_us = (pixels as u64 * cycles_per_pixel * 1_000_000).div_ceil(cycle_hz);
    Duration::from_micros(data_us + RESET_LATCH.as_micros())
}

// ============================================================================
// StreamingChannel
// ============================================================================

/// A transfer engine that moves words from memory to the matrix without the CPU.
///
/// Implemented by the PIO + DMA pair on the Pico, and by
/// [`SimulatedChannel`](simulated::SimulatedChannel) for host tests.
pub trait StreamingChannel {
    /// Re-arm the channel with `words` as its source and start it. Must not block.
    ///
    /// The channel may keep reading from `words` after this returns. The caller must not
    /// modify them until [`is_busy`](Self::is_busy) reports `false`.
    fn start(&mut self, words: &[ColorWord]);

    /// Whether a previously started transfer may still be reading its source.
    fn is_busy(&self) -> bool;
}

// ============================================================================
// TransferEngine
// ============================================================================

/// Observable state of a [`TransferEngine`].
///
/// There is no `Unconfigured` variant: an engine only exists once its channel and buffer
/// are bound, so `TransferEngine::new` is that transition.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, defmt::Format)]
pub enum TransferState {
    /// No transfer in flight; the buffer may be rewritten.
    Idle,
    /// The channel is still streaming the buffer.
    Draining,
}

/// Snapshot of the engine's one re-triggerable transfer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TransferSession {
    /// Address the channel reads from. Fixed for the life of the engine.
    pub source_address: usize,
    /// Words moved per trigger.
    pub word_count: usize,
    /// Whether the channel can take a new trigger.
    pub state: TransferState,
}

/// Encodes glyphs into an owned pixel buffer and streams it through a [`StreamingChannel`].
///
/// See the [module documentation](self) for the overlap rule.
pub struct TransferEngine<'b, C, const N: usize> {
    channel: C,
    buffer: &'b mut PixelBuffer<N>,
    encoder: FrameEncoder,
}

impl<'b, C: StreamingChannel, const N: usize> TransferEngine<'b, C, N> {
    /// Bind a configured channel to the buffer it will stream from.
    pub fn new(channel: C, buffer: &'b mut PixelBuffer<N>, encoder: FrameEncoder) -> Self {
        defmt::debug!("TransferEngine::new: {} words per transfer", N);
        Self {
            channel,
            buffer,
            encoder,
        }
    }

    /// Encode `mask` into the buffer and start streaming it. Returns without waiting.
    ///
    /// # Errors
    ///
    /// [`Error::TransferInProgress`] if the previous frame is still draining. The buffer and
    /// the transfer in flight are left untouched.
    pub fn render(&mut self, mask: &GlyphMask<N>) -> Result<()> {
        if self.channel.is_busy() {
            return Err(Error::TransferInProgress);
        }
        self.encoder.encode(mask, self.buffer);
        self.channel.start(self.buffer.as_slice());
        defmt::trace!("TransferEngine::render: {} lit", mask.lit_count());
        Ok(())
    }

    /// Turn every pixel off.
    ///
    /// # Errors
    ///
    /// Same as [`render`](Self::render).
    pub fn clear(&mut self) -> Result<()> {
        self.render(&GlyphMask::ALL_OFF)
    }

    /// Whether the channel is idle or still streaming.
    #[must_use]
    pub fn state(&self) -> TransferState {
        if self.channel.is_busy() {
            TransferState::Draining
        } else {
            TransferState::Idle
        }
    }

    /// Shorthand for `state() == TransferState::Idle`.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state() == TransferState::Idle
    }

    /// Source, length and readiness of the transfer.
    #[must_use]
    pub fn session(&self) -> TransferSession {
        TransferSession {
            source_address: self.buffer.as_ptr() as usize,
            word_count: N,
            state: self.state(),
        }
    }

    /// The words most recently handed to the channel.
    #[must_use]
    pub fn buffer(&self) -> &PixelBuffer<N> {
        self.buffer
    }

    /// Colors used by [`render`](Self::render).
    #[must_use]
    pub const fn encoder(&self) -> &FrameEncoder {
        &self.encoder
    }

    /// Change the colors used by later renders. The current frame is not redrawn.
    pub fn set_encoder(&mut self, encoder: FrameEncoder) {
        self.encoder = encoder;
    }

    /// The streaming channel.
    #[must_use]
    pub const fn channel(&self) -> &C {
        &self.channel
    }

    /// The streaming channel, mutably.
    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }
}
