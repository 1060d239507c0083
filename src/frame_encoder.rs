//! Turns on/off glyph masks into packed color words for the 5x5 WS2812 matrix.
//!
//! # Wire order
//!
//! The matrix consumes one 24-bit color per pixel, green first, then red, then blue.
//! A [`ColorWord`] holds that triple in the low 24 bits of a `u32`:
//!
//! | bits   | channel |
//! |--------|---------|
//! | 24..32 | unused (always zero) |
//! | 16..24 | green   |
//! | 8..16  | red     |
//! | 0..8   | blue    |
//!
//! The PIO program in the `matrix` module discards the unused top byte
//! and shifts the remaining 24 bits out most-significant first.
//!
//! # Example
//!
//! ```rust
//! use joystick_arrows::frame_encoder::{ColorWord, FrameEncoder, MatrixBuffer};
//! use joystick_arrows::glyph::Arrow;
//!
//! let encoder = FrameEncoder::new(ColorWord::pack(4, 0, 0), ColorWord::OFF);
//! let mut buffer = MatrixBuffer::new();
//! encoder.encode(Arrow::Up.mask(), &mut buffer);
//!
//! assert_eq!(buffer[2], ColorWord::pack(4, 0, 0));
//! assert_eq!(buffer[0], ColorWord::OFF);
//! ```

use core::ops::{Deref, DerefMut};

use smart_leds::RGB8;

use crate::{Error, Result};

/// Columns on the matrix.
pub const MATRIX_WIDTH: usize = 5;

/// Rows on the matrix.
pub const MATRIX_HEIGHT: usize = 5;

/// Pixels on the matrix, in streaming order.
pub const MATRIX_LEN: usize = MATRIX_WIDTH * MATRIX_HEIGHT;

/// Color used for lit pixels unless configured otherwise (dim red).
pub const ON_COLOR_DEFAULT: ColorWord = ColorWord::pack(4, 0, 0);

// ============================================================================
// ColorWord
// ============================================================================

/// One pixel's color, packed in the matrix's wire order (see the [module docs](self)).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, defmt::Format)]
#[repr(transparent)]
pub struct ColorWord(u32);

impl ColorWord {
    /// All channels dark.
    pub const OFF: Self = Self::pack(0, 0, 0);

    /// Pack red, green and blue intensities as `g << 16 | r << 8 | b`.
    #[must_use]
    pub const fn pack(r: u8, g: u8, b: u8) -> Self {
        Self(((g as u32) << 16) | ((r as u32) << 8) | (b as u32))
    }

    /// Reinterpret a raw word. The unused top byte is cleared.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits & 0x00FF_FFFF)
    }

    /// The raw word as streamed to the matrix.
    #[must_use]
    pub const fn to_bits(self) -> u32 {
        self.0
    }

    /// Red intensity.
    #[must_use]
    pub const fn r(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Green intensity.
    #[must_use]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue intensity.
    #[must_use]
    pub const fn b(self) -> u8 {
        self.0 as u8
    }
}

impl From<RGB8> for ColorWord {
    fn from(color: RGB8) -> Self {
        Self::pack(color.r, color.g, color.b)
    }
}

impl From<ColorWord> for RGB8 {
    fn from(word: ColorWord) -> Self {
        Self::new(word.r(), word.g(), word.b())
    }
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// Fixed-length sequence of [`ColorWord`]s, index `i` being the `i`-th pixel on the wire.
///
/// The buffer derefs to `[ColorWord; N]`; its length is part of the type and never changes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PixelBuffer<const N: usize>(pub [ColorWord; N]);

/// Pixel buffer sized for the 5x5 matrix.
pub type MatrixBuffer = PixelBuffer<MATRIX_LEN>;

impl<const N: usize> PixelBuffer<N> {
    /// Number of pixels in this buffer.
    pub const LEN: usize = N;

    /// Create a buffer with every pixel off.
    #[must_use]
    pub const fn new() -> Self {
        Self([ColorWord::OFF; N])
    }

    /// Create a buffer with every pixel set to `color`.
    #[must_use]
    pub const fn filled(color: ColorWord) -> Self {
        Self([color; N])
    }
}

impl<const N: usize> Deref for PixelBuffer<N> {
    type Target = [ColorWord; N];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> DerefMut for PixelBuffer<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const N: usize> From<[ColorWord; N]> for PixelBuffer<N> {
    fn from(array: [ColorWord; N]) -> Self {
        Self(array)
    }
}

impl<const N: usize> Default for PixelBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// GlyphMask
// ============================================================================

/// Immutable on/off pattern with one flag per pixel, in the same order as [`PixelBuffer`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GlyphMask<const N: usize>([bool; N]);

/// Glyph mask sized for the 5x5 matrix.
pub type MatrixMask = GlyphMask<MATRIX_LEN>;

impl<const N: usize> GlyphMask<N> {
    /// Every pixel off.
    pub const ALL_OFF: Self = Self([false; N]);

    /// Every pixel lit.
    pub const ALL_ON: Self = Self([true; N]);

    /// Wrap an array of flags.
    #[must_use]
    pub const fn new(flags: [bool; N]) -> Self {
        Self(flags)
    }

    /// Build a mask from `0`/`1` literals, convenient for drawing glyphs in source.
    /// Any non-zero value counts as lit.
    #[must_use]
    pub const fn from_bits(bits: [u8; N]) -> Self {
        let mut flags = [false; N];
        let mut index = 0;
        while index < N {
            flags[index] = bits[index] != 0;
            index += 1;
        }
        Self(flags)
    }

    /// Whether pixel `index` is lit. Out-of-range indices are reported as off.
    #[must_use]
    pub fn is_lit(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    /// Number of lit pixels.
    #[must_use]
    pub fn lit_count(&self) -> usize {
        self.0.iter().filter(|lit| **lit).count()
    }

    /// Flags in pixel order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    /// The underlying flags.
    #[must_use]
    pub const fn as_array(&self) -> &[bool; N] {
        &self.0
    }
}

impl<const N: usize> TryFrom<&[bool]> for GlyphMask<N> {
    type Error = Error;

    /// Accept a runtime slice only if it has exactly one flag per pixel.
    fn try_from(flags: &[bool]) -> Result<Self> {
        let array: [bool; N] = flags.try_into().map_err(|_| Error::MaskLength {
            expected: N,
            actual: flags.len(),
        })?;
        Ok(Self(array))
    }
}

impl<const N: usize> From<[bool; N]> for GlyphMask<N> {
    fn from(flags: [bool; N]) -> Self {
        Self(flags)
    }
}

// ============================================================================
// FrameEncoder
// ============================================================================

/// Maps a [`GlyphMask`] onto a [`PixelBuffer`] using one "on" and one "off" color.
///
/// Encoding is total and has no side effects beyond writing the buffer it is given.
/// When that buffer is the one a streaming channel reads from, the caller must make sure
/// no transfer is in flight; [`TransferEngine`](crate::transfer::TransferEngine) does this.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FrameEncoder {
    on: ColorWord,
    off: ColorWord,
}

impl FrameEncoder {
    /// Create an encoder with the given lit and unlit colors.
    #[must_use]
    pub const fn new(on: ColorWord, off: ColorWord) -> Self {
        Self { on, off }
    }

    /// Color written for lit pixels.
    #[must_use]
    pub const fn on(&self) -> ColorWord {
        self.on
    }

    /// Color written for unlit pixels.
    #[must_use]
    pub const fn off(&self) -> ColorWord {
        self.off
    }

    /// Overwrite every pixel of `buffer`: `on` where the mask is lit, `off` elsewhere.
    pub fn encode<const N: usize>(&self, mask: &GlyphMask<N>, buffer: &mut PixelBuffer<N>) {
        for (word, lit) in buffer.iter_mut().zip(mask.iter()) {
            *word = if lit { self.on } else { self.off };
        }
    }
}

impl Default for FrameEncoder {
    fn default() -> Self {
        Self::new(ON_COLOR_DEFAULT, ColorWord::OFF)
    }
}
