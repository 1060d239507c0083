//! The four arrow glyphs shown on the matrix.
//!
//! Masks are listed in streaming order, five pixels per matrix row.

use crate::frame_encoder::MatrixMask;

/// Arrow glyph named `up`.
pub const ARROW_UP: MatrixMask = MatrixMask::from_bits([
    0, 0, 1, 0, 0, //
    0, 1, 1, 0, 0, //
    1, 1, 1, 1, 1, //
    0, 1, 1, 0, 0, //
    0, 0, 1, 0, 0, //
]);

/// Arrow glyph named `down`.
pub const ARROW_DOWN: MatrixMask = MatrixMask::from_bits([
    0, 0, 1, 0, 0, //
    0, 1, 1, 1, 0, //
    1, 1, 1, 1, 1, //
    0, 0, 1, 0, 0, //
    0, 0, 1, 0, 0, //
]);

/// Arrow glyph named `left`.
pub const ARROW_LEFT: MatrixMask = MatrixMask::from_bits([
    0, 0, 1, 0, 0, //
    0, 0, 1, 0, 0, //
    1, 1, 1, 1, 1, //
    0, 1, 1, 1, 0, //
    0, 0, 1, 0, 0, //
]);

/// Arrow glyph named `right`.
pub const ARROW_RIGHT: MatrixMask = MatrixMask::from_bits([
    0, 0, 1, 0, 0, //
    0, 0, 1, 1, 0, //
    1, 1, 1, 1, 1, //
    0, 0, 1, 1, 0, //
    0, 0, 1, 0, 0, //
]);

/// One of the four fixed arrow glyphs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, defmt::Format)]
pub enum Arrow {
    /// See [`ARROW_UP`].
    Up,
    /// See [`ARROW_DOWN`].
    Down,
    /// See [`ARROW_LEFT`].
    Left,
    /// See [`ARROW_RIGHT`].
    Right,
}

impl Arrow {
    /// Every arrow, in declaration order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// The mask for this arrow.
    #[must_use]
    pub const fn mask(self) -> &'static MatrixMask {
        match self {
            Self::Up => &ARROW_UP,
            Self::Down => &ARROW_DOWN,
            Self::Left => &ARROW_LEFT,
            Self::Right => &ARROW_RIGHT,
        }
    }
}
