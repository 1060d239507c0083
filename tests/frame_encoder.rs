#![allow(missing_docs)]
//! Host-level tests for color packing and glyph encoding.

use joystick_arrows::Error;
use joystick_arrows::frame_encoder::{
    ColorWord, FrameEncoder, GlyphMask, MATRIX_LEN, MatrixBuffer, MatrixMask, ON_COLOR_DEFAULT,
};
use joystick_arrows::glyph::{ARROW_DOWN, ARROW_LEFT, ARROW_RIGHT, ARROW_UP, Arrow};
use smart_leds::RGB8;

fn dim_red_encoder() -> FrameEncoder {
    FrameEncoder::new(ColorWord::pack(4, 0, 0), ColorWord::pack(0, 0, 0))
}

fn expected_for(mask: &MatrixMask, on: ColorWord, off: ColorWord) -> [ColorWord; MATRIX_LEN] {
    let mut expected = [off; MATRIX_LEN];
    for (word, lit) in expected.iter_mut().zip(mask.iter()) {
        if lit {
            *word = on;
        }
    }
    expected
}

#[test]
fn pack_places_red_in_second_byte() {
    let word = ColorWord::pack(4, 0, 0).to_bits();
    assert_eq!(word & 0xFF, 0);
    assert_eq!((word >> 8) & 0xFF, 4);
    assert_eq!((word >> 16) & 0xFF, 0);
    assert_eq!(word, 0x0000_0400);
}

#[test]
fn pack_uses_green_red_blue_layout() {
    assert_eq!(ColorWord::pack(0x11, 0x22, 0x33).to_bits(), 0x0022_1133);
    assert_eq!(ColorWord::pack(255, 255, 255).to_bits(), 0x00FF_FFFF);
}

#[test]
fn pack_all_zero_is_off() {
    assert_eq!(ColorWord::pack(0, 0, 0).to_bits(), 0);
    assert_eq!(ColorWord::pack(0, 0, 0), ColorWord::OFF);
    assert_eq!(ColorWord::default(), ColorWord::OFF);
}

#[test]
fn channel_accessors_unpack() {
    let word = ColorWord::pack(1, 2, 3);
    assert_eq!((word.r(), word.g(), word.b()), (1, 2, 3));
}

#[test]
fn from_bits_clears_top_byte() {
    let word = ColorWord::from_bits(0xAB12_3456);
    assert_eq!(word.to_bits(), 0x0012_3456);
    assert_eq!((word.r(), word.g(), word.b()), (0x34, 0x12, 0x56));
}

#[test]
fn rgb8_conversions_agree_with_pack() {
    let color = RGB8::new(10, 20, 30);
    let word = ColorWord::from(color);
    assert_eq!(word, ColorWord::pack(10, 20, 30));
    assert_eq!(RGB8::from(word), color);
}

#[test]
fn all_lit_mask_fills_on_color() {
    let mut buffer = MatrixBuffer::new();
    dim_red_encoder().encode(&MatrixMask::ALL_ON, &mut buffer);
    assert!(buffer.iter().all(|word| *word == ColorWord::pack(4, 0, 0)));
}

#[test]
fn all_unlit_mask_fills_off_color() {
    let mut buffer = MatrixBuffer::filled(ColorWord::pack(9, 9, 9));
    dim_red_encoder().encode(&MatrixMask::ALL_OFF, &mut buffer);
    assert!(buffer.iter().all(|word| *word == ColorWord::OFF));
}

#[test]
fn each_arrow_encodes_elementwise() {
    let encoder = dim_red_encoder();
    for arrow in Arrow::ALL {
        let mut buffer = MatrixBuffer::filled(ColorWord::pack(1, 1, 1));
        encoder.encode(arrow.mask(), &mut buffer);
        assert_eq!(
            buffer.0,
            expected_for(arrow.mask(), encoder.on(), encoder.off()),
            "{arrow:?}"
        );
    }
}

#[test]
fn up_arrow_matches_literal_mask() {
    let mut buffer = MatrixBuffer::new();
    dim_red_encoder().encode(&ARROW_UP, &mut buffer);
    let on = ColorWord::pack(4, 0, 0);
    let off = ColorWord::OFF;
    #[rustfmt::skip]
    let expected = [
        off, off, on,  off, off,
        off, on,  on,  off, off,
        on,  on,  on,  on,  on,
        off, on,  on,  off, off,
        off, off, on,  off, off,
    ];
    assert_eq!(buffer.0, expected);
}

#[test]
fn arrow_masks_are_distinct() {
    let masks = [ARROW_UP, ARROW_DOWN, ARROW_LEFT, ARROW_RIGHT];
    for (i, a) in masks.iter().enumerate() {
        for b in &masks[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert_eq!(ARROW_UP.lit_count(), 11);
    assert_eq!(ARROW_DOWN.lit_count(), 11);
}

#[test]
fn arrow_enum_maps_to_constants() {
    assert_eq!(Arrow::Up.mask(), &ARROW_UP);
    assert_eq!(Arrow::Down.mask(), &ARROW_DOWN);
    assert_eq!(Arrow::Left.mask(), &ARROW_LEFT);
    assert_eq!(Arrow::Right.mask(), &ARROW_RIGHT);
}

#[test]
fn default_encoder_is_dim_red_on_black() {
    let encoder = FrameEncoder::default();
    assert_eq!(encoder.on(), ON_COLOR_DEFAULT);
    assert_eq!(encoder.on(), ColorWord::pack(4, 0, 0));
    assert_eq!(encoder.off(), ColorWord::OFF);
}

#[test]
fn mask_from_slice_requires_exact_length() {
    let short = [true; MATRIX_LEN - 1];
    let long = [true; MATRIX_LEN + 1];
    assert!(matches!(
        MatrixMask::try_from(&short[..]),
        Err(Error::MaskLength {
            expected: MATRIX_LEN,
            actual: 24
        })
    ));
    assert!(matches!(
        MatrixMask::try_from(&long[..]),
        Err(Error::MaskLength {
            expected: MATRIX_LEN,
            actual: 26
        })
    ));

    let exact = [false; MATRIX_LEN];
    let mask = MatrixMask::try_from(&exact[..]).expect("exact length accepted");
    assert_eq!(mask, MatrixMask::ALL_OFF);
}

#[test]
fn mask_length_error_message_names_both_lengths() {
    let err = MatrixMask::try_from(&[true; 3][..]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "glyph mask has 3 entries but the matrix has 25 pixels"
    );
}

#[test]
fn from_bits_treats_nonzero_as_lit() {
    let mask = GlyphMask::<4>::from_bits([0, 1, 2, 0]);
    assert_eq!(mask.as_array(), &[false, true, true, false]);
    assert!(mask.is_lit(1));
    assert!(!mask.is_lit(3));
    assert!(!mask.is_lit(99));
}
