//! Joystick-driven arrow glyphs on a 5x5 WS2812 LED matrix for the Pico 1 and 2.
//!
//! The firmware reads a two-axis joystick, picks one of four arrows, and streams the
//! arrow to the matrix through PIO and DMA, while a status LED and buzzer give feedback.
//!
//! - [`frame_encoder`] packs on/off glyph masks into the matrix's color words.
//! - [`transfer`] owns the pixel buffer and triggers the streaming channel without
//!   waiting for it.
//! - `matrix` is that streaming channel on the Pico.
//! - [`sequencer`] ties the joystick, matrix, and [`indicator`] outputs together.
//!
//! # Glossary
//!
//! Resources available on the Pico 1 and Pico 2:
//!
//! - **PIO ([Programmable I/O](https://medium.com/data-science/nine-pico-pio-wats-with-rust-part-1-9d062067dc25)):** Pico 1 has 2. Pico 2 has 3.
//!   Generates the matrix's bit-level waveform.
//! - **DMA ([Direct Memory Access](https://en.wikipedia.org/wiki/Direct_memory_access)):** Both Pico 1 and 2 have 12 channels.
//!   Feeds the PIO from the pixel buffer.
//! - **PWM ([Pulse Width Modulation](https://en.wikipedia.org/wiki/Pulse-width_modulation)) Slices:** Both  Pico 1 and 2 have 8 slices (& 16 channels). These "slices"
//!   are unrelated Rust slices.
//! - **Wire order:** the bit layout of a color word as the matrix consumes it (green, red, blue).
#![cfg_attr(not(feature = "host"), no_std)]
#![cfg_attr(not(feature = "host"), no_main)]

// Compile-time checks: exactly one board must be selected (unless testing with host feature)
#[cfg(all(not(any(feature = "pico1", feature = "pico2")), not(feature = "host")))]
compile_error!("Must enable exactly one board feature: 'pico1' or 'pico2'");

#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

// Compile-time checks: exactly one architecture must be selected (unless testing with host feature)
#[cfg(all(not(any(feature = "arm", feature = "riscv")), not(feature = "host")))]
compile_error!("Must enable exactly one architecture feature: 'arm' or 'riscv'");

#[cfg(all(feature = "arm", feature = "riscv"))]
compile_error!("Cannot enable both 'arm' and 'riscv' features simultaneously");

// Compile-time check: pico1 only supports ARM
#[cfg(all(feature = "pico1", feature = "riscv"))]
compile_error!("Pico 1 (RP2040) only supports ARM architecture, not RISC-V");

mod error;
pub mod frame_encoder;
pub mod glyph;
pub mod indicator;
// These modules require embassy_rp and are excluded when testing on host
#[cfg(not(feature = "host"))]
#[doc(hidden)]
pub mod irqs;
#[cfg(not(feature = "host"))]
pub mod joystick;
#[cfg(not(feature = "host"))]
pub mod matrix;
pub mod sequencer;
pub mod transfer;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
