#![cfg(feature = "host")]
//! A [`StreamingChannel`] that runs on the development machine.
//!
//! It copies the words it is given at trigger time and reports itself busy until a
//! configurable drain time has passed on the host clock.

use std::time::{Duration, Instant};

use crate::frame_encoder::ColorWord;
use crate::transfer::{StreamingChannel, drain_time};

/// Host stand-in for the PIO + DMA streaming channel.
#[derive(Debug)]
pub struct SimulatedChannel {
    drain: Duration,
    started_at: Option<Instant>,
    received: Vec<ColorWord>,
    trigger_count: usize,
}

impl SimulatedChannel {
    /// A channel that stays busy for `drain` after each trigger.
    #[must_use]
    pub const fn new(drain: Duration) -> Self {
        Self {
            drain,
            started_at: None,
            received: Vec::new(),
            trigger_count: 0,
        }
    }

    /// A channel that finishes every transfer the moment it starts.
    #[must_use]
    pub const fn instantaneous() -> Self {
        Self::new(Duration::ZERO)
    }

    /// A channel that drains at the matrix's real bit rate, latch gap included.
    #[must_use]
    pub fn wire_paced(pixels: usize) -> Self {
        Self::new(Duration::from_micros(drain_time(pixels).as_micros()))
    }

    /// Words received by the most recent trigger.
    #[must_use]
    pub fn received(&self) -> &[ColorWord] {
        &self.received
    }

    /// How many times the channel has been triggered.
    #[must_use]
    pub const fn trigger_count(&self) -> usize {
        self.trigger_count
    }

    /// Drain time this channel simulates.
    #[must_use]
    pub const fn drain(&self) -> Duration {
        self.drain
    }

    /// Pretend the transfer in flight has completed.
    pub fn finish(&mut self) {
        self.started_at = None;
    }
}

impl StreamingChannel for SimulatedChannel {
    fn start(&mut self, words: &[ColorWord]) {
        self.received.clear();
        self.received.extend_from_slice(words);
        self.trigger_count = self.trigger_count.saturating_add(1);
        self.started_at = Some(Instant::now());
    }

    fn is_busy(&self) -> bool {
        self.started_at
            .is_some_and(|started_at| started_at.elapsed() < self.drain)
    }
}
