//! The Pico's PIO + DMA streaming channel for the 5x5 WS2812 matrix.
//!
//! PIO0's state machine 0 generates the WS2812 waveform. A DMA channel, paced by that
//! state machine's TX FIFO request line, copies the pixel buffer into the FIFO one word
//! per request. Once triggered, neither needs the CPU again.
//!
//! Use [`init_led_matrix`] once at start-up; it returns the [`LedMatrix`] engine.
//!
//! # Example
//!
//! ```rust,no_run
//! # #![no_std]
//! # #![no_main]
//! # use panic_probe as _;
//! use joystick_arrows::{Result, glyph::Arrow, matrix::init_led_matrix};
//!
//! fn example(p: embassy_rp::Peripherals) -> Result<()> {
//!     let mut matrix = init_led_matrix(p.PIO0, p.PIN_7, p.DMA_CH0)?;
//!     matrix.render(Arrow::Up.mask())?; // returns while the frame is still streaming
//!     Ok(())
//! }
//! ```

use defmt::info;
use embassy_rp::Peri;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::dma::Channel;
use embassy_rp::pac;
use embassy_rp::pac::dma::regs::CtrlTrig;
use embassy_rp::pac::dma::vals::{DataSize, TreqSel};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{
    Common, Config as PioConfig, Direction, FifoJoin, Pin, Pio, PioPin, ShiftConfig,
    ShiftDirection, StateMachine,
};
use embassy_time::Instant;
use fixed::types::U24F8;
use static_cell::StaticCell;

use crate::frame_encoder::{ColorWord, FrameEncoder, MATRIX_LEN, MatrixBuffer};
use crate::irqs::Pio0Irqs;
use crate::transfer::{CYCLES_PER_BIT, StreamingChannel, TransferEngine, drain_time};
use crate::{Error, Result};

// Waveform phases in PIO cycles: T1 high for every bit, T2 high for a one / low for a
// zero, T3 low for every bit.
const T1: u32 = 2;
const T2: u32 = 5;
const T3: u32 = 3;

const _: () = assert!(
    T1 + T2 + T3 == CYCLES_PER_BIT,
    "waveform phases must fill one bit period"
);

/// Bit rate of the waveform, in kHz.
const WIRE_KHZ: u32 = crate::transfer::WIRE_BIT_RATE_HZ / 1000;

const STATE_MACHINE: usize = 0;

/// Engine driving the matrix through PIO0 and the DMA channel `D`.
pub type LedMatrix<D> = TransferEngine<'static, PioDmaChannel<'static, D>, MATRIX_LEN>;

static PIXEL_BUFFER: StaticCell<MatrixBuffer> = StaticCell::new();

/// Claim the matrix's streaming resources and return its engine.
///
/// The matrix data line is `pin` (GPIO7 on the reference board). Must be called once;
/// the pixel buffer it binds lives for the rest of the program.
///
/// # Errors
///
/// [`Error::ChannelUnavailable`] if the matrix has already been initialized.
pub fn init_led_matrix<D: Channel>(
    pio: Peri<'static, PIO0>,
    pin: Peri<'static, impl PioPin>,
    dma: Peri<'static, D>,
) -> Result<LedMatrix<D>> {
    let buffer = PIXEL_BUFFER
        .try_init(MatrixBuffer::new())
        .ok_or(Error::ChannelUnavailable)?;
    let channel = PioDmaChannel::new(pio, pin, dma, buffer);
    Ok(TransferEngine::new(channel, buffer, FrameEncoder::default()))
}

/// [`StreamingChannel`] backed by PIO0 state machine 0 and one DMA channel.
pub struct PioDmaChannel<'d, D: Channel> {
    // Held so the program, pin and state machine stay claimed and running.
    _common: Common<'d, PIO0>,
    _state_machine: StateMachine<'d, PIO0, STATE_MACHINE>,
    _pin: Pin<'d, PIO0>,
    dma: Peri<'d, D>,
    started_at: Option<Instant>,
}

impl<'d, D: Channel> PioDmaChannel<'d, D> {
    /// Load the waveform program and bind the DMA channel to `buffer`.
    ///
    /// The channel is configured but not started.
    pub fn new(
        pio: Peri<'d, PIO0>,
        pin: Peri<'d, impl PioPin>,
        dma: Peri<'d, D>,
        buffer: &MatrixBuffer,
    ) -> Self {
        let Pio {
            mut common,
            sm0: mut state_machine,
            ..
        } = Pio::new(pio, Pio0Irqs);
        let pin = common.make_pio_pin(pin);
        setup_waveform_state_machine(&mut common, &mut state_machine, &pin);
        setup_dma_channel(&dma, buffer.as_slice());

        Self {
            _common: common,
            _state_machine: state_machine,
            _pin: pin,
            dma,
            started_at: None,
        }
    }
}

impl<D: Channel> StreamingChannel for PioDmaChannel<'_, D> {
    fn start(&mut self, words: &[ColorWord]) {
        let regs = self.dma.regs();
        set_transfer_count(&regs, words.len());
        // Writing the trigger alias reloads the transfer count and starts the channel.
        regs.al3_read_addr_trig()
            .write_value(words.as_ptr() as u32);
        self.started_at = Some(Instant::now());
    }

    fn is_busy(&self) -> bool {
        if self.dma.regs().ctrl_trig().read().busy() {
            return true;
        }
        let tx_empty = pac::PIO0.fstat().read().txempty() & (1 << STATE_MACHINE) != 0;
        if !tx_empty {
            return true;
        }
        // The last words are still leaving the shift register, then the latch gap.
        self.started_at
            .is_some_and(|started_at| started_at.elapsed() < drain_time(MATRIX_LEN))
    }
}

/// Pull a word, drop its unused top byte, then clock out 24 bits MSB first.
fn setup_waveform_state_machine<'d>(
    common: &mut Common<'d, PIO0>,
    state_machine: &mut StateMachine<'d, PIO0, STATE_MACHINE>,
    pin: &Pin<'d, PIO0>,
) {
    let program = pio::pio_asm!(
        ".side_set 1",
        ".wrap_target",
        "    pull block          side 0", // fetch: FETCH_CYCLES_PER_PIXEL
        "    out null, 8         side 0",
        "bitloop:",
        "    out x, 1            side 0 [2]", // T3 - 1
        "    jmp !x do_zero      side 1 [1]", // T1 - 1
        "    jmp !osre bitloop   side 1 [4]", // T2 - 1
        "do_zero:",
        "    jmp !osre bitloop   side 0 [4]", // T2 - 1
        ".wrap",
    );

    let clock_divider = U24F8::from_num(clk_sys_freq() / 1000) / (WIRE_KHZ * CYCLES_PER_BIT);

    let cfg = {
        let mut cfg = PioConfig::default();
        cfg.use_program(&common.load_program(&program.program), &[pin]);
        cfg.clock_divider = clock_divider;
        cfg.fifo_join = FifoJoin::TxOnly;
        cfg.shift_out = ShiftConfig {
            auto_fill: false,
            threshold: 32,
            direction: ShiftDirection::Left,
        };
        cfg
    };

    state_machine.set_config(&cfg);
    state_machine.set_pin_dirs(Direction::Out, &[pin]);
    state_machine.set_enable(true);

    info!(
        "matrix waveform: clk_sys={}Hz divider={} ({} cycles/bit)",
        clk_sys_freq(),
        clock_divider.to_num::<f32>(),
        CYCLES_PER_BIT
    );
}

/// One-time DMA setup: word-sized, read-incrementing, paced by the state machine's TX
/// request, writing the TX FIFO. Left armed but not triggered.
fn setup_dma_channel<D: Channel>(dma: &Peri<'_, D>, words: &[ColorWord]) {
    let regs = dma.regs();
    regs.write_addr()
        .write_value(pac::PIO0.txf(STATE_MACHINE).as_ptr() as u32);
    regs.read_addr().write_value(words.as_ptr() as u32);
    set_transfer_count(&regs, words.len());
    regs.al1_ctrl().write(|ctrl| {
        let mut trig = CtrlTrig(*ctrl);
        trig.set_incr_read(true);
        trig.set_incr_write(false);
        trig.set_data_size(DataSize::SIZE_WORD);
        trig.set_treq_sel(TreqSel::PIO0_TX0);
        trig.set_irq_quiet(true);
        trig.set_chain_to(dma.number()); // chaining to itself disables chaining
        trig.set_en(true);
        *ctrl = trig.0;
    });

    info!(
        "matrix DMA: channel {} streams {} words",
        dma.number(),
        words.len()
    );
}

/// Words per trigger. RP2350 adds a mode field to this register; mode 0 is a normal count.
fn set_transfer_count(regs: &pac::dma::Channel, words: usize) {
    let count = words as u32;
    #[cfg(feature = "pico1")]
    regs.trans_count().write_value(count);
    #[cfg(feature = "pico2")]
    regs.trans_count().write(|trans_count| {
        trans_count.set_mode(0.into());
        trans_count.set_count(count);
    });
}
