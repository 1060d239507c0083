//! Interrupt bindings shared by the matrix and the joystick.

use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::PIO0;

bind_interrupts!(
    /// PIO0 interrupt binding used by [`matrix`](crate::matrix).
    pub struct Pio0Irqs {
        PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO0>;
    }
);

bind_interrupts!(
    /// ADC FIFO interrupt binding used by [`joystick`](crate::joystick).
    pub struct AdcIrqs {
        ADC_IRQ_FIFO => embassy_rp::adc::InterruptHandler;
    }
);
