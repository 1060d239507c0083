#![allow(missing_docs)]
#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::{convert::Infallible, panic};

use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::pwm::Pwm;
use joystick_arrows::{
    Result,
    indicator::{BUZZER_TOP, Buzzer, STATUS_LED_TOP, StatusLed, pwm_config, split_outputs},
    joystick::Joystick,
    matrix::init_led_matrix,
    sequencer::{Sequencer, SequencerConfig},
};
use {defmt_rtt as _, panic_probe as _};

#[embassy_executor::main]
async fn main(_spawner: Spawner) -> ! {
    let err = inner_main().await.unwrap_err();
    panic!("{err}");
}

async fn inner_main() -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    let mut joystick = Joystick::new(p.ADC, p.PIN_26, p.PIN_27);

    // Slice 6 carries green (GPIO12, A) and red (GPIO13, B). Slice 5 carries the buzzer
    // (GPIO10, A) and blue (GPIO11, B), so it runs at the buzzer's tone frequency.
    let slice6 = Pwm::new_output_ab(p.PWM_SLICE6, p.PIN_12, p.PIN_13, pwm_config(STATUS_LED_TOP));
    let slice5 = Pwm::new_output_ab(p.PWM_SLICE5, p.PIN_10, p.PIN_11, pwm_config(BUZZER_TOP));
    let (green, red) = split_outputs(slice6)?;
    let (buzzer_output, blue) = split_outputs(slice5)?;
    let mut status = StatusLed::new(red, green, blue);
    let mut buzzer = Buzzer::new(buzzer_output);
    status.off()?;
    buzzer.set_tone(false)?;

    let mut matrix = init_led_matrix(p.PIO0, p.PIN_7, p.DMA_CH0)?;
    matrix.clear()?;
    let session = matrix.session();
    info!(
        "matrix ready: {} words at {:#x}",
        session.word_count, session.source_address
    );

    let sequencer = Sequencer::new(SequencerConfig::default());
    sequencer
        .run(&mut joystick, &mut matrix, &mut status, &mut buzzer)
        .await
}
