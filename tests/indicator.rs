#![allow(missing_docs)]
//! Host-level tests for the status LED and buzzer duty-cycle math.

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::pwm::{ErrorKind, ErrorType, SetDutyCycle};
use joystick_arrows::Error;
use joystick_arrows::indicator::{BUZZER_TOP, Buzzer, STATUS_LED_TOP, StatusLed};

/// PWM output whose duty can be read back after it has been moved into a driver.
#[derive(Clone)]
struct Probe {
    max: u16,
    duty: Rc<Cell<u16>>,
}

impl Probe {
    fn new(max: u16) -> Self {
        Self {
            max,
            duty: Rc::new(Cell::new(u16::MAX)),
        }
    }
}

impl ErrorType for Probe {
    type Error = Infallible;
}

impl SetDutyCycle for Probe {
    fn max_duty_cycle(&self) -> u16 {
        self.max
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        self.duty.set(duty);
        Ok(())
    }
}

#[derive(Debug)]
struct Broken;

impl embedded_hal::pwm::Error for Broken {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

struct BrokenOutput;

impl ErrorType for BrokenOutput {
    type Error = Broken;
}

impl SetDutyCycle for BrokenOutput {
    fn max_duty_cycle(&self) -> u16 {
        255
    }

    fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Broken> {
        Err(Broken)
    }
}

#[test]
fn brightness_maps_directly_at_status_top() {
    let (red, green, blue) = (
        Probe::new(STATUS_LED_TOP),
        Probe::new(STATUS_LED_TOP),
        Probe::new(STATUS_LED_TOP),
    );
    let mut led = StatusLed::new(red.clone(), green.clone(), blue.clone());

    led.set_brightness(15, 0, 255).expect("infallible outputs");
    assert_eq!(red.duty.get(), 15);
    assert_eq!(green.duty.get(), 0);
    assert_eq!(blue.duty.get(), 255);
    assert_eq!(led.brightness(), (15, 0, 255));
}

#[test]
fn brightness_scales_on_buzzer_slice() {
    // Blue shares its slice with the buzzer on the reference board.
    let blue = Probe::new(BUZZER_TOP);
    let mut led = StatusLed::new(
        Probe::new(STATUS_LED_TOP),
        Probe::new(STATUS_LED_TOP),
        blue.clone(),
    );

    led.set_brightness(0, 0, 15).expect("infallible outputs");
    assert_eq!(blue.duty.get(), 735);
}

#[test]
fn off_zeroes_every_channel() {
    let probes = [
        Probe::new(STATUS_LED_TOP),
        Probe::new(STATUS_LED_TOP),
        Probe::new(BUZZER_TOP),
    ];
    let [red, green, blue] = probes.clone();
    let mut led = StatusLed::new(red, green, blue);

    led.set_brightness(15, 15, 15).expect("infallible outputs");
    led.off().expect("infallible outputs");
    assert!(probes.iter().all(|probe| probe.duty.get() == 0));
    assert_eq!(led.brightness(), (0, 0, 0));
}

#[test]
fn buzzer_tone_is_half_duty() {
    let output = Probe::new(BUZZER_TOP);
    let mut buzzer = Buzzer::new(output.clone());
    assert!(!buzzer.is_active());

    buzzer.set_tone(true).expect("infallible output");
    assert_eq!(output.duty.get(), BUZZER_TOP / 2);
    assert!(buzzer.is_active());

    buzzer.set_tone(false).expect("infallible output");
    assert_eq!(output.duty.get(), 0);
    assert!(!buzzer.is_active());
}

#[test]
fn failing_output_reports_pwm_error() {
    let mut buzzer = Buzzer::new(BrokenOutput);
    let result = buzzer.set_tone(true);
    assert!(matches!(result, Err(Error::Pwm(ErrorKind::Other))));
    assert!(!buzzer.is_active());
}
