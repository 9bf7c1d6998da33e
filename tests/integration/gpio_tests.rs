//! Pin-layer contract, checked against both backends.

use embedded_hal::digital::PinState;
use ledsim::GpioError;
use ledsim::gpio::{Gpio, HalGpio, Level, Mode, PinId, Pull, SimGpio, StimulusSink};
use ledsim::pins::{BUTTON, LED, PIN_COUNT};

use super::mock_hw::{Line, MockPin};

fn sim_board() -> SimGpio {
    let mut gpio = SimGpio::new();
    gpio.init();
    gpio.set_mode(LED, Mode::Output).unwrap();
    gpio.set_mode(BUTTON, Mode::Input).unwrap();
    gpio.set_pull(BUTTON, Pull::PullDown).unwrap();
    gpio
}

fn hal_board() -> HalGpio<MockPin> {
    let mut gpio = HalGpio::new([MockPin::default(), MockPin::default()]);
    gpio.init();
    gpio.set_mode(LED, Mode::Output).unwrap();
    gpio.set_mode(BUTTON, Mode::Input).unwrap();
    gpio.set_pull(BUTTON, Pull::PullDown).unwrap();
    gpio
}

/// Write/read round trip that any backend must honour.
fn assert_output_round_trip(gpio: &mut impl Gpio) {
    for raw in [0, 1, 2, -1, 0, 255] {
        let level = Level::from_raw(raw);
        gpio.write(LED, level).unwrap();
        assert_eq!(gpio.read(LED), Ok(level));
        let _ = gpio.read(BUTTON);
        let _ = gpio.read(PinId(PIN_COUNT as u8));
        assert_eq!(gpio.read(LED), Ok(level), "read-back disturbed by other reads");
    }
}

// ── SimGpio ───────────────────────────────────────────────────

#[test]
fn sim_output_round_trip() {
    assert_output_round_trip(&mut sim_board());
}

#[test]
fn sim_init_twice_equals_once() {
    let mut once = sim_board();
    once.write(LED, Level::High).unwrap();
    let mut twice = once.clone();
    once.init();
    twice.init();
    twice.init();
    assert_eq!(once, twice);
    assert_eq!(once, SimGpio::new());
}

#[test]
fn sim_every_op_rejects_out_of_range_pins() {
    let mut gpio = sim_board();
    gpio.write(LED, Level::High).unwrap();
    gpio.simulate_input(BUTTON, Level::High);
    let before = gpio.clone();

    for raw in [PIN_COUNT as u8, PIN_COUNT as u8 + 1, u8::MAX] {
        let pin = PinId(raw);
        let invalid = Err(GpioError::InvalidPin { pin });
        assert_eq!(gpio.set_mode(pin, Mode::Output), invalid);
        assert_eq!(gpio.set_pull(pin, Pull::PullUp), invalid);
        assert_eq!(gpio.write(pin, Level::High), invalid);
        assert_eq!(gpio.read(pin), Err(GpioError::InvalidPin { pin }));
        gpio.simulate_input(pin, Level::High);
    }
    assert_eq!(gpio, before);
}

#[test]
fn sim_pull_policy() {
    let mut gpio = sim_board();
    let cases = [
        (Pull::PullUp, Level::Low, Level::High),
        (Pull::PullDown, Level::Low, Level::Low),
        (Pull::NoPull, Level::Low, Level::Low),
        (Pull::PullUp, Level::High, Level::High),
        (Pull::PullDown, Level::High, Level::High),
        (Pull::NoPull, Level::High, Level::High),
    ];
    for (pull, raw, expected) in cases {
        gpio.set_pull(BUTTON, pull).unwrap();
        gpio.simulate_input(BUTTON, raw);
        assert_eq!(gpio.read(BUTTON), Ok(expected), "pull={:?} raw={:?}", pull, raw);
    }
}

#[test]
fn sim_direction_errors_leave_state_alone() {
    let mut gpio = sim_board();
    let before = gpio.clone();
    assert_eq!(
        gpio.write(BUTTON, Level::High),
        Err(GpioError::WrongDirection {
            pin: BUTTON,
            required: Mode::Output
        })
    );
    assert_eq!(
        gpio.set_pull(LED, Pull::PullUp),
        Err(GpioError::WrongDirection {
            pin: LED,
            required: Mode::Input
        })
    );
    assert_eq!(gpio, before);
}

#[test]
fn sim_stimulus_ignores_mode() {
    let mut gpio = sim_board();
    gpio.simulate_input(LED, Level::High);
    assert_eq!(gpio.slot(LED).unwrap().input_raw, Level::High);
    assert_eq!(gpio.read(LED), Ok(Level::Low));
}

// ── HalGpio ───────────────────────────────────────────────────

#[test]
fn hal_output_round_trip() {
    assert_output_round_trip(&mut hal_board());
}

#[test]
fn hal_configures_pins_like_sim() {
    let gpio = hal_board();
    let [led, button] = gpio.release();
    assert_eq!(led.mode, Mode::Output);
    assert_eq!(button.mode, Mode::Input);
    assert_eq!(button.pull, Pull::PullDown);
}

#[test]
fn hal_reads_the_line() {
    let line = Line::default();
    let mut gpio = HalGpio::new([MockPin::default(), MockPin::wired(&line)]);
    gpio.init();
    assert_eq!(gpio.read(BUTTON), Ok(Level::Low));
    line.set(Some(true));
    assert_eq!(gpio.read(BUTTON), Ok(Level::High));
    assert_eq!(PinState::from(gpio.read_or_low(BUTTON)), PinState::High);
}

#[test]
fn hal_rejections_do_not_reach_hardware() {
    let mut gpio = hal_board();
    let bad = PinId(PIN_COUNT as u8);
    assert!(gpio.set_mode(bad, Mode::Output).is_err());
    assert!(gpio.set_pull(LED, Pull::PullUp).is_err());
    assert!(gpio.write(BUTTON, Level::High).is_err());

    let [led, button] = gpio.release();
    // init + set_mode for each pin, plus set_pull on the button.
    assert_eq!(led.configure_calls, 2);
    assert_eq!(button.configure_calls, 3);
    assert!(!button.driven);
}
