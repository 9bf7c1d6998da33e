//! Debounce filters fed from the pin layer through a clock port.

use embassy_time::Duration;
use ledsim::debounce::{EdgeFilter, LevelFilter};
use ledsim::gpio::{Gpio, Level, Mode, Pull, SimGpio, StimulusSink};
use ledsim::pins::{BUTTON, LED};

use super::mock_hw::ManualClock;

const WINDOW: Duration = Duration::from_millis(50);

fn board() -> SimGpio {
    let mut gpio = SimGpio::new();
    gpio.init();
    gpio.set_mode(BUTTON, Mode::Input).unwrap();
    gpio.set_pull(BUTTON, Pull::PullDown).unwrap();
    gpio.set_mode(LED, Mode::Output).unwrap();
    gpio
}

#[test]
fn held_button_is_accepted_after_fifty_ms() {
    let mut gpio = board();
    let clock = ManualClock::at(0);
    let mut filter = LevelFilter::new();

    gpio.simulate_input(BUTTON, Level::High);
    // The window starts at the first observation of the new level.
    assert_eq!(filter.poll(gpio.read_or_low(BUTTON), WINDOW, &clock), Level::Low);
    for _ in 0..4 {
        clock.advance_ms(10);
        assert_eq!(filter.poll(gpio.read_or_low(BUTTON), WINDOW, &clock), Level::Low);
    }

    clock.advance_ms(10);
    let stable = filter.poll(gpio.read_or_low(BUTTON), WINDOW, &clock);
    assert_eq!(stable, Level::High);
    gpio.write(LED, stable).unwrap();
    assert_eq!(gpio.read(LED), Ok(Level::High));

    for _ in 0..10 {
        clock.advance_ms(10);
        assert_eq!(filter.poll(gpio.read_or_low(BUTTON), WINDOW, &clock), Level::High);
    }
}

#[test]
fn contact_bounce_never_reaches_the_led() {
    let mut gpio = board();
    let clock = ManualClock::at(0);
    let mut filter = LevelFilter::new();

    // Chatter every 10 ms for half a second.
    for i in 0..50u64 {
        gpio.simulate_input(BUTTON, Level::from(i % 3 != 0));
        let stable = filter.poll(gpio.read_or_low(BUTTON), WINDOW, &clock);
        gpio.write(LED, stable).unwrap();
        assert_eq!(gpio.read(LED), Ok(Level::Low), "bounce leaked at t={}ms", i * 10);
        clock.advance_ms(10);
    }
}

#[test]
fn release_is_debounced_too() {
    let clock = ManualClock::at(1_000);
    let mut filter = LevelFilter::new();

    filter.poll(Level::High, WINDOW, &clock);
    clock.advance_ms(50);
    assert_eq!(filter.poll(Level::High, WINDOW, &clock), Level::High);

    clock.advance_ms(10);
    assert_eq!(filter.poll(Level::Low, WINDOW, &clock), Level::High);
    clock.advance_ms(49);
    assert_eq!(filter.poll(Level::Low, WINDOW, &clock), Level::High);
    clock.advance_ms(1);
    assert_eq!(filter.poll(Level::Low, WINDOW, &clock), Level::Low);
}

#[test]
fn settled_signal_does_not_bank_stability() {
    let clock = ManualClock::at(0);
    let mut filter = LevelFilter::new();

    // Long quiet spell at the accepted level.
    for _ in 0..100 {
        filter.poll(Level::Low, WINDOW, &clock);
        clock.advance_ms(10);
    }
    // A new level still needs a full window of its own.
    assert_eq!(filter.poll(Level::High, WINDOW, &clock), Level::Low);
    clock.advance_ms(40);
    assert_eq!(filter.poll(Level::High, WINDOW, &clock), Level::Low);
}

#[test]
fn independent_filters_do_not_interfere() {
    let clock = ManualClock::at(0);
    let mut a = LevelFilter::new();
    let mut b = LevelFilter::new();

    a.poll(Level::High, WINDOW, &clock);
    clock.advance_ms(50);
    assert_eq!(b.poll(Level::Low, WINDOW, &clock), Level::Low);
    assert_eq!(a.poll(Level::High, WINDOW, &clock), Level::High);
    assert_eq!(b.stable(), Level::Low);
}

#[test]
fn edge_counts_each_clean_press_once() {
    let clock = ManualClock::at(0);
    let mut edge = EdgeFilter::new();
    let mut presses = 0;

    // Three presses: 100 ms down, 100 ms up, sampled every 5 ms.
    for cycle in 0..3 {
        for t in (0..200).step_by(5) {
            clock.set_ms(cycle * 200 + t);
            if edge.poll(Level::from(t < 100), WINDOW, &clock) {
                presses += 1;
            }
        }
    }
    assert_eq!(presses, 3);
}

#[test]
fn edge_ignores_short_taps() {
    let clock = ManualClock::at(0);
    let mut edge = EdgeFilter::new();

    for t in (0..1_000).step_by(5) {
        clock.set_ms(t);
        // 30 ms taps every 100 ms.
        assert!(!edge.poll(Level::from(t % 100 < 30), WINDOW, &clock));
    }
    assert_eq!(edge.stable(), Level::Low);
}
