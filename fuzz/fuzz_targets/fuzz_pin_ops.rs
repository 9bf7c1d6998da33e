//! Fuzz target: pin layer + debounce filters
//!
//! Decodes arbitrary bytes into GPIO operations and filter samples.  The
//! pin layer must never panic, operations on out-of-range pins must leave
//! the table untouched, and the edge filter must never confirm a press the
//! level filter did not accept on the same sample.
//!
//! cargo fuzz run fuzz_pin_ops

#![no_main]

use embassy_time::{Duration, Instant};
use ledsim::debounce::{EdgeFilter, LevelFilter};
use ledsim::gpio::{Gpio, Level, Mode, PinId, Pull, SimGpio, StimulusSink};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut gpio: SimGpio = SimGpio::new();
    let mut level = LevelFilter::new();
    let mut edge = EdgeFilter::new();
    let window = Duration::from_millis(u64::from(data.first().copied().unwrap_or(50)));
    let mut t = 0u64;

    for op in data.chunks_exact(3) {
        let pin = PinId(op[1]);
        let arg = op[2];
        let before = gpio.clone();
        let valid = pin.index() < gpio.pin_count();

        match op[0] % 7 {
            0 => gpio.init(),
            1 => {
                let mode = if arg & 1 == 0 { Mode::Input } else { Mode::Output };
                let _ = gpio.set_mode(pin, mode);
            }
            2 => {
                let pull = match arg % 3 {
                    0 => Pull::NoPull,
                    1 => Pull::PullUp,
                    _ => Pull::PullDown,
                };
                let _ = gpio.set_pull(pin, pull);
            }
            3 => {
                let _ = gpio.write(pin, Level::from_raw(i32::from(arg as i8)));
            }
            4 => {
                let _ = gpio.read(pin);
            }
            5 => gpio.simulate_input(pin, Level::from(arg & 1 == 1)),
            _ => {
                // Sample the pin through both filters `arg` ms later.
                t += u64::from(arg);
                let raw = gpio.read_or_low(pin);
                let now = Instant::from_millis(t);
                let was = level.stable();
                let stable = level.update(raw, window, now);
                let fired = edge.update(raw, window, now);
                assert_eq!(fired, was == Level::Low && stable == Level::High);
            }
        }

        if !valid && op[0] % 7 != 0 {
            assert_eq!(gpio, before, "op {} on invalid pin {} mutated state", op[0] % 7, pin);
        }
    }
});
