//! GPIO / peripheral pin assignments for the ESP32 dev board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// LED bank (one LEDC channel per LED, 220 Ω series resistor each)
// ---------------------------------------------------------------------------

/// Number of controllable LEDs.  Fixed for the lifetime of the firmware.
pub const LED_COUNT: usize = 8;

/// Output GPIOs, in channel-index order.  LED `i` is driven by LEDC
/// channel `i` on the low-speed timer.
pub const LED_PINS: [i32; LED_COUNT] = [2, 4, 5, 18, 19, 21, 22, 23];

/// LEDC channel bound to `gpio`, or `None` if the GPIO is not an LED pin.
pub fn ledc_channel_for(gpio: i32) -> Option<u32> {
    LED_PINS
        .iter()
        .position(|&p| p == gpio)
        .map(|i| i as u32)
}

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// LEDC base frequency for the LED bank (5 kHz, flicker-free).
pub const LED_PWM_FREQ_HZ: u32 = 5_000;

// ---------------------------------------------------------------------------
// Potentiometer (separate firmware image, see `bin/potentiometer.rs`)
// ---------------------------------------------------------------------------

/// Wiper of a 10 kΩ potentiometer between 3V3 and GND.
/// GPIO 4 is ADC2 channel 0 on the ESP32; ADC2 is usable because the
/// potentiometer image never starts the Wi-Fi radio.
pub const POT_ADC_GPIO: i32 = 4;
pub const POT_ADC_CHANNEL: u32 = 0;
