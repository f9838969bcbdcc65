//! One-shot hardware peripheral initialization.
//!
//! Configures the LEDC timer/channels for the LED bank and the ADC unit
//! for the potentiometer using raw ESP-IDF sys calls.  Each firmware
//! image calls only the init it needs, once, before its main loop.
//!
//! On non-espidf targets every function is a no-op so the drivers above
//! can be exercised on the host.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.  Carries the
/// ESP-IDF return code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    LedcTimerFailed(i32),
    LedcChannelFailed { channel: u32, rc: i32 },
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC init failed (rc={})", rc),
            Self::LedcTimerFailed(rc) => write!(f, "LEDC timer config failed (rc={})", rc),
            Self::LedcChannelFailed { channel, rc } => {
                write!(f, "LEDC channel {} config failed (rc={})", channel, rc)
            }
        }
    }
}

impl std::error::Error for HwInitError {}

// ── LEDC PWM (LED bank) ──────────────────────────────────────

/// Configure timer 0 and one low-speed channel per LED, all at duty 0.
#[cfg(target_os = "espidf")]
pub fn init_led_pwm() -> Result<(), HwInitError> {
    let timer = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_8_BIT,
        freq_hz: pins::LED_PWM_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    // SAFETY: called once from main() before the HTTP server starts;
    // nothing else touches the LEDC peripheral yet.
    let ret = unsafe { ledc_timer_config(&timer) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::LedcTimerFailed(ret));
    }

    for (i, &gpio) in pins::LED_PINS.iter().enumerate() {
        let channel = ledc_channel_t_LEDC_CHANNEL_0 + i as u32;
        let cfg = ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel,
            timer_sel: ledc_timer_t_LEDC_TIMER_0,
            gpio_num: gpio,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        };
        // SAFETY: same single-threaded init path as above.
        let ret = unsafe { ledc_channel_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::LedcChannelFailed { channel, rc: ret });
        }
    }

    info!(
        "hw_init: LEDC configured ({} channels, {} Hz, {}-bit)",
        pins::LED_PINS.len(),
        pins::LED_PWM_FREQ_HZ,
        pins::PWM_RESOLUTION_BITS
    );
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_led_pwm() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): LEDC init skipped");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty: u8) {
    // SAFETY: LEDC channels were configured in init_led_pwm(); duty
    // register writes come only from the httpd task.
    unsafe {
        ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, duty as u32);
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(_channel: u32, _duty: u8) {}

// ── ADC (oneshot, potentiometer) ─────────────────────────────

#[cfg(target_os = "espidf")]
static POT_ADC_HANDLE: core::sync::atomic::AtomicPtr<adc_oneshot_unit_ctx_t> =
    core::sync::atomic::AtomicPtr::new(core::ptr::null_mut());

/// Bring up ADC2 and configure the potentiometer channel (12-bit, 12 dB).
#[cfg(target_os = "espidf")]
pub fn init_potentiometer_adc() -> Result<(), HwInitError> {
    use core::sync::atomic::Ordering;

    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_2,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    let mut handle: adc_oneshot_unit_handle_t = core::ptr::null_mut();
    // SAFETY: `handle` is a valid out-pointer for the duration of the call.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &mut handle) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    // SAFETY: `handle` was just returned by adc_oneshot_new_unit.
    let ret = unsafe { adc_oneshot_config_channel(handle, pins::POT_ADC_CHANNEL, &chan_cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    POT_ADC_HANDLE.store(handle, Ordering::Release);
    info!("hw_init: ADC2 CH{} configured (GPIO {})", pins::POT_ADC_CHANNEL, pins::POT_ADC_GPIO);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_potentiometer_adc() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ADC init skipped");
    Ok(())
}

/// Raw potentiometer reading.  Returns 0 if the ADC is not initialised
/// or the read fails.
#[cfg(target_os = "espidf")]
pub fn pot_adc_read() -> u16 {
    use core::sync::atomic::Ordering;

    let handle = POT_ADC_HANDLE.load(Ordering::Acquire);
    if handle.is_null() {
        return 0;
    }
    let mut raw: i32 = 0;
    // SAFETY: handle is non-null and was produced by init_potentiometer_adc();
    // the potentiometer image reads from a single task.
    let ret = unsafe { adc_oneshot_read(handle, pins::POT_ADC_CHANNEL, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.max(0) as u16
}
