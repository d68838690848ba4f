//! One-shot hardware peripheral initialization.
//!
//! Configures the supervisor lines and the status LED using raw ESP-IDF
//! sys calls, and registers the INT falling-edge ISR.  Called once from
//! `main()` before the poll loop starts.
//!
//! On the host every pin is an entry in an in-memory level table, so the
//! GPIO drivers above this module run unchanged in tests.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

pub use crate::error::HwInitError;

#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the poll loop; single-threaded.
    unsafe {
        init_supervisor_inputs()?;
        init_kill_output()?;
        init_led_output()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

#[cfg(target_os = "espidf")]
fn check(ret: esp_err_t) -> Result<(), HwInitError> {
    if ret != ESP_OK {
        return Err(HwInitError::GpioConfigFailed(ret));
    }
    Ok(())
}

// ── Supervisor inputs ─────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_supervisor_inputs() -> Result<(), HwInitError> {
    // RESET is push-pull from the supervisor: no pulls.
    let reset_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::RESET_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    check(unsafe { gpio_config(&reset_cfg) })?;

    // INT is open drain, active low.
    let int_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::INT_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_NEGEDGE,
    };
    check(unsafe { gpio_config(&int_cfg) })?;

    info!("hw_init: RESET/INT inputs configured");
    Ok(())
}

// ── KILL output ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_kill_output() -> Result<(), HwInitError> {
    // Latch the released level before the driver is enabled so the line
    // never glitches low during boot.
    check(unsafe { gpio_set_level(pins::KILL_GPIO, 1) })?;

    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::KILL_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT_OUTPUT_OD,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    check(unsafe { gpio_config(&cfg) })?;

    info!("hw_init: KILL configured open-drain, released");
    Ok(())
}

// ── Status LED ────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_led_output() -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::LED_GPIO,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    check(unsafe { gpio_config(&cfg) })?;
    // Off.
    check(unsafe { gpio_set_level(pins::LED_GPIO, u32::from(!pins::LED_ACTIVE_HIGH)) })?;

    info!("hw_init: LED output configured");
    Ok(())
}

// ── Level access ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured pin.
    (unsafe { gpio_get_level(pin) }) != 0
}

/// Drive `pin`; returns the ESP-IDF error code (0 = OK).
#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) -> i32 {
    // SAFETY: gpio_set_level writes to an already-configured output pin.
    // Main-loop only.
    unsafe { gpio_set_level(pin, u32::from(high)) }
}

#[cfg(not(target_os = "espidf"))]
mod sim {
    use core::sync::atomic::{AtomicBool, Ordering};

    /// ESP32-S3 exposes GPIO0..=GPIO48.
    pub const PIN_COUNT: usize = 49;

    /// Idle levels: every line pulled high.
    static LEVELS: [AtomicBool; PIN_COUNT] = [const { AtomicBool::new(true) }; PIN_COUNT];

    pub fn slot(pin: i32) -> Option<&'static AtomicBool> {
        usize::try_from(pin).ok().and_then(|i| LEVELS.get(i))
    }

    pub fn read(pin: i32) -> bool {
        slot(pin).is_some_and(|s| s.load(Ordering::Acquire))
    }

    pub fn write(pin: i32, high: bool) -> i32 {
        match slot(pin) {
            Some(s) => {
                s.store(high, Ordering::Release);
                0
            }
            // ESP_ERR_INVALID_ARG
            None => 0x102,
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    sim::read(pin)
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) -> i32 {
    sim::write(pin, high)
}

/// Force a simulated pin level (host only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_level(pin: i32, high: bool) {
    let _ = sim::write(pin, high);
}

// ── GPIO ISR Service ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe extern "C" fn fault_gpio_isr(_arg: *mut core::ffi::c_void) {
    crate::events::INTERLOCK.on_fault_edge(crate::adapters::time::uptime_ms());
}

/// Install the per-pin GPIO ISR service and register the INT handler.
/// Call after `init_peripherals()` and after the service has published its
/// boot-time power-good state.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), HwInitError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable). The handler only touches
    // the lock-free interlock atomics.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        let ret = gpio_isr_handler_add(pins::INT_GPIO, Some(fault_gpio_isr), core::ptr::null_mut());
        if ret != ESP_OK {
            return Err(HwInitError::IsrHandlerAddFailed(ret));
        }

        let ret = gpio_intr_enable(pins::INT_GPIO);
        if ret != ESP_OK {
            return Err(HwInitError::IntrEnableFailed(ret));
        }

        info!("hw_init: ISR service installed (INT falling edge)");
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}
