// Timer wake flag and uptime shared between the tick ISR and the run loop
//
// The periodic timer ISR calls signal_timer(); the run loop consumes the
// flag via take_timer_wake() and reads uptime_ms() to feed the scheduler.
// Critical section guards the uptime counter (riscv32imc has no atomic RMW).

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

/// Period of the tick timer in milliseconds. Suspensions resolve to this
/// granularity on hardware.
pub const BASE_TICK_MS: u32 = 10;

static WAKE_TIMER: AtomicBool = AtomicBool::new(false);

static UPTIME_MS: critical_section::Mutex<Cell<u64>> =
    critical_section::Mutex::new(Cell::new(0));

/// Called from the tick ISR.
#[inline]
pub fn signal_timer() {
    WAKE_TIMER.store(true, Ordering::Release);
    critical_section::with(|cs| {
        let uptime = UPTIME_MS.borrow(cs);
        uptime.set(uptime.get().wrapping_add(BASE_TICK_MS as u64));
    });
}

/// Consume the timer wake flag. Returns whether a tick arrived since the
/// last call.
pub fn take_timer_wake() -> bool {
    // no swap on riscv32imc
    critical_section::with(|_| {
        let fired = WAKE_TIMER.load(Ordering::Acquire);
        if fired {
            WAKE_TIMER.store(false, Ordering::Relaxed);
        }
        fired
    })
}

pub fn uptime_ms() -> u64 {
    critical_section::with(|cs| UPTIME_MS.borrow(cs).get())
}

#[inline]
pub fn wait_for_interrupt() {
    #[cfg(target_arch = "riscv32")]
    unsafe {
        core::arch::asm!("wfi", options(nomem, nostack));
    }

    #[cfg(not(target_arch = "riscv32"))]
    core::hint::spin_loop();
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test: the counters are process globals and tests run in
    // parallel threads.
    #[test]
    fn ticks_advance_uptime_and_set_wake_flag() {
        let before = uptime_ms();
        let _ = take_timer_wake();

        signal_timer();
        signal_timer();

        assert!(take_timer_wake());
        assert!(!take_timer_wake());
        assert_eq!(uptime_ms() - before, 2 * BASE_TICK_MS as u64);
    }
}
