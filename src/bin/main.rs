// ruuvi-rtb entry point and run loop
//
// Boot sequence: logger -> tick timer -> board -> power manager ->
// scheduler -> heartbeat
// Run loop: dispatch ready tasks -> WFI until the next tick -> repeat
//
// The scheduler is built and the tick ISR installed here, before any task
// is registered. Nothing is started as a side effect of linking a module.
// The power manager is constructed once and handed out by reference.

#![no_std]
#![no_main]

use core::cell::RefCell;

use critical_section::Mutex;
use esp_backtrace as _;
use esp_hal::clock::CpuClock;
use esp_hal::time::Duration;
use esp_hal::timer::PeriodicTimer;
use esp_hal::timer::timg::TimerGroup;
use log::{info, warn};
use static_cell::StaticCell;

use ruuvi_rtb::board::uart::{self, UartRole};
use ruuvi_rtb::board::{Board, BoardLed, BoardPower, pins};
use ruuvi_rtb::kernel::Scheduler;
use ruuvi_rtb::kernel::wake::{self, BASE_TICK_MS, signal_timer};
use ruuvi_rtb::tasks::heartbeat::{self, Heartbeat};

esp_bootloader_esp_idf::esp_app_desc!();

const MAX_TASKS: usize = 4;

static TIMER0: Mutex<RefCell<Option<PeriodicTimer<'static, esp_hal::Blocking>>>> =
    Mutex::new(RefCell::new(None));

static POWER: StaticCell<BoardPower> = StaticCell::new();
static HEARTBEAT: StaticCell<Option<Heartbeat<BoardLed>>> = StaticCell::new();

#[esp_hal::handler(priority = esp_hal::interrupt::Priority::Priority1)]
fn timer0_handler() {
    critical_section::with(|cs| {
        if let Some(timer) = TIMER0.borrow_ref_mut(cs).as_mut() {
            timer.clear_interrupt();
        }
    });
    signal_timer();
}

#[esp_hal::main]
fn main() -> ! {
    esp_println::logger::init_logger_from_env();
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    info!("booting...");

    let timg0 = TimerGroup::new(unsafe { peripherals.TIMG0.clone_unchecked() });
    let mut timer0 = PeriodicTimer::new(timg0.timer0);
    critical_section::with(|cs| {
        timer0.set_interrupt_handler(timer0_handler);
        timer0.start(Duration::from_millis(BASE_TICK_MS as u64)).unwrap();
        timer0.listen();
        TIMER0.borrow_ref_mut(cs).replace(timer0);
    });
    info!("timer: {}ms tick", BASE_TICK_MS);

    let Board { mut leds, power } = Board::init(peripherals);
    let power: &'static mut BoardPower = POWER.init(power);
    info!("power: {}", power);

    for role in UartRole::ALL {
        match uart::channel_for(role) {
            Some(channel) => info!("uart: {} on {}", role, channel),
            None => info!("uart: {} unassigned", role),
        }
    }
    info!("hardware initialized.");

    let mut sched: Scheduler<'static, MAX_TASKS> = Scheduler::new();

    // a missing LED costs the heartbeat, not the boot
    match heartbeat::start(
        &mut sched,
        &mut leds,
        pins::HEARTBEAT_LED,
        HEARTBEAT.init(None),
        wake::uptime_ms(),
    ) {
        Ok(handle) => info!("heartbeat: led {} as {}", pins::HEARTBEAT_LED, handle),
        Err(e) => warn!("{}", e),
    }
    info!("kernel ready.");

    loop {
        sched.run_ready(wake::uptime_ms());

        while !wake::take_timer_wake() {
            wake::wait_for_interrupt();
        }
    }
}
