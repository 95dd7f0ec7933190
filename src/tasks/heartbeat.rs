// Heartbeat: "alive" blink on a status LED
//
// 2000ms dark, then a double pulse: 100ms on, 250ms off, 100ms on. The
// long idle plus two short flashes cannot be mistaken for a stuck LED or
// an even blink, and it only blinks while the run loop keeps dispatching.
//
// Written as an explicit state machine: each resume() runs the LED writes
// up to the next wait phase and hands the wait back to the scheduler.
// LED write errors are logged and counted; the cycle always goes on.

use core::fmt;

use embedded_hal::digital::OutputPin;
use log::{debug, warn};

use crate::board::led::{DeviceNotFound, LedBank};
use crate::drivers::led::{DeviceIoError, LedId, PinLed, StatusLed};
use crate::kernel::{ScheduleError, Scheduler, Step, Task, TaskHandle, suspend_for};

pub const IDLE_MS: u32 = 2000;
pub const PULSE_MS: u32 = 100;
pub const GAP_MS: u32 = 250;

/// One full pattern, wait to wait.
pub const CYCLE_MS: u32 = IDLE_MS + PULSE_MS + GAP_MS + PULSE_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    WaitLong,
    TurnOn,
    WaitShort,
    TurnOff,
    WaitMedium,
    TurnOn2,
    WaitShort2,
    TurnOff2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Suspend(u32),
    /// true = on
    Drive(bool),
}

/// The cycle in order. Phase::next() walks it and wraps around.
pub const PATTERN: [Phase; 8] = [
    Phase::WaitLong,
    Phase::TurnOn,
    Phase::WaitShort,
    Phase::TurnOff,
    Phase::WaitMedium,
    Phase::TurnOn2,
    Phase::WaitShort2,
    Phase::TurnOff2,
];

impl Phase {
    pub const fn action(self) -> Action {
        match self {
            Phase::WaitLong => Action::Suspend(IDLE_MS),
            Phase::WaitShort | Phase::WaitShort2 => Action::Suspend(PULSE_MS),
            Phase::WaitMedium => Action::Suspend(GAP_MS),
            Phase::TurnOn | Phase::TurnOn2 => Action::Drive(true),
            Phase::TurnOff | Phase::TurnOff2 => Action::Drive(false),
        }
    }

    pub const fn next(self) -> Phase {
        match self {
            Phase::WaitLong => Phase::TurnOn,
            Phase::TurnOn => Phase::WaitShort,
            Phase::WaitShort => Phase::TurnOff,
            Phase::TurnOff => Phase::WaitMedium,
            Phase::WaitMedium => Phase::TurnOn2,
            Phase::TurnOn2 => Phase::WaitShort2,
            Phase::WaitShort2 => Phase::TurnOff2,
            Phase::TurnOff2 => Phase::WaitLong,
        }
    }
}

pub struct Heartbeat<L> {
    led: L,
    phase: Phase,
    cycles: u32,
    io_errors: u32,
}

impl<L: StatusLed> Heartbeat<L> {
    pub const fn new(led: L) -> Self {
        Self {
            led,
            phase: Phase::WaitLong,
            cycles: 0,
            io_errors: 0,
        }
    }

    /// Where the next resume() starts.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Completed patterns.
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn io_errors(&self) -> u32 {
        self.io_errors
    }

    pub fn led_id(&self) -> LedId {
        self.led.id()
    }

    fn drive(&mut self, on: bool) {
        let res = if on {
            self.led.turn_on()
        } else {
            self.led.turn_off()
        };
        if let Err(e) = res {
            self.report(e);
        }
    }

    fn report(&mut self, err: DeviceIoError) {
        self.io_errors = self.io_errors.saturating_add(1);
        warn!("heartbeat: {} ({} so far)", err, self.io_errors);
    }
}

impl<L: StatusLed> Task for Heartbeat<L> {
    fn name(&self) -> &'static str {
        "heartbeat"
    }

    fn resume(&mut self) -> Step {
        // at most four phases before a wait comes up
        loop {
            let phase = self.phase;
            self.phase = phase.next();

            match phase.action() {
                Action::Suspend(ms) => return suspend_for(ms),
                Action::Drive(on) => {
                    self.drive(on);
                    if phase == Phase::TurnOff2 {
                        self.cycles = self.cycles.wrapping_add(1);
                    }
                }
            }
        }
    }

    // Never leave the LED lit after cancellation; a stuck-on LED reads as
    // alive.
    fn cancel(&mut self) {
        if let Err(e) = self.led.turn_off() {
            self.report(e);
        }
        self.phase = Phase::WaitLong;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartError {
    DeviceNotFound(LedId),
    Schedule(ScheduleError),
}

impl From<DeviceNotFound> for StartError {
    fn from(e: DeviceNotFound) -> Self {
        StartError::DeviceNotFound(e.0)
    }
}

impl From<ScheduleError> for StartError {
    fn from(e: ScheduleError) -> Self {
        StartError::Schedule(e)
    }
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartError::DeviceNotFound(id) => write!(f, "heartbeat: no led {}", id),
            StartError::Schedule(e) => write!(f, "heartbeat: {}", e),
        }
    }
}

/// Start a heartbeat on LED `led_id`.
///
/// The LED is taken from `leds` and the task is built into `storage`, which
/// must live as long as the scheduler. Nothing is written to the LED here;
/// the first dispatch only starts the long wait, so the first flash comes
/// IDLE_MS after `now` at the earliest.
///
/// Fails without claiming the LED if the task table is full.
pub fn start<'a, P, const LEDS: usize, const N: usize>(
    sched: &mut Scheduler<'a, N>,
    leds: &mut LedBank<P, LEDS>,
    led_id: LedId,
    storage: &'a mut Option<Heartbeat<PinLed<P>>>,
    now: u64,
) -> Result<TaskHandle, StartError>
where
    P: OutputPin + 'a,
{
    if sched.len() == sched.capacity() {
        return Err(ScheduleError::Full.into());
    }

    let led = leds.take(led_id)?;
    let task = storage.insert(Heartbeat::new(led));
    let handle = sched.register(task, now)?;
    debug!("heartbeat: led {} started as {}", led_id, handle);
    Ok(handle)
}
