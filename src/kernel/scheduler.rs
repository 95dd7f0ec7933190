// Cooperative suspend/resume scheduler
// NOTE: No dynamic allocation, tasks are borrowed into a fixed-size slot table
//
// A task runs from its resume point up to its next suspension and hands a
// Step back. The run loop calls run_ready() with the current uptime; every
// task whose wake time has passed is resumed once per pass.
use core::fmt;

use log::debug;

/// What a task asks for when it gives control back to the run loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Resume no earlier than this many milliseconds from now.
    SuspendFor(u32),
    /// Task has ended, its slot is freed.
    Finished,
}

/// The one suspension primitive: yield to the run loop and come back after
/// at least `duration_ms`.
#[inline]
pub const fn suspend_for(duration_ms: u32) -> Step {
    Step::SuspendFor(duration_ms)
}

/// A unit of cooperative work.
pub trait Task {
    fn name(&self) -> &'static str;

    /// Run from the current resume point up to the next suspension.
    fn resume(&mut self) -> Step;

    /// Called once when the task is cancelled, before its slot is freed.
    fn cancel(&mut self) {}
}

/// Identifies a registered task. Stale handles (task finished or cancelled,
/// slot reused) are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskHandle {
    slot: u16,
    generation: u16,
}

impl TaskHandle {
    pub const fn slot(&self) -> usize {
        self.slot as usize
    }
}

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}.{}", self.slot, self.generation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleError {
    /// Every slot is occupied.
    Full,
    /// The handle does not name a live task.
    UnknownTask(TaskHandle),
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::Full => write!(f, "task table full"),
            ScheduleError::UnknownTask(handle) => write!(f, "no such task {}", handle),
        }
    }
}

struct Slot<'a> {
    task: &'a mut dyn Task,
    wake_at: u64,
    generation: u16,
}

pub struct Scheduler<'a, const N: usize> {
    slots: [Option<Slot<'a>>; N],
    // bumped every time a slot is freed
    generations: [u16; N],
}

impl<'a, const N: usize> Scheduler<'a, N> {
    pub const fn new() -> Self {
        Self {
            slots: [const { None }; N],
            generations: [0; N],
        }
    }

    /// Add a task to the run loop. It is ready at `now`, so the first pass
    /// of run_ready() dispatches it.
    pub fn register(
        &mut self,
        task: &'a mut dyn Task,
        now: u64,
    ) -> Result<TaskHandle, ScheduleError> {
        let Some(index) = self.slots.iter().position(Option::is_none) else {
            return Err(ScheduleError::Full);
        };

        let handle = TaskHandle {
            slot: index as u16,
            generation: self.generations[index],
        };
        debug!("sched: register {} as {}", task.name(), handle);

        self.slots[index] = Some(Slot {
            task,
            wake_at: now,
            generation: handle.generation,
        });
        Ok(handle)
    }

    /// Resume every task whose wake time is at or before `now`, each at
    /// most once. Returns how many were dispatched.
    ///
    /// Order among tasks that become ready at the same tick follows slot
    /// order; callers must not rely on it.
    pub fn run_ready(&mut self, now: u64) -> usize {
        let mut dispatched = 0;

        for (index, entry) in self.slots.iter_mut().enumerate() {
            let Some(slot) = entry else {
                continue;
            };
            if slot.wake_at > now {
                continue;
            }

            dispatched += 1;
            match slot.task.resume() {
                Step::SuspendFor(ms) => {
                    slot.wake_at = now.saturating_add(ms as u64);
                }
                Step::Finished => {
                    debug!("sched: {} finished", slot.task.name());
                    *entry = None;
                    self.generations[index] = self.generations[index].wrapping_add(1);
                }
            }
        }

        dispatched
    }

    /// Earliest wake time among registered tasks.
    pub fn next_wake(&self) -> Option<u64> {
        self.slots.iter().flatten().map(|slot| slot.wake_at).min()
    }

    pub fn wake_at(&self, handle: TaskHandle) -> Option<u64> {
        self.live(handle).map(|slot| slot.wake_at)
    }

    /// Cancel a task: its cancel() hook runs, then the slot is freed.
    pub fn cancel(&mut self, handle: TaskHandle) -> Result<(), ScheduleError> {
        if self.live(handle).is_none() {
            return Err(ScheduleError::UnknownTask(handle));
        }

        let index = handle.slot();
        if let Some(slot) = self.slots[index].take() {
            debug!("sched: cancel {} ({})", slot.task.name(), handle);
            slot.task.cancel();
        }
        self.generations[index] = self.generations[index].wrapping_add(1);
        Ok(())
    }

    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.live(handle).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    fn live(&self, handle: TaskHandle) -> Option<&Slot<'a>> {
        self.slots
            .get(handle.slot())?
            .as_ref()
            .filter(|slot| slot.generation == handle.generation)
    }
}

impl<const N: usize> Default for Scheduler<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;

    // Suspends for a fixed delay and logs each resume into a shared trace.
    struct Ticker<'t> {
        name: &'static str,
        delay_ms: u32,
        runs_left: Option<u32>,
        trace: &'t RefCell<Vec<&'static str>>,
        cancelled: bool,
    }

    impl<'t> Ticker<'t> {
        fn new(name: &'static str, delay_ms: u32, trace: &'t RefCell<Vec<&'static str>>) -> Self {
            Self {
                name,
                delay_ms,
                runs_left: None,
                trace,
                cancelled: false,
            }
        }

        fn finishing_after(mut self, runs: u32) -> Self {
            self.runs_left = Some(runs);
            self
        }
    }

    impl Task for Ticker<'_> {
        fn name(&self) -> &'static str {
            self.name
        }

        fn resume(&mut self) -> Step {
            self.trace.borrow_mut().push(self.name);
            match self.runs_left.as_mut() {
                Some(0) => Step::Finished,
                Some(n) => {
                    *n -= 1;
                    suspend_for(self.delay_ms)
                }
                None => suspend_for(self.delay_ms),
            }
        }

        fn cancel(&mut self) {
            self.cancelled = true;
        }
    }

    #[test]
    fn registered_task_runs_on_first_pass() {
        let trace = RefCell::new(Vec::new());
        let mut a = Ticker::new("a", 50, &trace);
        let mut sched: Scheduler<'_, 4> = Scheduler::new();

        let handle = sched.register(&mut a, 0).unwrap();
        assert!(sched.is_scheduled(handle));
        assert!(trace.borrow().is_empty());

        assert_eq!(sched.run_ready(0), 1);
        assert_eq!(*trace.borrow(), ["a"]);
        assert_eq!(sched.wake_at(handle), Some(50));
    }

    #[test]
    fn task_is_not_resumed_before_its_delay() {
        let trace = RefCell::new(Vec::new());
        let mut a = Ticker::new("a", 100, &trace);
        let mut sched: Scheduler<'_, 2> = Scheduler::new();
        sched.register(&mut a, 0).unwrap();

        sched.run_ready(0);
        assert_eq!(sched.run_ready(99), 0);
        assert_eq!(sched.run_ready(100), 1);
        assert_eq!(trace.borrow().len(), 2);
    }

    #[test]
    fn late_dispatch_measures_delay_from_actual_resume() {
        let trace = RefCell::new(Vec::new());
        let mut a = Ticker::new("a", 100, &trace);
        let mut sched: Scheduler<'_, 2> = Scheduler::new();
        let handle = sched.register(&mut a, 0).unwrap();

        sched.run_ready(0);
        sched.run_ready(130);
        assert_eq!(sched.wake_at(handle), Some(230));
    }

    #[test]
    fn zero_delay_task_does_not_starve_others() {
        let trace = RefCell::new(Vec::new());
        let mut busy = Ticker::new("busy", 0, &trace);
        let mut other = Ticker::new("other", 0, &trace);
        let mut sched: Scheduler<'_, 2> = Scheduler::new();
        sched.register(&mut busy, 0).unwrap();
        sched.register(&mut other, 0).unwrap();

        assert_eq!(sched.run_ready(0), 2);
        assert_eq!(sched.run_ready(0), 2);
        assert_eq!(*trace.borrow(), ["busy", "other", "busy", "other"]);
    }

    #[test]
    fn next_wake_is_earliest_pending() {
        let trace = RefCell::new(Vec::new());
        let mut slow = Ticker::new("slow", 300, &trace);
        let mut fast = Ticker::new("fast", 20, &trace);
        let mut sched: Scheduler<'_, 4> = Scheduler::new();
        assert_eq!(sched.next_wake(), None);

        sched.register(&mut slow, 0).unwrap();
        sched.register(&mut fast, 0).unwrap();
        sched.run_ready(0);
        assert_eq!(sched.next_wake(), Some(20));
    }

    #[test]
    fn full_table_rejects_registration() {
        let trace = RefCell::new(Vec::new());
        let mut a = Ticker::new("a", 10, &trace);
        let mut b = Ticker::new("b", 10, &trace);
        let mut sched: Scheduler<'_, 1> = Scheduler::new();

        sched.register(&mut a, 0).unwrap();
        assert_eq!(sched.register(&mut b, 0), Err(ScheduleError::Full));
        assert_eq!(sched.len(), 1);
        assert_eq!(sched.capacity(), 1);
    }

    #[test]
    fn finished_task_frees_its_slot() {
        let trace = RefCell::new(Vec::new());
        let mut once = Ticker::new("once", 10, &trace).finishing_after(1);
        let mut sched: Scheduler<'_, 1> = Scheduler::new();
        let handle = sched.register(&mut once, 0).unwrap();

        sched.run_ready(0);
        assert!(sched.is_scheduled(handle));
        sched.run_ready(10);
        assert!(!sched.is_scheduled(handle));
        assert!(sched.is_empty());
        assert_eq!(sched.next_wake(), None);
    }

    #[test]
    fn cancel_runs_hook_and_invalidates_handle() {
        let trace = RefCell::new(Vec::new());
        let mut a = Ticker::new("a", 10, &trace);
        {
            let mut sched: Scheduler<'_, 2> = Scheduler::new();
            let handle = sched.register(&mut a, 0).unwrap();
            sched.run_ready(0);

            assert_eq!(sched.cancel(handle), Ok(()));
            assert!(!sched.is_scheduled(handle));
            assert_eq!(sched.cancel(handle), Err(ScheduleError::UnknownTask(handle)));
            assert_eq!(sched.run_ready(1_000), 0);
        }
        assert!(a.cancelled);
    }

    #[test]
    fn stale_handle_does_not_alias_reused_slot() {
        let trace = RefCell::new(Vec::new());
        let mut a = Ticker::new("a", 10, &trace);
        let mut b = Ticker::new("b", 10, &trace);
        let mut sched: Scheduler<'_, 1> = Scheduler::new();

        let old = sched.register(&mut a, 0).unwrap();
        sched.cancel(old).unwrap();
        let new = sched.register(&mut b, 0).unwrap();

        assert_eq!(old.slot(), new.slot());
        assert_ne!(old, new);
        assert!(!sched.is_scheduled(old));
        assert!(sched.is_scheduled(new));
        assert!(sched.cancel(old).is_err());
        assert!(sched.is_scheduled(new));
    }
}
