// Cooperative scheduler and tick/wake primitives
// Single core, no preemption. WFI idles the CPU between timer ticks.
//
// Tasks yield only by returning suspend_for(ms) from resume(); nothing in
// the kernel blocks.

pub mod scheduler;
pub mod wake;

pub use scheduler::{ScheduleError, Scheduler, Step, Task, TaskHandle, suspend_for};
