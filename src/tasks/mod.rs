// Long-running cooperative tasks started by the boot sequence.

pub mod heartbeat;

pub use heartbeat::{Heartbeat, StartError};
