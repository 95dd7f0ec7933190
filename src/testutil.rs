// Host-side stand-ins for board pins

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPinError;

impl embedded_hal::digital::Error for MockPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

#[derive(Default)]
struct PinState {
    level: Option<bool>,
    writes: Vec<bool>,
    failures: u32,
}

/// Output pin that records every write. Clones share state, so a test can
/// keep one clone while the driver owns another.
#[derive(Clone, Default)]
pub struct MockPin {
    state: Rc<RefCell<PinState>>,
}

impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current level, None until the first successful write.
    pub fn level(&self) -> Option<bool> {
        self.state.borrow().level
    }

    /// Successful writes in order, true = high.
    pub fn writes(&self) -> Vec<bool> {
        self.state.borrow().writes.clone()
    }

    /// Make the next `n` writes fail.
    pub fn fail_next(&self, n: u32) {
        self.state.borrow_mut().failures = n;
    }

    fn write(&mut self, high: bool) -> Result<(), MockPinError> {
        let mut state = self.state.borrow_mut();
        if state.failures > 0 {
            state.failures -= 1;
            return Err(MockPinError);
        }
        state.level = Some(high);
        state.writes.push(high);
        Ok(())
    }
}

impl ErrorType for MockPin {
    type Error = MockPinError;
}

impl OutputPin for MockPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }
}
