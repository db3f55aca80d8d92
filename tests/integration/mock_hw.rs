//! Mock pins for integration tests.
//!
//! Inputs are driven from the test body through a shared cell; outputs
//! record every level they were driven to so tests can assert on the full
//! history without real GPIO.

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin, StatefulOutputPin};

// ── MockInput ─────────────────────────────────────────────────

/// Input pin whose electrical level is set by the test.
#[derive(Clone)]
pub struct MockInput {
    level: Rc<Cell<bool>>,
    fail: Rc<Cell<bool>>,
}

#[allow(dead_code)]
impl MockInput {
    pub fn new(high: bool) -> Self {
        Self {
            level: Rc::new(Cell::new(high)),
            fail: Rc::new(Cell::new(false)),
        }
    }

    pub fn set_high(&self) {
        self.level.set(true);
    }

    pub fn set_low(&self) {
        self.level.set(false);
    }

    pub fn set(&self, high: bool) {
        self.level.set(high);
    }

    /// Make subsequent reads fail until cleared.
    pub fn set_failing(&self, fail: bool) {
        self.fail.set(fail);
    }
}

impl ErrorType for MockInput {
    type Error = ErrorKind;
}

impl InputPin for MockInput {
    fn is_high(&mut self) -> Result<bool, ErrorKind> {
        if self.fail.get() {
            return Err(ErrorKind::Other);
        }
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, ErrorKind> {
        self.is_high().map(|h| !h)
    }
}

// ── MockLed ───────────────────────────────────────────────────

/// Output pin that records every level it was driven to.
#[derive(Clone, Default)]
pub struct MockLed {
    history: Rc<RefCell<Vec<bool>>>,
}

#[allow(dead_code)]
impl MockLed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_lit(&self) -> bool {
        self.history.borrow().last().copied().unwrap_or(false)
    }

    pub fn history(&self) -> Vec<bool> {
        self.history.borrow().clone()
    }
}

impl ErrorType for MockLed {
    type Error = Infallible;
}

impl OutputPin for MockLed {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.history.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.history.borrow_mut().push(true);
        Ok(())
    }
}

impl StatefulOutputPin for MockLed {
    fn is_set_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.is_lit())
    }

    fn is_set_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.is_lit())
    }
}
