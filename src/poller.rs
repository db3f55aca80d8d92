//! The polling loop.
//!
//! One pass ("poll tick") calls `check()` on every observable in the
//! order they were added.  There is no scheduling beyond that: timer
//! accuracy and input responsiveness are bounded by how often passes run.
//!
//! ```text
//! loop {
//!     for observable in observables {   // insertion order
//!         observable.check();           // may notify observers
//!     }
//!     delay(tick_delay_ms);             // skipped when 0
//! }
//! ```

use core::time::Duration;

use embedded_hal::delay::DelayNs;
use log::{debug, info};

use crate::config::PollConfig;
use crate::observable::Observable;

/// Ordered collection of observables plus the loop that drives them.
pub struct Poller {
    observables: Vec<Observable>,
    config: PollConfig,
    passes: u64,
}

impl Default for Poller {
    fn default() -> Self {
        Self::new(PollConfig::default())
    }
}

impl Poller {
    pub fn new(config: PollConfig) -> Self {
        Self {
            observables: Vec::new(),
            config,
            passes: 0,
        }
    }

    /// Append an observable.  Returns its position in the pass order.
    pub fn add(&mut self, observable: Observable) -> usize {
        debug!(
            "Poller: added '{}' at position {}",
            observable.name(),
            self.observables.len()
        );
        self.observables.push(observable);
        self.observables.len() - 1
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Observable> {
        self.observables.get_mut(index)
    }

    /// First observable with the given name.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Observable> {
        self.observables.iter_mut().find(|o| o.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observable> {
        self.observables.iter()
    }

    pub fn len(&self) -> usize {
        self.observables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observables.is_empty()
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Number of completed passes.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Run one pass.  Returns how many observables fired.
    pub fn poll_once(&mut self) -> usize {
        let mut fired = 0;
        for observable in &mut self.observables {
            if observable.check() {
                fired += 1;
            }
        }
        self.passes += 1;
        fired
    }

    /// Poll forever.  Sleeps `tick_delay_ms` between passes when non-zero.
    pub fn run(&mut self, delay: &mut impl DelayNs) -> ! {
        info!(
            "Poller: running {} observables, tick delay {}ms",
            self.observables.len(),
            self.config.tick_delay_ms
        );
        loop {
            self.poll_once();
            if self.config.tick_delay_ms > 0 {
                delay.delay_ms(self.config.tick_delay_ms);
            }
        }
    }
}

/// `DelayNs` backed by `std::thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}
