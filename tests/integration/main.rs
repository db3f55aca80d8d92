//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock pins and a manual clock.  All tests run on the host
//! (x86_64) with no real hardware required.

mod button_flow_tests;
mod mock_hw;
mod poll_loop_tests;
