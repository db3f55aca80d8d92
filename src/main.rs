//! Pollwatch demo firmware: main entry point.
//!
//! Watches the boot button and a 1 s timer from one polling loop and
//! reports every firing to the serial log.  Each firing of the button
//! observable also flips the on-board LED.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  GPIO0 (boot button, active-low) ─▶ Debouncer ─▶ rising edge │──▶ button-log  (LogSink, LED)
//! │  MonotonicClock ─────────────────────────────▶ 1000 ms timer │──▶ heartbeat   (LogSink)
//! │                                                              │
//! │                Poller::run(FreeRtos)  (forever)              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::PinDriver;
use esp_idf_hal::peripherals::Peripherals;
use log::info;

use pollwatch::indicator;
use pollwatch::{
    Context, Event, LogSink, MonotonicClock, Observable, PinIndicator, PollConfig, Poller,
    ReportingObserver, Source,
};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("pollwatch v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let button = PinDriver::input(peripherals.pins.gpio0)?;
    let led = PinDriver::output(peripherals.pins.gpio2)?;

    let config = PollConfig::default();
    let clock = MonotonicClock::handle();
    let led = indicator::shared(PinIndicator::new(led));

    // ── 3. Observables ────────────────────────────────────────
    let debounced = config.debounce(button, clock.clone()).active_low();
    let mut button_obs = Observable::with_context(
        "boot-button",
        Event::rising_edge("pressed", Some(Source::updating(debounced))),
        Context::with_indicator(led),
        clock.clone(),
    );
    ReportingObserver::attach("button-log", LogSink, &mut button_obs);

    let mut heartbeat = Observable::new("heartbeat", config.timer("tick"), clock);
    ReportingObserver::attach("heartbeat-log", LogSink, &mut heartbeat);

    // ── 4. Forever loop ───────────────────────────────────────
    let mut poller = Poller::new(config);
    poller.add(button_obs);
    poller.add(heartbeat);
    poller.run(&mut FreeRtos)
}
