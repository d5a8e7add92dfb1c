//! RTTY Beacon Main Application
//!
//! Entry point for the STM32G474 beacon firmware. Sets up the radio keying
//! pin, runs the keying task from a high-priority interrupt executor at the
//! baud period, and polls the cooperative scheduler from thread mode.

#![no_std]
#![no_main]

use defmt::{info, unwrap, warn};
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::{InterruptExt, Priority};
use embassy_time::{Duration, Instant, Ticker, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use rtty_beacon::prelude::*;

/// Message hand-off buffer, created once at startup
static PAYLOAD: StaticCell<SharedPayload> = StaticCell::new();

/// Executor for the keying task, preempts thread mode
///
/// Runs from the otherwise unused `UART4` vector.
static KEYING_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn UART4() {
    KEYING_EXECUTOR.on_interrupt();
}

/// Millisecond uptime from the embassy time driver
struct UptimeClock;

impl Clock for UptimeClock {
    #[allow(clippy::cast_possible_truncation)]
    fn now(&self) -> Millis {
        // Truncation to u32 wraps like millis()
        Millis::new(Instant::now().as_millis() as u32)
    }
}

/// Keying task - one bit per baud period
#[embassy_executor::task]
async fn keying_task(mut driver: TickDriver<&'static SharedPayload, Output<'static>>) {
    let mut ticker = Ticker::every(Duration::from_micros(u64::from(BIT_PERIOD_US)));
    loop {
        ticker.next().await;
        if let Err(TxError::Fault) = driver.on_tick() {
            warn!("keying: radio pin write failed");
        }
    }
}

/// NVIC priority of the keying executor
const KEYING_PRIORITY: Priority = Priority::P6;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("RTTY Beacon Firmware v{}", env!("CARGO_PKG_VERSION"));

    let config = embassy_stm32::Config::default();
    let p = embassy_stm32::init(config);

    // Radio data line idles at mark
    let radio = Output::new(p.PA0, Level::High, Speed::Low);

    let payload: &'static SharedPayload = PAYLOAD.init(SharedPayload::new());

    interrupt::UART4.set_priority(KEYING_PRIORITY);
    let keying = KEYING_EXECUTOR.start(interrupt::UART4);
    let driver = TickDriver::with_format(payload, radio, FRAME_FORMAT);
    unwrap!(keying.spawn(keying_task(driver)));

    info!("Keying at {} baud, {} frame", BAUD_RATE, FRAME_FORMAT);

    let mut beacon = ScheduledTask::new(BeaconTask::new(payload, BEACON_TEXT));
    beacon.schedule(Millis::ZERO);

    let mut scheduler: Scheduler<'_, 1> = Scheduler::new();
    unwrap!(scheduler.add(&mut beacon).ok());

    info!("Tasks scheduled, entering main loop");

    let clock = UptimeClock;
    loop {
        scheduler.poll(clock.now());
        Timer::after(Duration::from_millis(POLL_INTERVAL_MS)).await;
    }
}
