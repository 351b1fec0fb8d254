#![no_std]
#![no_main]

use embassy_executor::Spawner;

#[cfg(feature = "defmt")]
use defmt_rtt as _;
#[cfg(feature = "defmt")]
use panic_probe as _;
#[cfg(not(feature = "defmt"))]
use panic_reset as _;

use ferris_app::battery::BatteryMonitor;
use ferris_app::board::FerrisBoard;
use ferris_app::status::StatusLeds;
use ferris_app::{ble, sensor, FW_VERSION};
use ferris_motion::{Monitor, ThrottleConfig};

/// Fault LED flashes before a reset after a failed bring-up.
const FAULT_BLINKS: u8 = 5;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    #[cfg(feature = "defmt")]
    defmt::info!("ferris {}", FW_VERSION);
    #[cfg(not(feature = "defmt"))]
    let _ = FW_VERSION;

    let board = FerrisBoard::default();
    let mut leds = StatusLeds::new(board.leds);

    let controller = match ble::start_controller(
        spawner,
        board.ble,
        board.timer0,
        board.rng,
    ) {
        Ok(controller) => controller,
        Err(_e) => {
            #[cfg(feature = "defmt")]
            defmt::error!("BLE controller failed to start: {:?}", _e);
            fault_reset(&mut leds).await
        }
    };

    let mut sensor = sensor::configure(board.twim);
    if let Err(_e) = sensor::bring_up(&mut sensor).await {
        #[cfg(feature = "defmt")]
        defmt::error!("MPU6050 bring-up failed: {:?}", _e);
        fault_reset(&mut leds).await
    }
    let mut monitor = Monitor::new(sensor, ThrottleConfig::default());
    let mut battery = BatteryMonitor::new(board.saadc).await;

    if let Err(_e) =
        ble::run(controller, &mut monitor, &mut battery, &mut leds).await
    {
        #[cfg(feature = "defmt")]
        defmt::error!("BLE host failed: {:?}", _e);
    }
    fault_reset(&mut leds).await
}

/// Signal the fault and start over from a clean reset.
async fn fault_reset(leds: &mut StatusLeds) -> ! {
    leds.blink_fault(FAULT_BLINKS).await;
    cortex_m::peripheral::SCB::sys_reset()
}
