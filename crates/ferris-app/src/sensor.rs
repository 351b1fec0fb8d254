use embassy_nrf::interrupt::{self, InterruptExt};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::Timer;
use ferris_motion::mpu6050::{Address, Error, Mpu6050, SamplingConfig};
use ferris_motion::Monitor;
use static_cell::StaticCell;

use crate::board::TwimResources;

pub type Sensor = Mpu6050<Twim<'static>>;
pub type MotionMonitor = Monitor<Twim<'static>>;

/// Attempts at configuring the sensor before giving up on bring-up.
const INIT_ATTEMPTS: u8 = 5;

bind_interrupts!(struct TwimIrqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

/// Open the bus to the MPU6050. Nothing is written to the device yet.
pub fn configure(resources: TwimResources) -> Sensor {
    let mut config = twim::Config::default();
    config.frequency = twim::Frequency::K400;
    interrupt::TWISPI0.set_priority(interrupt::Priority::P3);

    static TWIM_BUF: StaticCell<[u8; 16]> = StaticCell::new();
    let twim = Twim::new(
        resources.twim,
        TwimIrqs,
        resources.sda,
        resources.scl,
        config,
        TWIM_BUF.init([0; 16]),
    );
    Mpu6050::new(twim, Address::AD0_LOW, SamplingConfig::default())
}

/// Run the reset and configuration sequence, retrying after a pause.
///
/// A failed attempt leaves the driver unusable, so every retry starts the
/// whole sequence over.
pub async fn bring_up(sensor: &mut Sensor) -> Result<(), Error<twim::Error>> {
    let mut attempt = 1;
    loop {
        match sensor.init().await {
            Ok(()) => {
                info!(
                    "[sensor] MPU6050 ready at {:#x}, {} Hz",
                    sensor.address().get(),
                    sensor.config().output_rate_hz()
                );
                return Ok(());
            }
            Err(e) if attempt < INIT_ATTEMPTS => {
                warn!("[sensor] init attempt {} failed: {:?}", attempt, e);
                attempt += 1;
                Timer::after_secs(1).await;
            }
            Err(e) => return Err(e),
        }
    }
}
