use embassy_nrf::interrupt::Priority;
use embassy_nrf::peripherals::{
    P0_13, P0_14, P0_26, P0_27, RNG, SAADC, TIMER0, TWISPI0,
};
use embassy_nrf::Peri;

use crate::ble::BleControllerBuilder;

/// MPU6050 breakout on the Arduino header I2C pins.
pub struct TwimResources {
    pub twim: Peri<'static, TWISPI0>,
    pub sda: Peri<'static, P0_26>,
    pub scl: Peri<'static, P0_27>,
}

/// On-board LEDs, both active low.
pub struct LedResources {
    /// Lit while a central is connected.
    pub link: Peri<'static, P0_13>,
    /// Blinks when the sensor could not be brought up.
    pub fault: Peri<'static, P0_14>,
}

/// Peripherals and pins used by the motion beacon.
pub struct FerrisBoard {
    pub twim: TwimResources,
    pub leds: LedResources,
    /// Supply voltage measurement for the battery service.
    pub saadc: Peri<'static, SAADC>,
    pub timer0: Peri<'static, TIMER0>,
    pub rng: Peri<'static, RNG>,
    /// Bluetooth Low Energy controller
    pub ble: BleControllerBuilder<'static>,
}

impl Default for FerrisBoard {
    fn default() -> Self {
        let mut config = embassy_nrf::config::Config::default();
        // Priorities 0, 1 and 4 are reserved for the SoftDevice Controller
        config.gpiote_interrupt_priority = Priority::P2;
        config.time_interrupt_priority = Priority::P2;
        Self::new(config)
    }
}

impl FerrisBoard {
    pub fn new(config: embassy_nrf::config::Config) -> Self {
        let p = embassy_nrf::init(config);

        Self {
            twim: TwimResources {
                twim: p.TWISPI0,
                sda: p.P0_26,
                scl: p.P0_27,
            },
            leds: LedResources {
                link: p.P0_13,
                fault: p.P0_14,
            },
            saadc: p.SAADC,
            timer0: p.TIMER0,
            rng: p.RNG,
            ble: BleControllerBuilder::new(
                p.RTC0, p.TEMP, p.PPI_CH17, p.PPI_CH18, p.PPI_CH19,
                p.PPI_CH20, p.PPI_CH21, p.PPI_CH22, p.PPI_CH23, p.PPI_CH24,
                p.PPI_CH25, p.PPI_CH26, p.PPI_CH27, p.PPI_CH28, p.PPI_CH29,
                p.PPI_CH30, p.PPI_CH31,
            ),
        }
    }
}
