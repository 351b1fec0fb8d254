use embassy_nrf::gpio::{Level, Output, OutputDrive};
use embassy_time::Timer;

use crate::board::LedResources;

pub struct StatusLeds {
    link: Output<'static>,
    fault: Output<'static>,
}

impl StatusLeds {
    pub fn new(leds: LedResources) -> Self {
        // Active low, start dark
        Self {
            link: Output::new(leds.link, Level::High, OutputDrive::Standard),
            fault: Output::new(leds.fault, Level::High, OutputDrive::Standard),
        }
    }

    pub fn set_connected(&mut self, connected: bool) {
        if connected {
            self.link.set_low();
        } else {
            self.link.set_high();
        }
    }

    /// Flash the fault LED `count` times.
    pub async fn blink_fault(&mut self, count: u8) {
        for _ in 0..count {
            self.fault.set_low();
            Timer::after_millis(100).await;
            self.fault.set_high();
            Timer::after_millis(200).await;
        }
    }
}
