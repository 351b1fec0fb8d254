use embassy_nrf::interrupt::{self, InterruptExt};
use embassy_nrf::peripherals::SAADC;
use embassy_nrf::saadc::{self, ChannelConfig, Config, Input, Saadc, VddInput};
use embassy_nrf::{bind_interrupts, Peri};

bind_interrupts!(struct SaadcIrqs {
    SAADC => saadc::InterruptHandler;
});

/// Supply range of a lithium coin cell, in millivolts.
const EMPTY_MV: u32 = 2000;
const FULL_MV: u32 = 3000;

/// Internal 0.6 V reference with 1/6 gain over 12 bits.
const FULL_SCALE_MV: u32 = 3600;
const FULL_SCALE_COUNTS: u32 = 4096;

/// Samples the chip supply through the SAADC.
pub struct BatteryMonitor {
    saadc: Saadc<'static, 1>,
}

impl BatteryMonitor {
    pub async fn new(adc: Peri<'static, SAADC>) -> Self {
        let channel = ChannelConfig::single_ended(VddInput.degrade_saadc());
        interrupt::SAADC.set_priority(interrupt::Priority::P3);
        let saadc = Saadc::new(adc, SaadcIrqs, Config::default(), [channel]);
        saadc.calibrate().await;
        Self { saadc }
    }

    pub async fn millivolts(&mut self) -> u32 {
        let mut buf = [0i16; 1];
        self.saadc.sample(&mut buf).await;
        // Negative counts are offset noise around 0 V
        (buf[0].max(0) as u32) * FULL_SCALE_MV / FULL_SCALE_COUNTS
    }

    /// Remaining charge, linear between the empty and full voltages.
    pub async fn percent(&mut self) -> u8 {
        let mv = self.millivolts().await.clamp(EMPTY_MV, FULL_MV);
        ((mv - EMPTY_MV) * 100 / (FULL_MV - EMPTY_MV)) as u8
    }
}
