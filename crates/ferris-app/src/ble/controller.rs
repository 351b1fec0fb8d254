//! SoftDevice Controller bring-up for a single-link peripheral.

use embassy_nrf::mode::Async;
use embassy_nrf::peripherals::{
    self, PPI_CH17, PPI_CH18, PPI_CH19, PPI_CH20, PPI_CH21, PPI_CH22,
    PPI_CH23, PPI_CH24, PPI_CH25, PPI_CH26, PPI_CH27, PPI_CH28, PPI_CH29,
    PPI_CH30, PPI_CH31, RNG, RTC0, TEMP, TIMER0,
};
use embassy_nrf::{bind_interrupts, rng, Peri};
use nrf_sdc::{self as sdc, mpsl};
pub use nrf_sdc::{
    mpsl::MultiprotocolServiceLayer, Error as SoftdeviceError,
    SoftdeviceController,
};
use static_cell::StaticCell;

/// Outgoing and incoming ACL buffers per link.
const L2CAP_TXQ: u8 = 3;
const L2CAP_RXQ: u8 = 3;

/// Matches trouble-host's `DefaultPacketPool::MTU`.
const L2CAP_MTU: u16 = 251;

const SDC_MEMORY_SIZE: usize = 4720;

bind_interrupts!(pub struct BleIrqs {
    RNG => rng::InterruptHandler<peripherals::RNG>;
    EGU2_SWI2 => nrf_sdc::mpsl::LowPrioInterruptHandler;
    CLOCK_POWER => nrf_sdc::mpsl::ClockInterruptHandler;
    RADIO => nrf_sdc::mpsl::HighPrioInterruptHandler;
    TIMER0 => nrf_sdc::mpsl::HighPrioInterruptHandler;
    RTC0 => nrf_sdc::mpsl::HighPrioInterruptHandler;
});

/// Peripherals reserved for the controller until [`init`](Self::init).
pub struct BleControllerBuilder<'d> {
    sdc_peripherals: sdc::Peripherals<'d>,
    rtc0: Peri<'d, RTC0>,
    temp: Peri<'d, TEMP>,
    ppi_ch19: Peri<'d, PPI_CH19>,
    ppi_ch30: Peri<'d, PPI_CH30>,
    ppi_ch31: Peri<'d, PPI_CH31>,
}

impl BleControllerBuilder<'static> {
    /// Low frequency clock from the calibrated RC oscillator.
    const LF_CLOCK_CONFIG: mpsl::raw::mpsl_clock_lfclk_cfg_t =
        mpsl::raw::mpsl_clock_lfclk_cfg_t {
            source: mpsl::raw::MPSL_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: mpsl::raw::MPSL_RECOMMENDED_RC_CTIV as u8,
            rc_temp_ctiv: mpsl::raw::MPSL_RECOMMENDED_RC_TEMP_CTIV as u8,
            accuracy_ppm: mpsl::raw::MPSL_DEFAULT_CLOCK_ACCURACY_PPM as u16,
            skip_wait_lfclk_started:
                mpsl::raw::MPSL_DEFAULT_SKIP_WAIT_LFCLK_STARTED != 0,
        };

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        rtc0: Peri<'static, RTC0>,
        temp: Peri<'static, TEMP>,
        ppi_ch17: Peri<'static, PPI_CH17>,
        ppi_ch18: Peri<'static, PPI_CH18>,
        ppi_ch19: Peri<'static, PPI_CH19>,
        ppi_ch20: Peri<'static, PPI_CH20>,
        ppi_ch21: Peri<'static, PPI_CH21>,
        ppi_ch22: Peri<'static, PPI_CH22>,
        ppi_ch23: Peri<'static, PPI_CH23>,
        ppi_ch24: Peri<'static, PPI_CH24>,
        ppi_ch25: Peri<'static, PPI_CH25>,
        ppi_ch26: Peri<'static, PPI_CH26>,
        ppi_ch27: Peri<'static, PPI_CH27>,
        ppi_ch28: Peri<'static, PPI_CH28>,
        ppi_ch29: Peri<'static, PPI_CH29>,
        ppi_ch30: Peri<'static, PPI_CH30>,
        ppi_ch31: Peri<'static, PPI_CH31>,
    ) -> Self {
        let sdc_peripherals = sdc::Peripherals::new(
            ppi_ch17, ppi_ch18, ppi_ch20, ppi_ch21, ppi_ch22, ppi_ch23,
            ppi_ch24, ppi_ch25, ppi_ch26, ppi_ch27, ppi_ch28, ppi_ch29,
        );
        Self {
            sdc_peripherals,
            rtc0,
            temp,
            ppi_ch19,
            ppi_ch30,
            ppi_ch31,
        }
    }

    /// Start the MPSL and build the controller handed to trouble-host.
    ///
    /// The returned MPSL must be driven by [`mpsl_task`](super::mpsl_task).
    pub fn init(
        self,
        timer0: Peri<'static, TIMER0>,
        rng: Peri<'static, RNG>,
    ) -> Result<
        (
            SoftdeviceController<'static>,
            &'static MultiprotocolServiceLayer<'static>,
        ),
        SoftdeviceError,
    > {
        let mpsl = {
            let p = mpsl::Peripherals::new(
                self.rtc0,
                timer0,
                self.temp,
                self.ppi_ch19,
                self.ppi_ch30,
                self.ppi_ch31,
            );
            static MPSL: StaticCell<MultiprotocolServiceLayer> =
                StaticCell::new();
            MPSL.init(mpsl::MultiprotocolServiceLayer::new(
                p,
                BleIrqs,
                Self::LF_CLOCK_CONFIG,
            )?)
        };

        static SDC_RNG: StaticCell<rng::Rng<'static, Async>> =
            StaticCell::new();
        let sdc_rng = SDC_RNG.init(rng::Rng::new(rng, BleIrqs));

        static SDC_MEM: StaticCell<sdc::Mem<SDC_MEMORY_SIZE>> =
            StaticCell::new();
        let mem = SDC_MEM.init(sdc::Mem::new());

        let sdc = sdc::Builder::new()?
            .support_adv()
            .support_peripheral()
            .peripheral_count(1)?
            .buffer_cfg(L2CAP_MTU, L2CAP_MTU, L2CAP_TXQ, L2CAP_RXQ)?
            .build(self.sdc_peripherals, sdc_rng, mpsl, mem)?;

        Ok((sdc, mpsl))
    }
}
