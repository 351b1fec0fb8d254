use super::registers::{
    AccelFullScale, ClockSource, DigitalLowPassFilter, WakeFrequency,
};

/// Power state of the accelerometer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// Accelerometer running continuously, gyroscope in standby.
    Active,
    /// Accelerometer wakes at the given rate for a single sample, then sleeps.
    CycledLowPower(WakeFrequency),
    /// Everything stopped; register contents are retained.
    Sleep,
}

impl Default for PowerMode {
    fn default() -> Self {
        Self::CycledLowPower(WakeFrequency::default())
    }
}

/// Settings written to the device during `init()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SamplingConfig {
    /// `SMPLRT_DIV`; output rate is `gyro_output_rate / (1 + divider)`.
    pub sample_rate_divider: u8,
    pub dlpf: DigitalLowPassFilter,
    pub accel_fsr: AccelFullScale,
    pub clock_source: ClockSource,
    /// Power state entered at the end of `init()`.
    pub power_mode: PowerMode,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            sample_rate_divider: 19,
            dlpf: DigitalLowPassFilter::Hz21,
            accel_fsr: AccelFullScale::G2,
            clock_source: ClockSource::PllGyroX,
            power_mode: PowerMode::CycledLowPower(WakeFrequency::Hz5),
        }
    }
}

impl SamplingConfig {
    /// Output data rate in Hz implied by the divider and filter.
    pub fn output_rate_hz(&self) -> f32 {
        self.dlpf.gyro_output_rate() as f32
            / (1.0 + self.sample_rate_divider as f32)
    }
}
