use super::errors::RegisterError;
use bitflags::bitflags;

/// Value reported by `WHO_AM_I` regardless of the AD0 strap.
pub const WHO_AM_I_VALUE: u8 = 0x68;

/// Configuration enums
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSource {
    Internal8MHz,
    #[default]
    PllGyroX,
    PllGyroY,
    PllGyroZ,
    PllExternal32kHz,
    PllExternal19MHz,
    Stopped,
}

/// Digital low pass filter bandwidth of the accelerometer path.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitalLowPassFilter {
    Hz260,
    Hz184,
    Hz94,
    Hz44,
    #[default]
    Hz21,
    Hz10,
    Hz5,
}

impl DigitalLowPassFilter {
    /// Gyroscope output rate in Hz that the sample rate divider applies to.
    pub const fn gyro_output_rate(&self) -> u16 {
        match self {
            Self::Hz260 => 8000,
            _ => 1000,
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelFullScale {
    #[default]
    G2,
    G4,
    G8,
    G16,
}

impl AccelFullScale {
    /// Full scale range in g.
    pub const fn g(&self) -> f32 {
        match self {
            Self::G2 => 2.0,
            Self::G4 => 4.0,
            Self::G8 => 8.0,
            Self::G16 => 16.0,
        }
    }

    /// Counts per g.
    pub const fn sensitivity(&self) -> f32 {
        match self {
            Self::G2 => 16384.0,
            Self::G4 => 8192.0,
            Self::G8 => 4096.0,
            Self::G16 => 2048.0,
        }
    }
}

/// Wake-up frequency of the cycled low power accelerometer mode.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeFrequency {
    Hz1_25,
    #[default]
    Hz5,
    Hz20,
    Hz40,
}

///
/// Read / write-able registers
///
#[allow(non_camel_case_types)]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Sample Rate Divider
    SMPLRT_DIV = 0x19,
    /// Configuration (FSYNC, DLPF)
    CONFIG = 0x1A,
    /// Gyroscope Configuration
    GYRO_CONFIG = 0x1B,
    /// Accelerometer Configuration
    ACCEL_CONFIG = 0x1C,
    /// Accelerometer X high byte, start of the 6 byte burst
    ACCEL_XOUT_H = 0x3B,
    ACCEL_XOUT_L = 0x3C,
    ACCEL_YOUT_H = 0x3D,
    ACCEL_YOUT_L = 0x3E,
    ACCEL_ZOUT_H = 0x3F,
    ACCEL_ZOUT_L = 0x40,
    /// Temperature high byte
    TEMP_OUT_H = 0x41,
    TEMP_OUT_L = 0x42,
    /// Gyroscope X high byte
    GYRO_XOUT_H = 0x43,
    /// Signal Path Reset
    SIGNAL_PATH_RESET = 0x68,
    /// Power Management 1
    PWR_MGMT_1 = 0x6B,
    /// Power Management 2
    PWR_MGMT_2 = 0x6C,
    /// Who Am I (Read-Only)
    WHO_AM_I = 0x75,
}

impl Register {
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

bitflags! {
    /// SIGNAL_PATH_RESET
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct SignalPathReset: u8 {
        const GYRO_RESET  = 0b0000_0100;
        const ACCEL_RESET = 0b0000_0010;
        const TEMP_RESET  = 0b0000_0001;
    }
}

bitflags! {
    /// CONFIG
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct Config: u8 {
        const EXT_SYNC_SET2 = 0b0010_0000;
        const EXT_SYNC_SET1 = 0b0001_0000;
        const EXT_SYNC_SET0 = 0b0000_1000;
        const DLPF_CFG2     = 0b0000_0100;
        const DLPF_CFG1     = 0b0000_0010;
        const DLPF_CFG0     = 0b0000_0001;

        const EXT_SYNC_SET = Self::EXT_SYNC_SET2.bits() | Self::EXT_SYNC_SET1.bits() | Self::EXT_SYNC_SET0.bits();
        const DLPF_CFG = Self::DLPF_CFG2.bits() | Self::DLPF_CFG1.bits() | Self::DLPF_CFG0.bits();
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::empty()
    }
}

impl Config {
    pub const fn dlpf(&self) -> Result<DigitalLowPassFilter, RegisterError> {
        let dlpf = match self.intersection(Self::DLPF_CFG).bits() {
            0 => DigitalLowPassFilter::Hz260,
            1 => DigitalLowPassFilter::Hz184,
            2 => DigitalLowPassFilter::Hz94,
            3 => DigitalLowPassFilter::Hz44,
            4 => DigitalLowPassFilter::Hz21,
            5 => DigitalLowPassFilter::Hz10,
            6 => DigitalLowPassFilter::Hz5,
            e => return Err(RegisterError::InvalidLowPassFilter(e)),
        };
        Ok(dlpf)
    }

    pub const fn with_dlpf(self, dlpf: DigitalLowPassFilter) -> Self {
        let reg = self.difference(Self::DLPF_CFG);
        let bits = match dlpf {
            DigitalLowPassFilter::Hz260 => 0,
            DigitalLowPassFilter::Hz184 => 1,
            DigitalLowPassFilter::Hz94 => 2,
            DigitalLowPassFilter::Hz44 => 3,
            DigitalLowPassFilter::Hz21 => 4,
            DigitalLowPassFilter::Hz10 => 5,
            DigitalLowPassFilter::Hz5 => 6,
        };
        reg.union(Self::from_bits_retain(bits))
    }
}

bitflags! {
    /// ACCEL_CONFIG
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct AccelConfig: u8 {
        const XA_ST     = 0b1000_0000;
        const YA_ST     = 0b0100_0000;
        const ZA_ST     = 0b0010_0000;
        const AFS_SEL1  = 0b0001_0000;
        const AFS_SEL0  = 0b0000_1000;

        const AFS_SEL = Self::AFS_SEL1.bits() | Self::AFS_SEL0.bits();
    }
}

impl Default for AccelConfig {
    fn default() -> Self {
        Self::empty()
    }
}

impl AccelConfig {
    pub const fn full_scale(&self) -> AccelFullScale {
        match self.intersection(Self::AFS_SEL).bits() >> 3 {
            0b00 => AccelFullScale::G2,
            0b01 => AccelFullScale::G4,
            0b10 => AccelFullScale::G8,
            _ => AccelFullScale::G16,
        }
    }

    pub const fn with_full_scale(self, fsr: AccelFullScale) -> Self {
        let reg = self.difference(Self::AFS_SEL);
        match fsr {
            AccelFullScale::G2 => reg,
            AccelFullScale::G4 => reg.union(Self::AFS_SEL0),
            AccelFullScale::G8 => reg.union(Self::AFS_SEL1),
            AccelFullScale::G16 => reg.union(Self::AFS_SEL),
        }
    }
}

bitflags! {
    /// PWR_MGMT_1
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct PwrMgmt1: u8 {
        const DEVICE_RESET = 0b1000_0000;
        const SLEEP        = 0b0100_0000;
        const CYCLE        = 0b0010_0000;
        const TEMP_DIS     = 0b0000_1000;
        const CLKSEL2      = 0b0000_0100;
        const CLKSEL1      = 0b0000_0010;
        const CLKSEL0      = 0b0000_0001;

        const CLKSEL = Self::CLKSEL2.bits() | Self::CLKSEL1.bits() | Self::CLKSEL0.bits();
    }
}

impl Default for PwrMgmt1 {
    fn default() -> Self {
        Self::SLEEP
    }
}

impl PwrMgmt1 {
    pub const fn clock_source(&self) -> Result<ClockSource, RegisterError> {
        let clock = match self.intersection(Self::CLKSEL).bits() {
            0 => ClockSource::Internal8MHz,
            1 => ClockSource::PllGyroX,
            2 => ClockSource::PllGyroY,
            3 => ClockSource::PllGyroZ,
            4 => ClockSource::PllExternal32kHz,
            5 => ClockSource::PllExternal19MHz,
            7 => ClockSource::Stopped,
            e => return Err(RegisterError::InvalidClockSource(e)),
        };
        Ok(clock)
    }

    pub const fn with_clock_source(self, clock: ClockSource) -> Self {
        let reg = self.difference(Self::CLKSEL);
        let bits = match clock {
            ClockSource::Internal8MHz => 0,
            ClockSource::PllGyroX => 1,
            ClockSource::PllGyroY => 2,
            ClockSource::PllGyroZ => 3,
            ClockSource::PllExternal32kHz => 4,
            ClockSource::PllExternal19MHz => 5,
            ClockSource::Stopped => 7,
        };
        reg.union(Self::from_bits_retain(bits))
    }

    pub const fn sleep(&self) -> bool {
        self.contains(Self::SLEEP)
    }

    pub const fn cycle(&self) -> bool {
        self.contains(Self::CYCLE)
    }

    pub const fn with_cycle(self, en: bool) -> Self {
        let reg = self.difference(Self::CYCLE);
        match en {
            false => reg,
            true => reg.union(Self::CYCLE),
        }
    }

    pub const fn with_temp_dis(self, dis: bool) -> Self {
        let reg = self.difference(Self::TEMP_DIS);
        match dis {
            false => reg,
            true => reg.union(Self::TEMP_DIS),
        }
    }
}

bitflags! {
    /// PWR_MGMT_2
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct PwrMgmt2: u8 {
        const LP_WAKE_CTRL1 = 0b1000_0000;
        const LP_WAKE_CTRL0 = 0b0100_0000;
        const STBY_XA       = 0b0010_0000;
        const STBY_YA       = 0b0001_0000;
        const STBY_ZA       = 0b0000_1000;
        const STBY_XG       = 0b0000_0100;
        const STBY_YG       = 0b0000_0010;
        const STBY_ZG       = 0b0000_0001;

        const LP_WAKE_CTRL = Self::LP_WAKE_CTRL1.bits() | Self::LP_WAKE_CTRL0.bits();
        const STBY_GYRO = Self::STBY_XG.bits() | Self::STBY_YG.bits() | Self::STBY_ZG.bits();
        const STBY_ACCEL = Self::STBY_XA.bits() | Self::STBY_YA.bits() | Self::STBY_ZA.bits();
    }
}

impl Default for PwrMgmt2 {
    fn default() -> Self {
        Self::empty()
    }
}

impl PwrMgmt2 {
    pub const fn wake_frequency(&self) -> WakeFrequency {
        match self.intersection(Self::LP_WAKE_CTRL).bits() >> 6 {
            0b00 => WakeFrequency::Hz1_25,
            0b01 => WakeFrequency::Hz5,
            0b10 => WakeFrequency::Hz20,
            _ => WakeFrequency::Hz40,
        }
    }

    pub const fn with_wake_frequency(self, freq: WakeFrequency) -> Self {
        let reg = self.difference(Self::LP_WAKE_CTRL);
        match freq {
            WakeFrequency::Hz1_25 => reg,
            WakeFrequency::Hz5 => reg.union(Self::LP_WAKE_CTRL0),
            WakeFrequency::Hz20 => reg.union(Self::LP_WAKE_CTRL1),
            WakeFrequency::Hz40 => reg.union(Self::LP_WAKE_CTRL),
        }
    }

    pub const fn with_gyro_standby(self, stby: bool) -> Self {
        let reg = self.difference(Self::STBY_GYRO);
        match stby {
            false => reg,
            true => reg.union(Self::STBY_GYRO),
        }
    }
}
