#![no_std]

mod address;
mod config;
mod errors;
pub mod registers;
mod sample;

pub use address::Address;
pub use config::{PowerMode, SamplingConfig};
pub use errors::{Error, RegisterError};
pub use registers::{
    AccelFullScale, ClockSource, DigitalLowPassFilter, Register,
    WakeFrequency, WHO_AM_I_VALUE,
};
pub use sample::{decode, AccelVector, RawSample, SAMPLE_LEN};

use embedded_hal_async::i2c;
use registers::{
    AccelConfig, Config, PwrMgmt1, PwrMgmt2, SignalPathReset,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum DriverState {
    Uninitialized,
    Ready(PowerMode),
}

/// MPU-6050 accelerometer on an async I2C bus.
///
/// The gyroscope and temperature paths are kept disabled; only the
/// accelerometer is used.
pub struct Mpu6050<I2C> {
    i2c: I2C,
    address: Address,
    config: SamplingConfig,
    state: DriverState,
}

impl<I2C: i2c::I2c> Mpu6050<I2C> {
    pub fn new(i2c: I2C, address: Address, config: SamplingConfig) -> Self {
        Self {
            i2c,
            address,
            config,
            state: DriverState::Uninitialized,
        }
    }

    /// Reset and configure the sensor, then check its identity.
    ///
    /// Any failure leaves the driver uninitialized; the whole sequence has to
    /// be run again since the device may be half configured.
    pub async fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        self.state = DriverState::Uninitialized;

        // Clear the internal gyro, accel and temperature state
        self.write_register(
            Register::SIGNAL_PATH_RESET,
            SignalPathReset::all().bits(),
        )
        .await?;

        self.write_register(
            Register::SMPLRT_DIV,
            self.config.sample_rate_divider,
        )
        .await?;
        self.write_register(
            Register::CONFIG,
            Config::default().with_dlpf(self.config.dlpf).bits(),
        )
        .await?;
        self.write_register(
            Register::ACCEL_CONFIG,
            AccelConfig::default()
                .with_full_scale(self.config.accel_fsr)
                .bits(),
        )
        .await?;

        self.apply_power_mode(self.config.power_mode).await?;
        self.verify_identity().await?;

        self.state = DriverState::Ready(self.config.power_mode);
        Ok(())
    }

    /// Read the `WHO_AM_I` register.
    pub async fn who_am_i(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.read_register(Register::WHO_AM_I).await
    }

    /// Fails with [`Error::IdentityMismatch`] unless the device reports `0x68`.
    pub async fn verify_identity(&mut self) -> Result<(), Error<I2C::Error>> {
        let found = self.who_am_i().await?;
        if found != WHO_AM_I_VALUE {
            return Err(Error::IdentityMismatch {
                expected: WHO_AM_I_VALUE,
                found,
            });
        }
        Ok(())
    }

    /// Burst read of the six accelerometer output registers.
    pub async fn read_acceleration(
        &mut self,
    ) -> Result<RawSample, Error<I2C::Error>> {
        self.ensure_ready()?;
        let mut buf = [0u8; SAMPLE_LEN];
        self.i2c
            .write_read(
                self.address.get(),
                &[Register::ACCEL_XOUT_H.addr()],
                &mut buf,
            )
            .await
            .map_err(Error::Bus)?;
        Ok(RawSample::from_bytes(buf))
    }

    /// Read and decode with the configured full scale range.
    pub async fn read_acceleration_g(
        &mut self,
    ) -> Result<AccelVector, Error<I2C::Error>> {
        let raw = self.read_acceleration().await?;
        Ok(raw.decode(self.config.accel_fsr))
    }

    /// Switch to accelerometer-only cycled sampling at `wake_frequency`.
    pub async fn enter_low_power(
        &mut self,
        wake_frequency: WakeFrequency,
    ) -> Result<(), Error<I2C::Error>> {
        self.transition(PowerMode::CycledLowPower(wake_frequency))
            .await
    }

    /// Return to continuous accelerometer sampling.
    pub async fn exit_low_power(&mut self) -> Result<(), Error<I2C::Error>> {
        self.transition(PowerMode::Active).await
    }

    /// Stop all sensing. Leave with [`Self::exit_low_power`] or
    /// [`Self::enter_low_power`].
    pub async fn sleep(&mut self) -> Result<(), Error<I2C::Error>> {
        self.transition(PowerMode::Sleep).await
    }

    /// Current power mode, or `None` before a successful `init()`.
    pub fn power_mode(&self) -> Option<PowerMode> {
        match self.state {
            DriverState::Uninitialized => None,
            DriverState::Ready(mode) => Some(mode),
        }
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.state, DriverState::Ready(_))
    }

    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    pub async fn read_register(
        &mut self,
        reg: Register,
    ) -> Result<u8, Error<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address.get(), &[reg.addr()], &mut buf)
            .await
            .map_err(Error::Bus)?;
        Ok(buf[0])
    }

    pub async fn write_register(
        &mut self,
        reg: Register,
        value: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(self.address.get(), &[reg.addr(), value])
            .await
            .map_err(Error::Bus)
    }

    fn ensure_ready(&self) -> Result<(), Error<I2C::Error>> {
        match self.state {
            DriverState::Uninitialized => Err(Error::NotInitialized),
            DriverState::Ready(_) => Ok(()),
        }
    }

    async fn transition(
        &mut self,
        mode: PowerMode,
    ) -> Result<(), Error<I2C::Error>> {
        self.ensure_ready()?;
        // A failed write leaves the power registers in an unknown state
        self.state = DriverState::Uninitialized;
        self.apply_power_mode(mode).await?;
        self.state = DriverState::Ready(mode);
        Ok(())
    }

    async fn apply_power_mode(
        &mut self,
        mode: PowerMode,
    ) -> Result<(), Error<I2C::Error>> {
        let running = PwrMgmt1::empty()
            .with_clock_source(self.config.clock_source)
            .with_temp_dis(true);
        match mode {
            PowerMode::Active => {
                self.write_register(Register::PWR_MGMT_1, running.bits())
                    .await?;
                self.write_register(
                    Register::PWR_MGMT_2,
                    PwrMgmt2::empty().with_gyro_standby(true).bits(),
                )
                .await
            }
            PowerMode::CycledLowPower(freq) => {
                self.write_register(
                    Register::PWR_MGMT_1,
                    running.with_cycle(true).bits(),
                )
                .await?;
                self.write_register(
                    Register::PWR_MGMT_2,
                    PwrMgmt2::empty()
                        .with_gyro_standby(true)
                        .with_wake_frequency(freq)
                        .bits(),
                )
                .await
            }
            PowerMode::Sleep => {
                self.write_register(Register::PWR_MGMT_1, PwrMgmt1::SLEEP.bits())
                    .await
            }
        }
    }
}
