use crate::config::{SampleInterval, ThrottleConfig};
use crate::notifier::{ChannelError, Notifier};
use crate::session::{Session, SessionEvent};
use crate::throttle::{Decision, SendReason};
use embedded_hal_async::i2c;
use mpu6050::{Error, Mpu6050};

/// Result of one poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollOutcome {
    /// Nobody is subscribed; the sensor was not read.
    Idle,
    Skipped,
    Sent(SendReason),
    /// The throttle accepted the sample but delivery failed. Not retried.
    Dropped(ChannelError),
}

/// Sensor plus the session that decides what to do with its samples.
///
/// Everything runs on the caller's task: one `poll` reads, decodes,
/// classifies and (maybe) notifies before returning.
pub struct Monitor<I2C> {
    sensor: Mpu6050<I2C>,
    session: Session,
}

impl<I2C: i2c::I2c> Monitor<I2C> {
    /// Wraps an already initialized sensor.
    pub fn new(sensor: Mpu6050<I2C>, config: ThrottleConfig) -> Self {
        let full_scale = sensor.config().accel_fsr;
        Self {
            sensor,
            session: Session::new(config, full_scale),
        }
    }

    pub fn handle_event(&mut self, event: SessionEvent) {
        self.session.handle_event(event);
    }

    pub async fn poll<N: Notifier>(
        &mut self,
        notifier: &N,
    ) -> Result<PollOutcome, Error<I2C::Error>> {
        if !self.session.throttle().is_active() {
            return Ok(PollOutcome::Idle);
        }

        let sample = self.sensor.read_acceleration().await?;

        match self.session.throttle_mut().evaluate(&sample) {
            Decision::Inactive => Ok(PollOutcome::Idle),
            Decision::Skip => Ok(PollOutcome::Skipped),
            Decision::Send(reason) => {
                trace!("[monitor] sending sample: {:?}", reason);
                match notifier.notify(&sample).await {
                    Ok(()) => Ok(PollOutcome::Sent(reason)),
                    Err(e) => {
                        warn!("[monitor] notification dropped: {:?}", e);
                        Ok(PollOutcome::Dropped(e))
                    }
                }
            }
        }
    }

    pub fn sample_interval(&self) -> SampleInterval {
        self.session.sample_interval()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn sensor(&self) -> &Mpu6050<I2C> {
        &self.sensor
    }

    pub fn sensor_mut(&mut self) -> &mut Mpu6050<I2C> {
        &mut self.sensor
    }

    pub fn release(self) -> Mpu6050<I2C> {
        self.sensor
    }
}
