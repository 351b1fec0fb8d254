use crate::motion::MotionThreshold;

/// Tuning of the notification throttle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThrottleConfig {
    pub threshold: MotionThreshold,
    /// Samples sent unconditionally right after a subscribe.
    pub subscribe_burst: u8,
    /// Samples sent unconditionally after large motion is seen.
    pub motion_burst: u8,
    /// Consecutive skips after which one sample is sent anyway.
    pub keep_alive: u8,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            threshold: MotionThreshold::DEFAULT,
            subscribe_burst: 5,
            motion_burst: 4,
            keep_alive: 50,
        }
    }
}

/// Poll period in milliseconds, as written by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleInterval(u16);

impl SampleInterval {
    pub const MIN_MS: u16 = 10;
    pub const DEFAULT: Self = Self(100);

    /// Values below [`Self::MIN_MS`] are raised to it.
    pub const fn from_millis(ms: u16) -> Self {
        if ms < Self::MIN_MS {
            Self(Self::MIN_MS)
        } else {
            Self(ms)
        }
    }

    pub const fn as_millis(&self) -> u16 {
        self.0
    }
}

impl Default for SampleInterval {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u16> for SampleInterval {
    fn from(ms: u16) -> Self {
        Self::from_millis(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_is_clamped() {
        assert_eq!(SampleInterval::from(0).as_millis(), SampleInterval::MIN_MS);
        assert_eq!(SampleInterval::from(250).as_millis(), 250);
    }
}
