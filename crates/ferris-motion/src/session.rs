use crate::config::{SampleInterval, ThrottleConfig};
use crate::throttle::NotificationThrottle;
use derive_more::From;
use mpu6050::AccelFullScale;

/// Link and subscription changes reported by the radio side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, From)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionEvent {
    Connected,
    Disconnected,
    Subscribed,
    Unsubscribed,
    /// Client wrote a new poll period.
    #[from]
    SampleIntervalChanged(SampleInterval),
}

impl SessionEvent {
    /// Decode a write to the Client Characteristic Configuration descriptor.
    pub fn from_cccd_write(data: &[u8]) -> Self {
        // Bit 0 of the little-endian value enables notifications
        match data.first() {
            Some(flags) if flags & 0x01 != 0 => SessionEvent::Subscribed,
            _ => SessionEvent::Unsubscribed,
        }
    }

    /// Decode a write to the sample interval characteristic (`u16` LE, ms).
    pub fn from_interval_write(data: &[u8]) -> Option<Self> {
        let bytes: [u8; 2] = data.try_into().ok()?;
        Some(SessionEvent::SampleIntervalChanged(SampleInterval::from_millis(
            u16::from_le_bytes(bytes),
        )))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    Disconnected,
    Connected { subscribed: bool },
}

/// Connection state plus the throttle bound to it.
#[derive(Debug, Clone)]
pub struct Session {
    link: LinkState,
    throttle: NotificationThrottle,
    sample_interval: SampleInterval,
}

impl Session {
    pub fn new(config: ThrottleConfig, full_scale: AccelFullScale) -> Self {
        Self {
            link: LinkState::Disconnected,
            throttle: NotificationThrottle::new(config, full_scale),
            sample_interval: SampleInterval::default(),
        }
    }

    pub fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Connected => {
                info!("[session] connected");
                self.link = LinkState::Connected { subscribed: false };
                self.throttle.unsubscribe();
            }
            SessionEvent::Disconnected => {
                info!("[session] disconnected");
                self.link = LinkState::Disconnected;
                self.throttle.unsubscribe();
            }
            SessionEvent::Subscribed => {
                info!("[session] notifications enabled");
                // A CCCD write can only arrive over a live link
                self.link = LinkState::Connected { subscribed: true };
                self.throttle.subscribe();
            }
            SessionEvent::Unsubscribed => {
                info!("[session] notifications disabled");
                if let LinkState::Connected { .. } = self.link {
                    self.link = LinkState::Connected { subscribed: false };
                }
                self.throttle.unsubscribe();
            }
            SessionEvent::SampleIntervalChanged(interval) => {
                info!(
                    "[session] sample interval set to {} ms",
                    interval.as_millis()
                );
                self.sample_interval = interval;
            }
        }
    }

    pub fn link(&self) -> LinkState {
        self.link
    }

    pub fn is_subscribed(&self) -> bool {
        matches!(self.link, LinkState::Connected { subscribed: true })
    }

    pub fn sample_interval(&self) -> SampleInterval {
        self.sample_interval
    }

    pub fn throttle(&self) -> &NotificationThrottle {
        &self.throttle
    }

    pub fn throttle_mut(&mut self) -> &mut NotificationThrottle {
        &mut self.throttle
    }
}
