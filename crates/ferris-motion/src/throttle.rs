use crate::config::ThrottleConfig;
use crate::motion::rotation_magnitude;
use mpu6050::{AccelFullScale, AccelVector, RawSample};

/// Why a sample was let through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendReason {
    /// Part of the burst following a subscribe or a motion event.
    Mandatory,
    /// Rotation since the last sent sample exceeded the threshold.
    Motion,
    /// Nothing was sent for `keep_alive` polls.
    KeepAlive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Decision {
    Send(SendReason),
    Skip,
    /// No subscriber; the sample was not looked at.
    Inactive,
}

impl Decision {
    pub fn is_send(&self) -> bool {
        matches!(self, Decision::Send(_))
    }
}

/// Per-subscription counters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThrottleState {
    /// Last sample that was sent; `None` right after subscribing.
    pub last_accepted: Option<AccelVector>,
    pub mandatory_remaining: u8,
    pub skipped_count: u8,
}

/// Decides for every polled sample whether it is worth a notification.
///
/// Sends everything during the burst after a subscribe, sends on large
/// rotation (and keeps sending for a short burst after it), and otherwise
/// only sends once every `keep_alive` polls.
#[derive(Debug, Clone)]
pub struct NotificationThrottle {
    config: ThrottleConfig,
    full_scale: AccelFullScale,
    state: Option<ThrottleState>,
}

impl NotificationThrottle {
    pub fn new(config: ThrottleConfig, full_scale: AccelFullScale) -> Self {
        Self {
            config,
            full_scale,
            state: None,
        }
    }

    pub fn subscribe(&mut self) {
        self.state = Some(ThrottleState {
            last_accepted: None,
            mandatory_remaining: self.config.subscribe_burst,
            skipped_count: 0,
        });
    }

    pub fn unsubscribe(&mut self) {
        self.state = None;
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&ThrottleState> {
        self.state.as_ref()
    }

    pub fn config(&self) -> &ThrottleConfig {
        &self.config
    }

    /// Run one sample through the policy, updating the counters.
    ///
    /// A `Send` decision commits the sample as the new reference before the
    /// caller transmits it; a failed transmission is not rolled back.
    pub fn evaluate(&mut self, sample: &RawSample) -> Decision {
        let config = self.config;
        let Some(state) = self.state.as_mut() else {
            return Decision::Inactive;
        };

        let current = sample.decode(self.full_scale);
        let large_motion = state.last_accepted.is_some_and(|previous| {
            config
                .threshold
                .is_exceeded_by(rotation_magnitude(&current, &previous))
        });

        let reason = if large_motion {
            // The motion sample itself does not count towards the burst
            state.mandatory_remaining =
                state.mandatory_remaining.max(config.motion_burst);
            SendReason::Motion
        } else if state.mandatory_remaining > 0 {
            state.mandatory_remaining -= 1;
            SendReason::Mandatory
        } else if state.skipped_count >= config.keep_alive {
            SendReason::KeepAlive
        } else {
            state.skipped_count += 1;
            return Decision::Skip;
        };

        state.skipped_count = 0;
        state.last_accepted = Some(current);
        Decision::Send(reason)
    }
}
