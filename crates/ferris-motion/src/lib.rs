#![no_std]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

mod config;
pub mod monitor;
pub mod motion;
mod notifier;
pub mod session;
pub mod throttle;

pub use config::{SampleInterval, ThrottleConfig};
pub use monitor::{Monitor, PollOutcome};
pub use motion::{rotation_magnitude, MotionThreshold};
pub use notifier::{ChannelError, Notifier};
pub use session::{LinkState, Session, SessionEvent};
pub use throttle::{Decision, NotificationThrottle, SendReason, ThrottleState};

pub use mpu6050;
