use mpu6050::RawSample;

/// Reasons a notification could not be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelError {
    NotConnected,
    NotSubscribed,
    /// The radio stack refused or failed the transmission.
    Transport,
}

impl core::fmt::Display for ChannelError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ChannelError::NotConnected => write!(f, "No client connected"),
            ChannelError::NotSubscribed => {
                write!(f, "Client has not enabled notifications")
            }
            ChannelError::Transport => write!(f, "Notification transport failed"),
        }
    }
}

/// Pushes accepted samples to the subscribed client.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    async fn notify(&self, sample: &RawSample) -> Result<(), ChannelError>;
}
