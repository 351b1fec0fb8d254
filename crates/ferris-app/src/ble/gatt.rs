use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::Sender;
use ferris_motion::mpu6050::RawSample;
use ferris_motion::{ChannelError, Notifier, SessionEvent};
use trouble_host::prelude::*;

/// Little-endian form of the motion service UUID, for advertising.
pub const MOTION_SERVICE_UUID: [u8; 16] = [
    0x9e, 0x5e, 0xaa, 0xf7, 0x4d, 0x9c, 0x47, 0xdc, 0x93, 0xad, 0x2a, 0xf9,
    0x00, 0x00, 0x22, 0xa2,
];

/// Battery Service (UUID: 0x180F)
#[gatt_service(uuid = service::BATTERY)]
pub struct BatteryService {
    /// Remaining charge in percent, 0 to 100.
    #[characteristic(uuid = characteristic::BATTERY_LEVEL, read, notify)]
    pub level: u8,
}

/// Raw accelerometer stream and its poll period.
#[gatt_service(uuid = "a2220000-f92a-ad93-dc47-9c4df7aa5e9e")]
pub struct MotionService {
    /// `ACCEL_XOUT_H..ACCEL_ZOUT_L` exactly as read from the sensor.
    #[descriptor(uuid = descriptors::MEASUREMENT_DESCRIPTION, read, value = "Acceleration")]
    #[characteristic(
        uuid = "a2226050-f92a-ad93-dc47-9c4df7aa5e9e",
        read,
        notify
    )]
    pub acceleration: [u8; 6],
    /// Poll period in milliseconds, clamped to at least 10.
    #[characteristic(
        uuid = "a2226051-f92a-ad93-dc47-9c4df7aa5e9e",
        read,
        write,
        value = 100
    )]
    pub sample_interval: u16,
}

#[gatt_server]
pub struct Server {
    pub battery: BatteryService,
    pub motion: MotionService,
}

pub type EventSender<'ch, const N: usize> =
    Sender<'ch, NoopRawMutex, SessionEvent, N>;

/// Serve attribute requests until the link drops, forwarding subscription
/// and interval changes to the monitor.
pub async fn gatt_events_task<P: PacketPool, const N: usize>(
    server: &Server<'_>,
    conn: &GattConnection<'_, '_, P>,
    events: EventSender<'_, N>,
) {
    let acceleration_cccd = server.motion.acceleration.cccd_handle;
    let interval = server.motion.sample_interval.clone();

    let reason = loop {
        match conn.next().await {
            GattConnectionEvent::Disconnected { reason } => break reason,
            GattConnectionEvent::Gatt { event } => {
                let update = match &event {
                    GattEvent::Write(write)
                        if Some(write.handle()) == acceleration_cccd =>
                    {
                        Some(SessionEvent::from_cccd_write(write.data()))
                    }
                    GattEvent::Write(write)
                        if write.handle() == interval.handle =>
                    {
                        SessionEvent::from_interval_write(write.data())
                    }
                    _ => None,
                };

                match event.accept() {
                    Ok(reply) => reply.send().await,
                    Err(e) => warn!("[gatt] error sending response: {:?}", e),
                }

                if let Some(update) = update {
                    if let SessionEvent::SampleIntervalChanged(clamped) = update
                    {
                        // Reads reflect the period actually in use
                        if let Err(e) =
                            interval.set(server, &clamped.as_millis())
                        {
                            warn!("[gatt] could not store interval: {:?}", e);
                        }
                    }
                    events.send(update).await;
                }
            }
            _ => {}
        }
    };
    info!("[gatt] disconnected: {:?}", reason);
}

/// Pushes samples to one connection through the acceleration characteristic.
pub struct MotionNotifier<'a, 'b, 'c, P: PacketPool> {
    handle: Characteristic<[u8; 6]>,
    conn: &'a GattConnection<'b, 'c, P>,
}

impl<'a, 'b, 'c, P: PacketPool> MotionNotifier<'a, 'b, 'c, P> {
    pub fn new(server: &Server<'_>, conn: &'a GattConnection<'b, 'c, P>) -> Self {
        Self {
            handle: server.motion.acceleration.clone(),
            conn,
        }
    }
}

impl<P: PacketPool> Notifier for MotionNotifier<'_, '_, '_, P> {
    async fn notify(&self, sample: &RawSample) -> Result<(), ChannelError> {
        self.handle
            .notify(self.conn, &sample.to_bytes())
            .await
            .map_err(|e| match e {
                trouble_host::Error::Disconnected => {
                    ChannelError::NotConnected
                }
                _ => ChannelError::Transport,
            })
    }
}
