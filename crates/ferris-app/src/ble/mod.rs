mod advertiser;
pub mod controller;
pub mod gatt;

use derive_more::From;
use embassy_executor::Spawner;
use embassy_futures::select::{select, select3, Either, Either3};
use embassy_nrf::peripherals::{RNG, TIMER0};
use embassy_nrf::Peri;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Channel, Receiver};
use embassy_time::{Duration, Instant, Timer};
use ferris_motion::{PollOutcome, SessionEvent};
use trouble_host::prelude::*;

pub use advertiser::advertise;
pub use controller::*;
pub use gatt::*;

use crate::battery::BatteryMonitor;
use crate::sensor::MotionMonitor;
use crate::status::StatusLeds;
use crate::DEVICE_NAME;

/// Max number of connections
const CONNECTIONS_MAX: usize = 1;

/// Max number of L2CAP channels.
const L2CAP_CHANNELS_MAX: usize = 2; // Signal + att

/// Depth of the GATT to monitor event queue.
const EVENT_QUEUE: usize = 4;

const BATTERY_PERIOD: Duration = Duration::from_secs(10);

pub type BleController = SoftdeviceController<'static>;

type SessionEvents = Channel<NoopRawMutex, SessionEvent, EVENT_QUEUE>;

#[derive(Debug, From)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    #[from]
    Controller(SoftdeviceError),
    #[from]
    Host(BleHostError<SoftdeviceError>),
    /// The attribute table could not be built.
    Server(&'static str),
}

#[embassy_executor::task]
async fn mpsl_task(mpsl: &'static MultiprotocolServiceLayer<'static>) -> ! {
    mpsl.run().await
}

/// Bring up the SoftDevice Controller and start servicing the MPSL.
pub fn start_controller(
    spawner: Spawner,
    builder: BleControllerBuilder<'static>,
    timer0: Peri<'static, TIMER0>,
    rng: Peri<'static, RNG>,
) -> Result<BleController, Error> {
    let (sdc, mpsl) = builder.init(timer0, rng)?;
    spawner.must_spawn(mpsl_task(mpsl));
    Ok(sdc)
}

/// Run the BLE host, the battery service and the motion stream.
///
/// Only returns if the host stack fails.
pub async fn run(
    controller: BleController,
    monitor: &mut MotionMonitor,
    battery: &mut BatteryMonitor,
    leds: &mut StatusLeds,
) -> Result<(), Error> {
    let address = Address::random([0xf3, 0x6e, 0x05, 0x50, 0x61, 0xc6]);
    info!("[ble] address = {:?}", address);

    let mut resources: HostResources<
        DefaultPacketPool,
        CONNECTIONS_MAX,
        L2CAP_CHANNELS_MAX,
    > = HostResources::new();
    let stack = trouble_host::new(controller, &mut resources)
        .set_random_address(address);
    let Host {
        mut peripheral,
        mut runner,
        ..
    } = stack.build();

    let server = Server::new_with_config(GapConfig::Peripheral(
        PeripheralConfig {
            name: DEVICE_NAME,
            appearance: &appearance::sensor::MOTION_SENSOR,
        },
    ))
    .map_err(Error::Server)?;
    let events = SessionEvents::new();

    let connections = async {
        loop {
            match advertise(DEVICE_NAME, &mut peripheral, &server).await {
                Ok(conn) => {
                    leds.set_connected(true);
                    monitor.handle_event(SessionEvent::Connected);

                    let gatt =
                        gatt_events_task(&server, &conn, events.sender());
                    let stream = motion_stream(
                        monitor,
                        MotionNotifier::new(&server, &conn),
                        events.receiver(),
                    );
                    select(gatt, stream).await;

                    // Anything still queued belongs to the dropped link
                    events.clear();
                    monitor.handle_event(SessionEvent::Disconnected);
                    leds.set_connected(false);
                }
                Err(e) => {
                    error!("[adv] advertising failed: {:?}", e);
                    Timer::after_secs(1).await;
                }
            }
        }
    };

    match select3(runner.run(), battery_service(&server, battery), connections)
        .await
    {
        Either3::First(Err(e)) => {
            error!("[ble] host stopped: {:?}", e);
            Err(e.into())
        }
        _ => Ok(()),
    }
}

/// Poll the sensor at the client's sample interval, applying session events
/// as they arrive between polls.
async fn motion_stream<P: PacketPool>(
    monitor: &mut MotionMonitor,
    notifier: MotionNotifier<'_, '_, '_, P>,
    events: Receiver<'_, NoopRawMutex, SessionEvent, EVENT_QUEUE>,
) {
    let mut next_poll = Instant::now();
    loop {
        match select(events.receive(), Timer::at(next_poll)).await {
            Either::First(event) => monitor.handle_event(event),
            Either::Second(()) => {
                let period = Duration::from_millis(
                    monitor.sample_interval().as_millis().into(),
                );
                // Do not try to catch up on polls missed while stalled
                next_poll = (next_poll + period).max(Instant::now());

                match monitor.poll(&notifier).await {
                    Ok(PollOutcome::Sent(reason)) => {
                        trace!("[monitor] sent ({:?})", reason)
                    }
                    Ok(_) => {}
                    Err(e) => warn!("[monitor] sensor read failed: {:?}", e),
                }
            }
        }
    }
}

/// Refresh the battery level characteristic.
async fn battery_service(server: &Server<'_>, battery: &mut BatteryMonitor) {
    loop {
        let level = battery.percent().await;
        debug!("[battery] {}%", level);
        if let Err(e) = server.battery.level.set(server, &level) {
            warn!("[battery] could not update level: {:?}", e);
        }
        Timer::after(BATTERY_PERIOD).await;
    }
}
