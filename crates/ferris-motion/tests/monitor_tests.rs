use std::cell::{Cell, RefCell};
use std::rc::Rc;

use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};
use ferris_motion::mpu6050::{
    Address, Error, Mpu6050, RawSample, Register, SamplingConfig,
};
use ferris_motion::{
    ChannelError, Monitor, Notifier, PollOutcome, SampleInterval, SendReason,
    SessionEvent, ThrottleConfig,
};

// ---------------------------------------------------------------------------
// Mock bus
// ---------------------------------------------------------------------------

/// Register bank shared between the test and the mock bus.
struct Bank {
    regs: [u8; 128],
    transactions: usize,
    fail: bool,
}

#[derive(Clone)]
struct MockI2c {
    bank: Rc<RefCell<Bank>>,
}

impl MockI2c {
    fn new() -> Self {
        let mut regs = [0u8; 128];
        regs[Register::WHO_AM_I as usize] = 0x68;
        Self {
            bank: Rc::new(RefCell::new(Bank {
                regs,
                transactions: 0,
                fail: false,
            })),
        }
    }

    fn set_sample(&self, sample: RawSample) {
        let start = Register::ACCEL_XOUT_H as usize;
        self.bank.borrow_mut().regs[start..start + 6]
            .copy_from_slice(sample.as_bytes());
    }

    fn transactions(&self) -> usize {
        self.bank.borrow().transactions
    }

    fn set_fail(&self, fail: bool) {
        self.bank.borrow_mut().fail = fail;
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl embedded_hal_async::i2c::I2c for MockI2c {
    async fn transaction(
        &mut self,
        _address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut bank = self.bank.borrow_mut();
        if bank.fail {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data));
        }
        bank.transactions += 1;

        let mut pointer = 0usize;
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    if let Some((first, rest)) = bytes.split_first() {
                        pointer = *first as usize;
                        for value in rest {
                            bank.regs[pointer] = *value;
                            pointer += 1;
                        }
                    }
                }
                Operation::Read(buf) => {
                    for byte in buf.iter_mut() {
                        *byte = bank.regs[pointer];
                        pointer += 1;
                    }
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Mock notifier
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MockNotifier {
    sent: RefCell<Vec<[u8; 6]>>,
    fail_with: Cell<Option<ChannelError>>,
}

impl Notifier for MockNotifier {
    async fn notify(&self, sample: &RawSample) -> Result<(), ChannelError> {
        if let Some(e) = self.fail_with.get() {
            return Err(e);
        }
        self.sent.borrow_mut().push(sample.to_bytes());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

const FLAT: RawSample = RawSample::from_counts(0, 0, 0x4000);

async fn make_monitor() -> (Monitor<MockI2c>, MockI2c) {
    let bus = MockI2c::new();
    bus.set_sample(FLAT);
    let mut sensor =
        Mpu6050::new(bus.clone(), Address::AD0_HIGH, SamplingConfig::default());
    sensor.init().await.unwrap();
    (Monitor::new(sensor, ThrottleConfig::default()), bus)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[futures_test::test]
async fn idle_without_subscriber() {
    let (mut monitor, bus) = make_monitor().await;
    let notifier = MockNotifier::default();
    let before = bus.transactions();

    monitor.handle_event(SessionEvent::Connected);
    assert_eq!(monitor.poll(&notifier).await.unwrap(), PollOutcome::Idle);

    assert_eq!(bus.transactions(), before);
    assert!(notifier.sent.borrow().is_empty());
}

#[futures_test::test]
async fn subscribed_polls_push_raw_bytes() {
    let (mut monitor, _bus) = make_monitor().await;
    let notifier = MockNotifier::default();

    monitor.handle_event(SessionEvent::Connected);
    monitor.handle_event(SessionEvent::Subscribed);

    for _ in 0..5 {
        assert_eq!(
            monitor.poll(&notifier).await.unwrap(),
            PollOutcome::Sent(SendReason::Mandatory)
        );
    }
    assert_eq!(monitor.poll(&notifier).await.unwrap(), PollOutcome::Skipped);

    let sent = notifier.sent.borrow();
    assert_eq!(sent.len(), 5);
    assert!(sent.iter().all(|bytes| bytes == FLAT.as_bytes()));
}

#[futures_test::test]
async fn channel_failure_is_not_rolled_back() {
    let (mut monitor, _bus) = make_monitor().await;
    let notifier = MockNotifier::default();
    monitor.handle_event(SessionEvent::Subscribed);

    notifier.fail_with.set(Some(ChannelError::NotConnected));
    assert_eq!(
        monitor.poll(&notifier).await.unwrap(),
        PollOutcome::Dropped(ChannelError::NotConnected)
    );

    let state = *monitor.session().throttle().state().unwrap();
    assert_eq!(state.mandatory_remaining, 4);
    assert!(state.last_accepted.is_some());

    // The lost sample is not re-sent
    notifier.fail_with.set(None);
    monitor.poll(&notifier).await.unwrap();
    assert_eq!(notifier.sent.borrow().len(), 1);
    assert_eq!(
        monitor.session().throttle().state().unwrap().mandatory_remaining,
        3
    );
}

#[futures_test::test]
async fn bus_error_is_surfaced_per_poll() {
    let (mut monitor, bus) = make_monitor().await;
    let notifier = MockNotifier::default();
    monitor.handle_event(SessionEvent::Subscribed);

    bus.set_fail(true);
    let err = monitor.poll(&notifier).await.unwrap_err();
    assert!(matches!(err, Error::Bus(_)));
    assert!(notifier.sent.borrow().is_empty());

    // The next poll after recovery works without re-initialization
    bus.set_fail(false);
    assert_eq!(
        monitor.poll(&notifier).await.unwrap(),
        PollOutcome::Sent(SendReason::Mandatory)
    );
}

#[futures_test::test]
async fn disconnect_stops_polling() {
    let (mut monitor, bus) = make_monitor().await;
    let notifier = MockNotifier::default();
    monitor.handle_event(SessionEvent::Subscribed);
    monitor.poll(&notifier).await.unwrap();

    monitor.handle_event(SessionEvent::Disconnected);
    let before = bus.transactions();
    assert_eq!(monitor.poll(&notifier).await.unwrap(), PollOutcome::Idle);
    assert_eq!(bus.transactions(), before);
    assert!(!monitor.session().is_subscribed());
}

#[futures_test::test]
async fn unsubscribe_keeps_link_but_stops_notifications() {
    let (mut monitor, _bus) = make_monitor().await;
    let notifier = MockNotifier::default();
    monitor.handle_event(SessionEvent::Connected);
    monitor.handle_event(SessionEvent::Subscribed);
    monitor.handle_event(SessionEvent::Unsubscribed);

    assert_eq!(monitor.poll(&notifier).await.unwrap(), PollOutcome::Idle);
    assert_eq!(
        monitor.session().link(),
        ferris_motion::LinkState::Connected { subscribed: false }
    );
}

#[futures_test::test]
async fn sample_interval_follows_client_writes() {
    let (mut monitor, _bus) = make_monitor().await;
    assert_eq!(monitor.sample_interval(), SampleInterval::DEFAULT);

    monitor.handle_event(SampleInterval::from_millis(250).into());
    assert_eq!(monitor.sample_interval().as_millis(), 250);

    monitor.handle_event(SessionEvent::SampleIntervalChanged(
        SampleInterval::from_millis(1),
    ));
    assert_eq!(monitor.sample_interval().as_millis(), SampleInterval::MIN_MS);
}
