use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};
use mpu6050::{
    AccelFullScale, AccelVector, Address, Error, Mpu6050, PowerMode, Register,
    SamplingConfig, WakeFrequency,
};

// ---------------------------------------------------------------------------
// Mock bus
// ---------------------------------------------------------------------------

/// Register bank behind a fake I2C device with auto-incrementing pointer.
struct MockI2c {
    address: u8,
    regs: [u8; 128],
    pointer: usize,
    /// Every register write as `(register, value)`, in order.
    writes: Vec<(u8, u8)>,
    transactions: usize,
    /// Fail every transaction once this many have succeeded.
    fail_after: Option<usize>,
}

impl MockI2c {
    fn new(address: u8) -> Self {
        let mut regs = [0u8; 128];
        regs[Register::WHO_AM_I as usize] = 0x68;
        regs[Register::PWR_MGMT_1 as usize] = 0x40;
        Self {
            address,
            regs,
            pointer: 0,
            writes: Vec::new(),
            transactions: 0,
            fail_after: None,
        }
    }

    fn with_reg(mut self, reg: Register, value: u8) -> Self {
        self.regs[reg as usize] = value;
        self
    }

    fn with_accel(mut self, bytes: [u8; 6]) -> Self {
        let start = Register::ACCEL_XOUT_H as usize;
        self.regs[start..start + 6].copy_from_slice(&bytes);
        self
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl embedded_hal_async::i2c::I2c for MockI2c {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if let Some(limit) = self.fail_after {
            if self.transactions >= limit {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data));
            }
        }
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(
                NoAcknowledgeSource::Address,
            ));
        }
        self.transactions += 1;

        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    if let Some((first, rest)) = bytes.split_first() {
                        self.pointer = *first as usize;
                        for value in rest {
                            self.regs[self.pointer] = *value;
                            self.writes.push((self.pointer as u8, *value));
                            self.pointer += 1;
                        }
                    }
                }
                Operation::Read(buf) => {
                    for byte in buf.iter_mut() {
                        *byte = self.regs[self.pointer];
                        self.pointer += 1;
                    }
                }
            }
        }
        Ok(())
    }
}

fn make_driver(mock: MockI2c) -> Mpu6050<MockI2c> {
    Mpu6050::new(mock, Address::AD0_HIGH, SamplingConfig::default())
}

// ---------------------------------------------------------------------------
// Initialization
// ---------------------------------------------------------------------------

#[futures_test::test]
async fn init_writes_configuration_in_order() {
    let mut imu = make_driver(MockI2c::new(0x69));
    imu.init().await.unwrap();

    let mock = imu.release();
    assert_eq!(
        mock.writes,
        vec![
            (Register::SIGNAL_PATH_RESET as u8, 0x07),
            (Register::SMPLRT_DIV as u8, 19),
            (Register::CONFIG as u8, 0x04),
            (Register::ACCEL_CONFIG as u8, 0x00),
            (Register::PWR_MGMT_1 as u8, 0x29),
            (Register::PWR_MGMT_2 as u8, 0x47),
        ]
    );
}

#[futures_test::test]
async fn init_ends_in_cycled_low_power() {
    let mut imu = make_driver(MockI2c::new(0x69));
    assert_eq!(imu.power_mode(), None);

    imu.init().await.unwrap();
    assert_eq!(
        imu.power_mode(),
        Some(PowerMode::CycledLowPower(WakeFrequency::Hz5))
    );
}

#[futures_test::test]
async fn identity_mismatch_is_reported() {
    let mock = MockI2c::new(0x69).with_reg(Register::WHO_AM_I, 0x00);
    let mut imu = make_driver(mock);

    let err = imu.init().await.unwrap_err();
    assert_eq!(
        err,
        Error::IdentityMismatch {
            expected: 0x68,
            found: 0x00
        }
    );
    assert!(!err.is_bus());
    assert!(!imu.is_initialized());
}

#[futures_test::test]
async fn wrong_address_is_a_bus_error() {
    let mut imu = make_driver(MockI2c::new(0x68));

    let err = imu.init().await.unwrap_err();
    assert_eq!(
        err,
        Error::Bus(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))
    );
}

#[futures_test::test]
async fn bus_error_mid_init_leaves_driver_uninitialized() {
    let mut mock = MockI2c::new(0x69);
    mock.fail_after = Some(3);
    let mut imu = make_driver(mock);

    assert!(imu.init().await.unwrap_err().is_bus());
    assert!(!imu.is_initialized());
    assert_eq!(
        imu.read_acceleration().await.unwrap_err(),
        Error::NotInitialized
    );
}

#[futures_test::test]
async fn init_can_be_retried_after_failure() {
    let mut mock = MockI2c::new(0x69);
    mock.fail_after = Some(2);
    let mut imu = make_driver(mock);
    assert!(imu.init().await.is_err());

    let mut mock = imu.release();
    mock.fail_after = None;
    mock.writes.clear();
    let mut imu = make_driver(mock);

    imu.init().await.unwrap();
    assert!(imu.is_initialized());
    assert_eq!(imu.release().writes.len(), 6);
}

#[futures_test::test]
async fn init_honors_custom_config() {
    let config = SamplingConfig {
        sample_rate_divider: 7,
        accel_fsr: AccelFullScale::G8,
        power_mode: PowerMode::Active,
        ..Default::default()
    };
    let mut imu = Mpu6050::new(MockI2c::new(0x68), Address::AD0_LOW, config);
    imu.init().await.unwrap();

    let mock = imu.release();
    assert_eq!(mock.regs[Register::SMPLRT_DIV as usize], 7);
    assert_eq!(mock.regs[Register::ACCEL_CONFIG as usize], 0x10);
    assert_eq!(mock.regs[Register::PWR_MGMT_1 as usize], 0x09);
    assert_eq!(mock.regs[Register::PWR_MGMT_2 as usize], 0x07);
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[futures_test::test]
async fn read_acceleration_returns_burst_bytes() {
    let bytes = [0x40, 0x00, 0xC0, 0x00, 0x00, 0x10];
    let mut imu = make_driver(MockI2c::new(0x69).with_accel(bytes));
    imu.init().await.unwrap();

    let raw = imu.read_acceleration().await.unwrap();
    assert_eq!(raw.as_bytes(), &bytes);

    let accel = imu.read_acceleration_g().await.unwrap();
    assert_eq!(accel.x, 1.0);
    assert_eq!(accel.y, -1.0);
}

#[futures_test::test]
async fn read_before_init_touches_no_bus() {
    let mut imu = make_driver(MockI2c::new(0x69));

    assert_eq!(
        imu.read_acceleration().await.unwrap_err(),
        Error::NotInitialized
    );
    assert_eq!(imu.release().transactions, 0);
}

#[futures_test::test]
async fn read_failure_is_surfaced() {
    let mut mock = MockI2c::new(0x69);
    mock.fail_after = Some(7);
    let mut imu = make_driver(mock);
    imu.init().await.unwrap();

    assert!(imu.read_acceleration().await.unwrap_err().is_bus());
    // Steady state read errors do not invalidate the configuration
    assert!(imu.is_initialized());
}

#[futures_test::test]
async fn identical_reads_decode_identically() {
    let mut imu = make_driver(
        MockI2c::new(0x69).with_accel([0x12, 0x34, 0xAB, 0xCD, 0x7F, 0xFF]),
    );
    imu.init().await.unwrap();

    let a: AccelVector = imu.read_acceleration_g().await.unwrap();
    let b: AccelVector = imu.read_acceleration_g().await.unwrap();
    assert_eq!(a, b);
    assert!(a.x.abs() <= 2.0 && a.y.abs() <= 2.0 && a.z.abs() <= 2.0);
}

// ---------------------------------------------------------------------------
// Power modes
// ---------------------------------------------------------------------------

#[futures_test::test]
async fn power_transitions_write_mode_registers() {
    let mut imu = make_driver(MockI2c::new(0x69));
    imu.init().await.unwrap();

    imu.exit_low_power().await.unwrap();
    assert_eq!(imu.power_mode(), Some(PowerMode::Active));

    imu.enter_low_power(WakeFrequency::Hz40).await.unwrap();
    assert_eq!(
        imu.power_mode(),
        Some(PowerMode::CycledLowPower(WakeFrequency::Hz40))
    );

    imu.sleep().await.unwrap();
    assert_eq!(imu.power_mode(), Some(PowerMode::Sleep));

    let mock = imu.release();
    assert_eq!(
        &mock.writes[6..],
        &[
            (Register::PWR_MGMT_1 as u8, 0x09),
            (Register::PWR_MGMT_2 as u8, 0x07),
            (Register::PWR_MGMT_1 as u8, 0x29),
            (Register::PWR_MGMT_2 as u8, 0xC7),
            (Register::PWR_MGMT_1 as u8, 0x40),
        ]
    );
}

#[futures_test::test]
async fn power_transition_requires_init() {
    let mut imu = make_driver(MockI2c::new(0x69));

    assert_eq!(
        imu.enter_low_power(WakeFrequency::Hz20).await.unwrap_err(),
        Error::NotInitialized
    );
    assert_eq!(imu.exit_low_power().await.unwrap_err(), Error::NotInitialized);
}
