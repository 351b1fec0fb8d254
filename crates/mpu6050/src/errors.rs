#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<I2cE> {
    /// The underlying bus transaction failed.
    Bus(I2cE),
    /// `WHO_AM_I` answered with something other than an MPU-6050.
    IdentityMismatch { expected: u8, found: u8 },
    /// The driver has not completed `init()` since construction or since the last failure.
    NotInitialized,
    Register(RegisterError),
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Bus(err) => {
                write!(f, "I2C communication error: {:?}", err)
            }
            Error::IdentityMismatch { expected, found } => {
                write!(
                    f,
                    "Unexpected WHO_AM_I value: expected 0x{:02X}, found 0x{:02X}",
                    expected, found
                )
            }
            Error::NotInitialized => {
                write!(f, "Sensor has not been initialized")
            }
            Error::Register(value) => {
                write!(f, "Register Error: {}", value)
            }
        }
    }
}

impl<E> Error<E> {
    /// True when the failure came from the bus rather than the device contents.
    pub fn is_bus(&self) -> bool {
        matches!(self, Error::Bus(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterError {
    InvalidLowPassFilter(u8),
    InvalidClockSource(u8),
    InvalidAddress(u8),
}

impl core::fmt::Display for RegisterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RegisterError::InvalidLowPassFilter(value) => {
                write!(f, "Invalid low pass filter value: {}", value)
            }
            RegisterError::InvalidClockSource(value) => {
                write!(f, "Invalid clock source value: {}", value)
            }
            RegisterError::InvalidAddress(value) => {
                write!(f, "Invalid 7-bit address: 0x{:02X}", value)
            }
        }
    }
}

impl<I2cE> From<RegisterError> for Error<I2cE> {
    fn from(e: RegisterError) -> Self {
        Error::Register(e)
    }
}
