use super::errors::RegisterError;

/// 7-bit I2C address of the sensor.
///
/// The MPU-6050 answers on `0b110100x`, where the last bit follows the AD0
/// pin. Addresses are always given in 7-bit form; the read/write bit is
/// appended by the bus implementation. Pre-shifted 8-bit values such as
/// `0xD0` are rejected by [`Address::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Address(u8);

impl Address {
    /// AD0 tied to GND (or left floating).
    pub const AD0_LOW: Self = Self(0x68);
    /// AD0 tied to VLOGIC.
    pub const AD0_HIGH: Self = Self(0x69);

    pub const fn new(addr: u8) -> Result<Self, RegisterError> {
        if addr > 0x7F {
            return Err(RegisterError::InvalidAddress(addr));
        }
        Ok(Self(addr))
    }

    pub const fn get(&self) -> u8 {
        self.0
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::AD0_LOW
    }
}

impl From<Address> for u8 {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

impl TryFrom<u8> for Address {
    type Error = RegisterError;

    fn try_from(addr: u8) -> Result<Self, Self::Error> {
        Self::new(addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_seven_bit_addresses() {
        assert_eq!(Address::new(0x69), Ok(Address::AD0_HIGH));
        assert_eq!(Address::default().get(), 0x68);
    }

    #[test]
    fn rejects_shifted_addresses() {
        assert_eq!(
            Address::try_from(0xD0),
            Err(RegisterError::InvalidAddress(0xD0))
        );
    }
}
