use super::registers::AccelFullScale;

/// Number of bytes in one accelerometer burst (`ACCEL_XOUT_H..=ACCEL_ZOUT_L`).
pub const SAMPLE_LEN: usize = 6;

/// Accelerometer registers exactly as read from the device.
///
/// Three big-endian two's complement pairs in X, Y, Z order. This is also the
/// payload pushed to a subscriber, so it is kept untouched.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample([u8; SAMPLE_LEN]);

impl RawSample {
    pub const fn from_bytes(data: [u8; SAMPLE_LEN]) -> Self {
        Self(data)
    }

    pub const fn from_counts(x: i16, y: i16, z: i16) -> Self {
        let x = x.to_be_bytes();
        let y = y.to_be_bytes();
        let z = z.to_be_bytes();
        Self([x[0], x[1], y[0], y[1], z[0], z[1]])
    }

    pub const fn as_bytes(&self) -> &[u8; SAMPLE_LEN] {
        &self.0
    }

    pub const fn to_bytes(self) -> [u8; SAMPLE_LEN] {
        self.0
    }

    /// Signed counts per axis.
    pub const fn counts(&self) -> (i16, i16, i16) {
        let d = &self.0;
        (
            i16::from_be_bytes([d[0], d[1]]),
            i16::from_be_bytes([d[2], d[3]]),
            i16::from_be_bytes([d[4], d[5]]),
        )
    }

    pub fn decode(&self, full_scale: AccelFullScale) -> AccelVector {
        decode(self, full_scale)
    }
}

impl From<[u8; SAMPLE_LEN]> for RawSample {
    fn from(data: [u8; SAMPLE_LEN]) -> Self {
        Self(data)
    }
}

/// Acceleration in g.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelVector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl AccelVector {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn magnitude_squared(&self) -> f32 {
        self.dot(self)
    }
}

/// Converts a raw register block into acceleration for the given range.
///
/// Each axis maps `[-32768, 32767]` onto `[-fs, fs)`, so `0x4000` at ±2 g is
/// exactly 1 g.
pub fn decode(raw: &RawSample, full_scale: AccelFullScale) -> AccelVector {
    let (x, y, z) = raw.counts();
    let scale = full_scale.g() / 32768.0;
    AccelVector {
        x: x as f32 * scale,
        y: y as f32 * scale,
        z: z as f32 * scale,
    }
}
