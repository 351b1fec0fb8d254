use micromath::F32Ext;
use mpu6050::AccelVector;

/// Squared magnitude of the cross product of two acceleration vectors.
///
/// Zero for parallel vectors and grows with both the angle between them and
/// their lengths. Only meaningful relative to a [`MotionThreshold`].
pub fn rotation_magnitude(current: &AccelVector, previous: &AccelVector) -> f32 {
    current.cross(previous).magnitude_squared()
}

/// Threshold applied to [`rotation_magnitude`].
///
/// Compared against a squared quantity, so it is built as
/// `reference² · sin(angle)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionThreshold(f32);

impl MotionThreshold {
    /// `10² · sin(5°)`
    pub const DEFAULT: Self = Self(8.715_574);

    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    pub fn from_angle(reference_magnitude: f32, degrees: f32) -> Self {
        let radians = degrees * (core::f32::consts::PI / 180.0);
        Self(reference_magnitude * reference_magnitude * radians.sin())
    }

    pub const fn value(&self) -> f32 {
        self.0
    }

    pub fn is_exceeded_by(&self, magnitude: f32) -> bool {
        magnitude > self.0
    }
}

impl Default for MotionThreshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}
