//! Float value queries
//!
//! This driver does no tracking. Rotation and position answer with identity
//! values and the distortion coefficients are a placeholder of zeros, not a
//! real "no distortion" model.

use std::fmt;

use crate::error::HmdError;

/// Value kinds a host can ask a device for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum FloatValue {
    RotationQuat = 1,
    LeftEyeGlModelviewMatrix = 2,
    RightEyeGlModelviewMatrix = 3,
    LeftEyeGlProjectionMatrix = 4,
    RightEyeGlProjectionMatrix = 5,
    PositionVector = 6,
    ScreenHorizontalSize = 7,
    ScreenVerticalSize = 8,
    LensHorizontalSeparation = 9,
    LensVerticalPosition = 10,
    LeftEyeFov = 11,
    LeftEyeAspectRatio = 12,
    RightEyeFov = 13,
    RightEyeAspectRatio = 14,
    EyeIpd = 15,
    ProjectionZfar = 16,
    ProjectionZnear = 17,
    DistortionK = 18,
}

impl FloatValue {
    /// Number of floats this kind fills in
    pub fn value_count(&self) -> usize {
        match self {
            FloatValue::RotationQuat => 4,
            FloatValue::PositionVector => 3,
            FloatValue::DistortionK => 6,
            FloatValue::LeftEyeGlModelviewMatrix
            | FloatValue::RightEyeGlModelviewMatrix
            | FloatValue::LeftEyeGlProjectionMatrix
            | FloatValue::RightEyeGlProjectionMatrix => 16,
            _ => 1,
        }
    }

    pub fn raw(&self) -> u32 {
        *self as u32
    }
}

impl fmt::Display for FloatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TryFrom<u32> for FloatValue {
    type Error = HmdError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Ok(match raw {
            1 => FloatValue::RotationQuat,
            2 => FloatValue::LeftEyeGlModelviewMatrix,
            3 => FloatValue::RightEyeGlModelviewMatrix,
            4 => FloatValue::LeftEyeGlProjectionMatrix,
            5 => FloatValue::RightEyeGlProjectionMatrix,
            6 => FloatValue::PositionVector,
            7 => FloatValue::ScreenHorizontalSize,
            8 => FloatValue::ScreenVerticalSize,
            9 => FloatValue::LensHorizontalSeparation,
            10 => FloatValue::LensVerticalPosition,
            11 => FloatValue::LeftEyeFov,
            12 => FloatValue::LeftEyeAspectRatio,
            13 => FloatValue::RightEyeFov,
            14 => FloatValue::RightEyeAspectRatio,
            15 => FloatValue::EyeIpd,
            16 => FloatValue::ProjectionZfar,
            17 => FloatValue::ProjectionZnear,
            18 => FloatValue::DistortionK,
            other => return Err(HmdError::InvalidValueKind(other)),
        })
    }
}

/// Fill `out` with the stub answer for `kind`
///
/// `out` is left untouched on error.
pub fn stub_value(kind: FloatValue, out: &mut [f32]) -> Result<(), HmdError> {
    let value: &[f32] = match kind {
        FloatValue::RotationQuat => &[0.0, 0.0, 0.0, 1.0],
        FloatValue::PositionVector => &[0.0, 0.0, 0.0],
        FloatValue::DistortionK => &[0.0; 6],
        other => return Err(HmdError::InvalidValueKind(other.raw())),
    };

    if out.len() < value.len() {
        return Err(HmdError::InvalidParameter(format!(
            "{kind} needs {} floats, got {}",
            value.len(),
            out.len()
        )));
    }

    out[..value.len()].copy_from_slice(value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_is_identity() {
        let mut out = [9.0f32; 4];
        stub_value(FloatValue::RotationQuat, &mut out).unwrap();
        assert_eq!(out, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_position_is_origin() {
        let mut out = [9.0f32; 4];
        stub_value(FloatValue::PositionVector, &mut out).unwrap();
        assert_eq!(out, [0.0, 0.0, 0.0, 9.0]);
    }

    #[test]
    fn test_distortion_is_six_zeros() {
        let mut out = [9.0f32; 6];
        stub_value(FloatValue::DistortionK, &mut out).unwrap();
        assert_eq!(out, [0.0; 6]);
    }

    #[test]
    fn test_unsupported_kind_leaves_output() {
        let mut out = [7.0f32; 16];
        let err = stub_value(FloatValue::EyeIpd, &mut out).unwrap_err();
        assert!(matches!(err, HmdError::InvalidValueKind(15)));
        assert_eq!(out, [7.0; 16]);
    }

    #[test]
    fn test_short_buffer_rejected() {
        let mut out = [5.0f32; 3];
        let err = stub_value(FloatValue::RotationQuat, &mut out).unwrap_err();
        assert!(matches!(err, HmdError::InvalidParameter(_)));
        assert_eq!(out, [5.0; 3]);
    }

    #[test]
    fn test_raw_conversion() {
        assert_eq!(FloatValue::try_from(1).unwrap(), FloatValue::RotationQuat);
        assert_eq!(FloatValue::try_from(18).unwrap(), FloatValue::DistortionK);
        assert_eq!(FloatValue::DistortionK.raw(), 18);
        assert!(matches!(
            FloatValue::try_from(0),
            Err(HmdError::InvalidValueKind(0))
        ));
        assert!(FloatValue::try_from(99).is_err());
    }

    #[test]
    fn test_lengths() {
        assert_eq!(FloatValue::RotationQuat.value_count(), 4);
        assert_eq!(FloatValue::PositionVector.value_count(), 3);
        assert_eq!(FloatValue::DistortionK.value_count(), 6);
        assert_eq!(FloatValue::LeftEyeGlProjectionMatrix.value_count(), 16);
        assert_eq!(FloatValue::EyeIpd.value_count(), 1);
    }
}
